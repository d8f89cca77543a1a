use actix_web::{get, web, HttpResponse};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::SearchQuery;
use funcsearch_vector::Metric;

/// Best match for `query` under the metric in the path (cosine, dotproduct, euclidean)
#[get("/search/{metric}")]
pub async fn search(
    metric: web::Path<String>,
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let metric: Metric = metric.parse()?;
    let hit = state.service.search(metric, &query.query).await?;

    Ok(HttpResponse::Ok().json(hit))
}

#[get("/search/stats")]
pub async fn search_stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.service.stats())
}

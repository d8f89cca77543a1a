use actix_web::{get, post, web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{CollectionResponse, SuccessResponse};

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(SuccessResponse {
        success: true,
        message: None,
    })
}

/// Re-read the collection file and swap it in
#[post("/collection/reload")]
pub async fn reload(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    info!("Collection reload requested");

    let total_records = state.service.reload().await?;
    let checksum = state.service.snapshot().and_then(|s| s.checksum.clone());

    Ok(HttpResponse::Ok().json(CollectionResponse {
        success: true,
        total_records,
        checksum,
        message: "Reloaded DB".to_string(),
    }))
}

/// Persist the published collection
#[post("/collection/save")]
pub async fn save(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let (total_records, checksum) = state.service.save().await?;

    Ok(HttpResponse::Ok().json(CollectionResponse {
        success: true,
        total_records,
        checksum: Some(checksum),
        message: format!("Saved to {}", state.service.collection_path().display()),
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::configure;
    use crate::service::tests::{sample_collection, KeywordProvider};
    use crate::state::AppState;
    use crate::types::CollectionResponse;
    use actix_web::{test, web, App};
    use funcsearch_common::AppConfig;
    use std::sync::Arc;

    fn state_at(path: &std::path::Path) -> web::Data<AppState> {
        let mut config = AppConfig::default();
        config.embedding_dimension = 2;
        config.collection_path = path.to_path_buf();
        web::Data::new(AppState::with_provider(config, Arc::new(KeywordProvider)))
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_save_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_at(&dir.path().join("vectors.json"));
        state.service.publish(sample_collection(), None);
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/collection/save").to_request();
        let saved: CollectionResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(saved.total_records, 3);

        state.service.publish(funcsearch_vector::VectorCollection::new(2), None);

        let req = test::TestRequest::post().uri("/collection/reload").to_request();
        let reloaded: CollectionResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reloaded.total_records, 3);
        assert_eq!(reloaded.checksum, saved.checksum);
    }

    #[actix_web::test]
    async fn test_reload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_at(&dir.path().join("absent.json"));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post().uri("/collection/reload").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }
}

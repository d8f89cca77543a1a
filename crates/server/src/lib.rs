//! funcsearch HTTP server
//!
//! Actix-web 기반 검색 REST API

mod error;
mod routes;
mod service;
mod state;
mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use funcsearch_common::{AppConfig, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use error::ApiError;
pub use routes::configure;
pub use service::{Snapshot, VectorDbService};
pub use state::AppState;
pub use types::{CollectionResponse, SearchHit, StatsResponse};

/// Load the collection and serve the search API until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = AppState::new(config)?;
    state.service.initialize().await?;

    let state = web::Data::new(state);

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}

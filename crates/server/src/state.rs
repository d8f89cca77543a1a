use funcsearch_common::{AppConfig, Result};
use funcsearch_embedding::{create_provider, EmbeddingProvider};
use std::sync::Arc;

use crate::service::VectorDbService;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Vector search service
    pub service: VectorDbService,
}

impl AppState {
    /// Create new application state with the configured embedding provider
    pub fn new(config: AppConfig) -> Result<Self> {
        let provider = create_provider(&config)?;
        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(config: AppConfig, provider: Arc<dyn EmbeddingProvider>) -> Self {
        let service = VectorDbService::from_config(&config, provider);
        Self { config, service }
    }
}

use async_trait::async_trait;
use funcsearch_common::{AppConfig, EmbeddingProviderKind, Result};
use std::sync::Arc;

use crate::ollama::OllamaClient;
use crate::openai::OpenAiClient;

/// Turns free text into an embedding vector
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Model (or deployment) name used for every call
    fn model(&self) -> &str;
}

/// Build the provider selected in configuration
pub fn create_provider(config: &AppConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.embedding_provider {
        EmbeddingProviderKind::OpenAi => Arc::new(OpenAiClient::new(
            &config.embedding_base_url,
            config.embedding_api_key.clone(),
            &config.embedding_model,
        )?),
        EmbeddingProviderKind::Ollama => Arc::new(OllamaClient::new(
            &config.embedding_base_url,
            &config.embedding_model,
        )?),
    };

    Ok(provider)
}

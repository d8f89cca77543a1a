use async_trait::async_trait;
use funcsearch_common::{FuncSearchError, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::provider::EmbeddingProvider;
use crate::retry::{with_retry, MAX_RETRIES};
use crate::types::{OllamaEmbedRequest, OllamaEmbedResponse};

/// Ollama embedding client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| FuncSearchError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama embedding client initialized: {} (model={})", base_url, model);
        Ok(Self { base_url, model, client })
    }

    /// Single attempt to generate embedding
    async fn try_embed(&self, url: &str, request: &OllamaEmbedRequest) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| FuncSearchError::network(format!("Failed to send embedding request: {}", e)))?
            .error_for_status()
            .map_err(|e| FuncSearchError::embedding(format!("Ollama embedding API error: {}", e)))?;

        let result: OllamaEmbedResponse = response.json().await
            .map_err(|e| FuncSearchError::embedding(format!("Failed to parse embedding response: {}", e)))?;

        if result.embedding.is_empty() {
            return Err(FuncSearchError::embedding("Empty embedding from Ollama"));
        }

        Ok(result.embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);

        debug!("Generating embedding - Model: {}, Text length: {}", self.model, text.len());

        let request = OllamaEmbedRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let embedding = with_retry("Ollama embedding request", MAX_RETRIES, || {
            self.try_embed(&url, &request)
        })
        .await?;

        debug!("Received embedding - Dimension: {}", embedding.len());
        Ok(embedding)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

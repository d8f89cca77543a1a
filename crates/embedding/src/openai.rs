use async_trait::async_trait;
use funcsearch_common::{FuncSearchError, Result};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::provider::EmbeddingProvider;
use crate::retry::{with_retry, MAX_RETRIES};
use crate::types::{OpenAiEmbedRequest, OpenAiEmbedResponse};

/// OpenAI-compatible embedding client (`POST {base_url}/embeddings`)
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: Client,
}

impl OpenAiClient {
    /// Create new OpenAI-compatible client
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| FuncSearchError::network(format!("Failed to create HTTP client: {}", e)))?;

        if api_key.is_none() {
            warn!("EMBEDDING_API_KEY is not set; requests to {} are unauthenticated", base_url);
        }

        info!("OpenAI embedding client initialized: {} (model={})", base_url, model);
        Ok(Self {
            base_url,
            api_key,
            model,
            client,
        })
    }

    /// Single attempt to generate embedding
    async fn try_embed(&self, url: &str, request: &OpenAiEmbedRequest) -> Result<Vec<f32>> {
        let mut builder = self.client.post(url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FuncSearchError::network(format!("Failed to send embedding request: {}", e)))?
            .error_for_status()
            .map_err(|e| FuncSearchError::embedding(format!("Embedding API error: {}", e)))?;

        let result: OpenAiEmbedResponse = response.json().await
            .map_err(|e| FuncSearchError::embedding(format!("Failed to parse embedding response: {}", e)))?;

        match result.into_first() {
            Some(embedding) if !embedding.is_empty() => Ok(embedding),
            _ => Err(FuncSearchError::embedding("Empty embedding from provider")),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/embeddings", self.base_url);

        debug!("Generating embedding - Model: {}, Text length: {}", self.model, text.len());

        let request = OpenAiEmbedRequest {
            model: self.model.clone(),
            input: vec![text.to_string()],
        };

        let embedding = with_retry("Embedding request", MAX_RETRIES, || {
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

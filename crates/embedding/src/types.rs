use serde::{Deserialize, Serialize};

/// Ollama embedding request
#[derive(Debug, Clone, Serialize)]
pub struct OllamaEmbedRequest {
    /// Model name (e.g., "nomic-embed-text")
    pub model: String,

    /// Text to embed
    pub prompt: String,
}

/// Ollama embedding response
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaEmbedResponse {
    pub embedding: Vec<f32>,
}

/// OpenAI-compatible embedding request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiEmbedRequest {
    /// Model or deployment name
    pub model: String,

    /// Texts to embed (one per call here)
    pub input: Vec<String>,
}

/// OpenAI-compatible embedding response
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiEmbedResponse {
    pub data: Vec<OpenAiEmbedding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiEmbedding {
    pub embedding: Vec<f32>,

    #[serde(default)]
    pub index: usize,
}

impl OpenAiEmbedResponse {
    /// Embedding for the first input, if any
    pub fn into_first(self) -> Option<Vec<f32>> {
        self.data
            .into_iter()
            .min_by_key(|d| d.index)
            .map(|d| d.embedding)
    }
}

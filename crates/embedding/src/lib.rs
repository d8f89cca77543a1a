//! funcsearch embedding providers
//!
//! 텍스트를 고정 차원 임베딩 벡터로 변환하는 외부 API 클라이언트

mod ollama;
mod openai;
mod provider;
mod retry;
mod types;

pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use provider::{create_provider, EmbeddingProvider};
pub use types::{OllamaEmbedRequest, OllamaEmbedResponse, OpenAiEmbedRequest, OpenAiEmbedResponse};

pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, EmbeddingProviderKind};
pub use error::FuncSearchError;
pub type Result<T> = std::result::Result<T, FuncSearchError>;

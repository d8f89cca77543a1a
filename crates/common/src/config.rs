use crate::error::FuncSearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Embedding dimension of the reference deployment (text-embedding-ada-002)
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

/// Which embedding API the service talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// OpenAI-compatible `/embeddings` endpoint (OpenAI, Azure OpenAI proxies, vLLM, ...)
    OpenAi,
    /// Ollama `/api/embeddings`
    Ollama,
}

impl FromStr for EmbeddingProviderKind {
    type Err = FuncSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            other => Err(FuncSearchError::config(format!(
                "Unknown embedding provider '{}' (expected openai or ollama)",
                other
            ))),
        }
    }
}

impl fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

/// funcsearch application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database base path
    pub db_base_path: PathBuf,

    /// Persisted vector collection (JSON array of records)
    pub collection_path: PathBuf,

    /// Embedding provider
    pub embedding_provider: EmbeddingProviderKind,

    /// Embedding API base URL
    pub embedding_base_url: String,

    /// Embedding API key (OpenAI-compatible providers)
    #[serde(skip_serializing)]
    pub embedding_api_key: Option<String>,

    /// Embedding model / deployment name
    pub embedding_model: String,

    /// Embedding dimension shared by every stored vector
    pub embedding_dimension: usize,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_base_path: PathBuf::from("./db"),
            collection_path: PathBuf::from("./db/function_vectors.json"),
            embedding_provider: EmbeddingProviderKind::OpenAi,
            embedding_base_url: "https://api.openai.com/v1".to_string(),
            embedding_api_key: None,
            embedding_model: "text-embedding-ada-002".to_string(),
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./db/log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, FuncSearchError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let embedding_provider = match std::env::var("EMBEDDING_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.embedding_provider,
        };

        let embedding_dimension = match std::env::var("EMBEDDING_DIMENSION") {
            Ok(value) => value.trim().parse().map_err(|e| {
                FuncSearchError::config(format!("Invalid EMBEDDING_DIMENSION '{}': {}", value, e))
            })?,
            Err(_) => defaults.embedding_dimension,
        };

        let config = Self {
            db_base_path: Self::get_env_path("DB_BASE_PATH")
                .unwrap_or(defaults.db_base_path),
            collection_path: Self::get_env_path("COLLECTION_PATH")
                .unwrap_or(defaults.collection_path),
            embedding_provider,
            embedding_base_url: std::env::var("EMBEDDING_BASE_URL")
                .unwrap_or(defaults.embedding_base_url),
            embedding_api_key: std::env::var("EMBEDDING_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            embedding_dimension,
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or(defaults.server_host),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR")
                .unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL")
                .unwrap_or(defaults.log_level),
        };

        config.validate()?;

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), FuncSearchError> {
        let mut dirs = vec![self.db_base_path.as_path(), self.log_dir.as_path()];
        if let Some(parent) = self.collection_path.parent() {
            if !parent.as_os_str().is_empty() {
                dirs.push(parent);
            }
        }

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    FuncSearchError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), FuncSearchError> {
        if self.embedding_dimension == 0 {
            return Err(FuncSearchError::config("Embedding dimension cannot be 0"));
        }

        if self.embedding_model.trim().is_empty() {
            return Err(FuncSearchError::config("Embedding model name cannot be empty"));
        }

        if !self.embedding_base_url.starts_with("http://")
            && !self.embedding_base_url.starts_with("https://") {
            return Err(FuncSearchError::config(
                "Embedding base URL must start with http:// or https://"
            ));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(FuncSearchError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

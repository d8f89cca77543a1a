/// funcsearch error types
#[derive(Debug, thiserror::Error)]
pub enum FuncSearchError {
    /// Vector length disagrees with the collection dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Query issued against a collection with no records
    #[error("Collection is empty")]
    EmptyCollection,

    /// Record has no embedding set
    #[error("Record {id} has no embedding")]
    MissingVector { id: i64 },

    /// Persisted collection payload could not be decoded
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// No collection has been published yet
    #[error("Collection not loaded: {0}")]
    NotLoaded(String),

    /// Embedding provider error
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// CSV ingestion error
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FuncSearchError {
    /// Create dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create deserialization error
    pub fn deserialization<S: Into<String>>(msg: S) -> Self {
        Self::Deserialization(msg.into())
    }

    /// Create not loaded error
    pub fn not_loaded<S: Into<String>>(msg: S) -> Self {
        Self::NotLoaded(msg.into())
    }

    /// Create embedding error
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create ingest error
    pub fn ingest<S: Into<String>>(msg: S) -> Self {
        Self::Ingest(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion
impl FuncSearchError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::DimensionMismatch { .. } => 400,
            Self::NotFound(_) => 404,
            Self::EmptyCollection => 422,
            Self::MissingVector { .. } => 422,
            Self::Deserialization(_) => 500,
            Self::NotLoaded(_) => 503,
            Self::Network(_) => 503,
            Self::Embedding(_) => 502,
            Self::Ingest(_) => 400,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }
}

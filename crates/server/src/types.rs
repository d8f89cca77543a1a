use chrono::{DateTime, Utc};
use funcsearch_vector::{FunctionCodePair, Metric, SearchResult};
use serde::{Deserialize, Serialize};

/// Search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text query to embed
    pub query: String,
}

/// Best match for a query, without the stored vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Matched record id
    pub id: i32,

    /// Matched function description
    pub function: String,

    /// Matched function code
    pub code: String,

    /// Score under `metric` (higher is better; negated distance for euclidean)
    pub value: f32,

    /// Scan time in milliseconds
    pub ms: f64,

    /// Metric used
    pub metric: Metric,
}

impl SearchHit {
    pub fn new(result: SearchResult<'_, FunctionCodePair>, metric: Metric) -> Self {
        Self {
            id: result.item.id,
            function: result.item.function.clone(),
            code: result.item.code.clone(),
            value: result.value,
            ms: result.ms,
            metric,
        }
    }
}

/// Collection statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Whether a collection is published
    pub loaded: bool,

    /// Record count
    pub total_records: usize,

    /// Records without an embedding
    pub missing_vectors: usize,

    /// Embedding dimension
    pub dimension: usize,

    /// Embedding model
    pub embedding_model: String,

    /// SHA-256 of the loaded payload
    pub checksum: Option<String>,

    /// When the current collection was published
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Reload / save response
#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionResponse {
    pub success: bool,
    pub total_records: usize,
    pub checksum: Option<String>,
    pub message: String,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: Option<String>,
}

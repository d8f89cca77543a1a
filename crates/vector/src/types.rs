use funcsearch_common::{FuncSearchError, Result};
use serde::{Deserialize, Serialize};

/// A record that exposes exactly one embedding vector
pub trait HasEmbedding {
    /// Embedding of this record; `MissingVector` when none has been set
    fn embedding(&self) -> Result<&[f32]>;
}

/// Function description / code pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCodePair {
    /// Record identifier (not required to be unique)
    #[serde(alias = "Id")]
    pub id: i32,

    /// Natural-language description of the function
    #[serde(alias = "Function")]
    pub function: String,

    /// Function body
    #[serde(alias = "Code")]
    pub code: String,

    /// Embedding of `function`
    #[serde(default, alias = "FunctionVector")]
    pub function_vector: Option<Vec<f32>>,
}

impl FunctionCodePair {
    /// Create a pair without an embedding
    pub fn new(id: i32, function: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            function: function.into(),
            code: code.into(),
            function_vector: None,
        }
    }

    /// Attach an embedding
    pub fn with_vector(mut self, vector: Vec<f32>) -> Self {
        self.function_vector = Some(vector);
        self
    }

    pub fn has_vector(&self) -> bool {
        self.function_vector.is_some()
    }
}

impl HasEmbedding for FunctionCodePair {
    fn embedding(&self) -> Result<&[f32]> {
        self.function_vector
            .as_deref()
            .ok_or(FuncSearchError::MissingVector { id: i64::from(self.id) })
    }
}

/// Best match returned by a collection scan
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a, T> {
    /// Matched record
    pub item: &'a T,

    /// Score under the requested metric (higher is better)
    pub value: f32,

    /// Elapsed scan time in milliseconds (informational)
    pub ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_missing() {
        let pair = FunctionCodePair::new(9, "adds numbers", "fn add() {}");
        match pair.embedding() {
            Err(FuncSearchError::MissingVector { id }) => assert_eq!(id, 9),
            other => panic!("expected MissingVector, got {:?}", other),
        }
    }

    #[test]
    fn test_embedding_present() {
        let pair = FunctionCodePair::new(1, "f", "c").with_vector(vec![0.5, 0.25]);
        assert!(pair.has_vector());
        assert_eq!(pair.embedding().unwrap(), &[0.5, 0.25]);
    }

    #[test]
    fn test_json_field_names() {
        let pair = FunctionCodePair::new(4, "reverse a string", "s.chars().rev()").with_vector(vec![1.0]);
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["function"], "reverse a string");
        assert_eq!(json["code"], "s.chars().rev()");
        assert_eq!(json["functionVector"][0], 1.0);
    }

    #[test]
    fn test_deserialize_without_vector() {
        let pair: FunctionCodePair =
            serde_json::from_str(r#"{"id": 2, "function": "f", "code": "c"}"#).unwrap();
        assert_eq!(pair.function_vector, None);

        let pair: FunctionCodePair =
            serde_json::from_str(r#"{"id": 2, "function": "f", "code": "c", "functionVector": null}"#).unwrap();
        assert_eq!(pair.function_vector, None);
    }

    #[test]
    fn test_deserialize_pascal_case_aliases() {
        let pair: FunctionCodePair = serde_json::from_str(
            r#"{"Id": 5, "Function": "f", "Code": "c", "FunctionVector": [0.5]}"#,
        )
        .unwrap();
        assert_eq!(pair.id, 5);
        assert_eq!(pair.function_vector, Some(vec![0.5]));
    }
}

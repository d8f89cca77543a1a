//! Bulk ingestion: CSV rows in, embedded `FunctionCodePair`s out.
//!
//! Expected header: `id,FunctionDescription,FunctionCode`.

use funcsearch_common::{FuncSearchError, Result};
use funcsearch_embedding::EmbeddingProvider;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::types::FunctionCodePair;

/// One CSV row before embedding
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvRow {
    pub id: i32,

    #[serde(rename = "FunctionDescription", default)]
    pub function: String,

    #[serde(rename = "FunctionCode", default)]
    pub code: String,
}

/// Parse every row of a headed CSV document
pub fn parse_csv_rows<R: Read>(reader: R) -> Result<Vec<CsvRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = record.map_err(|e| FuncSearchError::ingest(format!("Row {}: {}", line + 1, e)))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Embed each row's description, in order, one provider call per row.
///
/// Embeddings whose length differs from `dimension` are rejected.
pub async fn embed_rows(
    rows: Vec<CsvRow>,
    provider: &dyn EmbeddingProvider,
    dimension: usize,
    show_progress: bool,
) -> Result<Vec<FunctionCodePair>> {
    let progress = if show_progress {
        let pb = ProgressBar::new(rows.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .map_err(|e| FuncSearchError::internal(format!("Invalid progress template: {}", e)))?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut pairs = Vec::with_capacity(rows.len());
    for row in rows {
        debug!("Embedding row {} ({} chars)", row.id, row.function.len());
        let vector = provider.embed(&row.function).await?;
        if vector.len() != dimension {
            return Err(FuncSearchError::dimension_mismatch(dimension, vector.len()));
        }

        pairs.push(FunctionCodePair::new(row.id, row.function, row.code).with_vector(vector));
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(pairs)
}

/// Read a CSV file and embed every row with `provider`
pub async fn load_pairs_from_csv(
    path: &Path,
    provider: &dyn EmbeddingProvider,
    dimension: usize,
    show_progress: bool,
) -> Result<Vec<FunctionCodePair>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FuncSearchError::not_found(format!("CSV file {}", path.display()))
        } else {
            FuncSearchError::Io(e)
        }
    })?;

    let rows = parse_csv_rows(bytes.as_slice())?;
    info!(
        "Embedding {} rows from {} with model {}",
        rows.len(),
        path.display(),
        provider.model()
    );

    embed_rows(rows, provider, dimension, show_progress).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Embeds text as [len, vowel count]
    struct FakeProvider {
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn new() -> Self {
            Self { calls: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for FakeProvider {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.lock().unwrap().push(text.to_string());
            let vowels = text.chars().filter(|c| "aeiou".contains(*c)).count();
            Ok(vec![text.len() as f32, vowels as f32])
        }

        fn model(&self) -> &str {
            "fake"
        }
    }

    const CSV: &str = "id,FunctionDescription,FunctionCode\n\
                       1,adds two numbers,\"fn add(a: i32, b: i32) -> i32 { a + b }\"\n\
                       2,reverses a string,s.chars().rev().collect()\n\
                       1,adds two numbers,a + b\n";

    #[test]
    fn test_parse_rows() {
        let rows = parse_csv_rows(CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].code, "fn add(a: i32, b: i32) -> i32 { a + b }");
        assert_eq!(rows[1].function, "reverses a string");
        assert_eq!(rows[2].id, 1);
    }

    #[test]
    fn test_parse_bad_id() {
        let data = "id,FunctionDescription,FunctionCode\nabc,desc,code\n";
        let result = parse_csv_rows(data.as_bytes());
        assert!(matches!(result, Err(FuncSearchError::Ingest(_))));
    }

    #[tokio::test]
    async fn test_embed_rows_in_order() {
        let provider = FakeProvider::new();
        let rows = parse_csv_rows(CSV.as_bytes()).unwrap();

        let pairs = embed_rows(rows, &provider, 2, false).await.unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[1].function_vector, Some(vec![17.0, 5.0]));
        assert!(pairs.iter().all(|p| p.has_vector()));

        let calls = provider.calls.lock().unwrap();
        assert_eq!(*calls, vec!["adds two numbers", "reverses a string", "adds two numbers"]);
    }

    #[tokio::test]
    async fn test_embed_rows_dimension_check() {
        let provider = FakeProvider::new();
        let rows = parse_csv_rows(CSV.as_bytes()).unwrap();

        let result = embed_rows(rows, &provider, 1536, false).await;
        assert!(matches!(
            result,
            Err(FuncSearchError::DimensionMismatch { expected: 1536, actual: 2 })
        ));
    }

    #[tokio::test]
    async fn test_load_pairs_from_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        tokio::fs::write(&path, CSV).await.unwrap();

        let provider = FakeProvider::new();
        let pairs = load_pairs_from_csv(&path, &provider, 2, false).await.unwrap();
        let ids: Vec<i32> = pairs.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 1]);
    }
}

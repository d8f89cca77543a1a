use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use funcsearch_common::{AppConfig, FuncSearchError, Result};
use funcsearch_embedding::EmbeddingProvider;
use funcsearch_vector::{
    ingest, store, FunctionCodePair, HasEmbedding, Metric, VectorCollection,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::types::{SearchHit, StatsResponse};

/// A published collection. Replaced whole, never mutated in place.
#[derive(Debug)]
pub struct Snapshot {
    pub collection: VectorCollection<FunctionCodePair>,
    pub checksum: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

/// Search service around a hot-swappable collection
pub struct VectorDbService {
    current: ArcSwapOption<Snapshot>,
    provider: Arc<dyn EmbeddingProvider>,
    collection_path: PathBuf,
    dimension: usize,
}

impl VectorDbService {
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        collection_path: impl Into<PathBuf>,
        dimension: usize,
    ) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            provider,
            collection_path: collection_path.into(),
            dimension,
        }
    }

    pub fn from_config(config: &AppConfig, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::new(provider, &config.collection_path, config.embedding_dimension)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn collection_path(&self) -> &Path {
        &self.collection_path
    }

    /// Load the collection file if present. A missing file leaves the service empty.
    pub async fn initialize(&self) -> Result<()> {
        match self.reload().await {
            Ok(count) => {
                info!("Vector DB service initialized - {} records", count);
                Ok(())
            }
            Err(FuncSearchError::NotFound(msg)) => {
                warn!("{} does not exist; searches fail until a collection is loaded", msg);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Re-read the collection file and publish it. On failure the previous collection stays.
    pub async fn reload(&self) -> Result<usize> {
        let loaded = store::load_collection::<FunctionCodePair>(&self.collection_path, self.dimension).await?;
        let count = loaded.collection.len();
        self.publish(loaded.collection, Some(loaded.checksum));
        Ok(count)
    }

    /// Atomically replace the published collection
    pub fn publish(&self, collection: VectorCollection<FunctionCodePair>, checksum: Option<String>) {
        self.current.store(Some(Arc::new(Snapshot {
            collection,
            checksum,
            loaded_at: Utc::now(),
        })));
    }

    /// Current snapshot, if any
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    /// Embed `text` and return the best match under `metric`
    pub async fn search(&self, metric: Metric, text: &str) -> Result<SearchHit> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FuncSearchError::invalid_input("Query cannot be empty"));
        }

        let snapshot = self
            .snapshot()
            .ok_or_else(|| FuncSearchError::not_loaded("no vector collection has been loaded"))?;

        let query = self.provider.embed(text).await?;

        let result = snapshot
            .collection
            .find_by_metric(metric, &query, |pair| pair.embedding())?;

        info!(
            "Search ({}) matched id={} value={} in {:.3} ms",
            metric, result.item.id, result.value, result.ms
        );

        Ok(SearchHit::new(result, metric))
    }

    /// Persist the current snapshot to the collection file
    pub async fn save(&self) -> Result<(usize, String)> {
        let snapshot = self
            .snapshot()
            .ok_or_else(|| FuncSearchError::not_loaded("nothing to save"))?;

        let checksum = store::save_collection(&snapshot.collection, &self.collection_path).await?;
        Ok((snapshot.collection.len(), checksum))
    }

    /// Ingest a CSV, persist it to `output`, and publish it
    pub async fn build_from_csv(&self, csv_path: &Path, output: &Path, show_progress: bool) -> Result<usize> {
        let pairs =
            ingest::load_pairs_from_csv(csv_path, self.provider.as_ref(), self.dimension, show_progress).await?;

        let mut collection = VectorCollection::new(self.dimension);
        collection.add_range(pairs);

        let checksum = store::save_collection(&collection, output).await?;
        let count = collection.len();
        self.publish(collection, Some(checksum));
        Ok(count)
    }

    pub fn stats(&self) -> StatsResponse {
        let snapshot = self.snapshot();
        StatsResponse {
            loaded: snapshot.is_some(),
            total_records: snapshot.as_ref().map_or(0, |s| s.collection.len()),
            missing_vectors: snapshot.as_ref().map_or(0, |s| s.collection.missing_vector_count()),
            dimension: self.dimension,
            embedding_model: self.provider.model().to_string(),
            checksum: snapshot.as_ref().and_then(|s| s.checksum.clone()),
            loaded_at: snapshot.as_ref().map(|s| s.loaded_at),
        }
    }
}

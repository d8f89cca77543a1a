use funcsearch_common::{FuncSearchError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

use crate::math::Metric;
use crate::types::{HasEmbedding, SearchResult};

/// Ordered, in-memory collection of vector-bearing records.
///
/// Records keep insertion order and may repeat. Searches are exact
/// brute-force scans, O(N·D) per query.
#[derive(Debug, Clone)]
pub struct VectorCollection<T> {
    dimension: usize,
    records: Vec<T>,
}

impl<T: HasEmbedding> VectorCollection<T> {
    /// Create empty collection
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            records: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Append one record
    pub fn add(&mut self, record: T) {
        self.records.push(record);
    }

    /// Append records, keeping their relative order
    pub fn add_range(&mut self, records: impl IntoIterator<Item = T>) {
        self.records.extend(records);
    }

    /// Scan every record and return the one maximizing `strategy(candidate, query)`.
    ///
    /// Ties keep the earliest inserted record.
    pub fn find_best_match<S, F>(
        &self,
        query: &[f32],
        selector: S,
        strategy: F,
    ) -> Result<SearchResult<'_, T>>
    where
        S: Fn(&T) -> Result<&[f32]>,
        F: Fn(&[f32], &[f32]) -> Result<f32>,
    {
        let start = Instant::now();

        if self.records.is_empty() {
            return Err(FuncSearchError::EmptyCollection);
        }
        if query.len() != self.dimension {
            return Err(FuncSearchError::dimension_mismatch(self.dimension, query.len()));
        }

        let mut best_value = f32::NEG_INFINITY;
        let mut best_index = 0;

        for (i, record) in self.records.iter().enumerate() {
            let candidate = selector(record)?;
            if candidate.len() != self.dimension {
                return Err(FuncSearchError::dimension_mismatch(self.dimension, candidate.len()));
            }

            let current_value = strategy(candidate, query)?;
            if current_value > best_value {
                best_value = current_value;
                best_index = i;
            }
        }

        let ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "Best match scan - records: {}, index: {}, value: {}, {:.3} ms",
            self.records.len(),
            best_index,
            best_value,
            ms
        );

        Ok(SearchResult {
            item: &self.records[best_index],
            value: best_value,
            ms,
        })
    }

    pub fn find_by_dot_product<S>(&self, query: &[f32], selector: S) -> Result<SearchResult<'_, T>>
    where
        S: Fn(&T) -> Result<&[f32]>,
    {
        let dimension = self.dimension;
        self.find_best_match(query, selector, |a, b| Metric::DotProduct.score(a, b, dimension))
    }

    pub fn find_by_cosine_similarity<S>(&self, query: &[f32], selector: S) -> Result<SearchResult<'_, T>>
    where
        S: Fn(&T) -> Result<&[f32]>,
    {
        let dimension = self.dimension;
        self.find_best_match(query, selector, |a, b| Metric::CosineSimilarity.score(a, b, dimension))
    }

    /// Closest record by Euclidean distance; the returned value is the negated distance
    pub fn find_by_euclidean_distance<S>(&self, query: &[f32], selector: S) -> Result<SearchResult<'_, T>>
    where
        S: Fn(&T) -> Result<&[f32]>,
    {
        let dimension = self.dimension;
        self.find_best_match(query, selector, |a, b| Metric::EuclideanDistance.score(a, b, dimension))
    }

    /// Dispatch to the adapter for `metric`
    pub fn find_by_metric<S>(&self, metric: Metric, query: &[f32], selector: S) -> Result<SearchResult<'_, T>>
    where
        S: Fn(&T) -> Result<&[f32]>,
    {
        match metric {
            Metric::DotProduct => self.find_by_dot_product(query, selector),
            Metric::CosineSimilarity => self.find_by_cosine_similarity(query, selector),
            Metric::EuclideanDistance => self.find_by_euclidean_distance(query, selector),
        }
    }

    /// Number of records whose embedding is unset
    pub fn missing_vector_count(&self) -> usize {
        self.records.iter().filter(|r| r.embedding().is_err()).count()
    }
}

impl<T: HasEmbedding + DeserializeOwned> VectorCollection<T> {
    /// Decode a JSON array of records. A JSON `null` document yields an empty collection.
    pub fn load_from_bytes(bytes: &[u8], dimension: usize) -> Result<Self> {
        let records: Option<Vec<T>> = serde_json::from_slice(bytes)
            .map_err(|e| FuncSearchError::deserialization(format!("Invalid collection payload: {}", e)))?;

        let mut collection = Self::new(dimension);
        collection.add_range(records.unwrap_or_default());
        Ok(collection)
    }
}

impl<T: HasEmbedding + Serialize> VectorCollection<T> {
    /// Encode records as an indented JSON array
    pub fn save_to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.records)?)
    }
}

impl<T: HasEmbedding> Extend<T> for VectorCollection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

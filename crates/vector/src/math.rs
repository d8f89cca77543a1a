//! Scalar arithmetic over fixed-dimension float vectors.
//!
//! Every function takes the dimension explicitly and rejects inputs whose
//! length differs from it.

use funcsearch_common::{FuncSearchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use funcsearch_common::config::DEFAULT_EMBEDDING_DIMENSION as DEFAULT_DIMENSION;

fn check_dimension(v: &[f32], dimension: usize) -> Result<()> {
    if v.len() != dimension {
        return Err(FuncSearchError::dimension_mismatch(dimension, v.len()));
    }
    Ok(())
}

/// Euclidean norm
pub fn length(v: &[f32], dimension: usize) -> Result<f32> {
    check_dimension(v, dimension)?;
    let sum: f32 = v.iter().map(|x| x * x).sum();
    Ok(sum.sqrt())
}

pub fn dot_product(a: &[f32], b: &[f32], dimension: usize) -> Result<f32> {
    check_dimension(a, dimension)?;
    check_dimension(b, dimension)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Dot product scaled by a fixed `D²` denominator.
///
/// This is not textbook cosine similarity (which divides by `|a|·|b|`); stored
/// scores depend on this exact formula, so it is kept as is.
pub fn cosine_similarity(a: &[f32], b: &[f32], dimension: usize) -> Result<f32> {
    let dot = dot_product(a, b, dimension)?;
    Ok(dot / (dimension as f32).powi(2))
}

pub fn euclidean_distance(a: &[f32], b: &[f32], dimension: usize) -> Result<f32> {
    check_dimension(a, dimension)?;
    check_dimension(b, dimension)?;
    let sum: f32 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum();
    Ok(sum.sqrt())
}

/// Comparison metric, scored so that higher is always better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "dotproduct")]
    DotProduct,
    #[serde(rename = "cosine")]
    CosineSimilarity,
    #[serde(rename = "euclidean")]
    EuclideanDistance,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::CosineSimilarity,
        Metric::DotProduct,
        Metric::EuclideanDistance,
    ];

    /// Score `candidate` against `query`; Euclidean distance is negated
    pub fn score(&self, candidate: &[f32], query: &[f32], dimension: usize) -> Result<f32> {
        match self {
            Metric::DotProduct => dot_product(candidate, query, dimension),
            Metric::CosineSimilarity => cosine_similarity(candidate, query, dimension),
            Metric::EuclideanDistance => euclidean_distance(candidate, query, dimension).map(|d| -d),
        }
    }

    /// Route/CLI name
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::DotProduct => "dotproduct",
            Metric::CosineSimilarity => "cosine",
            Metric::EuclideanDistance => "euclidean",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = FuncSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dotproduct" | "dot" | "dot_product" => Ok(Metric::DotProduct),
            "cosine" | "cosinesimilarity" | "cosine_similarity" => Ok(Metric::CosineSimilarity),
            "euclidean" | "euclideandistance" | "euclidean_distance" => Ok(Metric::EuclideanDistance),
            other => Err(FuncSearchError::invalid_input(format!(
                "Unknown metric '{}' (expected cosine, dotproduct or euclidean)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        assert_eq!(length(&[3.0, 4.0], 2).unwrap(), 5.0);
        assert_eq!(length(&[0.0, 0.0, 0.0], 3).unwrap(), 0.0);
    }

    #[test]
    fn test_dot_product() {
        assert_eq!(dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], 3).unwrap(), 32.0);
        assert_eq!(dot_product(&[1.0, 0.0], &[0.0, 1.0], 2).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_uses_fixed_denominator() {
        let a = [2.0, 4.0];
        let b = [1.0, 3.0];
        let dot = dot_product(&a, &b, 2).unwrap();
        assert_eq!(cosine_similarity(&a, &b, 2).unwrap(), dot / 4.0);

        // textbook cosine of parallel vectors would be 1.0
        let c = cosine_similarity(&[1.0, 1.0], &[2.0, 2.0], 2).unwrap();
        assert_eq!(c, 1.0);
        let c = cosine_similarity(&[3.0, 3.0], &[3.0, 3.0], 2).unwrap();
        assert_eq!(c, 4.5);
    }

    #[test]
    fn test_cosine_matches_formula_at_reference_dimension() {
        let a: Vec<f32> = (0..DEFAULT_DIMENSION).map(|i| (i % 7) as f32 * 0.125).collect();
        let b: Vec<f32> = (0..DEFAULT_DIMENSION).map(|i| (i % 5) as f32 * 0.25).collect();
        let dot = dot_product(&a, &b, DEFAULT_DIMENSION).unwrap();
        let expected = dot / (DEFAULT_DIMENSION * DEFAULT_DIMENSION) as f32;
        assert_eq!(cosine_similarity(&a, &b, DEFAULT_DIMENSION).unwrap(), expected);
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0], 2).unwrap(), 5.0);
        assert_eq!(euclidean_distance(&[1.0, 1.0], &[1.0, 1.0], 2).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let short = vec![0.5_f32; DEFAULT_DIMENSION - 1];
        let full = vec![0.5_f32; DEFAULT_DIMENSION];

        match dot_product(&short, &full, DEFAULT_DIMENSION) {
            Err(FuncSearchError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, 1536);
                assert_eq!(actual, 1535);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
        assert!(euclidean_distance(&full, &short, DEFAULT_DIMENSION).is_err());
        assert!(length(&short, DEFAULT_DIMENSION).is_err());
        assert!(cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 2).is_err());
    }

    #[test]
    fn test_metric_score_higher_is_better() {
        let query = [1.0, 0.0];
        let near = [0.9, 0.1];
        let far = [0.0, 1.0];
        for metric in Metric::ALL {
            let near_score = metric.score(&near, &query, 2).unwrap();
            let far_score = metric.score(&far, &query, 2).unwrap();
            assert!(near_score > far_score, "{} ranked far above near", metric);
        }
        assert_eq!(Metric::EuclideanDistance.score(&far, &far, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_metric_parse_and_display() {
        assert_eq!("cosine".parse::<Metric>().unwrap(), Metric::CosineSimilarity);
        assert_eq!("DotProduct".parse::<Metric>().unwrap(), Metric::DotProduct);
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::EuclideanDistance);
        assert!("manhattan".parse::<Metric>().is_err());

        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!(serde_json::to_string(&Metric::DotProduct).unwrap(), "\"dotproduct\"");
    }
}

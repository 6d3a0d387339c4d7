//! Similarity and distance metrics between two vectors
//!
//! All functions are pure and allocation-free. Each one fails with
//! [`VectorDbError::DimensionMismatch`] when the inputs differ in length;
//! nothing is truncated or padded.

use crate::error::{Result, VectorDbError};
use serde::{Deserialize, Serialize};

/// Direction in which scores are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Lower is more similar
    Ascending,
    /// Higher is more similar
    Descending,
}

/// The metrics a query can rank by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Cosine similarity in [-1, 1]
    Cosine,
    /// Raw dot product
    #[serde(rename = "dotproduct")]
    DotProduct,
    /// Euclidean (L2) distance
    Euclidean,
}

impl DistanceMetric {
    /// Score `query` against `candidate` using this metric
    pub fn score(&self, query: &[f64], candidate: &[f64]) -> Result<f64> {
        match self {
            DistanceMetric::Cosine => cosine_similarity(query, candidate),
            DistanceMetric::DotProduct => dot_product(query, candidate),
            DistanceMetric::Euclidean => euclidean_distance(query, candidate),
        }
    }

    pub fn order(&self) -> SortOrder {
        match self {
            DistanceMetric::Cosine | DistanceMetric::DotProduct => SortOrder::Descending,
            DistanceMetric::Euclidean => SortOrder::Ascending,
        }
    }

    /// Canonical label of the metric
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::DotProduct => "dotproduct",
            DistanceMetric::Euclidean => "euclidean",
        }
    }

    /// Whether a NaN score from this metric indicates a numeric failure.
    /// Cosine yields NaN for zero-norm inputs, which ranks as incomparable.
    pub fn requires_finite(&self) -> bool {
        !matches!(self, DistanceMetric::Cosine)
    }
}

fn check_dimensions(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(VectorDbError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Sum of pairwise products. Empty inputs yield 0.
pub fn dot_product(a: &[f64], b: &[f64]) -> Result<f64> {
    check_dimensions(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Cosine similarity between two vectors.
///
/// Each side is divided by its largest magnitude before accumulating, so
/// squared norms neither overflow nor underflow for any finite input.
/// A zero-norm input produces NaN (0 / 0); this is not special-cased.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    check_dimensions(a, b)?;
    let scale_a = max_abs(a);
    let scale_b = max_abs(b);
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = x / scale_a;
        let y = y / scale_b;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0f64, |m, x| m.max(x.abs()))
}

/// Euclidean (L2) distance between two vectors
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    check_dimensions(a, b)?;
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt())
}

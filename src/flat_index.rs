//! Brute-force flat index — O(n·d) exhaustive k-NN scan

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::warn;

use crate::config::{MismatchPolicy, StoreConfig};
use crate::distance::{DistanceMetric, SortOrder};
use crate::error::{Result, VectorDbError};
use crate::storage::Record;

/// Ranked `(position, score)` pairs plus how many records were left out.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub hits: Vec<(usize, f64)>,
    pub skipped: usize,
}

/// A flat (brute-force) scan over a borrowed run of records.
///
/// Positions in the returned hits index into the scanned slice, so they
/// double as insertion order.
#[derive(Debug)]
pub struct FlatIndex<'a> {
    records: &'a [Record],
    policy: MismatchPolicy,
    parallel_threshold: usize,
}

impl<'a> FlatIndex<'a> {
    pub fn new(records: &'a [Record], config: &StoreConfig) -> Self {
        Self {
            records,
            policy: config.mismatch_policy,
            parallel_threshold: config.parallel_threshold,
        }
    }

    /// Score `query` against every record and keep the best `k`.
    pub fn search(&self, query: &[f64], metric: DistanceMetric, k: usize) -> Result<ScanOutcome> {
        let scored: Vec<Option<(usize, f64)>> = if self.records.len() >= self.parallel_threshold {
            self.records
                .par_iter()
                .enumerate()
                .map(|(pos, record)| self.score_record(pos, record, query, metric))
                .collect::<Result<Vec<_>>>()?
        } else {
            self.records
                .iter()
                .enumerate()
                .map(|(pos, record)| self.score_record(pos, record, query, metric))
                .collect::<Result<Vec<_>>>()?
        };

        let total = scored.len();
        let mut hits: Vec<(usize, f64)> = scored.into_iter().flatten().collect();
        let skipped = total - hits.len();

        rank(&mut hits, metric.order());
        hits.truncate(k);
        Ok(ScanOutcome { hits, skipped })
    }

    fn score_record(
        &self,
        pos: usize,
        record: &Record,
        query: &[f64],
        metric: DistanceMetric,
    ) -> Result<Option<(usize, f64)>> {
        match metric.score(query, record.embedding.as_slice()) {
            Ok(score) if score.is_nan() && metric.requires_finite() => {
                Err(VectorDbError::Internal(format!(
                    "{} score for record '{}' is not a number",
                    metric.as_str(),
                    record.id
                )))
            }
            Ok(score) => Ok(Some((pos, score))),
            Err(VectorDbError::DimensionMismatch { expected, actual })
                if self.policy == MismatchPolicy::Skip =>
            {
                warn!(
                    id = %record.id,
                    query_dimension = expected,
                    record_dimension = actual,
                    "skipping record with mismatched dimension"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Order two scores. NaN sorts after every number in either direction.
pub fn compare_scores(a: f64, b: f64, order: SortOrder) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        }
    }
}

/// Stable sort; equal scores keep their scan order.
fn rank(hits: &mut [(usize, f64)], order: SortOrder) {
    hits.sort_by(|a, b| compare_scores(a.1, b.1, order));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Metadata;
    use crate::vector::Vector;

    fn records(data: &[(&str, Vec<f64>)]) -> Vec<Record> {
        data.iter()
            .map(|(id, v)| Record {
                id: id.to_string(),
                embedding: Vector::new(v.clone()),
                metadata: Metadata::new(),
            })
            .collect()
    }

    fn positions(outcome: &ScanOutcome) -> Vec<usize> {
        outcome.hits.iter().map(|(pos, _)| *pos).collect()
    }

    #[test]
    fn test_flat_index_basic() {
        let recs = records(&[
            ("v1", vec![1.0, 0.0, 0.0]),
            ("v2", vec![0.0, 1.0, 0.0]),
            ("v3", vec![1.0, 1.0, 0.0]),
        ]);
        let config = StoreConfig::default();
        let index = FlatIndex::new(&recs, &config);

        let outcome = index
            .search(&[1.0, 0.0, 0.0], DistanceMetric::Euclidean, 2)
            .unwrap();

        assert_eq!(outcome.hits.len(), 2);
        assert_eq!(outcome.hits[0].0, 0); // exact match
        assert!(outcome.hits[0].1 < 1e-6);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let recs = records(&[
            ("a", vec![1.0, 0.0]),
            ("b", vec![0.0, 1.0]),
            ("c", vec![-1.0, 0.0]),
            ("d", vec![0.0, -1.0]),
        ]);
        let config = StoreConfig::default();
        let index = FlatIndex::new(&recs, &config);

        // Every record sits at distance 1 from the origin.
        let asc = index
            .search(&[0.0, 0.0], DistanceMetric::Euclidean, 10)
            .unwrap();
        assert_eq!(positions(&asc), vec![0, 1, 2, 3]);

        // b and d are orthogonal to the query: equal dot product of 0.
        let desc = index
            .search(&[1.0, 0.0], DistanceMetric::DotProduct, 10)
            .unwrap();
        assert_eq!(positions(&desc), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_nan_cosine_scores_sort_last() {
        let recs = records(&[
            ("zero1", vec![0.0, 0.0]),
            ("far", vec![-1.0, 0.0]),
            ("zero2", vec![0.0, 0.0]),
            ("near", vec![1.0, 0.0]),
        ]);
        let config = StoreConfig::default();
        let index = FlatIndex::new(&recs, &config);

        let outcome = index
            .search(&[1.0, 0.0], DistanceMetric::Cosine, 10)
            .unwrap();
        assert_eq!(positions(&outcome), vec![3, 1, 0, 2]);
        assert!(outcome.hits[2].1.is_nan());
        assert!(outcome.hits[3].1.is_nan());
    }

    #[test]
    fn test_compare_scores_nan_last_in_both_directions() {
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            assert_eq!(compare_scores(f64::NAN, 1.0, order), Ordering::Greater);
            assert_eq!(compare_scores(-1.0, f64::NAN, order), Ordering::Less);
            assert_eq!(compare_scores(f64::NAN, f64::NAN, order), Ordering::Equal);
        }
        assert_eq!(
            compare_scores(1.0, 2.0, SortOrder::Ascending),
            Ordering::Less
        );
        assert_eq!(
            compare_scores(1.0, 2.0, SortOrder::Descending),
            Ordering::Greater
        );
    }

    #[test]
    fn test_mismatch_rejected_by_default() {
        let recs = records(&[("ok", vec![1.0, 0.0]), ("short", vec![1.0])]);
        let config = StoreConfig::default();
        let index = FlatIndex::new(&recs, &config);

        let err = index
            .search(&[1.0, 0.0], DistanceMetric::Euclidean, 5)
            .unwrap_err();
        assert!(matches!(
            err,
            VectorDbError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_mismatch_skipped_when_configured() {
        let recs = records(&[
            ("ok", vec![1.0, 0.0]),
            ("short", vec![1.0]),
            ("also_ok", vec![0.0, 1.0]),
        ]);
        let config = StoreConfig {
            mismatch_policy: MismatchPolicy::Skip,
            ..StoreConfig::default()
        };
        let index = FlatIndex::new(&recs, &config);

        let outcome = index
            .search(&[1.0, 0.0], DistanceMetric::Euclidean, 5)
            .unwrap();
        assert_eq!(positions(&outcome), vec![0, 2]);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_nan_dot_product_is_internal_error() {
        let recs = records(&[("huge", vec![f64::MAX, f64::MAX])]);
        let config = StoreConfig::default();
        let index = FlatIndex::new(&recs, &config);

        // inf + -inf
        let err = index
            .search(&[f64::MAX, -f64::MAX], DistanceMetric::DotProduct, 1)
            .unwrap_err();
        assert!(matches!(err, VectorDbError::Internal(_)));
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let recs: Vec<Record> = (0..200)
            .map(|i| Record {
                id: format!("v{}", i),
                embedding: Vector::new(vec![(i % 7) as f64, (i % 3) as f64, 1.0]),
                metadata: Metadata::new(),
            })
            .collect();
        let sequential = StoreConfig::default();
        let parallel = StoreConfig {
            parallel_threshold: 1,
            ..StoreConfig::default()
        };
        let query = [2.0, 1.0, 1.0];

        for metric in [
            DistanceMetric::Cosine,
            DistanceMetric::DotProduct,
            DistanceMetric::Euclidean,
        ] {
            let a = FlatIndex::new(&recs, &sequential)
                .search(&query, metric, 50)
                .unwrap();
            let b = FlatIndex::new(&recs, &parallel)
                .search(&query, metric, 50)
                .unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_empty_scan() {
        let config = StoreConfig::default();
        let index = FlatIndex::new(&[], &config);
        let outcome = index
            .search(&[1.0], DistanceMetric::Cosine, 5)
            .unwrap();
        assert!(outcome.hits.is_empty());
    }
}

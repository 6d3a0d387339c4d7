//! In-memory record storage and k-NN search

use crate::config::StoreConfig;
use crate::distance::DistanceMetric;
use crate::error::{Result, VectorDbError};
use crate::flat_index::FlatIndex;
use crate::method::SearchMethod;
use crate::metrics::{MetricsCollector, StoreStats};
use crate::persistence::serialization::StoreSnapshot;
use crate::vector::Vector;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, warn};

/// Metadata associated with a record. Opaque to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Metadata {
    fields: Map<String, Value>,
}

impl Metadata {
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// A stored (id, embedding, metadata) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub embedding: Vector,
    #[serde(default)]
    pub metadata: Metadata,
}

/// A single ranked hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub id: String,
    pub score: f64,
    pub metadata: Metadata,
}

/// The answer to one k-NN query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<ScoredResult>,
    /// The method label as the caller supplied it
    pub method: String,
    /// The metric that scored and ordered `results`
    pub effective_metric: DistanceMetric,
    /// Number of records scanned
    pub total: usize,
}

/// Insert request body. A missing id deserializes empty and a missing
/// embedding as `None`; [`VectorStore::insert_request`] rejects both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsertRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub embedding: Option<Vec<f64>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Search request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub embedding: Option<Vec<f64>>,
    pub k: Option<i64>,
    pub method: Option<String>,
}

/// Append-only record store searched by exhaustive scan.
///
/// Searches share a read lock and inserts take the write lock, so a query
/// sees every insert that completed before it started and nothing
/// half-written.
#[derive(Debug)]
pub struct VectorStore {
    records: RwLock<Vec<Record>>,
    metrics: Mutex<MetricsCollector>,
    config: StoreConfig,
}

impl VectorStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            metrics: Mutex::new(MetricsCollector::new()),
            config: StoreConfig::default(),
        }
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            records: RwLock::new(Vec::new()),
            metrics: Mutex::new(MetricsCollector::new()),
            config,
        })
    }

    /// Append a record. Ids are not deduplicated.
    pub fn insert(
        &self,
        id: impl Into<String>,
        embedding: Vec<f64>,
        metadata: Option<Metadata>,
    ) -> Result<()> {
        let id = id.into();
        let embedding = Vector::new(embedding);

        if id.is_empty() {
            return Err(VectorDbError::invalid("id is required"));
        }
        if embedding.is_empty() && !self.config.allow_empty_embedding {
            return Err(VectorDbError::invalid("embedding is required"));
        }
        if let Some(pos) = embedding.first_non_finite() {
            return Err(VectorDbError::invalid(format!(
                "embedding component {} is not finite",
                pos
            )));
        }

        debug!(id = %id, dimension = embedding.dimension(), "inserting record");

        let record = Record {
            id,
            embedding,
            metadata: metadata.unwrap_or_default(),
        };
        self.records.write().push(record);
        self.metrics.lock().record_insert();
        Ok(())
    }

    /// Insert from a deserialized request body. An absent embedding is
    /// rejected even when empty embeddings are allowed.
    pub fn insert_request(&self, request: InsertRequest) -> Result<()> {
        let embedding = request
            .embedding
            .ok_or_else(|| VectorDbError::invalid("embedding is required"))?;
        self.insert(request.id, embedding, request.metadata)
    }

    /// Rank every record against `embedding` and return the best `k`.
    ///
    /// `k` of `None` or `<= 0` falls back to the configured default.
    /// `method` of `None` ranks by Euclidean distance; an unknown method
    /// also ranks by Euclidean distance but is echoed back unchanged.
    pub fn search(
        &self,
        embedding: Option<&[f64]>,
        k: Option<i64>,
        method: Option<&str>,
    ) -> Result<SearchResponse> {
        let query = embedding.ok_or_else(|| VectorDbError::invalid("embedding is required"))?;
        if let Some(pos) = query.iter().position(|x| !x.is_finite()) {
            return Err(VectorDbError::invalid(format!(
                "query component {} is not finite",
                pos
            )));
        }

        let method = SearchMethod::parse(method);
        if !method.is_recognized() {
            warn!(
                method = method.label(),
                "unrecognized search method, ranking by euclidean distance"
            );
        }
        let metric = method.metric();
        let k = self.config.effective_k(k);

        let start = Instant::now();
        let records = self.records.read();
        let outcome = FlatIndex::new(&records, &self.config).search(query, metric, k)?;
        let total = records.len();

        let results: Vec<ScoredResult> = outcome
            .hits
            .iter()
            .map(|&(pos, score)| {
                let record = &records[pos];
                ScoredResult {
                    id: record.id.clone(),
                    score,
                    metadata: record.metadata.clone(),
                }
            })
            .collect();
        drop(records);

        self.metrics
            .lock()
            .record_query(start.elapsed(), total, outcome.skipped);

        debug!(
            method = method.label(),
            metric = metric.as_str(),
            k,
            total,
            returned = results.len(),
            "search completed"
        );

        Ok(SearchResponse {
            results,
            method: method.label().to_string(),
            effective_metric: metric,
            total,
        })
    }

    /// Search from a deserialized request body
    pub fn search_request(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.search(
            request.embedding.as_deref(),
            request.k,
            request.method.as_deref(),
        )
    }

    /// Get the number of records in the store
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// All record ids in insertion order, duplicates included
    pub fn ids(&self) -> Vec<String> {
        self.records.read().iter().map(|r| r.id.clone()).collect()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn stats(&self) -> StoreStats {
        self.metrics.lock().snapshot()
    }

    /// Copy the current records out for persistence.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(self.records.read().clone())
    }

    /// Rebuild a store from a snapshot. Records pass through the same
    /// validation as [`insert`](Self::insert).
    pub fn from_snapshot(snapshot: StoreSnapshot, config: StoreConfig) -> Result<Self> {
        let store = Self::with_config(config)?;
        for record in snapshot.into_records()? {
            store.insert(record.id, record.embedding.into_inner(), Some(record.metadata))?;
        }
        Ok(store)
    }
}

impl Default for VectorStore {
    fn default() -> Self {
        Self::new()
    }
}

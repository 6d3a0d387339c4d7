//! # VectorDB Scan
//!
//! An exhaustive-scan vector similarity store.
//!
//! This library provides:
//! - Record storage of (id, embedding, metadata) triples
//! - Similarity metrics (Cosine, Dot Product, Euclidean)
//! - Stable k-NN ranking over every stored record
//! - JSON snapshots
//!
//! ## Example
//!
//! ```rust
//! use vectordb_scan::VectorStore;
//!
//! let store = VectorStore::new();
//! store.insert("a", vec![0.1, 0.2, 0.3, 0.4], None).unwrap();
//! store.insert("b", vec![0.2, 0.3, 0.4, 0.5], None).unwrap();
//!
//! let response = store
//!     .search(Some(&[0.15, 0.25, 0.35, 0.45]), Some(1), Some("dotproduct"))
//!     .unwrap();
//! assert_eq!(response.results[0].id, "b");
//! assert_eq!(response.method, "dotproduct");
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod flat_index;
pub mod method;
pub mod metrics;
pub mod persistence;
pub mod storage;
pub mod vector;

pub use config::{MismatchPolicy, StoreConfig};
pub use distance::{cosine_similarity, dot_product, euclidean_distance, DistanceMetric, SortOrder};
pub use error::{ErrorKind, Result, VectorDbError};
pub use flat_index::FlatIndex;
pub use method::SearchMethod;
pub use metrics::StoreStats;
pub use persistence::serialization::StoreSnapshot;
pub use persistence::snapshot::SnapshotManager;
pub use storage::{
    InsertRequest, Metadata, Record, ScoredResult, SearchRequest, SearchResponse, VectorStore,
};
pub use vector::Vector;

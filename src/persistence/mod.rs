//! Persistence layer: JSON snapshots of the record store.
//!
//! Snapshots are a convenience export. Nothing here is crash-safe.

pub mod serialization;
pub mod snapshot;

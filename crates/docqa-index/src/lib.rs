//! DocQA Index - immutable in-memory vector index snapshots
//!
//! A snapshot holds one corpus worth of chunks and their embedding vectors.
//! It is built wholesale from an ingestion run and replaced wholesale on the
//! next upload; there are no partial updates.

pub mod snapshot;

pub use snapshot::{IndexSnapshot, SnapshotStats};

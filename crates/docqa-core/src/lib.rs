//! DocQA Core - Domain models, configuration, loaders, and chunking
//!
//! This crate contains the domain types and ingestion logic shared by the
//! rest of the DocQA system.

pub mod config;
pub mod error;
pub mod ingest;
pub mod loaders;
pub mod models;
pub mod processing;
pub mod similarity;

pub use error::{DocqaError, Result};

//! Error types for DocQA

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocqaError {
    // Ingestion errors
    #[error("Upload directory not readable: {path}")]
    DirectoryUnreadable { path: PathBuf },

    #[error("Failed to extract {format} content: {reason}")]
    DocumentExtraction { format: String, reason: String },

    // Index errors
    #[error("Index build failed: {reason}")]
    IndexBuild { reason: String },

    // Service errors
    #[error("Embedding service unavailable: {reason}. Try: {remediation}")]
    EmbedderUnavailable { reason: String, remediation: String },

    #[error("Generation service unavailable: {reason}. Try: {remediation}")]
    GeneratorUnavailable { reason: String, remediation: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocqaError>;

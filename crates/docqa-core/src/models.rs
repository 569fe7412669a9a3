//! Domain models shared across the DocQA crates.

use serde::{Deserialize, Serialize};

/// Unique identifier for a text chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkId(pub u64);

/// One parsed unit of text produced by a document loader.
///
/// A loader may emit several passages per file (e.g. one per PDF page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Extracted text
    pub text: String,

    /// Source document path
    pub source: String,

    /// Page number within the source, if the format has pages
    pub page: Option<usize>,
}

/// Text chunk prepared for embedding and retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Unique identifier, deterministic across rebuilds of the same corpus
    pub id: ChunkId,

    /// Text content
    pub content: String,

    /// Provenance information
    pub source: ChunkSource,
}

/// Provenance of a text chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSource {
    /// Source document path
    pub document_path: String,

    /// Page number (for paged formats)
    pub page: Option<usize>,

    /// Character offset within the source passage
    pub offset: usize,
}

/// Embedding vector for a chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    /// Associated chunk ID
    pub chunk_id: ChunkId,

    /// Embedding vector
    pub vector: Vec<f32>,
}

/// A chunk paired with its similarity score against a query.
///
/// The score is a cosine similarity in [-1, 1]; zero-norm inputs score 0,
/// never NaN.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: TextChunk,
    pub score: f32,
}

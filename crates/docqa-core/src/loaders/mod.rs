//! Document loader abstraction for multi-format ingestion
//!
//! Each supported file format implements the `DocumentLoader` trait, and the
//! `LoaderRegistry` dispatches files to the right loader by extension.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::models::Passage;

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::DocxLoader;
pub use pdf::PdfLoader;
pub use text::TextLoader;

/// Loader trait that all format implementations must implement
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Parse the file at `path` into one or more text passages.
    ///
    /// Loaders may return an empty list for files with no extractable text;
    /// that is not an error.
    async fn load(&self, path: &Path) -> Result<Vec<Passage>>;

    /// Get supported file extensions, lowercase without the dot (e.g. ["pdf"])
    fn supported_extensions(&self) -> &[&str];

    /// Get human-readable format name (e.g. "PDF")
    fn format_name(&self) -> &str;
}

/// Central registry for document loaders
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn DocumentLoader>>,
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self {
            loaders: vec![
                Box::new(PdfLoader),
                Box::new(TextLoader),
                Box::new(DocxLoader),
            ],
        }
    }
}

impl LoaderRegistry {
    /// Create a registry with the default set of loaders
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the loader responsible for a file, by extension.
    ///
    /// Returns `None` for unrecognized extensions; callers decide whether to
    /// skip or reject the file.
    pub fn loader_for(&self, path: &Path) -> Option<&dyn DocumentLoader> {
        let extension = path.extension()?.to_str()?.to_lowercase();

        self.loaders
            .iter()
            .find(|loader| loader.supported_extensions().contains(&extension.as_str()))
            .map(|boxed| boxed.as_ref())
    }

    /// List every extension the registry can handle
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.loaders.iter().flat_map(|l| l.supported_extensions().iter().copied()).collect()
    }
}

//! Best-effort directory ingestion.
//!
//! An unreadable directory is fatal; a single broken file is not. Files with
//! unrecognized extensions are skipped with a warning, and per-file loader
//! failures are logged and excluded so the rest of the corpus still loads.

use std::path::Path;

use crate::error::{DocqaError, Result};
use crate::loaders::LoaderRegistry;
use crate::models::Passage;

/// Reads a directory of uploaded documents into text passages.
pub struct DocumentIngestor {
    registry: LoaderRegistry,
}

impl Default for DocumentIngestor {
    fn default() -> Self {
        Self { registry: LoaderRegistry::new() }
    }
}

impl DocumentIngestor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every recognized regular file directly under `dir`.
    ///
    /// Returns the passages from all files that parsed successfully; an
    /// empty directory or an all-failed ingestion yields an empty list.
    pub async fn ingest_dir(&self, dir: &Path) -> Result<Vec<Passage>> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            tracing::error!(dir = %dir.display(), error = %e, "Could not list upload directory");
            DocqaError::DirectoryUnreadable { path: dir.to_path_buf() }
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();

        // Deterministic ingestion order regardless of readdir order
        paths.sort();

        tracing::info!(dir = %dir.display(), files = paths.len(), "Loading documents");

        let mut passages = Vec::new();

        for path in &paths {
            let Some(loader) = self.registry.loader_for(path) else {
                tracing::warn!(file = %path.display(), "Unsupported file type, skipping");
                continue;
            };

            match loader.load(path).await {
                Ok(loaded) => {
                    tracing::info!(
                        file = %path.display(),
                        format = loader.format_name(),
                        passages = loaded.len(),
                        "Loaded file"
                    );
                    passages.extend(loaded);
                }
                Err(e) => {
                    tracing::error!(file = %path.display(), error = %e, "Failed to load file");
                }
            }
        }

        tracing::info!(total = passages.len(), "Total passages loaded");

        Ok(passages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreadable_directory_is_fatal() {
        let ingestor = DocumentIngestor::new();
        let result = ingestor.ingest_dir(Path::new("/nonexistent/uploads")).await;
        assert!(matches!(result, Err(DocqaError::DirectoryUnreadable { .. })));
    }

    #[tokio::test]
    async fn test_empty_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let passages = DocumentIngestor::new().ingest_dir(dir.path()).await.unwrap();
        assert!(passages.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photo.png"), b"\x89PNG").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello world").unwrap();

        let passages = DocumentIngestor::new().ingest_dir(dir.path()).await.unwrap();

        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].text, "hello world");
    }

    #[tokio::test]
    async fn test_broken_file_does_not_abort_ingestion() {
        let dir = tempfile::tempdir().unwrap();
        // Invalid DOCX fails to parse; the text file should still load
        std::fs::write(dir.path().join("broken.docx"), b"not a zip").unwrap();
        std::fs::write(dir.path().join("ok.txt"), "usable content").unwrap();

        let passages = DocumentIngestor::new().ingest_dir(dir.path()).await.unwrap();

        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].text, "usable content");
    }

    #[tokio::test]
    async fn test_ingestion_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "second").unwrap();
        std::fs::write(dir.path().join("a.txt"), "first").unwrap();

        let passages = DocumentIngestor::new().ingest_dir(dir.path()).await.unwrap();

        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].text, "first");
        assert_eq!(passages[1].text, "second");
    }
}

use async_trait::async_trait;
use std::path::Path;

use crate::error::{DocqaError, Result};
use crate::loaders::DocumentLoader;
use crate::models::Passage;

/// Plain text loader: the whole file becomes one passage.
pub struct TextLoader;

#[async_trait]
impl DocumentLoader for TextLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Passage>> {
        let text =
            std::fs::read_to_string(path).map_err(|e| DocqaError::DocumentExtraction {
                format: "Text".to_string(),
                reason: format!("Failed to read file: {}", e),
            })?;

        if text.trim().is_empty() {
            tracing::warn!("Text file is empty: {}", path.display());
            return Ok(Vec::new());
        }

        Ok(vec![Passage {
            text,
            source: path.display().to_string(),
            page: None,
        }])
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn format_name(&self) -> &str {
        "Text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "The refund policy allows returns within 30 days.").unwrap();

        let passages = TextLoader.load(file.path()).await.unwrap();

        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].text, "The refund policy allows returns within 30 days.");
        assert_eq!(passages[0].page, None);
        assert_eq!(passages[0].source, file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_empty_file_yields_no_passages() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let passages = TextLoader.load(file.path()).await.unwrap();
        assert!(passages.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_extraction_error() {
        let result = TextLoader.load(Path::new("/nonexistent/missing.txt")).await;
        assert!(matches!(
            result,
            Err(DocqaError::DocumentExtraction { ref format, .. }) if format == "Text"
        ));
    }
}

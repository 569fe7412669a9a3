use async_trait::async_trait;
use std::path::Path;

use crate::error::{DocqaError, Result};
use crate::loaders::DocumentLoader;
use crate::models::Passage;

/// PDF loader backed by pdf-extract.
///
/// Extracted text is split on form feed characters so each page becomes its
/// own passage, preserving page numbers for provenance.
pub struct PdfLoader;

#[async_trait]
impl DocumentLoader for PdfLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Passage>> {
        let text =
            pdf_extract::extract_text(path).map_err(|e| DocqaError::DocumentExtraction {
                format: "PDF".to_string(),
                reason: format!("Failed to extract text: {}", e),
            })?;

        if text.trim().is_empty() {
            tracing::warn!("PDF contains no extractable text: {}", path.display());
            return Ok(Vec::new());
        }

        let source = path.display().to_string();

        // Form feeds mark page boundaries in extracted text
        let passages: Vec<Passage> = text
            .split('\x0C')
            .enumerate()
            .filter(|(_, page_text)| !page_text.trim().is_empty())
            .map(|(page_idx, page_text)| Passage {
                text: page_text.trim().to_string(),
                source: source.clone(),
                page: Some(page_idx + 1),
            })
            .collect();

        Ok(passages)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn format_name(&self) -> &str {
        "PDF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert_eq!(PdfLoader.supported_extensions(), ["pdf"]);
        assert_eq!(PdfLoader.format_name(), "PDF");
    }

    #[tokio::test]
    async fn test_missing_file_is_extraction_error() {
        let result = PdfLoader.load(Path::new("/nonexistent/missing.pdf")).await;
        assert!(matches!(
            result,
            Err(DocqaError::DocumentExtraction { ref format, .. }) if format == "PDF"
        ));
    }
}

//! DOCX loader implementation
//!
//! Extracts text from Microsoft Word documents using the docx-rs crate.
//! Paragraphs and tables are walked in document order and concatenated into
//! a single passage.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{DocqaError, Result};
use crate::loaders::DocumentLoader;
use crate::models::Passage;

/// DOCX loader
pub struct DocxLoader;

#[async_trait]
impl DocumentLoader for DocxLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Passage>> {
        let bytes = std::fs::read(path).map_err(|e| DocqaError::DocumentExtraction {
            format: "DOCX".to_string(),
            reason: format!("Failed to read file: {}", e),
        })?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| DocqaError::DocumentExtraction {
            format: "DOCX".to_string(),
            reason: format!("Failed to parse DOCX: {}", e),
        })?;

        let mut full_text = String::new();

        for child in &docx.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                let text = self.extract_paragraph_text(p);
                if !text.trim().is_empty() {
                    full_text.push_str(&text);
                    full_text.push_str("\n\n");
                }
            } else if let docx_rs::DocumentChild::Table(t) = child {
                let table_text = self.extract_table_text(t);
                if !table_text.trim().is_empty() {
                    full_text.push_str(&table_text);
                    full_text.push_str("\n\n");
                }
            }
        }

        if full_text.trim().is_empty() {
            tracing::warn!("DOCX contains no extractable text: {}", path.display());
            return Ok(Vec::new());
        }

        Ok(vec![Passage {
            text: full_text.trim_end().to_string(),
            source: path.display().to_string(),
            page: None,
        }])
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn format_name(&self) -> &str {
        "DOCX"
    }
}

impl DocxLoader {
    /// Extract text from a paragraph
    fn extract_paragraph_text(&self, paragraph: &docx_rs::Paragraph) -> String {
        paragraph
            .children
            .iter()
            .filter_map(|child| {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    Some(self.extract_run_text(run))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract text from a run
    fn extract_run_text(&self, run: &docx_rs::Run) -> String {
        run.children
            .iter()
            .filter_map(|child| {
                if let docx_rs::RunChild::Text(text) = child {
                    Some(text.text.clone())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract text from a table, one row per line with cells joined by " | "
    fn extract_table_text(&self, table: &docx_rs::Table) -> String {
        let mut table_text = String::new();

        for row_child in &table.rows {
            let docx_rs::TableChild::TableRow(row) = row_child;
            let mut row_text = Vec::new();

            for cell_child in &row.cells {
                let docx_rs::TableRowChild::TableCell(cell) = cell_child;
                let cell_text = cell
                    .children
                    .iter()
                    .filter_map(|child| {
                        if let docx_rs::TableCellContent::Paragraph(p) = child {
                            Some(self.extract_paragraph_text(p))
                        } else {
                            None
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");

                if !cell_text.trim().is_empty() {
                    row_text.push(cell_text);
                }
            }

            if !row_text.is_empty() {
                table_text.push_str(&row_text.join(" | "));
                table_text.push('\n');
            }
        }

        table_text
    }
}

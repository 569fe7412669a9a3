use crate::error::{DocqaError, Result};
use crate::models::{ChunkId, ChunkSource, Passage, TextChunk};

/// Splits passages into fixed-size overlapping chunks.
///
/// Sizes are measured in characters (not bytes), so splitting never lands
/// inside a UTF-8 code point. Splitting is deterministic: the same passages
/// always produce the same chunk sequence with the same ids.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    /// Maximum characters per chunk
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks
    pub chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self { chunk_size: 1000, chunk_overlap: 200 }
    }
}

impl TextSplitter {
    /// Create a new TextSplitter with custom parameters.
    ///
    /// The overlap must be strictly less than the chunk size; otherwise the
    /// split would never advance.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(DocqaError::ConfigInvalid {
                key: "chunk_size".to_string(),
                reason: "chunk_size must be greater than zero".to_string(),
            });
        }

        if chunk_overlap >= chunk_size {
            return Err(DocqaError::ConfigInvalid {
                key: "chunk_overlap".to_string(),
                reason: format!(
                    "overlap ({}) must be less than chunk_size ({})",
                    chunk_overlap, chunk_size
                ),
            });
        }

        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Number of characters each chunk advances past the previous one
    pub fn stride(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }

    /// Split passages into chunks, preserving source order and provenance.
    pub fn split(&self, passages: &[Passage]) -> Vec<TextChunk> {
        let mut chunks = Vec::new();
        let mut next_id = 0u64;

        for passage in passages {
            self.split_passage(passage, &mut next_id, &mut chunks);
        }

        chunks
    }

    fn split_passage(&self, passage: &Passage, next_id: &mut u64, chunks: &mut Vec<TextChunk>) {
        let text = passage.text.as_str();

        // Byte offset of every char boundary, plus the end of the string,
        // so slicing by character count stays on valid boundaries.
        let boundaries: Vec<usize> =
            text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
        let char_count = boundaries.len() - 1;

        if char_count == 0 {
            return;
        }

        let stride = self.stride();
        let mut start = 0usize;

        loop {
            let end = (start + self.chunk_size).min(char_count);
            let content = text[boundaries[start]..boundaries[end]].to_string();

            chunks.push(TextChunk {
                id: ChunkId(*next_id),
                content,
                source: ChunkSource {
                    document_path: passage.source.clone(),
                    page: passage.page,
                    offset: start,
                },
            });
            *next_id += 1;

            if end == char_count {
                break;
            }

            start += stride;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn passage(text: &str) -> Passage {
        Passage { text: text.to_string(), source: "doc.txt".to_string(), page: None }
    }

    #[test]
    fn test_default_parameters() {
        let splitter = TextSplitter::default();
        assert_eq!(splitter.chunk_size, 1000);
        assert_eq!(splitter.chunk_overlap, 200);
    }

    #[test]
    fn test_rejects_overlap_at_or_above_chunk_size() {
        assert!(TextSplitter::new(100, 100).is_err());
        assert!(TextSplitter::new(100, 150).is_err());
        assert!(TextSplitter::new(100, 99).is_ok());
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        assert!(TextSplitter::new(0, 0).is_err());
    }

    #[test]
    fn test_short_passage_is_single_chunk() {
        let splitter = TextSplitter::default();
        let chunks = splitter.split(&[passage("short text")]);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "short text");
        assert_eq!(chunks[0].id, ChunkId(0));
        assert_eq!(chunks[0].source.offset, 0);
    }

    #[test]
    fn test_empty_passage_yields_no_chunks() {
        let splitter = TextSplitter::default();
        assert!(splitter.split(&[passage("")]).is_empty());
    }

    #[test]
    fn test_overlapping_windows() {
        let splitter = TextSplitter::new(10, 4).unwrap();
        let chunks = splitter.split(&[passage("abcdefghijklmnop")]);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "abcdefghij");
        assert_eq!(chunks[1].content, "ghijklmnop");
        assert_eq!(chunks[1].source.offset, 6);
        // Overlap region is shared verbatim
        assert!(chunks[0].content.ends_with("ghij"));
        assert!(chunks[1].content.starts_with("ghij"));
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let splitter = TextSplitter::new(4, 1).unwrap();
        let chunks = splitter.split(&[passage("héllö wörld — ökay")]);

        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 4);
        }
        assert!(!chunks.is_empty());
    }

    #[test]
    fn test_provenance_carried_onto_chunks() {
        let splitter = TextSplitter::new(5, 1).unwrap();
        let p = Passage {
            text: "0123456789".to_string(),
            source: "manual.pdf".to_string(),
            page: Some(3),
        };
        let chunks = splitter.split(&[p]);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(chunk.source.document_path, "manual.pdf");
            assert_eq!(chunk.source.page, Some(3));
        }
    }

    #[test]
    fn test_ids_are_sequential_across_passages() {
        let splitter = TextSplitter::new(5, 0).unwrap();
        let chunks = splitter.split(&[passage("aaaaabbbbb"), passage("ccccc")]);

        let ids: Vec<u64> = chunks.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_idempotent_resplit() {
        let splitter = TextSplitter::new(7, 3).unwrap();
        let input = [passage("the quick brown fox jumps over the lazy dog")];

        let first = splitter.split(&input);
        let second = splitter.split(&input);

        assert_eq!(first, second);
    }

    /// Reassemble a passage from its chunks: the first `stride` chars of
    /// every chunk except the last, then the last chunk whole.
    fn reassemble(chunks: &[TextChunk], stride: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i + 1 == chunks.len() {
                out.push_str(&chunk.content);
            } else {
                out.extend(chunk.content.chars().take(stride));
            }
        }
        out
    }

    #[test]
    fn test_round_trip_reconstruction() {
        let splitter = TextSplitter::new(10, 4).unwrap();
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        let chunks = splitter.split(&[passage(text)]);

        assert_eq!(reassemble(&chunks, splitter.stride()), text);
    }

    proptest! {
        #[test]
        fn prop_round_trip_no_characters_dropped(
            text in ".{1,400}",
            chunk_size in 2usize..50,
            overlap_frac in 0usize..100,
        ) {
            // Keep overlap strictly below chunk_size
            let overlap = (chunk_size - 1) * overlap_frac / 100;
            let splitter = TextSplitter::new(chunk_size, overlap).unwrap();
            let chunks = splitter.split(&[passage(&text)]);

            prop_assert_eq!(reassemble(&chunks, splitter.stride()), text);
        }

        #[test]
        fn prop_chunks_never_exceed_chunk_size(
            text in ".{0,300}",
            chunk_size in 1usize..40,
        ) {
            let splitter = TextSplitter::new(chunk_size, 0).unwrap();
            for chunk in splitter.split(&[passage(&text)]) {
                prop_assert!(chunk.content.chars().count() <= chunk_size);
            }
        }
    }
}

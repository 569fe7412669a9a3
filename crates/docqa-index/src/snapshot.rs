use docqa_core::error::{DocqaError, Result};
use docqa_core::models::{Embedding, ScoredChunk, TextChunk};
use docqa_core::similarity::cosine_similarity;

/// The complete, immutable-once-built searchable state of one corpus.
pub struct IndexSnapshot {
    entries: Vec<Entry>,
}

struct Entry {
    chunk: TextChunk,
    vector: Vec<f32>,
}

/// Summary statistics for a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotStats {
    pub chunk_count: usize,
    pub dimensions: usize,
}

impl IndexSnapshot {
    /// Build a snapshot from chunks and their embeddings.
    ///
    /// Chunks and embeddings are zipped positionally; a count mismatch means
    /// the embedding step lost or duplicated vectors and is rejected. Zero
    /// chunks is a valid (empty) snapshot.
    pub fn build(chunks: Vec<TextChunk>, embeddings: Vec<Embedding>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(DocqaError::IndexBuild {
                reason: format!(
                    "{} chunks but {} embeddings",
                    chunks.len(),
                    embeddings.len()
                ),
            });
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| {
                if chunk.id != embedding.chunk_id {
                    return Err(DocqaError::IndexBuild {
                        reason: format!(
                            "embedding for chunk {} paired with chunk {}",
                            embedding.chunk_id.0, chunk.id.0
                        ),
                    });
                }
                Ok(Entry { chunk, vector: embedding.vector })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// An empty snapshot (zero chunks); every search returns nothing.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Nearest-neighbor search by cosine similarity.
    ///
    /// Returns up to `k` chunks sorted by descending score, breaking ties by
    /// chunk id so results are deterministic. Fewer than `k` entries yields
    /// fewer results; an empty snapshot yields none.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut results: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query, &entry.vector),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        results.truncate(k);

        results
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats {
            chunk_count: self.entries.len(),
            dimensions: self.entries.first().map(|e| e.vector.len()).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_core::models::{ChunkId, ChunkSource};

    fn chunk(id: u64, content: &str) -> TextChunk {
        TextChunk {
            id: ChunkId(id),
            content: content.to_string(),
            source: ChunkSource {
                document_path: "doc.txt".to_string(),
                page: None,
                offset: 0,
            },
        }
    }

    fn embedding(id: u64, vector: Vec<f32>) -> Embedding {
        Embedding { chunk_id: ChunkId(id), vector }
    }

    #[test]
    fn test_empty_snapshot_searches_to_nothing() {
        let snapshot = IndexSnapshot::empty();
        assert!(snapshot.is_empty());
        assert!(snapshot.search(&[1.0, 0.0], 3).is_empty());
        assert_eq!(snapshot.stats(), SnapshotStats { chunk_count: 0, dimensions: 0 });
    }

    #[test]
    fn test_build_from_zero_chunks() {
        let snapshot = IndexSnapshot::build(Vec::new(), Vec::new()).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_build_rejects_count_mismatch() {
        let result = IndexSnapshot::build(vec![chunk(0, "a")], Vec::new());
        assert!(matches!(result, Err(DocqaError::IndexBuild { .. })));
    }

    #[test]
    fn test_build_rejects_id_mismatch() {
        let result =
            IndexSnapshot::build(vec![chunk(0, "a")], vec![embedding(7, vec![1.0])]);
        assert!(matches!(result, Err(DocqaError::IndexBuild { .. })));
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let snapshot = IndexSnapshot::build(
            vec![chunk(0, "x axis"), chunk(1, "y axis"), chunk(2, "diagonal")],
            vec![
                embedding(0, vec![1.0, 0.0]),
                embedding(1, vec![0.0, 1.0]),
                embedding(2, vec![1.0, 1.0]),
            ],
        )
        .unwrap();

        let results = snapshot.search(&[1.0, 0.0], 3);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].chunk.id, ChunkId(0));
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[1].chunk.id, ChunkId(2));
        assert_eq!(results[2].chunk.id, ChunkId(1));
    }

    #[test]
    fn test_search_returns_fewer_than_k_when_small() {
        let snapshot = IndexSnapshot::build(
            vec![chunk(0, "only")],
            vec![embedding(0, vec![1.0, 0.0])],
        )
        .unwrap();

        let results = snapshot.search(&[0.5, 0.5], 3);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_truncates_to_k() {
        let chunks: Vec<TextChunk> = (0..10).map(|i| chunk(i, "c")).collect();
        let embeddings: Vec<Embedding> =
            (0..10).map(|i| embedding(i, vec![i as f32, 1.0])).collect();
        let snapshot = IndexSnapshot::build(chunks, embeddings).unwrap();

        assert_eq!(snapshot.search(&[1.0, 0.0], 3).len(), 3);
    }

    #[test]
    fn test_zero_query_vector_scores_all_zero() {
        let snapshot = IndexSnapshot::build(
            vec![chunk(0, "a"), chunk(1, "b")],
            vec![embedding(0, vec![1.0, 2.0]), embedding(1, vec![3.0, 4.0])],
        )
        .unwrap();

        let results = snapshot.search(&[0.0, 0.0], 2);
        assert!(results.iter().all(|r| r.score == 0.0));
        // Ties broken by chunk id
        assert_eq!(results[0].chunk.id, ChunkId(0));
    }
}

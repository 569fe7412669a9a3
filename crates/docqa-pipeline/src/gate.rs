use docqa_core::error::Result;
use docqa_core::models::ScoredChunk;
use docqa_core::similarity::cosine_similarity;
use docqa_index::IndexSnapshot;
use docqa_llm::Embedder;

/// Decides whether the corpus is likely to contain the answer before a
/// generation call is spent.
pub struct RelevanceGate {
    /// Number of chunks retrieved per question
    pub top_k: usize,
    /// Minimum recomputed cosine similarity required to proceed
    pub score_threshold: f32,
}

/// Outcome of the relevance check
pub enum GateDecision {
    /// The corpus has at least one sufficiently similar chunk; proceed with
    /// these as generation context, scored by the recomputed similarity.
    Relevant(Vec<ScoredChunk>),
    /// Nothing retrieved clears the threshold; refuse without generating.
    NoMatch,
}

impl RelevanceGate {
    pub fn new(top_k: usize, score_threshold: f32) -> Self {
        Self { top_k, score_threshold }
    }

    /// Run the gate for one question against the given snapshot.
    ///
    /// Retrieval order comes from the index's stored vectors, but the
    /// confidence decision uses freshly recomputed similarities: each
    /// retrieved chunk's text is re-embedded and compared against the query
    /// vector. The index score only selects candidates; the recomputed score
    /// decides. This keeps the threshold calibrated against the live
    /// embedding service rather than whatever metric the index stored, and
    /// doubles as a staleness check on the snapshot.
    pub async fn evaluate(
        &self,
        embedder: &dyn Embedder,
        snapshot: &IndexSnapshot,
        question: &str,
    ) -> Result<GateDecision> {
        let query_vector = embedder.embed_query(question).await?;

        let retrieved = snapshot.search(&query_vector, self.top_k);
        if retrieved.is_empty() {
            tracing::info!("Gate: no chunks retrieved");
            return Ok(GateDecision::NoMatch);
        }

        let texts: Vec<String> = retrieved.iter().map(|s| s.chunk.content.clone()).collect();
        let fresh_vectors = embedder.embed_documents(&texts).await?;

        let rescored: Vec<ScoredChunk> = retrieved
            .into_iter()
            .zip(fresh_vectors.iter())
            .map(|(scored, vector)| ScoredChunk {
                score: cosine_similarity(&query_vector, vector),
                chunk: scored.chunk,
            })
            .collect();

        let max_score =
            rescored.iter().map(|s| s.score).fold(f32::NEG_INFINITY, f32::max);

        if max_score < self.score_threshold {
            tracing::info!(
                max_score = max_score,
                threshold = self.score_threshold,
                "Gate: best similarity below threshold"
            );
            return Ok(GateDecision::NoMatch);
        }

        tracing::debug!(
            max_score = max_score,
            candidates = rescored.len(),
            "Gate: corpus relevant"
        );

        Ok(GateDecision::Relevant(rescored))
    }
}

//! Pipeline orchestration: the `load`/`answer` state machine.
//!
//! Snapshot access uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. The lock is never held across an await point.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use docqa_core::config::PipelineConfig;
use docqa_core::error::Result;
use docqa_core::ingest::DocumentIngestor;
use docqa_core::models::{Embedding, TextChunk};
use docqa_core::processing::TextSplitter;
use docqa_index::IndexSnapshot;
use docqa_llm::{Embedder, Generator};

use crate::compose::{AnswerComposer, Composition, REFUSAL};
use crate::gate::{GateDecision, RelevanceGate};

const EMBED_BATCH_SIZE: usize = 32;

const NOT_INITIALIZED: &str = "RAG pipeline is not initialized with documents.";
const SERVICE_ERROR: &str = "An error occurred while processing your question.";

/// Result of one `answer` call.
///
/// The variants carry the distinction a bare string cannot: a refusal, an
/// uninitialized pipeline, and a recovered service failure all have fixed
/// user-facing messages, while `Answer` carries generated text. `message()`
/// flattens back to the legacy strings for the HTTP surface.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// A generated answer grounded in retrieved chunks
    Answer(String),
    /// The corpus has no sufficiently relevant passage
    Refused,
    /// No corpus has been loaded yet
    NotInitialized,
    /// An embedding or generation failure, recovered at this boundary
    ServiceError,
}

impl AnswerOutcome {
    /// The user-facing string for this outcome
    pub fn message(&self) -> &str {
        match self {
            AnswerOutcome::Answer(text) => text,
            AnswerOutcome::Refused => REFUSAL,
            AnswerOutcome::NotInitialized => NOT_INITIALIZED,
            AnswerOutcome::ServiceError => SERVICE_ERROR,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            AnswerOutcome::Answer(text) => text,
            other => other.message().to_string(),
        }
    }
}

/// Summary of one `load` run
#[derive(Debug, Clone)]
pub struct LoadSummary {
    /// Distinct source documents that contributed passages
    pub documents: usize,
    /// Chunks in the published snapshot
    pub chunks: usize,
    /// When the snapshot was published
    pub indexed_at: DateTime<Utc>,
}

/// Owns the live index snapshot and wires ingestion, chunking, embedding,
/// gating, and composition into `load` and `answer`.
pub struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    ingestor: DocumentIngestor,
    splitter: TextSplitter,
    gate: RelevanceGate,
    composer: AnswerComposer,

    /// The live snapshot; `None` until the first successful `load`.
    /// Replaced atomically, so readers see the old or the new snapshot,
    /// never a half-built one.
    snapshot: RwLock<Option<Arc<IndexSnapshot>>>,

    /// Serializes concurrent `load` calls relative to each other
    rebuild_lock: tokio::sync::Mutex<()>,
}

impl RagPipeline {
    /// Build a pipeline from a validated configuration.
    ///
    /// Fails fast on degenerate settings (overlap >= chunk size, zero top-k)
    /// rather than degrading at query time.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        config: &PipelineConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            embedder,
            generator,
            ingestor: DocumentIngestor::new(),
            splitter: TextSplitter::new(config.chunk_size.value, config.chunk_overlap.value)?,
            gate: RelevanceGate::new(config.top_k.value, config.score_threshold.value),
            composer: AnswerComposer::new(config.temperature.value),
            snapshot: RwLock::new(None),
            rebuild_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Whether a snapshot has been published (possibly an empty one)
    pub fn is_indexed(&self) -> bool {
        self.snapshot.read().unwrap().is_some()
    }

    /// Ingest a folder, rebuild the index, and publish the new snapshot.
    ///
    /// The snapshot is built fully off to the side and swapped in under the
    /// write lock, so concurrent `answer` calls keep reading the previous
    /// snapshot until the new one is complete. Rebuilds are serialized;
    /// an unreadable directory propagates as an error and leaves any prior
    /// snapshot in place. A folder yielding zero chunks still publishes an
    /// (empty) snapshot: subsequent questions gate to refusal, they do not
    /// fail.
    pub async fn load(&self, folder: &Path) -> Result<LoadSummary> {
        let _rebuild = self.rebuild_lock.lock().await;

        let passages = self.ingestor.ingest_dir(folder).await?;
        let documents: HashSet<&str> =
            passages.iter().map(|p| p.source.as_str()).collect();
        let document_count = documents.len();

        let chunks = self.splitter.split(&passages);
        let chunk_count = chunks.len();

        let embeddings = self.embed_chunks(&chunks).await?;
        let snapshot = IndexSnapshot::build(chunks, embeddings)?;

        *self.snapshot.write().unwrap() = Some(Arc::new(snapshot));

        let summary = LoadSummary {
            documents: document_count,
            chunks: chunk_count,
            indexed_at: Utc::now(),
        };

        tracing::info!(
            documents = summary.documents,
            chunks = summary.chunks,
            "Index snapshot published"
        );

        Ok(summary)
    }

    /// Answer a question from the current snapshot.
    ///
    /// Never returns an error: failures below this boundary are logged and
    /// collapsed into the fixed outcome variants.
    pub async fn answer(&self, question: &str) -> AnswerOutcome {
        let question = question.trim();

        // Clone the Arc out so the lock is released before any await
        let snapshot = { self.snapshot.read().unwrap().clone() };

        let Some(snapshot) = snapshot else {
            tracing::info!("Question received before any corpus was loaded");
            return AnswerOutcome::NotInitialized;
        };

        let decision =
            match self.gate.evaluate(self.embedder.as_ref(), &snapshot, question).await {
                Ok(decision) => decision,
                Err(e) => {
                    tracing::error!(error = %e, "Relevance gate failed");
                    return AnswerOutcome::ServiceError;
                }
            };

        let context = match decision {
            GateDecision::NoMatch => return AnswerOutcome::Refused,
            GateDecision::Relevant(context) => context,
        };

        match self.composer.compose(self.generator.as_ref(), question, &context).await {
            Ok(Composition::Answer(text)) => AnswerOutcome::Answer(text),
            Ok(Composition::Refusal) => AnswerOutcome::Refused,
            Err(e) => {
                tracing::error!(error = %e, "Answer composition failed");
                AnswerOutcome::ServiceError
            }
        }
    }

    /// Embed all chunks in batches, pairing each vector with its chunk id.
    async fn embed_chunks(&self, chunks: &[TextChunk]) -> Result<Vec<Embedding>> {
        let mut embeddings = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let vectors = self.embedder.embed_documents(&texts).await?;

            for (chunk, vector) in batch.iter().zip(vectors.into_iter()) {
                embeddings.push(Embedding { chunk_id: chunk.id, vector });
            }
        }

        Ok(embeddings)
    }
}

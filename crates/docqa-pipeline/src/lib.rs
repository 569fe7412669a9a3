//! DocQA Pipeline - retrieval gating, answer composition, and orchestration
//!
//! The pipeline owns the live index snapshot and wires ingestion, chunking,
//! embedding, the relevance gate, and the answer composer into the two
//! public operations: `load` and `answer`.

pub mod compose;
pub mod gate;
pub mod pipeline;

pub use compose::AnswerComposer;
pub use gate::{GateDecision, RelevanceGate};
pub use pipeline::{AnswerOutcome, LoadSummary, RagPipeline};

use docqa_core::error::Result;
use docqa_core::models::ScoredChunk;
use docqa_llm::Generator;

/// Canonical refusal string returned whenever the corpus cannot answer.
pub const REFUSAL: &str =
    "I don’t know. That question seems unrelated to the uploaded documents.";

const SYSTEM_INSTRUCTIONS: &str = "\
You are a document knowledge assistant. You must answer user questions strictly using the information from the retrieved documents.

Rules:
1. Only use the provided context (documents) to answer.
2. If the answer is not found in the documents, say: \"I don’t know. That question seems unrelated to the uploaded documents.\"
3. Do not hallucinate facts, definitions, or processes.
4. Be concise, clear, and accurate.
5. If multiple documents provide conflicting answers, indicate this and summarize.";

/// Composes a grounded prompt from gate-selected chunks and cleans up the
/// generated text.
pub struct AnswerComposer {
    /// Generation temperature
    pub temperature: f32,
}

/// What the composer produced
pub enum Composition {
    /// A grounded, trimmed answer
    Answer(String),
    /// The generator declined (or produced nothing); callers return the
    /// canonical refusal.
    Refusal,
}

impl AnswerComposer {
    pub fn new(temperature: f32) -> Self {
        Self { temperature }
    }

    /// Assemble the prompt, invoke the generator, and post-process.
    pub async fn compose(
        &self,
        generator: &dyn Generator,
        question: &str,
        context: &[ScoredChunk],
    ) -> Result<Composition> {
        let prompt = build_prompt(question, context);
        let raw = generator.complete(&prompt, self.temperature).await?;
        Ok(postprocess(&raw))
    }
}

/// Fixed instructions, then the context block, then the question.
fn build_prompt(question: &str, context: &[ScoredChunk]) -> String {
    let context_block: Vec<&str> =
        context.iter().map(|scored| scored.chunk.content.as_str()).collect();

    format!(
        "{}\n\nContext:\n{}\n\nQuestion:\n{}\n\nAnswer:",
        SYSTEM_INSTRUCTIONS,
        context_block.join("\n\n"),
        question
    )
}

/// Trim the generated text and normalize refusal phrasings.
///
/// Generators phrase "I don't know" with either a straight or a typographic
/// apostrophe; both collapse to the one canonical refusal string so callers
/// see a single fixed sentinel. Everything else passes through trimmed and
/// otherwise unmodified.
fn postprocess(raw: &str) -> Composition {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Composition::Refusal;
    }

    let normalized = trimmed.to_lowercase().replace('\u{2019}', "'");
    if normalized.starts_with("i don't know") {
        return Composition::Refusal;
    }

    Composition::Answer(trimmed.to_string())
}

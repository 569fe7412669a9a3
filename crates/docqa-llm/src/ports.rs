//! LLM port definitions

use async_trait::async_trait;
use docqa_core::error::Result;

/// Port for embedding text into vector representations
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single query string
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of document texts
    ///
    /// # Returns
    /// One embedding vector per input text, in input order
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the name/identifier of the embedding model
    fn model_name(&self) -> &str;
}

/// Port for text generation
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for a prompt at the given temperature
    ///
    /// Transient failures (network, quota) surface as errors, never as a
    /// partial or corrupt answer.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String>;
}

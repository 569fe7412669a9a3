use async_trait::async_trait;
use docqa_core::error::{DocqaError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{Embedder, Generator};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI adapter implementing both the `Embedder` and `Generator` ports.
pub struct OpenAiClient {
    /// Base URL for the API (override for gateways and tests)
    base_url: String,

    /// API key sent as a bearer token
    api_key: String,

    /// Embedding model name
    embedding_model: String,

    /// Chat model name
    chat_model: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client against the public OpenAI API
    pub fn new(
        api_key: impl Into<String>,
        embedding_model: impl Into<String>,
        chat_model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            embedding_model: embedding_model.into(),
            chat_model: chat_model.into(),
            // Bounded timeout so a wedged upstream cannot hang a request
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Override the API base URL (e.g. a local gateway)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request_embeddings(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingsRequest {
            model: self.embedding_model.clone(),
            input: inputs.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DocqaError::EmbedderUnavailable {
                reason: format!("Failed to reach embeddings endpoint: {}", e),
                remediation: format!(
                    "Check network access to {} and that OPENAI_API_KEY is set",
                    self.base_url
                ),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DocqaError::EmbedderUnavailable {
                reason: format!("Embeddings API error ({}): {}", status, error_text),
                remediation: format!(
                    "Verify the API key and that the model '{}' is available",
                    self.embedding_model
                ),
            });
        }

        let body: EmbeddingsResponse =
            response.json().await.map_err(|e| DocqaError::EmbedderUnavailable {
                reason: format!("Failed to parse embeddings response: {}", e),
                remediation: "Check API compatibility of the configured endpoint".to_string(),
            })?;

        // The API may return items out of order; re-sort by index
        let mut data = body.data;
        data.sort_by_key(|item| item.index);

        if data.len() != inputs.len() {
            return Err(DocqaError::EmbedderUnavailable {
                reason: format!(
                    "Embeddings response had {} items for {} inputs",
                    data.len(),
                    inputs.len()
                ),
                remediation: "Check API compatibility of the configured endpoint".to_string(),
            });
        }

        Ok(data.into_iter().map(|item| item.embedding).collect())
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.request_embeddings(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| DocqaError::EmbedderUnavailable {
            reason: "Embeddings response was empty".to_string(),
            remediation: "Check API compatibility of the configured endpoint".to_string(),
        })
    }

    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.request_embeddings(texts).await
    }

    fn model_name(&self) -> &str {
        &self.embedding_model
    }
}

#[async_trait]
impl Generator for OpenAiClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        let request = ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DocqaError::GeneratorUnavailable {
                reason: format!("Failed to reach chat endpoint: {}", e),
                remediation: format!(
                    "Check network access to {} and that OPENAI_API_KEY is set",
                    self.base_url
                ),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DocqaError::GeneratorUnavailable {
                reason: format!("Chat API error ({}): {}", status, error_text),
                remediation: format!(
                    "Verify the API key and that the model '{}' is available",
                    self.chat_model
                ),
            });
        }

        let body: ChatResponse =
            response.json().await.map_err(|e| DocqaError::GeneratorUnavailable {
                reason: format!("Failed to parse chat response: {}", e),
                remediation: "Check API compatibility of the configured endpoint".to_string(),
            })?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DocqaError::GeneratorUnavailable {
                reason: "Chat response contained no choices".to_string(),
                remediation: "Check API compatibility of the configured endpoint".to_string(),
            })
    }
}

/// Request body for the embeddings API
#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

/// Response from the embeddings API
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

use crate::error::{DocqaError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the DocQA pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Chunk size in characters
    pub chunk_size: ConfigValue<usize>,
    /// Overlap between consecutive chunks, in characters
    pub chunk_overlap: ConfigValue<usize>,
    /// Number of chunks retrieved per question
    pub top_k: ConfigValue<usize>,
    /// Minimum cosine similarity required to attempt an answer
    pub score_threshold: ConfigValue<f32>,
    /// Generation temperature
    pub temperature: ConfigValue<f32>,
    /// Embedding model identifier
    pub embedding_model: ConfigValue<String>,
    /// Chat model identifier
    pub chat_model: ConfigValue<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PipelineConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            chunk_size: ConfigValue::new(1000, ConfigSource::Default),
            chunk_overlap: ConfigValue::new(200, ConfigSource::Default),
            top_k: ConfigValue::new(3, ConfigSource::Default),
            score_threshold: ConfigValue::new(0.75, ConfigSource::Default),
            temperature: ConfigValue::new(0.7, ConfigSource::Default),
            embedding_model: ConfigValue::new(
                "text-embedding-ada-002".to_string(),
                ConfigSource::Default,
            ),
            chat_model: ConfigValue::new("gpt-3.5-turbo".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| DocqaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| DocqaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(chunk_size) = file_config.chunk_size {
            self.chunk_size.update(chunk_size, ConfigSource::File);
        }

        if let Some(chunk_overlap) = file_config.chunk_overlap {
            self.chunk_overlap.update(chunk_overlap, ConfigSource::File);
        }

        if let Some(top_k) = file_config.top_k {
            self.top_k.update(top_k, ConfigSource::File);
        }

        if let Some(score_threshold) = file_config.score_threshold {
            self.score_threshold.update(score_threshold, ConfigSource::File);
        }

        if let Some(temperature) = file_config.temperature {
            self.temperature.update(temperature, ConfigSource::File);
        }

        if let Some(embedding_model) = file_config.embedding_model {
            self.embedding_model.update(embedding_model, ConfigSource::File);
        }

        if let Some(chat_model) = file_config.chat_model {
            self.chat_model.update(chat_model, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(raw) = env::var("DOCQA_CHUNK_SIZE") {
            match raw.parse::<usize>() {
                Ok(v) => self.chunk_size.update(v, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCQA_CHUNK_SIZE value '{}': expected positive integer",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("DOCQA_CHUNK_OVERLAP") {
            match raw.parse::<usize>() {
                Ok(v) => self.chunk_overlap.update(v, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCQA_CHUNK_OVERLAP value '{}': expected integer",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("DOCQA_TOP_K") {
            match raw.parse::<usize>() {
                Ok(v) => self.top_k.update(v, ConfigSource::Environment),
                Err(_) => {
                    tracing::warn!("Invalid DOCQA_TOP_K value '{}': expected integer", raw)
                }
            }
        }

        if let Ok(raw) = env::var("DOCQA_SCORE_THRESHOLD") {
            match raw.parse::<f32>() {
                Ok(v) => self.score_threshold.update(v, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCQA_SCORE_THRESHOLD value '{}': expected number in [-1, 1]",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("DOCQA_TEMPERATURE") {
            match raw.parse::<f32>() {
                Ok(v) => self.temperature.update(v, ConfigSource::Environment),
                Err(_) => {
                    tracing::warn!("Invalid DOCQA_TEMPERATURE value '{}': expected number", raw)
                }
            }
        }

        if let Ok(model) = env::var("DOCQA_EMBEDDING_MODEL") {
            self.embedding_model.update(model, ConfigSource::Environment);
        }

        if let Ok(model) = env::var("DOCQA_CHAT_MODEL") {
            self.chat_model.update(model, ConfigSource::Environment);
        }

        self
    }

    /// Validate the configuration, failing fast on degenerate values.
    ///
    /// An overlap at or above the chunk size would make the splitter loop
    /// without advancing, so it is rejected here rather than downstream.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size.value == 0 {
            return Err(DocqaError::ConfigInvalid {
                key: "chunk_size".to_string(),
                reason: "chunk_size must be greater than zero".to_string(),
            });
        }

        if self.chunk_overlap.value >= self.chunk_size.value {
            return Err(DocqaError::ConfigInvalid {
                key: "chunk_overlap".to_string(),
                reason: format!(
                    "overlap ({}) must be less than chunk_size ({})",
                    self.chunk_overlap.value, self.chunk_size.value
                ),
            });
        }

        if self.top_k.value == 0 {
            return Err(DocqaError::ConfigInvalid {
                key: "top_k".to_string(),
                reason: "top_k must be at least 1".to_string(),
            });
        }

        let threshold = self.score_threshold.value;
        if !(-1.0..=1.0).contains(&threshold) || threshold.is_nan() {
            return Err(DocqaError::ConfigInvalid {
                key: "score_threshold".to_string(),
                reason: format!("threshold ({}) must be a cosine value in [-1, 1]", threshold),
            });
        }

        Ok(())
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    top_k: Option<usize>,
    score_threshold: Option<f32>,
    temperature: Option<f32>,
    embedding_model: Option<String>,
    chat_model: Option<String>,
}

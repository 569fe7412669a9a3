//! DocQA LLM - Embedding and generation ports
//!
//! This crate defines the ports for embedding and text generation, along
//! with the OpenAI adapter implementation.

pub mod openai;
pub mod ports;

pub use openai::OpenAiClient;
pub use ports::{Embedder, Generator};

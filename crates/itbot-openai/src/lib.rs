//! OpenAI-compatible provider for itbot
//!
//! Works with any server exposing `/v1/embeddings` and `/v1/chat/completions`:
//! OpenAI itself, LM Studio, Ollama or vLLM.

mod client;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, OpenAiClient, OpenAiConfig,
};

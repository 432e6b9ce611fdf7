//! watsonx.ai integration for itbot
//!
//! This crate provides the watsonx.ai implementation of the `LLMProvider` and
//! `EmbeddingProvider` traits. One authenticated client serves both roles.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::WatsonxClient;
pub use config::{DEFAULT_API_URL, DEFAULT_IAM_URL, WatsonxConfig};

// Re-export core types for convenience
pub use itbot_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LLMProvider, Result,
};

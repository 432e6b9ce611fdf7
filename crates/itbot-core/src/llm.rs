//! LLM provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Result;

/// Sampling temperature used for every answer.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Configuration for text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub stop_sequences: Vec<String>,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: "mistralai/mistral-large".to_string(),
            max_tokens: 200,
            temperature: Some(DEFAULT_TEMPERATURE),
            top_p: None,
            stop_sequences: Vec::new(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Result of a text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for hosted chat models (e.g., watsonx.ai, OpenAI-compatible servers)
///
/// The prompt is sent as a single user turn; there is no conversation memory.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Connect/authenticate with the LLM provider
    async fn connect(&mut self) -> Result<()>;

    /// Generate text using the provider's default configuration
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;

    /// Generate text with custom configuration
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}

//! Chatbot configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use itbot_core::{DEFAULT_TEMPERATURE, Error, Result};

/// Pipeline settings: corpus location, model identifiers and retrieval knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBotConfig {
    pub corpus_path: PathBuf,
    pub embedding_model: String,
    pub chat_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub embed_batch_size: usize,
}

impl Default for ChatBotConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("data/it_sector.txt"),
            embedding_model: "ibm/slate-125m-english-rtrvr".to_string(),
            chat_model: "mistralai/mistral-large".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: 200,
            chunk_size: 100,
            chunk_overlap: 4,
            top_k: 4,
            embed_batch_size: 64,
        }
    }
}

impl ChatBotConfig {
    /// Create configuration from defaults overridden by environment variables
    ///
    /// Values are parsed but not validated, so later overrides (CLI flags) can
    /// still fix them. Call [`ChatBotConfig::validate`] once they are applied.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("ITBOT_CORPUS_PATH") {
            config.corpus_path = PathBuf::from(path);
        }
        if let Some(model) = lookup("ITBOT_EMBEDDING_MODEL") {
            config.embedding_model = model;
        }
        if let Some(model) = lookup("ITBOT_CHAT_MODEL") {
            config.chat_model = model;
        }
        if let Some(value) = parse_var(&lookup, "ITBOT_TEMPERATURE")? {
            config.temperature = value;
        }
        if let Some(value) = parse_var(&lookup, "ITBOT_MAX_TOKENS")? {
            config.max_tokens = value;
        }
        if let Some(value) = parse_var(&lookup, "ITBOT_CHUNK_SIZE")? {
            config.chunk_size = value;
        }
        if let Some(value) = parse_var(&lookup, "ITBOT_CHUNK_OVERLAP")? {
            config.chunk_overlap = value;
        }
        if let Some(value) = parse_var(&lookup, "ITBOT_TOP_K")? {
            config.top_k = value;
        }
        if let Some(value) = parse_var(&lookup, "ITBOT_EMBED_BATCH_SIZE")? {
            config.embed_batch_size = value;
        }

        Ok(config)
    }

    /// Check the values that would otherwise break ingestion or retrieval
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Configuration("chunk_size must be positive".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::Configuration(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(Error::Configuration("top_k must be positive".to_string()));
        }
        if self.embed_batch_size == 0 {
            return Err(Error::Configuration(
                "embed_batch_size must be positive".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Configuration(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Configuration(format!("invalid {}={:?}: {}", key, raw, e))),
        None => Ok(None),
    }
}

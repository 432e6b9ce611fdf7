//! Error types for itbot

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the chatbot pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load corpus from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("LLM provider error: {0}")]
    LLMProvider(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures of a hosted embedding or chat service call.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            Error::Embedding(_)
                | Error::LLMProvider(_)
                | Error::Authentication(_)
                | Error::Network(_)
                | Error::Timeout(_)
                | Error::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

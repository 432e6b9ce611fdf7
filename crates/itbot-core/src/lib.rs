//! Core traits and types for itbot
//!
//! This crate defines the capability-facing interfaces of the chatbot pipeline:
//! embedding providers, vector stores, retrievers and chat models. Hosted
//! services and the in-memory index implement them elsewhere, which keeps the
//! pipeline testable without network access.

pub mod document_indexer;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod rag;
pub mod vector_store;

pub use document_indexer::IndexingResult;
pub use embedding::{EmbeddingProvider, validate_embeddings};
pub use error::{Error, Result};
pub use llm::{DEFAULT_TEMPERATURE, GenerationConfig, GenerationResult, LLMProvider};
pub use rag::{RAGEngine, RAGQuery, RAGResult};
pub use vector_store::{SearchConfig, SearchResult, VectorDocument, VectorStore};

//! Retrieval-augmented generation pipeline for itbot
//!
//! Ingestion loads a corpus, splits it into overlapping chunks, embeds them
//! and builds an in-memory cosine index. Answering embeds the question,
//! retrieves the nearest chunks, fills the IT support prompt and asks the chat
//! model.

mod chatbot;
mod chunker;
mod config;
mod document_indexer;
mod loader;
mod prompt;
mod retriever;
mod vector_store;


pub use chatbot::ChatBot;
pub use chunker::Chunker;
pub use config::ChatBotConfig;
pub use document_indexer::DocumentIndexer;
pub use loader::load_corpus;
pub use prompt::{IT_SUPPORT_TEMPLATE, PromptTemplate};
pub use retriever::Retriever;
pub use vector_store::LocalVectorStore;

// Re-export core types for convenience
pub use itbot_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, IndexingResult, LLMProvider,
    RAGEngine, RAGQuery, RAGResult, Result, SearchConfig, SearchResult, VectorDocument,
    VectorStore,
};

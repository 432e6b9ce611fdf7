//! Vector store trait and types

use serde::{Deserialize, Serialize};

use crate::Result;

/// A chunk stored in the vector store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDocument {
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub score: Option<f32>,
}

/// Search result from vector store, nearest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub documents: Vec<VectorDocument>,
    pub total: usize,
}

/// Configuration for vector search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub top_k: usize,
    pub score_threshold: Option<f32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            score_threshold: None,
        }
    }
}

/// Trait for read-only similarity indexes
///
/// An index is fully built before it is searched and never changes afterwards,
/// so shared references may be searched from several tasks at once.
pub trait VectorStore: Send + Sync {
    /// Return the `top_k` documents most similar to `vector`, nearest first
    fn search_by_vector(&self, vector: &[f32], config: &SearchConfig) -> Result<SearchResult>;

    /// Get the total number of documents
    fn count(&self) -> usize;

    /// Dimension shared by every stored vector, `None` when empty
    fn dimension(&self) -> Option<usize>;

    /// Check if the store holds no documents
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

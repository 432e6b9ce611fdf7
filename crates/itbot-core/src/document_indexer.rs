//! Indexing summary types

use serde::{Deserialize, Serialize};

/// Result of an ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingResult {
    pub chunks_indexed: usize,
    pub embedding_dimension: Option<usize>,
    pub batches: usize,
}

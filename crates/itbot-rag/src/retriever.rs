//! Question-to-context retrieval

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use itbot_core::{
    EmbeddingProvider, RAGEngine, RAGQuery, RAGResult, Result, SearchConfig, VectorDocument,
    VectorStore,
};

/// Embeds a question and pulls the nearest chunks out of a vector store
pub struct Retriever<E: EmbeddingProvider, V: VectorStore> {
    embedder: Arc<E>,
    vector_store: Arc<V>,
}

impl<E: EmbeddingProvider, V: VectorStore> Retriever<E, V> {
    pub fn new(embedder: Arc<E>, vector_store: Arc<V>) -> Self {
        Self {
            embedder,
            vector_store,
        }
    }

    pub fn vector_store(&self) -> &V {
        &self.vector_store
    }
}

#[async_trait]
impl<E: EmbeddingProvider, V: VectorStore> RAGEngine for Retriever<E, V> {
    async fn retrieve(&self, query: &RAGQuery) -> Result<RAGResult> {
        if self.vector_store.is_empty() {
            return Ok(RAGResult {
                documents: Vec::new(),
                context: String::new(),
            });
        }

        let vector = self.embedder.embed_query(&query.query).await?;
        itbot_core::validate_embeddings(1, std::slice::from_ref(&vector))?;
        let search_config = SearchConfig {
            top_k: query.top_k,
            score_threshold: None,
        };
        let search_result = self.vector_store.search_by_vector(&vector, &search_config)?;

        debug!(
            query = %query.query,
            chunks = search_result.total,
            "retrieved context"
        );

        let context = self.build_context(&search_result.documents);
        Ok(RAGResult {
            documents: search_result.documents,
            context,
        })
    }

    fn build_context(&self, documents: &[VectorDocument]) -> String {
        documents
            .iter()
            .map(|doc| doc.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

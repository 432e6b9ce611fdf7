//! Ingestion: chunk, embed in batches, build the index

use std::sync::Arc;
use tracing::{debug, info};

use itbot_core::{EmbeddingProvider, IndexingResult, Result, VectorStore};

use crate::chunker::Chunker;
use crate::vector_store::LocalVectorStore;

/// Turns raw corpus text into a ready [`LocalVectorStore`]
pub struct DocumentIndexer<E: EmbeddingProvider> {
    embedder: Arc<E>,
    chunker: Chunker,
    batch_size: usize,
}

impl<E: EmbeddingProvider> DocumentIndexer<E> {
    pub fn new(embedder: Arc<E>, chunker: Chunker, batch_size: usize) -> Self {
        Self {
            embedder,
            chunker,
            batch_size: batch_size.max(1),
        }
    }

    /// Chunk `text`, embed every chunk and build the index.
    ///
    /// Any embedding failure aborts the whole run; a partial index is never
    /// returned.
    pub async fn index_text(&self, text: &str) -> Result<(LocalVectorStore, IndexingResult)> {
        let chunks = self.chunker.split(text);
        let mut vectors = Vec::with_capacity(chunks.len());
        let mut batches = 0;

        for batch in chunks.chunks(self.batch_size) {
            let embedded = self.embedder.embed(batch).await?;
            itbot_core::validate_embeddings(batch.len(), &embedded)?;
            batches += 1;
            debug!(batch = batches, size = batch.len(), "embedded chunk batch");
            vectors.extend(embedded);
        }

        let store = LocalVectorStore::build(chunks, vectors)?;
        let result = IndexingResult {
            chunks_indexed: store.count(),
            embedding_dimension: store.dimension(),
            batches,
        };

        info!(
            chunks = result.chunks_indexed,
            batches = result.batches,
            model = self.embedder.model_id(),
            "corpus indexed"
        );

        Ok((store, result))
    }
}

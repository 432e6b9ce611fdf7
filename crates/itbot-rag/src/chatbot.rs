//! The RAG chatbot: ingestion once, then stateless question answering

use std::sync::Arc;
use tracing::info;

use itbot_core::{
    EmbeddingProvider, GenerationConfig, IndexingResult, LLMProvider, RAGEngine, RAGQuery, Result,
};

use crate::chunker::Chunker;
use crate::config::ChatBotConfig;
use crate::document_indexer::DocumentIndexer;
use crate::loader::load_corpus;
use crate::prompt::PromptTemplate;
use crate::retriever::Retriever;
use crate::vector_store::LocalVectorStore;

/// An IT support chatbot over an indexed corpus
///
/// Only [`ChatBot::ingest`] and [`ChatBot::from_text`] construct one, so a
/// value of this type always has a complete index. Each question is answered
/// independently; nothing is remembered between calls.
pub struct ChatBot<E: EmbeddingProvider, L: LLMProvider> {
    retriever: Retriever<E, LocalVectorStore>,
    llm: L,
    prompt: PromptTemplate,
    generation: GenerationConfig,
    top_k: usize,
    stats: IndexingResult,
}

impl<E: EmbeddingProvider, L: LLMProvider> ChatBot<E, L> {
    /// Load the configured corpus and index it
    pub async fn ingest(config: &ChatBotConfig, embedder: E, llm: L) -> Result<Self> {
        config.validate()?;
        let text = load_corpus(&config.corpus_path)?;
        info!(path = %config.corpus_path.display(), "ingesting corpus");
        Self::from_text(&text, config, embedder, llm).await
    }

    /// Index an in-memory corpus
    pub async fn from_text(text: &str, config: &ChatBotConfig, embedder: E, llm: L) -> Result<Self> {
        config.validate()?;

        let embedder = Arc::new(embedder);
        let chunker = Chunker::new(config.chunk_size, config.chunk_overlap)?;
        let indexer = DocumentIndexer::new(embedder.clone(), chunker, config.embed_batch_size);
        let (store, stats) = indexer.index_text(text).await?;

        let generation = GenerationConfig {
            model_id: config.chat_model.clone(),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
            ..Default::default()
        };

        Ok(Self {
            retriever: Retriever::new(embedder, Arc::new(store)),
            llm,
            prompt: PromptTemplate::it_support(),
            generation,
            top_k: config.top_k,
            stats,
        })
    }

    /// Replace the built-in prompt
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Retrieve context for `question` and render the prompt the model would see
    pub async fn build_prompt(&self, question: &str) -> Result<String> {
        let query = RAGQuery::new(question, self.top_k);
        let rag_result = self.retriever.retrieve(&query).await?;
        Ok(self.prompt.render(&rag_result.context, question))
    }

    /// Answer a question
    pub async fn ask(&self, question: &str) -> Result<String> {
        let prompt = self.build_prompt(question).await?;
        info!(target: "itbot::prompt", "Prompt sent to LLM:\n{}", prompt);

        let result = self.llm.generate_with_config(&prompt, &self.generation).await?;
        Ok(result.text)
    }

    /// Summary of the ingestion run
    pub fn stats(&self) -> &IndexingResult {
        &self.stats
    }

    pub fn vector_store(&self) -> &LocalVectorStore {
        self.retriever.vector_store()
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }
}

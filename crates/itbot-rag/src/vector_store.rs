//! In-memory cosine similarity index

use tracing::debug;

use itbot_core::{Error, Result, SearchConfig, SearchResult, VectorDocument, VectorStore};

/// Brute-force vector index over chunk embeddings
///
/// Built once from parallel chunk and vector sequences; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LocalVectorStore {
    documents: Vec<VectorDocument>,
    dimension: Option<usize>,
}

impl LocalVectorStore {
    /// Build an index from chunk texts and their embeddings.
    ///
    /// Fails with [`Error::Precondition`] if the sequences differ in length or
    /// the vectors do not all share one non-zero dimension.
    pub fn build(chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != vectors.len() {
            return Err(Error::Precondition(format!(
                "{} chunks but {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }

        let dimension = vectors.first().map(Vec::len);
        if let Some(dim) = dimension {
            if dim == 0 {
                return Err(Error::Precondition("embedding vectors are empty".to_string()));
            }
            if let Some(bad) = vectors.iter().position(|v| v.len() != dim) {
                return Err(Error::Precondition(format!(
                    "vector {} has dimension {}, expected {}",
                    bad,
                    vectors[bad].len(),
                    dim
                )));
            }
        }
        if let Some(bad) = vectors.iter().position(|v| !is_finite(v)) {
            return Err(Error::Precondition(format!(
                "vector {} contains a non-finite value",
                bad
            )));
        }

        let documents = chunks
            .into_iter()
            .zip(vectors)
            .enumerate()
            .map(|(i, (content, embedding))| VectorDocument {
                id: format!("chunk_{}", i),
                content,
                embedding: Some(embedding),
                score: None,
            })
            .collect();

        Ok(Self {
            documents,
            dimension,
        })
    }

    /// Stored documents in insertion order
    pub fn documents(&self) -> &[VectorDocument] {
        &self.documents
    }

    /// Cosine similarity; zero-norm vectors score 0.0
    pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

fn is_finite(vector: &[f32]) -> bool {
    vector.iter().all(|x| x.is_finite())
}

impl VectorStore for LocalVectorStore {
    fn search_by_vector(&self, vector: &[f32], config: &SearchConfig) -> Result<SearchResult> {
        if let Some(dim) = self.dimension {
            if vector.len() != dim {
                return Err(Error::Precondition(format!(
                    "query vector has dimension {}, index has {}",
                    vector.len(),
                    dim
                )));
            }
        }
        if !is_finite(vector) {
            return Err(Error::Precondition(
                "query vector contains a non-finite value".to_string(),
            ));
        }

        let mut scored: Vec<(usize, f32)> = self
            .documents
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| {
                doc.embedding
                    .as_deref()
                    .map(|embedding| (i, Self::cosine_similarity(vector, embedding)))
            })
            .filter(|(_, score)| config.score_threshold.is_none_or(|t| *score >= t))
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(config.top_k);

        let documents: Vec<VectorDocument> = scored
            .into_iter()
            .map(|(i, score)| {
                let doc = &self.documents[i];
                VectorDocument {
                    id: doc.id.clone(),
                    content: doc.content.clone(),
                    embedding: None,
                    score: Some(score),
                }
            })
            .collect();

        debug!(
            hits = documents.len(),
            top_k = config.top_k,
            "vector search complete"
        );

        let total = documents.len();
        Ok(SearchResult { documents, total })
    }

    fn count(&self) -> usize {
        self.documents.len()
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> LocalVectorStore {
        LocalVectorStore::build(
            vec![
                "The sky is blue.".to_string(),
                "Cats are mammals.".to_string(),
                "Routers forward packets.".to_string(),
            ],
            vec![vec![0.9, 0.1, 0.3], vec![0.0, 1.0, 0.0], vec![0.8, 0.0, 0.6]],
        )
        .unwrap()
    }

    #[test]
    fn test_build_rejects_mismatched_lengths() {
        let err = LocalVectorStore::build(vec!["a".to_string()], vec![]).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_build_rejects_mixed_dimensions() {
        let err = LocalVectorStore::build(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0, 0.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_build_rejects_empty_vectors() {
        let err = LocalVectorStore::build(vec!["a".to_string()], vec![vec![]]).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_search_orders_nearest_first() {
        let store = sample_store();
        let config = SearchConfig {
            top_k: 3,
            score_threshold: None,
        };

        let results = store.search_by_vector(&[1.0, 0.0, 0.8], &config).unwrap();
        assert_eq!(results.total, 3);

        let scores: Vec<f32> = results.documents.iter().map(|d| d.score.unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(results.documents[0].content, "Routers forward packets.");
        assert_eq!(results.documents[2].content, "Cats are mammals.");
        assert!(results.documents.iter().all(|d| d.embedding.is_none()));
    }

    #[test]
    fn test_search_returns_at_most_k() {
        let store = sample_store();
        let config = SearchConfig {
            top_k: 2,
            score_threshold: None,
        };
        let results = store.search_by_vector(&[0.0, 1.0, 0.0], &config).unwrap();
        assert_eq!(results.documents.len(), 2);
        assert_eq!(results.documents[0].content, "Cats are mammals.");
    }

    #[test]
    fn test_search_with_fewer_entries_than_k() {
        let store = sample_store();
        let config = SearchConfig {
            top_k: 10,
            score_threshold: None,
        };
        let results = store.search_by_vector(&[0.0, 0.0, 1.0], &config).unwrap();
        assert_eq!(results.documents.len(), 3);
    }

    #[test]
    fn test_search_empty_store() {
        let store = LocalVectorStore::build(vec![], vec![]).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.dimension(), None);

        let results = store
            .search_by_vector(&[1.0, 2.0], &SearchConfig::default())
            .unwrap();
        assert!(results.documents.is_empty());
    }

    #[test]
    fn test_search_rejects_wrong_dimension() {
        let store = sample_store();
        let err = store
            .search_by_vector(&[1.0, 0.0], &SearchConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_score_threshold_filters_results() {
        let store = sample_store();
        let config = SearchConfig {
            top_k: 3,
            score_threshold: Some(0.5),
        };
        let results = store.search_by_vector(&[0.0, 1.0, 0.0], &config).unwrap();
        assert_eq!(results.documents.len(), 1);
        assert_eq!(results.documents[0].id, "chunk_1");
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let store = LocalVectorStore::build(
            vec!["first".to_string(), "second".to_string()],
            vec![vec![1.0, 0.0], vec![1.0, 0.0]],
        )
        .unwrap();
        let results = store
            .search_by_vector(&[1.0, 0.0], &SearchConfig::default())
            .unwrap();
        assert_eq!(results.documents[0].content, "first");
        assert_eq!(results.documents[1].content, "second");
    }

    #[test]
    fn test_build_rejects_nan_vector() {
        let err = LocalVectorStore::build(
            vec!["good".to_string(), "nan".to_string()],
            vec![vec![1.0, 0.0], vec![f32::NAN, 0.0]],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_search_rejects_non_finite_query() {
        let store = sample_store();
        let err = store
            .search_by_vector(&[f32::INFINITY, 0.0, 0.0], &SearchConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(LocalVectorStore::cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        let same = LocalVectorStore::cosine_similarity(&[3.0, 4.0], &[3.0, 4.0]);
        assert!((same - 1.0).abs() < 1e-6);
    }
}

//! Embedding provider trait

use async_trait::async_trait;

use crate::{Error, Result};

/// Trait for hosted embedding models
///
/// Implementations return exactly one vector per input, in input order, and
/// every vector has the same dimension.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query string
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed(&[text.to_string()]).await?;
        if vectors.len() != 1 {
            return Err(Error::Embedding(format!(
                "expected 1 embedding for query, got {}",
                vectors.len()
            )));
        }
        Ok(vectors.remove(0))
    }

    /// Get the embedding model ID being used
    fn model_id(&self) -> &str;
}

/// Check that an embedding response lines up with its request.
pub fn validate_embeddings(expected: usize, vectors: &[Vec<f32>]) -> Result<()> {
    if vectors.len() != expected {
        return Err(Error::Embedding(format!(
            "expected {} embeddings, got {}",
            expected,
            vectors.len()
        )));
    }

    if let Some(first) = vectors.first() {
        if first.is_empty() {
            return Err(Error::Embedding("received an empty embedding".to_string()));
        }
        if let Some(bad) = vectors.iter().position(|v| v.len() != first.len()) {
            return Err(Error::Embedding(format!(
                "embedding {} has dimension {}, expected {}",
                bad,
                vectors[bad].len(),
                first.len()
            )));
        }
    }

    if let Some(bad) = vectors.iter().position(|v| v.iter().any(|x| !x.is_finite())) {
        return Err(Error::Embedding(format!(
            "embedding {} contains a non-finite value",
            bad
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEmbedder {
        outputs: usize,
    }

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(vec![vec![1.0, 0.0]; self.outputs])
        }

        fn model_id(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_embed_query_takes_single_vector() {
        let embedder = FixedEmbedder { outputs: 1 };
        let vector = embedder.embed_query("hello").await.unwrap();
        assert_eq!(vector, vec![1.0, 0.0]);
    }

    #[tokio::test]
    async fn test_embed_query_rejects_wrong_count() {
        let embedder = FixedEmbedder { outputs: 2 };
        let err = embedder.embed_query("hello").await.unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[test]
    fn test_validate_embeddings() {
        assert!(validate_embeddings(0, &[]).is_ok());
        assert!(validate_embeddings(2, &[vec![0.1, 0.2], vec![0.3, 0.4]]).is_ok());
        assert!(validate_embeddings(3, &[vec![0.1]]).is_err());
        assert!(validate_embeddings(2, &[vec![0.1, 0.2], vec![0.3]]).is_err());
        assert!(validate_embeddings(1, &[vec![]]).is_err());
    }

    #[test]
    fn test_validate_embeddings_rejects_non_finite_values() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = validate_embeddings(2, &[vec![1.0, 0.0], vec![bad, 0.0]]).unwrap_err();
            assert!(matches!(err, Error::Embedding(_)));
            assert!(err.to_string().contains("embedding 1"));
        }
    }
}

//! Text embedding trait for Prashna's semantic search pipeline.

use async_trait::async_trait;

use crate::error::Result;

/// Fixed output dimensionality expected from any embedding provider.
///
/// The store and ranker assume every `search_vector` and query vector has
/// this length; the engine rejects providers reporting anything else at
/// construction time.
pub const EMBEDDING_DIMENSION: usize = 384;

/// Trait for converting text to vector embeddings.
///
/// This trait is the seam between the search core and the embedding
/// provider (a local neural model, an API-based service, or a
/// deterministic stand-in for tests). Implementations are expected to
/// return unit-normalized vectors so that cosine distance and dot product
/// are interchangeable.
///
/// A provider failure is a hard failure of the calling operation: callers
/// must not substitute a zero vector, since that would silently corrupt
/// ranking.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use prashna::embedding::TextEmbedder;
/// use prashna::error::Result;
///
/// struct ConstantEmbedder {
///     dimension: usize,
/// }
///
/// #[async_trait]
/// impl TextEmbedder for ConstantEmbedder {
///     async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
///         Ok(vec![0.0; self.dimension])
///     }
///
///     fn dimension(&self) -> usize {
///         self.dimension
///     }
/// }
/// ```
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Generate an embedding vector for the given text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts in batch.
    ///
    /// The default implementation calls `embed` sequentially. Override
    /// for providers with a native batch endpoint.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Get the dimension of generated embeddings.
    fn dimension(&self) -> usize;

    /// Get the name/identifier of this embedder, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

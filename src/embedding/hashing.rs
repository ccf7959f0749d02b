//! Deterministic feature-hashing embedder.
//!
//! [`HashingEmbedder`] maps text to a fixed-dimension vector by hashing
//! word and character-trigram features into buckets and L2-normalizing the
//! result. It captures lexical overlap only, not semantics, but it is
//! fast, dependency-free, and fully deterministic, which makes it the
//! embedder of choice for tests and for the offline CLI.

use std::hash::{BuildHasher, Hash, Hasher};

use ahash::RandomState;
use async_trait::async_trait;
use unicode_segmentation::UnicodeSegmentation;

use crate::embedding::embedder::{EMBEDDING_DIMENSION, TextEmbedder};
use crate::error::Result;

/// A deterministic embedder based on feature hashing.
///
/// Each lowercase word and each character trigram within a word is hashed
/// to a bucket; one hash bit selects the sign of the contribution. The
/// accumulated vector is L2-normalized, so outputs are unit vectors and
/// cosine similarity equals the dot product. Embedding an empty or
/// whitespace-only string yields the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    hasher: RandomState,
}

impl HashingEmbedder {
    /// Create a hashing embedder with the standard 384-dim output.
    pub fn new() -> Self {
        Self::with_dimension(EMBEDDING_DIMENSION)
    }

    /// Create a hashing embedder with a custom dimension (tests use small
    /// dimensions to keep fixtures readable).
    pub fn with_dimension(dimension: usize) -> Self {
        // Fixed seeds: the same text must embed identically across
        // processes and runs.
        let hasher = RandomState::with_seeds(
            0x51_73_68_6e,
            0x70_72_61_73,
            0x9e_37_79_b9,
            0x85_eb_ca_6b,
        );
        Self { dimension, hasher }
    }

    fn bucket(&self, feature: &str) -> (usize, f32) {
        let mut hasher = self.hasher.build_hasher();
        feature.hash(&mut hasher);
        let hash = hasher.finish();
        let index = (hash % self.dimension as u64) as usize;
        let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }

    fn accumulate(&self, text: &str, accumulator: &mut [f32]) {
        for word in text.to_lowercase().unicode_words() {
            let (index, sign) = self.bucket(word);
            accumulator[index] += sign;

            let chars: Vec<char> = word.chars().collect();
            if chars.len() < 3 {
                continue;
            }
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                let (index, sign) = self.bucket(&trigram);
                accumulator[index] += sign * 0.5;
            }
        }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextEmbedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0_f32; self.dimension];
        self.accumulate(text, &mut vector);

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "hashing-embedder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_deterministic_output() {
        let embedder = HashingEmbedder::new();
        let a = block_on(embedder.embed("lift coefficient")).unwrap();
        let b = block_on(embedder.embed("lift coefficient")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), EMBEDDING_DIMENSION);
    }

    #[test]
    fn test_unit_norm_for_non_empty_text() {
        let embedder = HashingEmbedder::new();
        let vector = block_on(embedder.embed("structural stress in beam")).unwrap();
        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_text_embeds_to_zero_vector() {
        let embedder = HashingEmbedder::new();
        let vector = block_on(embedder.embed("")).unwrap();
        assert!(vector.iter().all(|v| *v == 0.0));

        let vector = block_on(embedder.embed("   ")).unwrap();
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_shared_words_increase_similarity() {
        let embedder = HashingEmbedder::with_dimension(64);
        let a = block_on(embedder.embed("lift coefficient airfoil")).unwrap();
        let b = block_on(embedder.embed("lift coefficient wing")).unwrap();
        let c = block_on(embedder.embed("fiscal policy committee")).unwrap();

        let dot = |x: &[f32], y: &[f32]| -> f32 { x.iter().zip(y).map(|(a, b)| a * b).sum() };
        assert!(dot(&a, &b) > dot(&a, &c));
    }

    #[test]
    fn test_batch_matches_single() {
        let embedder = HashingEmbedder::new();
        let single = block_on(embedder.embed("aerodynamics")).unwrap();
        let batch = block_on(embedder.embed_batch(&["aerodynamics", "structures"])).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], single);
    }
}

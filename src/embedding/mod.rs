//! Text embedding: the provider seam for Prashna's semantic search.
//!
//! The embedding model itself is an external collaborator consumed through
//! the [`TextEmbedder`] trait. A deterministic offline implementation,
//! [`HashingEmbedder`], is provided for tests and for running the CLI
//! without a model server.

pub mod embedder;
pub mod hashing;

pub use embedder::{EMBEDDING_DIMENSION, TextEmbedder};
pub use hashing::HashingEmbedder;

//! Question storage.
//!
//! The relational engine of the production system is an external
//! collaborator; this module keeps only the surface the search core
//! consumes: keyed inserts with external-id uniqueness, point lookups,
//! and whole-collection snapshots for scan-based ranking.

pub mod memory;

use std::sync::Arc;

use uuid::Uuid;

use crate::error::Result;
use crate::question::Question;

/// Storage abstraction for questions.
///
/// All reads are snapshot-based so that concurrent searches never hold the
/// store lock while scoring. Absence is `None`, never an error.
pub trait QuestionStore: Send + Sync {
    /// Insert a new question. Fails with a store error if a question with
    /// the same `external_id` already exists (at-most-one-row-per-key is
    /// the store's responsibility, not the caller's).
    fn insert(&self, question: Question) -> Result<Arc<Question>>;

    /// Look up a question by its opaque id.
    fn get(&self, id: Uuid) -> Option<Arc<Question>>;

    /// Look up a question by its human-readable external id.
    fn get_by_external_id(&self, external_id: &str) -> Option<Arc<Question>>;

    /// Snapshot of every stored question, in unspecified order.
    fn all(&self) -> Vec<Arc<Question>>;

    /// Number of stored questions.
    fn len(&self) -> usize;

    /// Whether the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub use memory::MemoryQuestionStore;

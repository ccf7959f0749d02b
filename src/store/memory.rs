//! In-memory question store.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{PrashnaError, Result};
use crate::question::Question;
use crate::store::QuestionStore;

/// In-memory question store backed by hash maps under a single lock.
///
/// Writes (inserts) take the write lock for the duration of the keyed
/// insert, which serializes concurrent creates of the same external id:
/// exactly one wins, the other gets a duplicate-key error. Reads clone
/// `Arc`s out under the read lock, so scoring and projection never block
/// writers.
#[derive(Debug, Default)]
pub struct MemoryQuestionStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    by_id: AHashMap<Uuid, Arc<Question>>,
    by_external_id: AHashMap<String, Arc<Question>>,
}

impl MemoryQuestionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuestionStore for MemoryQuestionStore {
    fn insert(&self, question: Question) -> Result<Arc<Question>> {
        let mut inner = self.inner.write();
        if inner.by_external_id.contains_key(&question.external_id) {
            return Err(PrashnaError::duplicate(&question.external_id));
        }

        let question = Arc::new(question);
        inner.by_id.insert(question.id, Arc::clone(&question));
        inner
            .by_external_id
            .insert(question.external_id.clone(), Arc::clone(&question));
        Ok(question)
    }

    fn get(&self, id: Uuid) -> Option<Arc<Question>> {
        self.inner.read().by_id.get(&id).cloned()
    }

    fn get_by_external_id(&self, external_id: &str) -> Option<Arc<Question>> {
        self.inner.read().by_external_id.get(external_id).cloned()
    }

    fn all(&self) -> Vec<Arc<Question>> {
        self.inner.read().by_id.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }
}

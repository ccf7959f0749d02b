//! Fuzzy autocomplete suggestions over stored tier metadata.
//!
//! Candidate terms come from three places across all stored questions:
//! tier-3 search keywords, tier-1 concept names, and tier-1 topic names.
//! Only terms literally present in the store are ever returned; the
//! resolver never fabricates a suggestion.

use std::sync::Arc;

use ahash::AHashSet;
use tracing::debug;

use crate::search::similarity::word_similarity;
use crate::store::QuestionStore;

/// Minimum length (in characters) of a suggestion query.
pub const MIN_QUERY_CHARS: usize = 2;

/// Candidate terms at or below this word-similarity score are excluded.
pub const SIMILARITY_THRESHOLD: f32 = 0.3;

/// Default number of suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Upper bound on the suggestion limit; requests are clamped into
/// `[1, MAX_SUGGESTION_LIMIT]`.
pub const MAX_SUGGESTION_LIMIT: usize = 20;

/// Resolves partial queries to fuzzy-matched terms from stored metadata.
pub struct SuggestionResolver {
    store: Arc<dyn QuestionStore>,
}

impl SuggestionResolver {
    /// Create a resolver over a question store.
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Suggest up to `limit` distinct terms for a partial query.
    ///
    /// A trimmed query shorter than [`MIN_QUERY_CHARS`] returns an empty
    /// list (a precondition, not an error). Results are ordered by best
    /// word-similarity score descending, ties broken by the term itself,
    /// so repeated calls are deterministic.
    pub fn suggest(&self, partial_query: &str, limit: usize) -> Vec<String> {
        let query = partial_query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }
        let limit = limit.clamp(1, MAX_SUGGESTION_LIMIT);

        let pool = self.candidate_terms();
        debug!(query, candidates = pool.len(), "scoring suggestion pool");

        let mut scored: Vec<(String, f32)> = pool
            .into_iter()
            .filter_map(|term| {
                let score = word_similarity(query, &term);
                (score > SIMILARITY_THRESHOLD).then_some((term, score))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(limit);
        scored.into_iter().map(|(term, _)| term).collect()
    }

    /// Distinct candidate terms longer than two characters, drawn from
    /// tier-3 keywords and the tier-1 concept/topic names.
    fn candidate_terms(&self) -> AHashSet<String> {
        let mut terms = AHashSet::new();

        for question in self.store.all() {
            if let Some(tier3) = &question.tier_3_enhanced_learning {
                for keyword in &tier3.search_keywords {
                    insert_term(&mut terms, keyword);
                }
            }

            if let Some(tier1) = &question.tier_1_core_research {
                for concept in tier1.concept_names() {
                    insert_term(&mut terms, concept);
                }
                if let Some(topic) = tier1.topic_name() {
                    insert_term(&mut terms, topic);
                }
            }
        }

        terms
    }
}

fn insert_term(terms: &mut AHashSet<String>, raw: &str) {
    let term = raw.trim();
    if term.chars().count() > 2 {
        terms.insert(term.to_string());
    }
}

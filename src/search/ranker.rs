//! Query planning and hybrid ranking.
//!
//! The ranker combines semantic similarity (cosine over stored embedding
//! vectors) with lexical similarity (trigram overlap against the content
//! soup) into a single relevance score, gated by literal containment of
//! the query. An empty query skips ranking entirely and browses the
//! filtered collection in deterministic year/number order.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::embedding::TextEmbedder;
use crate::error::Result;
use crate::question::Question;
use crate::search::request::SearchRequest;
use crate::search::similarity::{cosine_similarity, trigram_similarity};
use crate::store::QuestionStore;

/// Weight of the semantic (cosine) component in the relevance score.
///
/// Fixed design constant together with [`LEXICAL_WEIGHT`], not
/// configurable at call time. With both sub-scores in `[0, 1]` the fused
/// relevance is in `[0, 1]` as well.
pub const SEMANTIC_WEIGHT: f32 = 0.7;

/// Weight of the lexical (trigram) component in the relevance score.
pub const LEXICAL_WEIGHT: f32 = 0.3;

/// A single search result: ranked when a query string was given,
/// unranked in browse mode. One discriminated type instead of an
/// implicit row-vs-row-plus-score shape, so callers never positionally
/// unpack.
#[derive(Debug, Clone)]
pub enum SearchHit {
    /// A query-ranked hit with its fused relevance score.
    Ranked {
        question: Arc<Question>,
        relevance: f32,
    },
    /// A browse-mode hit; no score was computed.
    Unranked { question: Arc<Question> },
}

impl SearchHit {
    /// The question behind this hit.
    pub fn question(&self) -> &Arc<Question> {
        match self {
            SearchHit::Ranked { question, .. } => question,
            SearchHit::Unranked { question } => question,
        }
    }

    /// The relevance score, if this hit was ranked.
    pub fn relevance(&self) -> Option<f32> {
        match self {
            SearchHit::Ranked { relevance, .. } => Some(*relevance),
            SearchHit::Unranked { .. } => None,
        }
    }
}

/// One page of ranked or browsed results plus the pre-pagination total.
#[derive(Debug, Clone)]
pub struct RankedPage {
    /// Hits for the requested page, in final order.
    pub hits: Vec<SearchHit>,
    /// Size of the full filtered set, counted before pagination.
    pub total: usize,
}

/// Hybrid query planner and ranker over a question store.
pub struct HybridRanker {
    store: Arc<dyn QuestionStore>,
    embedder: Arc<dyn TextEmbedder>,
}

impl HybridRanker {
    /// Create a ranker over a store and an embedding provider.
    pub fn new(store: Arc<dyn QuestionStore>, embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { store, embedder }
    }

    /// Execute a search request.
    ///
    /// With a non-empty query, candidates must pass the containment gate:
    /// the content soup (or the year rendered as a string) has to contain
    /// the query as a case-insensitive substring before any score is
    /// considered. This deliberately favors precision: a paraphrase
    /// query with zero lexical overlap returns nothing, however close
    /// its embedding, which keeps deliberate queries (typed concept
    /// names, years) free of semantically-adjacent noise.
    ///
    /// An embedding provider failure fails the whole call; it is never
    /// papered over with a degraded vector.
    pub async fn search(&self, request: &SearchRequest) -> Result<RankedPage> {
        let (page, page_size) = request.effective_pagination();
        let snapshot = self.store.all();

        match request.normalized_query() {
            None => Ok(self.browse(snapshot, request, page, page_size)),
            Some(query) => {
                let query_vector = self.embedder.embed(query).await?;
                Ok(self.rank(snapshot, request, query, &query_vector, page, page_size))
            }
        }
    }

    /// Browse mode: filters only, ordered by year descending then
    /// question number ascending.
    fn browse(
        &self,
        snapshot: Vec<Arc<Question>>,
        request: &SearchRequest,
        page: usize,
        page_size: usize,
    ) -> RankedPage {
        let mut matched: Vec<Arc<Question>> = snapshot
            .into_iter()
            .filter(|question| request.filters.matches(question))
            .collect();

        matched.sort_by(|a, b| {
            b.year
                .cmp(&a.year)
                .then_with(|| a.question_number.cmp(&b.question_number))
                .then_with(|| a.external_id.cmp(&b.external_id))
        });

        let total = matched.len();
        let hits = paginate(matched, page, page_size)
            .map(|question| SearchHit::Unranked { question })
            .collect();

        RankedPage { hits, total }
    }

    fn rank(
        &self,
        snapshot: Vec<Arc<Question>>,
        request: &SearchRequest,
        query: &str,
        query_vector: &[f32],
        page: usize,
        page_size: usize,
    ) -> RankedPage {
        let needle = query.to_lowercase();
        let candidates: Vec<Arc<Question>> = snapshot
            .into_iter()
            .filter(|question| passes_containment_gate(question, &needle))
            .filter(|question| request.filters.matches(question))
            .collect();

        debug!(
            query,
            candidates = candidates.len(),
            "scoring gated candidates"
        );

        let mut scored: Vec<(Arc<Question>, f32)> = candidates
            .into_par_iter()
            .map(|question| {
                let relevance = relevance_score(&question, query, query_vector);
                (question, relevance)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.external_id.cmp(&b.0.external_id))
        });

        let total = scored.len();
        let hits = paginate(scored, page, page_size)
            .map(|(question, relevance)| SearchHit::Ranked {
                question,
                relevance,
            })
            .collect();

        RankedPage { hits, total }
    }
}

/// Fused relevance of one candidate against the query.
///
/// The semantic component is `1 - cosine_distance`, clamped to `[0, 1]`
/// so a degenerate or opposed vector cannot drag the fused score below
/// zero; the lexical component is trigram similarity of the content soup
/// against the query. Monotonically non-decreasing in either component.
fn relevance_score(question: &Question, query: &str, query_vector: &[f32]) -> f32 {
    let semantic = if question.search_vector.len() == query_vector.len() {
        cosine_similarity(&question.search_vector, query_vector).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let lexical = trigram_similarity(&question.search_content, query);
    SEMANTIC_WEIGHT * semantic + LEXICAL_WEIGHT * lexical
}

/// Containment gate: the lowercased content soup contains the lowercased
/// query, or the year string does.
fn passes_containment_gate(question: &Question, needle: &str) -> bool {
    question.search_content.to_lowercase().contains(needle)
        || question.year.to_string().contains(needle)
}

fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> impl Iterator<Item = T> {
    items.into_iter().skip((page - 1) * page_size).take(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::question::QuestionDraft;
    use crate::search::content::content_soup;
    use crate::search::request::SearchFilters;
    use crate::store::{MemoryQuestionStore, QuestionStore};
    use serde_json::json;

    fn draft(external_id: &str, year: i32, number: u32, text: &str) -> QuestionDraft {
        serde_json::from_value(json!({
            "question_id": external_id,
            "subject": "Aerospace Engineering",
            "year": year,
            "question_number": number,
            "question_text": text,
            "question_type": "MCQ",
            "answer_key": "A"
        }))
        .unwrap()
    }

    async fn seeded_ranker(drafts: Vec<QuestionDraft>) -> HybridRanker {
        let store = Arc::new(MemoryQuestionStore::new());
        let embedder = Arc::new(HashingEmbedder::new());

        for draft in drafts {
            let content = content_soup(&draft);
            let vector = embedder.embed(&content).await.unwrap();
            store
                .insert(Question::from_draft(draft, content, vector))
                .unwrap();
        }

        HybridRanker::new(
            store as Arc<dyn QuestionStore>,
            embedder as Arc<dyn TextEmbedder>,
        )
    }

    #[tokio::test]
    async fn test_containment_gate_excludes_unrelated() {
        let ranker = seeded_ranker(vec![
            draft("Q1", 2008, 1, "Calculate lift coefficient for NACA airfoil"),
            draft("Q2", 2015, 2, "Determine structural stress in beam"),
        ])
        .await;

        let page = ranker
            .search(&SearchRequest::new().with_query("lift"))
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.hits.len(), 1);
        assert_eq!(page.hits[0].question().external_id, "Q1");
        assert!(page.hits[0].relevance().is_some());
    }

    #[tokio::test]
    async fn test_year_string_containment() {
        let ranker = seeded_ranker(vec![
            draft("Q1", 2008, 1, "Calculate lift coefficient for NACA airfoil"),
            draft("Q2", 2015, 2, "Determine structural stress in beam"),
        ])
        .await;

        let page = ranker
            .search(&SearchRequest::new().with_query("2008"))
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.hits[0].question().external_id, "Q1");
    }

    #[tokio::test]
    async fn test_browse_mode_ordering() {
        let ranker = seeded_ranker(vec![
            draft("Q_2008_2", 2008, 2, "b"),
            draft("Q_2015_1", 2015, 1, "c"),
            draft("Q_2008_1", 2008, 1, "a"),
        ])
        .await;

        let page = ranker.search(&SearchRequest::new()).await.unwrap();
        let ids: Vec<&str> = page
            .hits
            .iter()
            .map(|hit| hit.question().external_id.as_str())
            .collect();

        assert_eq!(ids, vec!["Q_2015_1", "Q_2008_1", "Q_2008_2"]);
        assert!(page.hits.iter().all(|hit| hit.relevance().is_none()));
    }

    #[tokio::test]
    async fn test_browse_mode_with_filter() {
        let ranker = seeded_ranker(vec![
            draft("Q1", 2008, 1, "Calculate lift coefficient"),
            draft("Q2", 2015, 2, "Determine structural stress"),
        ])
        .await;

        let filters = SearchFilters {
            year: Some(2015),
            ..Default::default()
        };
        let page = ranker
            .search(&SearchRequest::new().with_filters(filters))
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.hits[0].question().external_id, "Q2");
    }

    #[tokio::test]
    async fn test_ranked_results_sorted_by_relevance() {
        let ranker = seeded_ranker(vec![
            draft("Q_WEAK", 2020, 1, "Shock wave flow measurement"),
            draft("Q_EXACT", 2021, 2, "Potential flow around a cylinder"),
        ])
        .await;

        let page = ranker
            .search(&SearchRequest::new().with_query("flow"))
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        let relevances: Vec<f32> = page.hits.iter().filter_map(SearchHit::relevance).collect();
        assert!(relevances.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[tokio::test]
    async fn test_pagination_reconstructs_full_set() {
        let drafts: Vec<QuestionDraft> = (0..7)
            .map(|i| {
                draft(
                    &format!("Q{i:02}"),
                    2000 + i,
                    1,
                    "common airflow question text",
                )
            })
            .collect();
        let ranker = seeded_ranker(drafts).await;

        let mut collected = Vec::new();
        for page_number in 1..=4 {
            let request = SearchRequest::new()
                .with_query("airflow")
                .page(page_number)
                .page_size(2);
            let page = ranker.search(&request).await.unwrap();
            assert_eq!(page.total, 7);
            collected.extend(
                page.hits
                    .iter()
                    .map(|hit| hit.question().external_id.clone()),
            );
        }

        assert_eq!(collected.len(), 7);
        let mut deduped = collected.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 7, "pages must not overlap");
    }

    #[tokio::test]
    async fn test_relevance_in_unit_range() {
        let ranker = seeded_ranker(vec![draft(
            "Q1",
            2008,
            1,
            "Calculate lift coefficient for NACA airfoil",
        )])
        .await;

        let page = ranker
            .search(&SearchRequest::new().with_query("lift coefficient"))
            .await
            .unwrap();
        let relevance = page.hits[0].relevance().unwrap();
        assert!((0.0..=1.0).contains(&relevance));
    }

    #[tokio::test]
    async fn test_whitespace_query_is_browse_mode() {
        let ranker = seeded_ranker(vec![draft("Q1", 2008, 1, "text")]).await;
        let page = ranker
            .search(&SearchRequest::new().with_query("   "))
            .await
            .unwrap();
        assert!(matches!(page.hits[0], SearchHit::Unranked { .. }));
    }

    #[test]
    fn test_relevance_monotonic_in_components() {
        // Fixed lexical, growing semantic: fused score must not decrease.
        let low = SEMANTIC_WEIGHT * 0.2 + LEXICAL_WEIGHT * 0.5;
        let high = SEMANTIC_WEIGHT * 0.9 + LEXICAL_WEIGHT * 0.5;
        assert!(high > low);
        assert!((SEMANTIC_WEIGHT + LEXICAL_WEIGHT - 1.0).abs() < 1e-6);
    }
}

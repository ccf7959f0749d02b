//! High-level question bank engine.
//!
//! [`QuestionBankEngine`] wires the store, the embedding provider, and
//! the search components together behind one API: ingestion (single and
//! bulk), point lookups, hybrid search with summary projection,
//! suggestions, and facet enumeration. The embedder is an injected
//! dependency whose lifecycle belongs to the process entry point; the
//! engine holds a handle, never a global.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::embedding::{EMBEDDING_DIMENSION, TextEmbedder};
use crate::error::{PrashnaError, Result};
use crate::question::{Question, QuestionDraft, QuestionSummary};
use crate::search::content::ContentComposer;
use crate::search::facets::{FilterCatalog, FilterOptions, YearCount};
use crate::search::ranker::HybridRanker;
use crate::search::request::{SearchFilters, SearchRequest};
use crate::search::suggest::SuggestionResolver;
use crate::store::QuestionStore;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Embedding dimension the engine expects from its provider.
    pub expected_dimension: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            expected_dimension: EMBEDDING_DIMENSION,
        }
    }
}

/// One page of search results, projected for display.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    /// The query as requested (possibly empty for browse mode).
    pub query: String,
    /// Size of the full filtered set, before pagination.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    /// The filters that were requested, `None` fields omitted.
    pub filters_applied: SearchFilters,
    pub questions: Vec<QuestionSummary>,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulkImportReport {
    /// Newly inserted questions.
    pub imported: usize,
    /// Drafts skipped because their external id already existed.
    pub skipped: usize,
    /// Store size after the import.
    pub total_in_store: usize,
}

/// High-level engine over a question store and an embedding provider.
pub struct QuestionBankEngine {
    store: Arc<dyn QuestionStore>,
    composer: ContentComposer,
    ranker: HybridRanker,
    resolver: SuggestionResolver,
    catalog: FilterCatalog,
}

impl QuestionBankEngine {
    /// Create an engine with the default configuration (384-dim provider).
    pub fn new(store: Arc<dyn QuestionStore>, embedder: Arc<dyn TextEmbedder>) -> Result<Self> {
        Self::with_config(store, embedder, EngineConfig::default())
    }

    /// Create an engine, validating the provider against the config.
    ///
    /// A provider with the wrong dimension is a configuration error at
    /// startup, not a per-query failure.
    pub fn with_config(
        store: Arc<dyn QuestionStore>,
        embedder: Arc<dyn TextEmbedder>,
        config: EngineConfig,
    ) -> Result<Self> {
        if embedder.dimension() != config.expected_dimension {
            return Err(PrashnaError::invalid_config(format!(
                "embedder '{}' produces {}-dim vectors, expected {}",
                embedder.name(),
                embedder.dimension(),
                config.expected_dimension
            )));
        }

        Ok(Self {
            store: Arc::clone(&store),
            composer: ContentComposer::new(Arc::clone(&embedder)),
            ranker: HybridRanker::new(Arc::clone(&store), Arc::clone(&embedder)),
            resolver: SuggestionResolver::new(Arc::clone(&store)),
            catalog: FilterCatalog::new(store),
        })
    }

    /// Create a question: compose its derived search fields once, then
    /// insert. A duplicate external id is a store error.
    pub async fn create(&self, draft: QuestionDraft) -> Result<Arc<Question>> {
        let composed = self.composer.compose(&draft).await?;
        let question = Question::from_draft(draft, composed.content, composed.vector);
        let question = self.store.insert(question)?;
        info!(external_id = %question.external_id, "question created");
        Ok(question)
    }

    /// Bulk import drafts.
    ///
    /// Drafts whose external id is already present are skipped, not
    /// errors. Each item is composed and inserted independently, so a
    /// failure aborts the import after the items already written; it
    /// never leaves any single question with partial derived fields.
    pub async fn bulk_import(&self, drafts: Vec<QuestionDraft>) -> Result<BulkImportReport> {
        let mut imported = 0;
        let mut skipped = 0;

        for draft in drafts {
            if self.store.get_by_external_id(&draft.external_id).is_some() {
                debug!(external_id = %draft.external_id, "skipping existing question");
                skipped += 1;
                continue;
            }

            let composed = self.composer.compose(&draft).await?;
            let question = Question::from_draft(draft, composed.content, composed.vector);
            self.store.insert(question)?;
            imported += 1;
        }

        let report = BulkImportReport {
            imported,
            skipped,
            total_in_store: self.store.len(),
        };
        info!(
            imported = report.imported,
            skipped = report.skipped,
            total = report.total_in_store,
            "bulk import finished"
        );
        Ok(report)
    }

    /// Look up a question by its opaque id. Absence is `None`.
    pub fn question(&self, id: Uuid) -> Option<Arc<Question>> {
        self.store.get(id)
    }

    /// Look up a question by its external id. Absence is `None`.
    pub fn question_by_external_id(&self, external_id: &str) -> Option<Arc<Question>> {
        self.store.get_by_external_id(external_id)
    }

    /// Number of stored questions.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Execute a search and project the hits into display summaries.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchPage> {
        let page = self.ranker.search(&request).await?;
        let (page_number, page_size) = request.effective_pagination();

        let questions = page
            .hits
            .iter()
            .map(|hit| QuestionSummary::from(hit.question().as_ref()))
            .collect();

        Ok(SearchPage {
            query: request.normalized_query().unwrap_or("").to_string(),
            total: page.total,
            page: page_number,
            page_size,
            filters_applied: request.filters,
            questions,
        })
    }

    /// Autocomplete suggestions for a partial query.
    pub fn suggest(&self, partial_query: &str, limit: usize) -> Vec<String> {
        self.resolver.suggest(partial_query, limit)
    }

    /// Distinct facet values for filter UIs.
    pub fn filter_options(&self) -> FilterOptions {
        self.catalog.filter_options()
    }

    /// Question counts per year, descending.
    pub fn year_counts(&self) -> Vec<YearCount> {
        self.catalog.year_counts()
    }

    /// Subject → topics hierarchy from the tier-1 tags.
    pub fn syllabus_tree(&self) -> BTreeMap<String, Vec<String>> {
        self.catalog.syllabus_tree()
    }
}

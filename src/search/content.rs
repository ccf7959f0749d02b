//! Content composition: building the searchable text and its embedding.
//!
//! Every question stores a derived "content soup" (the question text,
//! year, source, and the searchable terms extracted from its metadata
//! tiers, joined by a fixed separator) plus the embedding of that soup.
//! Both are computed here, together, exactly once per write; queries only
//! ever embed the query string.

use std::sync::Arc;

use crate::embedding::TextEmbedder;
use crate::error::Result;
use crate::question::QuestionDraft;

/// Separator between content soup parts.
pub const CONTENT_SEPARATOR: &str = " | ";

/// Derived search data for one question.
#[derive(Debug, Clone)]
pub struct ComposedSearchData {
    /// The content soup.
    pub content: String,
    /// Embedding of the content soup.
    pub vector: Vec<f32>,
}

/// Builds `(search_content, search_vector)` pairs from question drafts.
pub struct ContentComposer {
    embedder: Arc<dyn TextEmbedder>,
}

impl ContentComposer {
    /// Create a composer around an embedding provider.
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }

    /// Compose the derived search fields for a draft.
    ///
    /// Deterministic for identical input; an embedding failure propagates
    /// and leaves nothing half-written.
    pub async fn compose(&self, draft: &QuestionDraft) -> Result<ComposedSearchData> {
        let content = content_soup(draft);
        let vector = self.embedder.embed(&content).await?;
        Ok(ComposedSearchData { content, vector })
    }
}

/// Build the content soup for a draft.
///
/// Parts are collected in a fixed order: question text, year, source,
/// tier-1 topic, tier-1 concepts (list order), tier-1 question nature,
/// tier-1 step-by-step lines, tier-3 search keywords. Empty and
/// whitespace-only parts are then dropped and the survivors joined with
/// [`CONTENT_SEPARATOR`]. If everything is empty the soup is the empty
/// string; that is not an error, downstream ranking treats its embedding
/// as a degenerate vector.
pub fn content_soup(draft: &QuestionDraft) -> String {
    let mut parts: Vec<String> = vec![
        draft.question_text.clone(),
        draft.year.to_string(),
        draft.exam_name.clone(),
    ];

    if let Some(tier1) = &draft.tier_1_core_research {
        if let Some(topic) = tier1.topic_name() {
            parts.push(topic.to_string());
        }
        parts.extend(tier1.concept_names().iter().map(|name| name.to_string()));

        if let Some(explanation) = &tier1.explanation {
            if let Some(nature) = &explanation.question_nature {
                parts.push(nature.clone());
            }
            parts.extend(explanation.step_by_step.iter().cloned());
        }
    }

    if let Some(tier3) = &draft.tier_3_enhanced_learning {
        parts.extend(tier3.search_keywords.iter().cloned());
    }

    let surviving: Vec<&str> = parts
        .iter()
        .map(String::as_str)
        .filter(|part| !part.trim().is_empty())
        .collect();
    surviving.join(CONTENT_SEPARATOR)
}

//! Typed metadata tiers attached to a question.
//!
//! Each question carries up to five independently optional tier documents
//! produced by an enrichment pipeline: classification (tier 0), core
//! research (tier 1), student learning aids (tier 2), enhanced learning
//! (tier 3), and pipeline provenance (tier 4). The documents are
//! schema-shaped but semi-structured (any field may be absent), so every
//! nesting level is optional and unknown fields are preserved through a
//! flattened extras map instead of being dropped on round-trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tier 0: question classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tier0Classification {
    pub content_type: Option<String>,
    pub media_type: Option<String>,
    /// Numeric difficulty on a 1-10 scale.
    pub difficulty_score: Option<f64>,
    pub complexity_flags: Option<ComplexityFlags>,
    pub classification_confidence: Option<f64>,
    pub classification_reasoning: Option<String>,
    pub classifier_model: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Structural complexity indicators from the classifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityFlags {
    pub requires_derivation: Option<bool>,
    pub multi_concept_integration: Option<bool>,
    pub ambiguous_wording: Option<bool>,
    pub image_interpretation_complex: Option<bool>,
    pub edge_case_scenario: Option<bool>,
    pub multi_step_reasoning: Option<bool>,
    pub approximation_needed: Option<bool>,
}

/// Tier 1: core research. Answer validation, explanation, and the
/// topic/concept hierarchy consumed by search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tier1CoreResearch {
    pub answer_validation: Option<AnswerValidation>,
    pub explanation: Option<Explanation>,
    pub hierarchical_tags: Option<HierarchicalTags>,
    pub prerequisites: Option<Prerequisites>,
    pub difficulty_analysis: Option<DifficultyAnalysis>,
    pub textbook_references: Vec<TextbookReference>,
    pub video_references: Vec<VideoReference>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Tier1CoreResearch {
    /// The topic name, if the topic hierarchy is present.
    pub fn topic_name(&self) -> Option<&str> {
        self.hierarchical_tags
            .as_ref()?
            .topic
            .as_ref()?
            .name
            .as_deref()
    }

    /// The subject name, if tagged.
    pub fn subject_name(&self) -> Option<&str> {
        self.hierarchical_tags
            .as_ref()?
            .subject
            .as_ref()?
            .name
            .as_deref()
    }

    /// Non-empty concept names, in list order.
    pub fn concept_names(&self) -> Vec<&str> {
        self.hierarchical_tags
            .as_ref()
            .map(|tags| {
                tags.concepts
                    .iter()
                    .filter_map(|c| c.name.as_deref())
                    .filter(|name| !name.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerValidation {
    pub correct_answer: Option<String>,
    pub is_correct: Option<bool>,
    pub confidence: Option<f64>,
    pub reasoning: Option<String>,
}

/// Worked explanation of a question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Explanation {
    /// One-line characterization of what the question asks.
    pub question_nature: Option<String>,
    pub step_by_step: Vec<String>,
    pub formulas_used: Vec<String>,
    pub estimated_time_minutes: Option<f64>,
}

/// Subject → Topic → Concepts hierarchy. Read-only input to search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchicalTags {
    pub subject: Option<SubjectTag>,
    pub topic: Option<TopicTag>,
    pub concepts: Vec<ConceptTag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectTag {
    pub name: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicTag {
    pub name: Option<String>,
    pub syllabus_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptTag {
    pub name: Option<String>,
    pub importance: Option<String>,
    pub consensus: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Prerequisites {
    pub essential: Vec<String>,
    pub helpful: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyAnalysis {
    pub overall: Option<String>,
    pub score: Option<f64>,
    pub estimated_solve_time_seconds: Option<f64>,
    pub expected_accuracy_percent: Option<f64>,
    pub difficulty_factors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextbookReference {
    pub book: Option<String>,
    pub author: Option<String>,
    pub chapter_title: Option<String>,
    pub section: Option<String>,
    pub relevance_score: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoReference {
    pub professor: Option<String>,
    pub video_url: Option<String>,
    pub topic_covered: Option<String>,
    pub relevance_score: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Tier 2: student-facing learning aids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tier2StudentLearning {
    pub common_mistakes: Vec<CommonMistake>,
    pub mnemonics_memory_aids: Vec<Mnemonic>,
    pub flashcards: Vec<Flashcard>,
    pub exam_strategy: Option<ExamStrategy>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonMistake {
    pub mistake: Option<String>,
    pub why_students_make_it: Option<String>,
    pub severity: Option<String>,
    pub how_to_avoid: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mnemonic {
    pub mnemonic: Option<String>,
    pub concept: Option<String>,
    pub effectiveness: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flashcard {
    pub card_type: Option<String>,
    pub front: Option<String>,
    pub back: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamStrategy {
    pub priority: Option<String>,
    pub triage_tip: Option<String>,
    pub time_management: Option<String>,
}

/// Tier 3: enhanced learning. Search keywords and alternatives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tier3EnhancedLearning {
    /// Curated keywords used both for content composition and
    /// autocomplete suggestions.
    pub search_keywords: Vec<String>,
    pub alternative_methods: Vec<AlternativeMethod>,
    pub deeper_dive_topics: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternativeMethod {
    pub name: Option<String>,
    pub description: Option<String>,
    pub when_to_use: Option<String>,
}

/// Tier 4: pipeline provenance and cost accounting. Opaque to search;
/// kept loosely typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tier4Metadata {
    pub model_meta: Option<Value>,
    pub quality_score: Option<Value>,
    pub cost_breakdown: Option<Value>,
    pub token_usage: Option<Value>,
    pub processing_time: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

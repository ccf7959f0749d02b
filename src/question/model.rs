//! The question record and its creation payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::question::tiers::{
    Tier0Classification, Tier1CoreResearch, Tier2StudentLearning, Tier3EnhancedLearning,
    Tier4Metadata,
};

fn default_exam_name() -> String {
    "GATE".to_string()
}

fn default_marks() -> f32 {
    1.0
}

fn default_negative_marks() -> f32 {
    0.33
}

/// Creation payload for a question, as it arrives from a JSON import.
///
/// A draft carries no identity and no derived search fields; those are
/// assigned by the engine at write time (a v4 id, and the content soup
/// plus its embedding, computed exactly once per write).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDraft {
    /// Human-readable unique key, e.g. `GATE_AE_2008_Q01`.
    #[serde(alias = "question_id")]
    pub external_id: String,
    #[serde(default = "default_exam_name")]
    pub exam_name: String,
    pub subject: String,
    pub year: i32,
    pub question_number: u32,
    pub question_text: String,
    #[serde(default)]
    pub question_text_latex: Option<String>,
    /// `MCQ` or `NAT`.
    pub question_type: String,
    #[serde(default = "default_marks")]
    pub marks: f32,
    #[serde(default = "default_negative_marks")]
    pub negative_marks: f32,
    #[serde(default)]
    pub options: Option<Value>,
    pub answer_key: String,
    #[serde(default)]
    pub has_question_image: bool,
    #[serde(default)]
    pub image_metadata: Option<Value>,
    #[serde(default)]
    pub tier_0_classification: Option<Tier0Classification>,
    #[serde(default)]
    pub tier_1_core_research: Option<Tier1CoreResearch>,
    #[serde(default)]
    pub tier_2_student_learning: Option<Tier2StudentLearning>,
    #[serde(default)]
    pub tier_3_enhanced_learning: Option<Tier3EnhancedLearning>,
    #[serde(default)]
    pub tier_4_metadata: Option<Tier4Metadata>,
}

/// A stored question: immutable identity, mutable content, and the
/// derived search fields kept in lockstep with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Opaque unique identifier, assigned at creation, never reused.
    pub id: Uuid,
    /// Human-readable unique key used for external lookup.
    pub external_id: String,
    pub exam_name: String,
    pub subject: String,
    pub year: i32,
    pub question_number: u32,
    pub question_text: String,
    pub question_text_latex: Option<String>,
    pub question_type: String,
    pub marks: f32,
    pub negative_marks: f32,
    pub options: Option<Value>,
    pub answer_key: String,
    pub has_question_image: bool,
    pub image_metadata: Option<Value>,
    pub tier_0_classification: Option<Tier0Classification>,
    pub tier_1_core_research: Option<Tier1CoreResearch>,
    pub tier_2_student_learning: Option<Tier2StudentLearning>,
    pub tier_3_enhanced_learning: Option<Tier3EnhancedLearning>,
    pub tier_4_metadata: Option<Tier4Metadata>,
    /// Content soup: question text, facets, and extracted tier terms
    /// joined by ` | `. Non-empty whenever `question_text` is non-empty.
    pub search_content: String,
    /// Embedding of `search_content`. Recomputed together with it,
    /// never lazily at query time.
    pub search_vector: Vec<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Assemble a stored question from a draft and its composed search
    /// data. The two derived fields always change together; this is the
    /// only constructor, so a question can never be built with stale
    /// search data.
    pub fn from_draft(draft: QuestionDraft, search_content: String, search_vector: Vec<f32>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            external_id: draft.external_id,
            exam_name: draft.exam_name,
            subject: draft.subject,
            year: draft.year,
            question_number: draft.question_number,
            question_text: draft.question_text,
            question_text_latex: draft.question_text_latex,
            question_type: draft.question_type,
            marks: draft.marks,
            negative_marks: draft.negative_marks,
            options: draft.options,
            answer_key: draft.answer_key,
            has_question_image: draft.has_question_image,
            image_metadata: draft.image_metadata,
            tier_0_classification: draft.tier_0_classification,
            tier_1_core_research: draft.tier_1_core_research,
            tier_2_student_learning: draft.tier_2_student_learning,
            tier_3_enhanced_learning: draft.tier_3_enhanced_learning,
            tier_4_metadata: draft.tier_4_metadata,
            search_content,
            search_vector,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_draft() -> QuestionDraft {
        serde_json::from_value(json!({
            "question_id": "GATE_AE_2008_Q01",
            "subject": "Aerospace Engineering",
            "year": 2008,
            "question_number": 1,
            "question_text": "Calculate lift coefficient for NACA airfoil",
            "question_type": "MCQ",
            "answer_key": "B"
        }))
        .unwrap()
    }

    #[test]
    fn test_draft_defaults() {
        let draft = sample_draft();
        assert_eq!(draft.external_id, "GATE_AE_2008_Q01");
        assert_eq!(draft.exam_name, "GATE");
        assert_eq!(draft.marks, 1.0);
        assert_eq!(draft.negative_marks, 0.33);
        assert!(!draft.has_question_image);
        assert!(draft.tier_1_core_research.is_none());
    }

    #[test]
    fn test_from_draft_assigns_identity_and_derived_fields() {
        let draft = sample_draft();
        let question = Question::from_draft(draft, "soup".to_string(), vec![0.0; 4]);

        assert!(!question.id.is_nil());
        assert_eq!(question.search_content, "soup");
        assert_eq!(question.search_vector.len(), 4);
        assert_eq!(question.created_at, question.updated_at);
    }

    #[test]
    fn test_unique_ids_per_creation() {
        let a = Question::from_draft(sample_draft(), String::new(), Vec::new());
        let b = Question::from_draft(sample_draft(), String::new(), Vec::new());
        assert_ne!(a.id, b.id);
    }
}

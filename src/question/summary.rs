//! Lightweight question projection for list and search results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::question::model::Question;
use crate::question::tiers::Explanation;

/// Maximum characters of question text carried by a summary.
const SUMMARY_TEXT_CAP: usize = 1000;

/// Maximum number of concept names carried by a summary.
const SUMMARY_CONCEPT_CAP: usize = 5;

/// Difficulty band derived from the tier-0 numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyLevel {
    /// Band a 1-10 difficulty score: `<= 4` is easy, `>= 8` is hard,
    /// everything else (including an absent score) is medium.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s <= 4.0 => DifficultyLevel::Easy,
            Some(s) if s >= 8.0 => DifficultyLevel::Hard,
            _ => DifficultyLevel::Medium,
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
        };
        write!(f, "{label}")
    }
}

/// Lightweight question for list/search results: the display fields plus
/// topic, leading concepts, and the explanation block extracted from the
/// tier metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: Uuid,
    pub external_id: String,
    pub year: i32,
    pub question_number: u32,
    pub subject: String,
    /// Question text, capped at 1000 characters (no truncation marker).
    pub question_text: String,
    pub question_text_latex: Option<String>,
    pub question_type: String,
    pub marks: f32,
    pub difficulty_score: Option<f64>,
    pub difficulty_level: DifficultyLevel,
    pub topic: Option<String>,
    pub concepts: Vec<String>,
    pub options: Option<Value>,
    pub answer_key: String,
    pub explanation: Option<Explanation>,
}

impl From<&Question> for QuestionSummary {
    fn from(question: &Question) -> Self {
        let difficulty_score = question
            .tier_0_classification
            .as_ref()
            .and_then(|tier0| tier0.difficulty_score);

        let (topic, concepts) = question
            .tier_1_core_research
            .as_ref()
            .map(|tier1| {
                let concepts: Vec<String> = tier1
                    .concept_names()
                    .into_iter()
                    .take(SUMMARY_CONCEPT_CAP)
                    .map(str::to_string)
                    .collect();
                (tier1.topic_name().map(str::to_string), concepts)
            })
            .unwrap_or((None, Vec::new()));

        let explanation = question
            .tier_1_core_research
            .as_ref()
            .and_then(|tier1| tier1.explanation.clone());

        Self {
            id: question.id,
            external_id: question.external_id.clone(),
            year: question.year,
            question_number: question.question_number,
            subject: question.subject.clone(),
            question_text: truncate_chars(&question.question_text, SUMMARY_TEXT_CAP),
            question_text_latex: question.question_text_latex.clone(),
            question_type: question.question_type.clone(),
            marks: question.marks,
            difficulty_score,
            difficulty_level: DifficultyLevel::from_score(difficulty_score),
            topic,
            concepts,
            options: question.options.clone(),
            answer_key: question.answer_key.clone(),
            explanation,
        }
    }
}

/// Truncate on a character boundary, never mid-codepoint.
fn truncate_chars(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        text.to_string()
    } else {
        text.chars().take(cap).collect()
    }
}

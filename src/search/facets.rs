//! Facet enumeration for filter UIs.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::store::QuestionStore;

/// Distinct facet values available for filtering.
///
/// `topics` and `concepts` are placeholders: they are not yet extracted
/// from the tier metadata and always come back empty. Known
/// incompleteness, kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Distinct years, descending.
    pub years: Vec<i32>,
    /// Distinct subjects, ascending.
    pub subjects: Vec<String>,
    /// Placeholder, always empty.
    pub topics: Vec<String>,
    /// Distinct question types, ascending.
    pub question_types: Vec<String>,
    /// Placeholder, always empty.
    pub concepts: Vec<String>,
}

/// Question count for one exam year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Thin aggregation layer enumerating facet values over the store.
pub struct FilterCatalog {
    store: Arc<dyn QuestionStore>,
}

impl FilterCatalog {
    /// Create a catalog over a question store.
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Enumerate the distinct facet values for UI filter population.
    pub fn filter_options(&self) -> FilterOptions {
        let mut years = AHashSet::new();
        let mut subjects = AHashSet::new();
        let mut question_types = AHashSet::new();

        for question in self.store.all() {
            years.insert(question.year);
            subjects.insert(question.subject.clone());
            question_types.insert(question.question_type.clone());
        }

        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        let mut subjects: Vec<String> = subjects.into_iter().collect();
        subjects.sort();
        let mut question_types: Vec<String> = question_types.into_iter().collect();
        question_types.sort();

        FilterOptions {
            years,
            subjects,
            topics: Vec::new(),
            question_types,
            concepts: Vec::new(),
        }
    }

    /// Question counts grouped by year, descending by year.
    pub fn year_counts(&self) -> Vec<YearCount> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for question in self.store.all() {
            *counts.entry(question.year).or_default() += 1;
        }

        counts
            .into_iter()
            .rev()
            .map(|(year, count)| YearCount { year, count })
            .collect()
    }

    /// Subject → sorted distinct topics, read from the tier-1 hierarchy.
    pub fn syllabus_tree(&self) -> BTreeMap<String, Vec<String>> {
        let mut tree: BTreeMap<String, AHashSet<String>> = BTreeMap::new();

        for question in self.store.all() {
            let Some(tier1) = &question.tier_1_core_research else {
                continue;
            };
            let Some(subject) = tier1.subject_name() else {
                continue;
            };

            let topics = tree.entry(subject.to_string()).or_default();
            if let Some(topic) = tier1.topic_name() {
                topics.insert(topic.to_string());
            }
        }

        tree.into_iter()
            .map(|(subject, topics)| {
                let mut topics: Vec<String> = topics.into_iter().collect();
                topics.sort();
                (subject, topics)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{Question, QuestionDraft};
    use crate::store::MemoryQuestionStore;
    use serde_json::json;

    fn seed(store: &MemoryQuestionStore, value: serde_json::Value) {
        let draft: QuestionDraft = serde_json::from_value(value).unwrap();
        store
            .insert(Question::from_draft(draft, "soup".into(), vec![0.0; 4]))
            .unwrap();
    }

    fn seeded_catalog() -> FilterCatalog {
        let store = Arc::new(MemoryQuestionStore::new());
        seed(
            &store,
            json!({
                "question_id": "Q1", "subject": "Aerospace Engineering",
                "year": 2008, "question_number": 1, "question_text": "a",
                "question_type": "MCQ", "answer_key": "A",
                "tier_1_core_research": {
                    "hierarchical_tags": {
                        "subject": { "name": "Aerodynamics" },
                        "topic": { "name": "Incompressible Flow" }
                    }
                }
            }),
        );
        seed(
            &store,
            json!({
                "question_id": "Q2", "subject": "Aerospace Engineering",
                "year": 2015, "question_number": 2, "question_text": "b",
                "question_type": "NAT", "answer_key": "1",
                "tier_1_core_research": {
                    "hierarchical_tags": {
                        "subject": { "name": "Aerodynamics" },
                        "topic": { "name": "Compressible Flow" }
                    }
                }
            }),
        );
        seed(
            &store,
            json!({
                "question_id": "Q3", "subject": "Aerospace Engineering",
                "year": 2015, "question_number": 3, "question_text": "c",
                "question_type": "MCQ", "answer_key": "C"
            }),
        );
        FilterCatalog::new(store)
    }

    #[test]
    fn test_filter_options() {
        let options = seeded_catalog().filter_options();
        assert_eq!(options.years, vec![2015, 2008]);
        assert_eq!(options.subjects, vec!["Aerospace Engineering"]);
        assert_eq!(options.question_types, vec!["MCQ", "NAT"]);
        // Placeholders stay empty until tier extraction lands.
        assert!(options.topics.is_empty());
        assert!(options.concepts.is_empty());
    }

    #[test]
    fn test_year_counts_descending() {
        let counts = seeded_catalog().year_counts();
        assert_eq!(
            counts,
            vec![
                YearCount {
                    year: 2015,
                    count: 2
                },
                YearCount {
                    year: 2008,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_syllabus_tree() {
        let tree = seeded_catalog().syllabus_tree();
        assert_eq!(tree.len(), 1);
        assert_eq!(
            tree.get("Aerodynamics").unwrap(),
            &vec![
                "Compressible Flow".to_string(),
                "Incompressible Flow".to_string()
            ]
        );
    }
}

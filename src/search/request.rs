//! Search requests, structured filters, and pagination parameters.

use serde::{Deserialize, Serialize};

use crate::question::Question;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on `page_size`; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: usize = 100;

/// Structured filters applied as an AND-conjunction over candidates.
///
/// Invalid or malformed filter values never fail a search; they degrade
/// to "no filter". `topic` and the difficulty bounds are accepted on the
/// request surface but not yet applied by the planner, matching the
/// placeholder topics/concepts facets in the filter catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Exact year match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Year must be one of these.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<i32>>,
    /// Case-insensitive substring match on the subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Reserved; not yet applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Exact match on the question type (`MCQ`/`NAT`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    /// Reserved; not yet applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_min: Option<u8>,
    /// Reserved; not yet applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_max: Option<u8>,
}

impl SearchFilters {
    /// Whether a question satisfies every active filter.
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(year) = self.year
            && question.year != year
        {
            return false;
        }

        if let Some(years) = &self.years
            && !years.is_empty()
            && !years.contains(&question.year)
        {
            return false;
        }

        if let Some(subject) = &self.subject
            && !question
                .subject
                .to_lowercase()
                .contains(&subject.to_lowercase())
        {
            return false;
        }

        if let Some(question_type) = &self.question_type
            && question.question_type != *question_type
        {
            return false;
        }

        true
    }

    /// Whether any filter is active.
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.years.is_none()
            && self.subject.is_none()
            && self.topic.is_none()
            && self.question_type.is_none()
            && self.difficulty_min.is_none()
            && self.difficulty_max.is_none()
    }
}

/// Parse a comma-separated multi-year parameter.
///
/// Any unparseable element degrades the whole parameter to `None` ("no
/// year filter") rather than failing the request.
pub fn parse_years_param(raw: &str) -> Option<Vec<i32>> {
    if raw.trim().is_empty() {
        return None;
    }
    raw.split(',')
        .map(|part| part.trim().parse::<i32>().ok())
        .collect()
}

/// A search request: optional free-text query, structured filters, and
/// pagination.
///
/// # Examples
///
/// ```
/// use prashna::search::request::SearchRequest;
///
/// let request = SearchRequest::new()
///     .with_query("lift coefficient")
///     .page(2)
///     .page_size(10);
/// assert_eq!(request.page, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query. `None`, empty, or whitespace-only means browse
    /// mode: filters and deterministic ordering, no ranking.
    pub query: Option<String>,
    /// Structured filters.
    pub filters: SearchFilters,
    /// 1-based page number.
    pub page: usize,
    /// Results per page, clamped to `[1, MAX_PAGE_SIZE]` at execution.
    pub page_size: usize,
}

impl SearchRequest {
    /// Create a browse-mode request with default pagination.
    pub fn new() -> Self {
        Self {
            query: None,
            filters: SearchFilters::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the structured filters.
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Set the 1-based page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// The trimmed query, or `None` in browse mode.
    pub fn normalized_query(&self) -> Option<&str> {
        match self.query.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(query) => Some(query),
        }
    }

    /// Effective pagination after clamping: `(page, page_size)`.
    pub fn effective_pagination(&self) -> (usize, usize) {
        (self.page.max(1), self.page_size.clamp(1, MAX_PAGE_SIZE))
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionDraft;
    use serde_json::json;

    fn question(year: i32, subject: &str, question_type: &str) -> Question {
        let draft: QuestionDraft = serde_json::from_value(json!({
            "question_id": format!("GATE_AE_{year}_Q01_{subject}_{question_type}"),
            "subject": subject,
            "year": year,
            "question_number": 1,
            "question_text": "text",
            "question_type": question_type,
            "answer_key": "A"
        }))
        .unwrap();
        Question::from_draft(draft, "text".into(), vec![0.0; 4])
    }

    #[test]
    fn test_filters_year_exact() {
        let filters = SearchFilters {
            year: Some(2008),
            ..Default::default()
        };
        assert!(filters.matches(&question(2008, "Aerospace Engineering", "MCQ")));
        assert!(!filters.matches(&question(2015, "Aerospace Engineering", "MCQ")));
    }

    #[test]
    fn test_filters_year_set() {
        let filters = SearchFilters {
            years: Some(vec![2008, 2015]),
            ..Default::default()
        };
        assert!(filters.matches(&question(2015, "Aerospace Engineering", "MCQ")));
        assert!(!filters.matches(&question(2019, "Aerospace Engineering", "MCQ")));

        // An empty set is an inactive filter.
        let filters = SearchFilters {
            years: Some(vec![]),
            ..Default::default()
        };
        assert!(filters.matches(&question(2019, "Aerospace Engineering", "MCQ")));
    }

    #[test]
    fn test_filters_subject_substring_case_insensitive() {
        let filters = SearchFilters {
            subject: Some("aerospace".into()),
            ..Default::default()
        };
        assert!(filters.matches(&question(2008, "Aerospace Engineering", "MCQ")));
        assert!(!filters.matches(&question(2008, "Civil Engineering", "MCQ")));
    }

    #[test]
    fn test_filters_question_type_exact() {
        let filters = SearchFilters {
            question_type: Some("NAT".into()),
            ..Default::default()
        };
        assert!(filters.matches(&question(2008, "Aerospace Engineering", "NAT")));
        assert!(!filters.matches(&question(2008, "Aerospace Engineering", "MCQ")));
    }

    #[test]
    fn test_filters_conjunction() {
        let filters = SearchFilters {
            year: Some(2008),
            question_type: Some("MCQ".into()),
            ..Default::default()
        };
        assert!(filters.matches(&question(2008, "Aerospace Engineering", "MCQ")));
        assert!(!filters.matches(&question(2008, "Aerospace Engineering", "NAT")));
    }

    #[test]
    fn test_parse_years_param() {
        assert_eq!(parse_years_param("2008,2015"), Some(vec![2008, 2015]));
        assert_eq!(parse_years_param(" 2008 , 2015 "), Some(vec![2008, 2015]));
        assert_eq!(parse_years_param("2008"), Some(vec![2008]));
        // Malformed input degrades to no filter.
        assert_eq!(parse_years_param("2008,late"), None);
        assert_eq!(parse_years_param(""), None);
        assert_eq!(parse_years_param("   "), None);
    }

    #[test]
    fn test_normalized_query() {
        assert_eq!(SearchRequest::new().normalized_query(), None);
        assert_eq!(
            SearchRequest::new().with_query("   ").normalized_query(),
            None
        );
        assert_eq!(
            SearchRequest::new().with_query(" lift ").normalized_query(),
            Some("lift")
        );
    }

    #[test]
    fn test_effective_pagination_clamping() {
        let request = SearchRequest::new().page(0).page_size(0);
        assert_eq!(request.effective_pagination(), (1, 1));

        let request = SearchRequest::new().page(3).page_size(500);
        assert_eq!(request.effective_pagination(), (3, MAX_PAGE_SIZE));
    }
}

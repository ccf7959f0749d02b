//! The hybrid search core: content composition, similarity metrics,
//! query planning/ranking, autocomplete suggestions, and facet
//! enumeration.

pub mod content;
pub mod facets;
pub mod ranker;
pub mod request;
pub mod similarity;
pub mod suggest;

pub use content::{ComposedSearchData, ContentComposer, content_soup};
pub use facets::{FilterCatalog, FilterOptions, YearCount};
pub use ranker::{HybridRanker, LEXICAL_WEIGHT, RankedPage, SEMANTIC_WEIGHT, SearchHit};
pub use request::{SearchFilters, SearchRequest, parse_years_param};
pub use suggest::SuggestionResolver;

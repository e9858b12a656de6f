//! Case-insensitive option search over names and descriptions.

use regex::{Regex, RegexBuilder};

use crate::domain::catalog::model::{Catalog, OptionSummary};

/// Compiled search query.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    All,
    Pattern(Regex),
    /// Fallback for queries that are not valid regular expressions.
    Literal(String),
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return SearchQuery::All;
        }
        match RegexBuilder::new(query).case_insensitive(true).build() {
            Ok(regex) => SearchQuery::Pattern(regex),
            Err(err) => {
                log::debug!("Search query '{}' is not a valid pattern ({}), matching literally", query, err);
                SearchQuery::Literal(query.to_lowercase())
            }
        }
    }

    pub fn matches(&self, name: &str, description: &str) -> bool {
        match self {
            SearchQuery::All => true,
            SearchQuery::Pattern(regex) => regex.is_match(name) || regex.is_match(description),
            SearchQuery::Literal(needle) => {
                name.to_lowercase().contains(needle) || description.to_lowercase().contains(needle)
            }
        }
    }
}

impl Catalog {
    /// Entries whose name or description matches `query`, in document order.
    pub fn search(&self, query: &str) -> Vec<OptionSummary<'_>> {
        let query = SearchQuery::new(query);
        self.summaries().into_iter().filter(|s| query.matches(s.name, s.description)).collect()
    }
}

//! Client-side filtering for `snac list`

use snac_core::model::{PartialSnippet, Snippet};

/// Listing filter; every set criterion must hold
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Case-insensitive substring of title or description
    pub query: Option<String>,
    /// Snippet must carry ANY of these tags
    pub tags: Vec<String>,
    pub language: Option<String>,
    /// Inclusive bounds on the content length in characters
    pub min_content_length: Option<usize>,
    pub max_content_length: Option<usize>,
}

impl ListFilter {
    /// Whether a criterion needs fields only full snippets carry
    pub fn needs_full_snippets(&self) -> bool {
        self.query.is_some()
            || self.language.is_some()
            || self.min_content_length.is_some()
            || self.max_content_length.is_some()
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        if !self.matches_tags(&snippet.tags) {
            return false;
        }

        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let hit = snippet.title.to_lowercase().contains(&query)
                || snippet.description.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        if let Some(language) = &self.language {
            if !snippet.language.eq_ignore_ascii_case(language) {
                return false;
            }
        }

        let length = snippet.content.chars().count();
        if self.min_content_length.is_some_and(|min| length < min) {
            return false;
        }
        if self.max_content_length.is_some_and(|max| length > max) {
            return false;
        }

        true
    }

    pub fn matches_partial(&self, partial: &PartialSnippet) -> bool {
        self.matches_tags(&partial.tags)
    }

    fn matches_tags(&self, tags: &[String]) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|wanted| tags.contains(wanted))
    }
}

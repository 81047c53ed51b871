use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::SnippetId;
use super::{tags, timestamp};
use crate::errors::Result;

/// Snippet - a titled, tagged piece of text owned by one team
///
/// `last_modified` is written by the execution engine on every insert and
/// update; values supplied by callers are overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,

    /// Name of the owning team
    pub team_id: String,

    pub title: String,

    pub description: String,

    /// Ordered, duplicates kept; a tag must not contain a comma
    pub tags: Vec<String>,

    /// Free-form language label (e.g. "rust", "sql")
    pub language: String,

    pub content: String,

    pub last_modified: DateTime<Utc>,
}

impl Snippet {
    /// Project to the listing shape
    pub fn to_partial(&self) -> PartialSnippet {
        PartialSnippet {
            id: self.id.clone(),
            team_id: self.team_id.clone(),
            title: self.title.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Convert to the flat storage row
    pub fn to_row(&self) -> SnippetRow {
        SnippetRow {
            id: self.id.as_str().to_string(),
            team_id: self.team_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            tags: tags::join(&self.tags),
            language: self.language.clone(),
            content: self.content.clone(),
            last_modified: timestamp::format(&self.last_modified),
        }
    }
}

/// Listing projection of a snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSnippet {
    pub id: SnippetId,
    pub team_id: String,
    pub title: String,
    pub tags: Vec<String>,
}

/// Builder for new snippets
///
/// Stamps a fresh ID and a zero `last_modified`.
///
/// # Example
///
/// ```
/// use snac_core::model::SnippetBuilder;
///
/// let snippet = SnippetBuilder::new("hello", "core")
///     .language("rust")
///     .tags(vec!["demo".to_string()])
///     .content("fn main() {}")
///     .build();
///
/// assert_eq!(snippet.id.as_str().len(), 5);
/// assert_eq!(snippet.team_id, "core");
/// ```
#[derive(Debug, Clone)]
pub struct SnippetBuilder {
    title: String,
    team_id: String,
    description: String,
    tags: Vec<String>,
    language: String,
    content: String,
}

impl SnippetBuilder {
    pub fn new(title: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            team_id: team_id.into(),
            description: String::new(),
            tags: Vec::new(),
            language: String::new(),
            content: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn build(self) -> Snippet {
        Snippet {
            id: SnippetId::generate(),
            team_id: self.team_id,
            title: self.title,
            description: self.description,
            tags: self.tags,
            language: self.language,
            content: self.content,
            last_modified: DateTime::<Utc>::default(),
        }
    }
}

/// Flat storage shape of a snippet, one field per column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetRow {
    pub id: String,
    pub team_id: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub language: String,
    pub content: String,
    pub last_modified: String,
}

impl SnippetRow {
    /// Convert to the domain value
    ///
    /// # Errors
    ///
    /// Returns `TimestampParse` if `last_modified` is not in the canonical
    /// format. Every other column is taken verbatim.
    pub fn into_snippet(self) -> Result<Snippet> {
        let last_modified = timestamp::parse(&self.last_modified)?;
        Ok(Snippet {
            id: SnippetId::from_stored(self.id),
            team_id: self.team_id,
            title: self.title,
            description: self.description,
            tags: tags::split(&self.tags),
            language: self.language,
            content: self.content,
            last_modified,
        })
    }
}

/// Flat storage shape of a listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSnippetRow {
    pub id: String,
    pub team_id: String,
    pub title: String,
    pub tags: String,
}

impl PartialSnippetRow {
    pub fn into_partial(self) -> PartialSnippet {
        PartialSnippet {
            id: SnippetId::from_stored(self.id),
            team_id: self.team_id,
            title: self.title,
            tags: tags::split(&self.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SnacError;

    fn sample() -> Snippet {
        SnippetBuilder::new("Quick sort", "core")
            .description("in-place")
            .tags(vec!["algo".to_string(), "rust".to_string()])
            .language("rust")
            .content("fn sort() {}")
            .build()
    }

    #[test]
    fn test_builder_stamps_defaults() {
        let snippet = SnippetBuilder::new("t", "core").build();
        assert_eq!(snippet.id.as_str().len(), 5);
        assert_eq!(snippet.last_modified, DateTime::<Utc>::default());
        assert!(snippet.tags.is_empty());
        assert!(snippet.content.is_empty());
    }

    #[test]
    fn test_row_round_trip() {
        let mut snippet = sample();
        snippet.last_modified = Utc::now();

        let row = snippet.to_row();
        assert_eq!(row.tags, "algo,rust");

        let back = row.clone().into_snippet().unwrap();
        assert_eq!(back, snippet);
        assert_eq!(back.to_row(), row);
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let mut row = sample().to_row();
        row.last_modified = "last tuesday".to_string();

        let err = row.into_snippet().unwrap_err();
        assert!(matches!(err, SnacError::TimestampParse { .. }));
    }

    #[test]
    fn test_row_fields_taken_verbatim() {
        let row = SnippetRow {
            id: "not-an-id".to_string(),
            team_id: "ghost".to_string(),
            title: String::new(),
            description: String::new(),
            tags: String::new(),
            language: String::new(),
            content: String::new(),
            last_modified: "2024-01-01T00:00:00Z".to_string(),
        };
        let snippet = row.into_snippet().unwrap();
        assert_eq!(snippet.id.as_str(), "not-an-id");
        assert!(snippet.tags.is_empty());
    }

    #[test]
    fn test_partial_projection() {
        let snippet = sample();
        let partial = snippet.to_partial();
        assert_eq!(partial.id, snippet.id);
        assert_eq!(partial.tags, snippet.tags);

        let row = PartialSnippetRow {
            id: snippet.id.to_string(),
            team_id: "core".to_string(),
            title: "Quick sort".to_string(),
            tags: "algo,rust".to_string(),
        };
        assert_eq!(row.into_partial(), partial);
    }
}

//! Rendering of snippets and teams for the terminal

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use snac_core::model::{timestamp, PartialSnippet, Snippet, Team};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Default,
    Json,
    Yaml,
}

/// Options for `snac show`
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOptions {
    pub short: bool,
    pub content_only: bool,
    /// Maximum number of content characters shown
    pub cutoff: Option<usize>,
}

fn serialized<T: Serialize + ?Sized>(value: &T, format: Format) -> Result<Option<String>> {
    let text = match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Default => return Ok(None),
    };
    Ok(Some(text.trim_end().to_string()))
}

fn short_line(id: &str, title: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        format!("{}  {}", id, title)
    } else {
        format!("{}  {}  [{}]", id, title, tags.join(", "))
    }
}

fn cut(content: &str, cutoff: Option<usize>) -> String {
    match cutoff {
        Some(limit) if content.chars().count() > limit => {
            let kept: String = content.chars().take(limit).collect();
            format!("{}...", kept)
        }
        _ => content.to_string(),
    }
}

pub fn render_partials(partials: &[PartialSnippet], format: Format) -> Result<String> {
    if let Some(text) = serialized(partials, format)? {
        return Ok(text);
    }
    Ok(partials
        .iter()
        .map(|p| short_line(p.id.as_str(), &p.title, &p.tags))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn render_snippets(snippets: &[Snippet], format: Format) -> Result<String> {
    if let Some(text) = serialized(snippets, format)? {
        return Ok(text);
    }
    Ok(snippets
        .iter()
        .map(full_text)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

pub fn render_snippet(snippet: &Snippet, format: Format, options: ShowOptions) -> Result<String> {
    if options.content_only {
        return Ok(cut(&snippet.content, options.cutoff));
    }

    let mut shown = snippet.clone();
    shown.content = cut(&snippet.content, options.cutoff);

    if options.short {
        let partial = shown.to_partial();
        if let Some(text) = serialized(&partial, format)? {
            return Ok(text);
        }
        return Ok(short_line(partial.id.as_str(), &partial.title, &partial.tags));
    }

    if let Some(text) = serialized(&shown, format)? {
        return Ok(text);
    }
    Ok(full_text(&shown))
}

fn full_text(snippet: &Snippet) -> String {
    format!(
        "ID:            {}\nTitle:         {}\nDescription:   {}\nLanguage:      {}\nTags:          {}\nLast modified: {}\n---\n{}",
        snippet.id,
        snippet.title,
        snippet.description,
        snippet.language,
        snippet.tags.join(", "),
        timestamp::format(&snippet.last_modified),
        snippet.content,
    )
}

pub fn render_team(team: &Team, format: Format) -> Result<String> {
    if let Some(text) = serialized(team, format)? {
        return Ok(text);
    }
    Ok(format!(
        "Name:          {}\nDisplay name:  {}\nCreated:       {}\nLast modified: {}",
        team.name,
        team.display_name,
        timestamp::format(&team.created),
        timestamp::format(&team.last_modified),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snac_core::model::SnippetBuilder;

    fn snippet() -> Snippet {
        SnippetBuilder::new("hello", "core")
            .tags(vec!["a".to_string(), "b".to_string()])
            .content("0123456789")
            .build()
    }

    #[test]
    fn test_content_only_with_cutoff() {
        let options = ShowOptions {
            content_only: true,
            cutoff: Some(4),
            ..ShowOptions::default()
        };
        assert_eq!(
            render_snippet(&snippet(), Format::Default, options).unwrap(),
            "0123..."
        );
    }

    #[test]
    fn test_short_line() {
        let s = snippet();
        let options = ShowOptions {
            short: true,
            ..ShowOptions::default()
        };
        assert_eq!(
            render_snippet(&s, Format::Default, options).unwrap(),
            format!("{}  hello  [a, b]", s.id)
        );
    }

    #[test]
    fn test_json_snippet_is_parseable() {
        let s = snippet();
        let text = render_snippet(&s, Format::Json, ShowOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["id"], s.id.as_str());
        assert_eq!(value["tags"][1], "b");
    }

    #[test]
    fn test_team_json_hides_hashes() {
        let now = chrono::Utc::now();
        let team = Team {
            name: "core".to_string(),
            display_name: "Core".to_string(),
            created: now,
            last_modified: now,
            password_hash: "$argon2id$secret".to_string(),
            admin_hash: "$argon2id$secret".to_string(),
        };
        let text = render_team(&team, Format::Json).unwrap();
        assert!(!text.contains("argon2id"));
        let yaml = render_team(&team, Format::Yaml).unwrap();
        assert!(yaml.contains("display_name: Core"));
    }
}

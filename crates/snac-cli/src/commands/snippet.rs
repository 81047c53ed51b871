//! Snippet commands: list, show, create, update, delete

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args};
use snac_core::model::{Snippet, SnippetBuilder};

use crate::commands::Session;
use crate::filter::ListFilter;
use crate::output::{self, Format, ShowOptions};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Search for matching text in title and description
    #[arg(short, long)]
    pub query: Option<String>,

    /// Filter by tag; repeat to match ANY of several tags
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Filter by language
    #[arg(long)]
    pub language: Option<String>,

    /// Minimum content length in characters (inclusive)
    #[arg(long)]
    pub min_content_length: Option<usize>,

    /// Maximum content length in characters (inclusive)
    #[arg(long)]
    pub max_content_length: Option<usize>,

    /// Show full data of each snippet
    #[arg(long)]
    pub full: bool,

    #[arg(short, long, value_enum, default_value_t = Format::Default)]
    pub format: Format,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Snippet ID (case-insensitive)
    pub id: String,

    /// Show only ID, title and tags
    #[arg(short, long)]
    pub short: bool,

    /// Show only the content
    #[arg(long)]
    pub content_only: bool,

    /// Cut the content off after this many characters
    #[arg(long)]
    pub cutoff: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Default)]
    pub format: Format,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("content_source").required(true).args(["content", "content_file"])))]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub language: String,

    /// Add a tag; repeat for several
    #[arg(long = "tag", required = true, value_parser = parse_tag)]
    pub tags: Vec<String>,

    #[arg(long)]
    pub content: Option<String>,

    /// Read the content from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Default)]
    pub format: Format,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("content_source").args(["content", "content_file"])))]
pub struct UpdateArgs {
    /// Snippet ID (case-insensitive)
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    /// Add a tag; repeat for several
    #[arg(long = "tag", value_parser = parse_tag)]
    pub tags: Vec<String>,

    /// Remove a tag; repeat for several
    #[arg(long = "untag")]
    pub untags: Vec<String>,

    #[arg(long)]
    pub content: Option<String>,

    /// Read the new content from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Snippet ID (case-insensitive)
    pub id: String,
}

pub fn list(session: &Session, args: ListArgs) -> Result<()> {
    let filter = ListFilter {
        query: args.query,
        tags: args.tags,
        language: args.language,
        min_content_length: args.min_content_length,
        max_content_length: args.max_content_length,
    };

    let text = if args.full || filter.needs_full_snippets() {
        let snippets = session
            .as_member()?
            .get_all()
            .build()?
            .execute(&session.db)?
            .into_snippets()
            .unwrap_or_default();
        let shown: Vec<Snippet> = snippets.into_iter().filter(|s| filter.matches(s)).collect();
        if args.full {
            output::render_snippets(&shown, args.format)?
        } else {
            let partials: Vec<_> = shown.iter().map(Snippet::to_partial).collect();
            output::render_partials(&partials, args.format)?
        }
    } else {
        let partials = session
            .as_member()?
            .get_all_partials()
            .build()?
            .execute(&session.db)?
            .into_partials()
            .unwrap_or_default();
        let shown: Vec<_> = partials
            .into_iter()
            .filter(|p| filter.matches_partial(p))
            .collect();
        output::render_partials(&shown, args.format)?
    };

    if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}

pub fn show(session: &Session, args: ShowArgs) -> Result<()> {
    let snippet = fetch(session, &args.id)?;
    let options = ShowOptions {
        short: args.short,
        content_only: args.content_only,
        cutoff: args.cutoff,
    };
    println!("{}", output::render_snippet(&snippet, args.format, options)?);
    Ok(())
}

pub fn create(session: &Session, args: CreateArgs) -> Result<()> {
    let content = read_content(args.content, args.content_file)?.unwrap_or_default();
    if content.is_empty() {
        bail!("Snippet content must not be empty");
    }

    let snippet = SnippetBuilder::new(args.title, session.config.team_name.clone())
        .description(args.description)
        .language(args.language)
        .tags(args.tags)
        .content(content)
        .build();

    let stored = session
        .as_member()?
        .insert(snippet)
        .build()?
        .execute(&session.db)?
        .into_snippet()
        .context("Insert did not return the stored snippet")?;

    match args.format {
        Format::Default => println!("Created snippet {}", stored.id),
        format => println!(
            "{}",
            output::render_snippet(&stored, format, ShowOptions::default())?
        ),
    }
    Ok(())
}

pub fn update(session: &Session, args: UpdateArgs) -> Result<()> {
    let mut snippet = fetch(session, &args.id)?;

    if let Some(title) = args.title {
        snippet.title = title;
    }
    if let Some(description) = args.description {
        snippet.description = description;
    }
    if let Some(language) = args.language {
        snippet.language = language;
    }
    snippet.tags.retain(|t| !args.untags.contains(t));
    for tag in args.tags {
        if !snippet.tags.contains(&tag) {
            snippet.tags.push(tag);
        }
    }
    if let Some(content) = read_content(args.content, args.content_file)? {
        snippet.content = content;
    }

    let id = snippet.id.clone();
    session
        .as_member()?
        .update(snippet)
        .build()?
        .execute(&session.db)?;
    println!("Updated snippet {}", id);
    Ok(())
}

pub fn delete(session: &Session, args: DeleteArgs) -> Result<()> {
    let request = session.as_member()?.delete(&args.id).build()?;
    let id = match request.operation() {
        snac_engine::Operation::Delete(id) => id.to_string(),
        _ => args.id.clone(),
    };
    request.execute(&session.db)?;
    println!("Deleted snippet {}", id);
    Ok(())
}

fn fetch(session: &Session, id: &str) -> Result<Snippet> {
    session
        .as_member()?
        .get(id)
        .build()?
        .execute(&session.db)?
        .into_snippet()
        .context("Get did not return a snippet")
}

/// Tags are stored comma-joined, so a tag must not contain a comma
fn parse_tag(value: &str) -> std::result::Result<String, String> {
    if value.contains(',') {
        return Err(format!(
            "tag '{}' contains ','; pass --tag once per tag instead",
            value
        ));
    }
    Ok(value.to_string())
}

fn read_content(inline: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(content), _) => Ok(Some(content)),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Error while reading content file {}", path.display())),
        (None, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_rejects_commas() {
        assert_eq!(parse_tag("go").unwrap(), "go");
        assert!(parse_tag("a,b").unwrap_err().contains("--tag once per tag"));
    }
}

//! Tag list encoding for the single `tags` column
//!
//! Tags are stored comma-joined. A tag must therefore never contain a comma,
//! and `[""]` encodes exactly like `[]`: both read back as no tags.

/// Join tags with `,`
pub fn join(tags: &[String]) -> String {
    tags.join(",")
}

/// Split a stored tag string; the empty string means no tags
pub fn split(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(',').map(str::to_string).collect()
}

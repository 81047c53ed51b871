//! Snippet identifiers
//!
//! Five characters from an alphabet without look-alike symbols (no `O`, no
//! `0`), so IDs can be read aloud and typed back without ambiguity.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnacError};

/// Characters a snippet ID is drawn from
pub const ID_ALPHABET: &[u8; 34] = b"ABCDEFGHIJKLMNPQRSTUVWXYZ123456789";

/// Number of characters in a snippet ID
pub const ID_LEN: usize = 5;

/// Snippet identifier
///
/// Generated client side. Uniqueness is not checked here: storage rejects a
/// duplicate through its primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(String);

impl SnippetId {
    /// Draw a fresh random ID
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    /// Parse user input into an ID
    ///
    /// Input is trimmed and upper-cased first, so `"ab3cd"` is accepted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSnippetId` if the input is not exactly five characters
    /// from [`ID_ALPHABET`].
    pub fn parse(input: &str) -> Result<Self> {
        let candidate = input.trim().to_ascii_uppercase();
        let valid = candidate.len() == ID_LEN && candidate.bytes().all(|b| ID_ALPHABET.contains(&b));
        if !valid {
            return Err(SnacError::InvalidSnippetId {
                value: input.to_string(),
            });
        }
        Ok(Self(candidate))
    }

    /// Wrap an ID read back from storage, verbatim
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SnippetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SnippetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

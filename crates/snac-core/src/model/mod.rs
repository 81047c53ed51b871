pub mod id;
pub mod snippet;
pub mod tags;
pub mod team;
pub mod timestamp;

pub use id::{SnippetId, ID_ALPHABET, ID_LEN};
pub use snippet::{PartialSnippet, PartialSnippetRow, Snippet, SnippetBuilder, SnippetRow};
pub use team::{NewTeam, Team, TeamRow};

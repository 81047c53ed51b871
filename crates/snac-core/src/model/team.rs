use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snac_core_types::Sensitive;

use super::timestamp;
use crate::errors::Result;

/// Team - owner of snippets and holder of two credentials
///
/// `name` is the primary key and never changes. The two hashes are salted
/// argon2 PHC strings for the regular and the admin role; they are never
/// serialized and `Debug` redacts them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,

    pub display_name: String,

    pub created: DateTime<Utc>,

    pub last_modified: DateTime<Utc>,

    #[serde(skip_serializing, default)]
    pub password_hash: String,

    #[serde(skip_serializing, default)]
    pub admin_hash: String,
}

impl Team {
    /// The same team with both hashes blanked
    pub fn without_hashes(mut self) -> Self {
        self.password_hash.clear();
        self.admin_hash.clear();
        self
    }

    pub fn to_row(&self) -> TeamRow {
        TeamRow {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            created: timestamp::format(&self.created),
            last_modified: timestamp::format(&self.last_modified),
            password_hash: self.password_hash.clone(),
            admin_hash: self.admin_hash.clone(),
        }
    }
}

impl std::fmt::Debug for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Team")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("created", &self.created)
            .field("last_modified", &self.last_modified)
            .field("password_hash", &"[REDACTED]")
            .field("admin_hash", &"[REDACTED]")
            .finish()
    }
}

/// Payload for creating a team
///
/// Carries plain passwords; storage hashes them on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub display_name: String,
    pub password: Sensitive<String>,
    pub admin_password: Sensitive<String>,
}

impl NewTeam {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        password: impl Into<Sensitive<String>>,
        admin_password: impl Into<Sensitive<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            password: password.into(),
            admin_password: admin_password.into(),
        }
    }
}

/// Flat storage shape of a team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRow {
    pub name: String,
    pub display_name: String,
    pub created: String,
    pub last_modified: String,
    pub password_hash: String,
    pub admin_hash: String,
}

impl TeamRow {
    /// Convert to the domain value
    ///
    /// # Errors
    ///
    /// Returns `TimestampParse` if either timestamp is malformed.
    pub fn into_team(self) -> Result<Team> {
        let created = timestamp::parse(&self.created)?;
        let last_modified = timestamp::parse(&self.last_modified)?;
        Ok(Team {
            name: self.name,
            display_name: self.display_name,
            created,
            last_modified,
            password_hash: self.password_hash,
            admin_hash: self.admin_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SnacError;

    fn team() -> Team {
        let now = Utc::now();
        Team {
            name: "core".to_string(),
            display_name: "Core Team".to_string(),
            created: now,
            last_modified: now,
            password_hash: "$argon2id$regular".to_string(),
            admin_hash: "$argon2id$admin".to_string(),
        }
    }

    #[test]
    fn test_row_round_trip() {
        let team = team();
        assert_eq!(team.to_row().into_team().unwrap(), team);
    }

    #[test]
    fn test_bad_created_is_an_error() {
        let mut row = team().to_row();
        row.created = String::new();
        assert!(matches!(
            row.into_team().unwrap_err(),
            SnacError::TimestampParse { .. }
        ));
    }

    #[test]
    fn test_debug_redacts_hashes() {
        let printed = format!("{:?}", team());
        assert!(printed.contains("Core Team"));
        assert!(printed.contains("[REDACTED]"));
        assert!(!printed.contains("argon2id"));
    }

    #[test]
    fn test_without_hashes_blanks_both() {
        let bare = team().without_hashes();
        assert!(bare.password_hash.is_empty());
        assert!(bare.admin_hash.is_empty());
        assert_eq!(bare.name, team().name);
    }

    #[test]
    fn test_hashes_never_serialized() {
        let json = serde_json::to_string(&team()).unwrap();
        assert!(json.contains("Core Team"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_new_team_debug_redacts_passwords() {
        let new_team = NewTeam::new("core", "Core", "hunter2", "root-pw");
        let rendered = format!("{:?}", new_team);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("root-pw"));
        assert_eq!(new_team.password.expose(), "hunter2");
    }
}

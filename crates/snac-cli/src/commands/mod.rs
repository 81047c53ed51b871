//! Subcommand handlers
//!
//! Each handler receives the opened `Session` and its parsed arguments and
//! talks to storage only through engine requests.

pub mod snippet;
pub mod status;
pub mod team;

use std::path::PathBuf;

use anyhow::{bail, Result};
use snac_engine::RequestBuilder;
use snac_store::SqliteDatabase;

use crate::config::Config;

/// Loaded configuration plus the open database
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
    pub db: SqliteDatabase,
}

impl Session {
    /// Builder authorized with the regular team password
    pub fn as_member(&self) -> Result<RequestBuilder> {
        self.ensure_team()?;
        Ok(RequestBuilder::new().for_team(
            self.config.team_name.clone(),
            self.config.password.clone(),
            false,
        ))
    }

    /// Builder authorized with the team's admin password
    pub fn as_admin(&self) -> Result<RequestBuilder> {
        self.ensure_team()?;
        let Some(admin_password) = self.config.admin_password.clone() else {
            bail!("This command needs the admin password; set admin_password in the config or pass --admin-password");
        };
        Ok(RequestBuilder::new().for_team(self.config.team_name.clone(), admin_password, true))
    }

    fn ensure_team(&self) -> Result<()> {
        if !self.config.has_team() {
            bail!(
                "No team configured; set team_name and password in {} or pass --team-name and --password",
                self.config_path.display()
            );
        }
        Ok(())
    }
}

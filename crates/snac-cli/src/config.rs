//! CLI configuration
//!
//! A YAML file, by default `<config dir>/snac/config.yaml`. Flags and
//! environment variables override individual fields after loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use snac_core_types::Sensitive;

const APP_DIR: &str = "snac";
const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_DB_NAME: &str = "snac";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub team_name: String,
    pub password: Sensitive<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<Sensitive<String>>,
    pub log_level: String,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file stem used when `path` is not set
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Whether team credentials are available
    pub fn has_team(&self) -> bool {
        !self.team_name.is_empty()
    }

    /// Resolve the database file: explicit path, else `<data dir>/snac/<name>.db`
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        let name = if self.database.name.is_empty() {
            DEFAULT_DB_NAME
        } else {
            self.database.name.as_str()
        };
        let data_dir = dirs::data_dir().context("Could not determine the user data directory")?;
        Ok(data_dir.join(APP_DIR).join(format!("{}.db", name)))
    }
}

/// Default config location: `<config dir>/snac/config.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the config at `path`
///
/// A missing file is created empty when `create` is set, otherwise it is an
/// error.
pub fn load(path: &Path, create: bool) -> Result<Config> {
    if !path.exists() {
        if !create {
            bail!(
                "Config file does not exist at {}; use --create-config to create a new one",
                path.display()
            );
        }
        write_empty(path)?;
        eprintln!("Created new empty config file at {}", path.display());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Error while reading config file {}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&text)
        .with_context(|| format!("Error while loading config file {}", path.display()))
}

fn write_empty(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Error while creating {}", dir.display()))?;
    }
    let data = serde_yaml::to_string(&Config::default())?;
    fs::write(path, data)
        .with_context(|| format!("Error while writing new config file {}", path.display()))
}

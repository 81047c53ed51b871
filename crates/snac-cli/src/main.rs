//! snac CLI
//!
//! Command-line interface for the snippet accumulator

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use snac_core::logging_facility::{self, Profile};
use snac_core::storage::Database;
use snac_store::SqliteDatabase;

mod commands;
mod config;
mod filter;
mod output;

#[derive(Debug, Parser)]
#[command(name = "snac")]
#[command(about = "snac - manage your team's snippets", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Config file to use (default: <config dir>/snac/config.yaml)
    #[arg(long, global = true, env = "SNAC_CONFIG")]
    config: Option<PathBuf>,

    /// Create an empty config file if none exists
    #[arg(long, global = true)]
    create_config: bool,

    /// Database file, overriding the config
    #[arg(long, global = true, env = "SNAC_DB")]
    db: Option<PathBuf>,

    /// Team name, overriding the config
    #[arg(long, global = true, env = "SNAC_TEAM_NAME", requires = "password")]
    team_name: Option<String>,

    /// Team password, overriding the config
    #[arg(
        long,
        global = true,
        env = "SNAC_PASSWORD",
        hide_env_values = true,
        requires = "team_name"
    )]
    password: Option<String>,

    /// Admin password, overriding the config
    #[arg(long, global = true, env = "SNAC_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// Enable verbose (debug) output
    #[arg(short = 'V', long, global = true)]
    verbose: bool,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List snippets, with filters
    #[command(visible_alias = "l")]
    List(commands::snippet::ListArgs),
    /// Show one snippet
    #[command(visible_aliases = ["s", "get"])]
    Show(commands::snippet::ShowArgs),
    /// Create a snippet
    #[command(visible_alias = "c")]
    Create(commands::snippet::CreateArgs),
    /// Update fields of a snippet
    #[command(visible_alias = "u")]
    Update(commands::snippet::UpdateArgs),
    /// Delete a snippet
    #[command(visible_alias = "d")]
    Delete(commands::snippet::DeleteArgs),
    /// Team management
    Team(commands::team::TeamArgs),
    /// Show config location, database and credential check
    Status,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let global = cli.global;

    let config_path = match global.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let mut config = config::load(&config_path, global.create_config)?;

    if let (Some(team_name), Some(password)) = (global.team_name, global.password) {
        config.team_name = team_name;
        config.password = password.into();
    }
    if let Some(admin_password) = global.admin_password {
        config.admin_password = Some(admin_password.into());
    }
    if global.verbose {
        config.log_level = "debug".to_string();
    }

    let profile = match global.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    };
    let level = if config.log_level.is_empty() {
        "warn"
    } else {
        config.log_level.as_str()
    };
    logging_facility::init_with_level(profile, Some(level));
    tracing::debug!(config = %config_path.display(), "loaded config");

    let db_path = match global.db {
        Some(path) => path,
        None => config.database_path()?,
    };
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Error while creating {}", dir.display()))?;
    }
    let db = SqliteDatabase::open(&db_path)
        .with_context(|| format!("Error while opening database {}", db_path.display()))?;

    let session = commands::Session {
        config,
        config_path,
        db_path,
        db,
    };

    let result = match cli.command {
        Commands::List(args) => commands::snippet::list(&session, args),
        Commands::Show(args) => commands::snippet::show(&session, args),
        Commands::Create(args) => commands::snippet::create(&session, args),
        Commands::Update(args) => commands::snippet::update(&session, args),
        Commands::Delete(args) => commands::snippet::delete(&session, args),
        Commands::Team(args) => commands::team::execute(&session, args),
        Commands::Status => commands::status::execute(&session),
    };

    let closed = session.db.close();
    result?;
    closed?;
    Ok(())
}

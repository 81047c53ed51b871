//! Team commands: create, show, update, delete

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use snac_core::model::NewTeam;
use snac_core::password;

use crate::commands::Session;
use crate::output::{self, Format};

#[derive(Debug, Args)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// Create a new team (no credentials needed)
    Create(CreateTeamArgs),
    /// Show the configured team
    Show(ShowTeamArgs),
    /// Change display name or passwords (admin role)
    Update(UpdateTeamArgs),
    /// Delete the configured team and all of its snippets (admin role)
    Delete,
}

#[derive(Debug, Args)]
pub struct CreateTeamArgs {
    /// Team name; cannot be changed later
    pub name: String,

    #[arg(long)]
    pub display_name: Option<String>,

    /// Password for regular members
    #[arg(long)]
    pub new_password: String,

    /// Password for the admin role
    #[arg(long)]
    pub new_admin_password: String,
}

#[derive(Debug, Args)]
pub struct ShowTeamArgs {
    #[arg(long, value_enum, default_value_t = Format::Default)]
    pub format: Format,
}

#[derive(Debug, Args)]
pub struct UpdateTeamArgs {
    #[arg(long)]
    pub display_name: Option<String>,

    #[arg(long)]
    pub new_password: Option<String>,

    #[arg(long)]
    pub new_admin_password: Option<String>,
}

pub fn execute(session: &Session, args: TeamArgs) -> Result<()> {
    match args.command {
        TeamCommand::Create(args) => create(session, args),
        TeamCommand::Show(args) => show(session, args),
        TeamCommand::Update(args) => update(session, args),
        TeamCommand::Delete => delete(session),
    }
}

fn create(session: &Session, args: CreateTeamArgs) -> Result<()> {
    let display_name = args.display_name.unwrap_or_else(|| args.name.clone());
    let team = NewTeam::new(
        args.name.clone(),
        display_name,
        args.new_password,
        args.new_admin_password,
    );
    snac_engine::RequestBuilder::new()
        .new_team(team)
        .build()?
        .execute(&session.db)?;
    println!("Created team '{}'", args.name);
    Ok(())
}

fn show(session: &Session, args: ShowTeamArgs) -> Result<()> {
    let team = session
        .as_member()?
        .get_team()
        .build()?
        .execute(&session.db)?
        .into_team()
        .context("GetTeam did not return a team")?;
    println!("{}", output::render_team(&team, args.format)?);
    Ok(())
}

fn update(session: &Session, args: UpdateTeamArgs) -> Result<()> {
    let mut team = session
        .as_admin()?
        .get_team()
        .build()?
        .execute(&session.db)?
        .into_team()
        .context("GetTeam did not return a team")?;

    if let Some(display_name) = args.display_name {
        team.display_name = display_name;
    }
    if let Some(new_password) = args.new_password {
        team.password_hash = password::hash_password(&new_password)?;
    }
    if let Some(new_admin_password) = args.new_admin_password {
        team.admin_hash = password::hash_password(&new_admin_password)?;
    }

    let name = team.name.clone();
    session
        .as_admin()?
        .update_team(team)
        .build()?
        .execute(&session.db)?;
    println!("Updated team '{}'", name);
    Ok(())
}

fn delete(session: &Session) -> Result<()> {
    let name = session.config.team_name.clone();
    session
        .as_admin()?
        .delete_team(name.clone())
        .build()?
        .execute(&session.db)?;
    println!("Deleted team '{}'", name);
    Ok(())
}

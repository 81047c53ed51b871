//! `snac status`: where things are and whether the credentials work

use anyhow::Result;

use crate::commands::Session;

pub fn execute(session: &Session) -> Result<()> {
    println!("Config:   {}", session.config_path.display());
    println!("Database: {}", session.db_path.display());

    if !session.config.has_team() {
        println!("Team:     not configured");
        return Ok(());
    }
    println!("Team:     {}", session.config.team_name);

    let checked = session
        .as_member()?
        .get_team()
        .build()?
        .execute(&session.db);
    match checked.map(|outcome| outcome.into_team()) {
        Ok(Some(team)) => println!("Login:    ok ({})", team.display_name),
        Ok(None) => println!("Login:    ok"),
        Err(e) => println!("Login:    failed: {}", e.message()),
    }
    Ok(())
}

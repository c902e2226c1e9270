//! Session CLI subcommands.
//!
//! Saving, loading, listing, renaming, deleting, and importing named
//! sessions. Save conflicts (an existing name) prompt for confirmation
//! unless `--overwrite` is passed.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use mindmeld_core::session::service::{RenameOutcome, SaveOutcome};
use mindmeld_types::session::Session;

use crate::state::AppState;

/// Session subcommands.
#[derive(Subcommand)]
pub enum SessionCommand {
    /// Save the current board under a name.
    Save {
        /// Session name.
        name: String,

        /// Replace an existing session with the same name without asking.
        #[arg(long)]
        overwrite: bool,
    },

    /// Load a session onto the board, replacing its contents.
    Load {
        /// Session name.
        name: String,
    },

    /// List saved sessions, most recent first.
    #[command(alias = "ls")]
    List,

    /// Rename the active session.
    Rename {
        /// New name.
        name: String,
    },

    /// Delete a session by name.
    #[command(alias = "rm")]
    Delete {
        /// Session name.
        name: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Import a session from an exported JSON file.
    Import {
        /// Path to the JSON file.
        file: std::path::PathBuf,
    },
}

/// Handle a session subcommand.
pub async fn handle(cmd: SessionCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        SessionCommand::Save { name, overwrite } => save(state, &name, overwrite, json).await,
        SessionCommand::Load { name } => load(state, &name, json).await,
        SessionCommand::List => list(state, json).await,
        SessionCommand::Rename { name } => rename(state, &name, json).await,
        SessionCommand::Delete { name, force } => delete(state, &name, force, json).await,
        SessionCommand::Import { file } => import(state, &file, json).await,
    }
}

fn print_saved(session: &Session, verb: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session)?);
    } else {
        println!(
            "  {} Session '{}' {} ({} ideas)",
            style("ok").green(),
            style(&session.name).cyan(),
            verb,
            session.ideas.len()
        );
    }
    Ok(())
}

async fn save(state: &AppState, name: &str, overwrite: bool, json: bool) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("session name must not be blank");
    }

    let ideas = state.board.list().await?;
    let owner = state.identity.id;

    match state.sessions.save(&owner, name, &ideas, overwrite).await? {
        SaveOutcome::Created(session) => print_saved(&session, "saved", json),
        SaveOutcome::Replaced(session) => print_saved(&session, "overwritten", json),
        SaveOutcome::Conflict(existing) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({"error": "name exists", "name": existing.name})
                );
                return Ok(());
            }
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Session '{}' already exists ({} ideas). Overwrite it?",
                    style(&existing.name).yellow().bold(),
                    existing.ideas.len()
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("  Cancelled.");
                return Ok(());
            }
            match state.sessions.save(&owner, name, &ideas, true).await? {
                SaveOutcome::Replaced(session) | SaveOutcome::Created(session) => {
                    print_saved(&session, "overwritten", json)
                }
                SaveOutcome::Conflict(_) => unreachable!("overwrite was requested"),
            }
        }
    }
}

async fn load(state: &AppState, name: &str, json: bool) -> Result<()> {
    let owner = state.identity.id;
    let Some(session) = state.sessions.load(&owner, name).await? else {
        bail!("no session named '{name}'");
    };

    state.board.replace(&session.ideas).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        println!(
            "  {} Loaded '{}' onto the board ({} ideas)",
            style("ok").green(),
            style(&session.name).cyan(),
            session.ideas.len()
        );
    }
    Ok(())
}

async fn list(state: &AppState, json: bool) -> Result<()> {
    let sessions = state.sessions.list(&state.identity.id).await?;
    let active = state.sessions.active().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!("  {} No saved sessions.", style("i").blue().bold());
        println!("     Save the board with: mindmeld session save <name>");
        println!();
        return Ok(());
    }

    println!();
    println!("  Sessions ({})", sessions.len());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Ideas").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for session in &sessions {
        let marker = match &active {
            Some(a) if a.id == session.id => "*",
            _ => "",
        };
        table.add_row(vec![
            Cell::new(marker).fg(Color::Green),
            Cell::new(&session.name).fg(Color::Cyan),
            Cell::new(session.ideas.len()).fg(Color::DarkGrey),
            Cell::new(session.created_at.format("%Y-%m-%d %H:%M")).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

async fn rename(state: &AppState, name: &str, json: bool) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("session name must not be blank");
    }

    match state.sessions.rename(&state.identity.id, name).await? {
        RenameOutcome::NoActiveSession => {
            if json {
                println!("{}", serde_json::json!({"error": "no active session"}));
            } else {
                println!(
                    "  {} No session is loaded; load one first with: mindmeld session load <name>",
                    style("i").blue().bold()
                );
            }
        }
        RenameOutcome::Renamed { from, to } => {
            if json {
                println!("{}", serde_json::json!({"from": from, "to": to}));
            } else {
                println!(
                    "  {} Renamed '{}' to '{}'",
                    style("ok").green(),
                    style(&from).dim(),
                    style(&to).cyan()
                );
            }
        }
    }
    Ok(())
}

async fn delete(state: &AppState, name: &str, force: bool, json: bool) -> Result<()> {
    let owner = state.identity.id;
    let Some(session) = state.sessions.list(&owner).await?.into_iter().find(|s| s.name == name)
    else {
        bail!("no session named '{name}'");
    };

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete session '{}' ({} ideas)?",
                style(&session.name).red().bold(),
                session.ideas.len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.sessions.delete(&owner, session.id).await?;

    if json {
        println!("{}", serde_json::json!({"deleted": session.name}));
    } else {
        println!(
            "  {} Deleted '{}'",
            style("ok").green(),
            style(&session.name).cyan()
        );
    }
    Ok(())
}

async fn import(state: &AppState, file: &std::path::Path, json: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("could not read {}", file.display()))?;

    let session = state.sessions.import(&state.identity.id, &raw).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        println!(
            "  {} Imported '{}' ({} ideas)",
            style("ok").green(),
            style(&session.name).cyan(),
            session.ideas.len()
        );
    }
    Ok(())
}

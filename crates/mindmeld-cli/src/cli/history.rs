//! Suggestion history CLI subcommands.
//!
//! Past accepted AI suggestions, most recent first, capped. `reuse` copies
//! an entry back onto the board.

use anyhow::{Result, bail};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use crate::state::AppState;

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List past suggestions, most recent first.
    #[command(alias = "ls")]
    List,

    /// Add a past suggestion back onto the board.
    Reuse {
        /// Entry id (see `mindmeld history list`).
        id: i64,
    },

    /// Wipe the suggestion history.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Handle a history subcommand.
pub async fn handle(cmd: HistoryCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        HistoryCommand::List => list(state, json).await,
        HistoryCommand::Reuse { id } => reuse(state, id, json).await,
        HistoryCommand::Clear { force } => clear(state, force, json).await,
    }
}

async fn list(state: &AppState, json: bool) -> Result<()> {
    let entries = state.history.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!("  {} No suggestion history yet.", style("i").blue().bold());
        println!("     Fetch some with: mindmeld suggest");
        println!();
        return Ok(());
    }

    println!();
    println!("  Suggestion history ({} entries)", entries.len());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Suggestion").fg(Color::White),
    ]);

    for entry in &entries {
        table.add_row(vec![
            Cell::new(entry.id).fg(Color::DarkGrey),
            Cell::new(&entry.text).fg(Color::Cyan),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

async fn reuse(state: &AppState, id: i64, json: bool) -> Result<()> {
    let Some(entry) = state.history.find(id).await? else {
        bail!("no history entry with id {id}");
    };

    let Some(idea) = state.board.add(&entry.text).await? else {
        bail!("history entry {id} is blank");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&idea)?);
    } else {
        println!(
            "  {} Added {} back to the board",
            style("ok").green(),
            style(&idea.text).cyan()
        );
    }
    Ok(())
}

async fn clear(state: &AppState, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt("Wipe the suggestion history?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.history.clear().await?;

    if json {
        println!("{}", serde_json::json!({"cleared": true}));
    } else {
        println!("  {} History cleared.", style("ok").green());
    }
    Ok(())
}

//! Idea board CLI subcommands.
//!
//! Adding, listing, and clearing the active board. The board is shared
//! device state: every command sees the same list.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use crate::state::AppState;

/// Idea board subcommands.
#[derive(Subcommand)]
pub enum IdeaCommand {
    /// Add an idea to the board.
    Add {
        /// The idea text.
        text: String,
    },

    /// List the board's ideas in insertion order.
    #[command(alias = "ls")]
    List,

    /// Remove every idea from the board.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Handle an idea subcommand.
pub async fn handle(cmd: IdeaCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        IdeaCommand::Add { text } => add(state, &text, json).await,
        IdeaCommand::List => list(state, json).await,
        IdeaCommand::Clear { force } => clear(state, force, json).await,
    }
}

async fn add(state: &AppState, text: &str, json: bool) -> Result<()> {
    let Some(idea) = state.board.add(text).await? else {
        if json {
            println!("{}", serde_json::json!({"added": false, "reason": "blank"}));
        } else {
            println!("  {} Blank ideas are ignored.", style("i").blue().bold());
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&idea)?);
    } else {
        println!(
            "  {} Added {}",
            style("ok").green(),
            style(&idea.text).cyan()
        );
    }
    Ok(())
}

async fn list(state: &AppState, json: bool) -> Result<()> {
    let ideas = state.board.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ideas)?);
        return Ok(());
    }

    if ideas.is_empty() {
        println!();
        println!("  {} The board is empty.", style("i").blue().bold());
        println!("     Add one with: mindmeld idea add \"your idea\"");
        println!();
        return Ok(());
    }

    println!();
    println!("  Board ({} ideas)", ideas.len());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Idea").fg(Color::White),
    ]);

    for (i, idea) in ideas.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(&idea.text).fg(Color::Cyan),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

async fn clear(state: &AppState, force: bool, json: bool) -> Result<()> {
    let count = state.board.list().await?.len();

    if !force && !json && count > 0 {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} ideas from the board?",
                style(count).red().bold()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.board.clear().await?;

    if json {
        println!("{}", serde_json::json!({"cleared": count}));
    } else {
        println!("  {} Board cleared ({count} ideas removed).", style("ok").green());
    }
    Ok(())
}

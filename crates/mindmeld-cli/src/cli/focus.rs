//! Focus-mode CLI subcommands.
//!
//! A focus countdown disables suggestion fetches while it runs. `start`
//! persists the countdown and returns; `--watch` keeps a live MM:SS bar on
//! screen until the countdown elapses.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use mindmeld_types::focus::{DEFAULT_FOCUS_MIN, FocusState, format_countdown};

use crate::state::AppState;

/// Focus subcommands.
#[derive(Subcommand)]
pub enum FocusCommand {
    /// Start a countdown (5, 15, or 25 minutes).
    Start {
        /// Duration in minutes.
        #[arg(default_value_t = DEFAULT_FOCUS_MIN)]
        minutes: u32,

        /// Keep a live countdown on screen until it ends.
        #[arg(long)]
        watch: bool,
    },

    /// Show the countdown state.
    Status,

    /// Stop the countdown early.
    Stop,
}

/// Handle a focus subcommand.
pub async fn handle(cmd: FocusCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        FocusCommand::Start { minutes, watch } => start(state, minutes, watch, json).await,
        FocusCommand::Status => status(state, json).await,
        FocusCommand::Stop => stop(state, json).await,
    }
}

async fn start(state: &AppState, minutes: u32, watch: bool, json: bool) -> Result<()> {
    let focus = state.focus.start(minutes).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&focus)?);
        if !watch {
            return Ok(());
        }
    } else {
        println!(
            "  {} Focus started for {} minutes. Suggestions are disabled until it ends.",
            style("ok").green(),
            style(minutes).cyan()
        );
    }

    if watch {
        watch_countdown(&focus).await;
        println!("  {} Focus complete.", style("ok").green());
    }
    Ok(())
}

async fn watch_countdown(focus: &FocusState) {
    let total = u64::from(focus.duration_secs);
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {msg} [{bar:30.cyan}]")
            .unwrap(),
    );

    loop {
        let remaining = focus.remaining_secs(chrono::Utc::now());
        bar.set_position(total - u64::from(remaining));
        bar.set_message(format_countdown(remaining));
        if remaining == 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }
    bar.finish_and_clear();
}

async fn status(state: &AppState, json: bool) -> Result<()> {
    let focus = state.focus.current().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&focus)?);
        return Ok(());
    }

    match focus {
        Some(focus) => {
            let remaining = focus.remaining_secs(chrono::Utc::now());
            if remaining > 0 {
                println!(
                    "  {} remaining, {} ideas added so far",
                    style(format_countdown(remaining)).cyan().bold(),
                    focus.ideas_added
                );
            } else {
                println!(
                    "  {} Countdown finished ({} ideas added). Clear it with: mindmeld focus stop",
                    style("i").blue().bold(),
                    focus.ideas_added
                );
            }
        }
        None => {
            println!("  {} No focus countdown running.", style("i").blue().bold());
        }
    }
    Ok(())
}

async fn stop(state: &AppState, json: bool) -> Result<()> {
    let stopped = state.focus.stop().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stopped)?);
        return Ok(());
    }

    match stopped {
        Some(focus) => {
            println!(
                "  {} Focus stopped ({} ideas added).",
                style("ok").green(),
                focus.ideas_added
            );
        }
        None => {
            println!("  {} No focus countdown to stop.", style("i").blue().bold());
        }
    }
    Ok(())
}

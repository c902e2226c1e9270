//! MindMeld CLI entry point.
//!
//! Binary name: `mindmeld`
//!
//! Parses CLI arguments, initializes the database and services, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,mindmeld=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "mindmeld", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (DB, config, identity, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Idea { action } => {
            cli::idea::handle(action, &state, cli.json).await?;
        }

        Commands::Suggest { dry_run } => {
            cli::suggest::suggest(&state, dry_run, cli.json).await?;
        }

        Commands::Model { action } => {
            cli::model::handle(action, &state, cli.json).await?;
        }

        Commands::Session { action } => {
            cli::session::handle(action, &state, cli.json).await?;
        }

        Commands::Export {
            name,
            format,
            output,
        } => {
            cli::export::export(&state, &name, format, output, cli.json).await?;
        }

        Commands::Assistant { action } => {
            cli::assistant::handle(action, &state, cli.json).await?;
        }

        Commands::History { action } => {
            cli::history::handle(action, &state, cli.json).await?;
        }

        Commands::Auth { action } => {
            cli::auth::handle(action, &state, cli.json).await?;
        }

        Commands::Focus { action } => {
            cli::focus::handle(action, &state, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled before state init"),
    }

    Ok(())
}

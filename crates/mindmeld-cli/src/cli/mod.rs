//! CLI command definitions and dispatch for the `mindmeld` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! noun-verb pattern (e.g., `mindmeld idea add`, `mindmeld session save`).

pub mod assistant;
pub mod auth;
pub mod export;
pub mod focus;
pub mod history;
pub mod idea;
pub mod model;
pub mod session;
pub mod status;
pub mod suggest;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Brainstorm on an idea board with AI suggestions.
#[derive(Parser)]
#[command(name = "mindmeld", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the idea board (add, list, clear).
    Idea {
        #[command(subcommand)]
        action: idea::IdeaCommand,
    },

    /// Fetch AI suggestions for the current board.
    Suggest {
        /// Print suggestions without adding them to the board.
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage the AI model selection (list, set, show).
    Model {
        #[command(subcommand)]
        action: model::ModelCommand,
    },

    /// Manage saved sessions (save, load, list, rename, delete, import).
    Session {
        #[command(subcommand)]
        action: session::SessionCommand,
    },

    /// Export a saved session as Markdown, JSON, or PDF.
    Export {
        /// Session name to export.
        name: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = export::ExportFormat::Markdown)]
        format: export::ExportFormat,

        /// Output file path (defaults to mindmeld-<id>.<ext> in the working directory).
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Talk to the brainstorming assistant (ask, history, clear).
    Assistant {
        #[command(subcommand)]
        action: assistant::AssistantCommand,
    },

    /// Browse and reuse past AI suggestions (list, reuse, clear).
    History {
        #[command(subcommand)]
        action: history::HistoryCommand,
    },

    /// Account management (login, signup, logout, whoami).
    Auth {
        #[command(subcommand)]
        action: auth::AuthCommand,
    },

    /// Timed focus countdowns with suggestions disabled (start, status, stop).
    Focus {
        #[command(subcommand)]
        action: focus::FocusCommand,
    },

    /// Overview of board, model, session, and focus state.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

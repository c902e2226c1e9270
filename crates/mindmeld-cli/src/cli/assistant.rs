//! Assistant conversation CLI subcommands.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use mindmeld_core::assistant::AssistantService;
use mindmeld_types::llm::MessageRole;
use mindmeld_types::model::model_label;

use crate::state::AppState;

/// Assistant subcommands.
#[derive(Subcommand)]
pub enum AssistantCommand {
    /// Ask the assistant a question.
    Ask {
        /// The question.
        question: String,
    },

    /// Show the conversation so far.
    History,

    /// Wipe the conversation.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Handle an assistant subcommand.
pub async fn handle(cmd: AssistantCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        AssistantCommand::Ask { question } => ask(state, &question, json).await,
        AssistantCommand::History => history(state, json).await,
        AssistantCommand::Clear { force } => clear(state, force, json).await,
    }
}

async fn ask(state: &AppState, question: &str, json: bool) -> Result<()> {
    let model = state.prefs.selected_model().await?;
    let provider = state.provider()?;
    let svc = AssistantService::new(provider, state.kv());

    let spinner = (!json).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Asking {}...", model_label(&model)));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    });

    let reply = svc.ask(&model, question).await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            if json {
                println!("{}", serde_json::json!({"error": e.to_string()}));
                return Ok(());
            }
            anyhow::bail!(e);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!();
        println!("  {}", reply.content);
        println!();
    }
    Ok(())
}

async fn history(state: &AppState, json: bool) -> Result<()> {
    let svc = AssistantService::new(NullProvider, state.kv());
    let conversation = svc.history().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&conversation)?);
        return Ok(());
    }

    if conversation.is_empty() {
        println!();
        println!("  {} No conversation yet.", style("i").blue().bold());
        println!("     Ask something with: mindmeld assistant ask \"...\"");
        println!();
        return Ok(());
    }

    println!();
    for message in &conversation {
        match message.role {
            MessageRole::User => {
                println!("  {} {}", style("you:").cyan().bold(), message.content);
            }
            MessageRole::Assistant => {
                println!("  {} {}", style("ai: ").green().bold(), message.content);
            }
            MessageRole::System => {}
        }
        println!();
    }
    Ok(())
}

async fn clear(state: &AppState, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt("Wipe the assistant conversation?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let svc = AssistantService::new(NullProvider, state.kv());
    svc.clear().await?;

    if json {
        println!("{}", serde_json::json!({"cleared": true}));
    } else {
        println!("  {} Conversation cleared.", style("ok").green());
    }
    Ok(())
}

/// Placeholder provider for history/clear, which never call the service.
struct NullProvider;

impl mindmeld_core::llm::provider::CompletionProvider for NullProvider {
    async fn complete(
        &self,
        _request: &mindmeld_types::llm::CompletionRequest,
    ) -> Result<mindmeld_types::llm::CompletionResponse, mindmeld_types::llm::LlmError> {
        Err(mindmeld_types::llm::LlmError::Provider {
            message: "no provider configured".to_string(),
        })
    }
}

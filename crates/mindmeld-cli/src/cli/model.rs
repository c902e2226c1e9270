//! Model selection CLI subcommands.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use mindmeld_types::model::{MODELS, model_label};

use crate::state::AppState;

/// Model subcommands.
#[derive(Subcommand)]
pub enum ModelCommand {
    /// List the available models.
    #[command(alias = "ls")]
    List,

    /// Select the model used for suggestions and the assistant.
    Set {
        /// Model identifier (see `mindmeld model list`).
        id: String,
    },

    /// Show the currently selected model.
    Show,
}

/// Handle a model subcommand.
pub async fn handle(cmd: ModelCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        ModelCommand::List => list(state, json).await,
        ModelCommand::Set { id } => set(state, &id, json).await,
        ModelCommand::Show => show(state, json).await,
    }
}

async fn list(state: &AppState, json: bool) -> Result<()> {
    let selected = state.prefs.selected_model().await?;

    if json {
        let models: Vec<serde_json::Value> = MODELS
            .iter()
            .map(|m| {
                serde_json::json!({
                    "id": m.id,
                    "label": m.label,
                    "chat": m.chat,
                    "selected": m.id == selected,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    println!();
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("Model").fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    for model in MODELS {
        let marker = if model.id == selected { "*" } else { "" };
        table.add_row(vec![
            Cell::new(marker).fg(Color::Green),
            Cell::new(model.label).fg(Color::Cyan),
            Cell::new(model.id).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

async fn set(state: &AppState, id: &str, json: bool) -> Result<()> {
    state.prefs.set_model(id).await?;

    if json {
        println!("{}", serde_json::json!({"model": id}));
    } else {
        println!(
            "  {} Model set to {}",
            style("ok").green(),
            style(model_label(id)).cyan()
        );
    }
    Ok(())
}

async fn show(state: &AppState, json: bool) -> Result<()> {
    let selected = state.prefs.selected_model().await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"id": selected, "label": model_label(&selected)})
        );
    } else {
        println!(
            "  {} ({})",
            style(model_label(&selected)).cyan(),
            style(&selected).dim()
        );
    }
    Ok(())
}

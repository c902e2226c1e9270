//! Status dashboard.

use anyhow::Result;
use console::style;

use mindmeld_types::focus::format_countdown;
use mindmeld_types::model::model_label;

use crate::state::AppState;

/// One-screen overview of identity, storage, board, model, and focus state.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let ideas = state.board.list().await?;
    let model = state.prefs.selected_model().await?;
    let sessions = state.sessions.list(&state.identity.id).await?;
    let active = state.sessions.active().await?;
    let focus = state.focus.current().await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "identity": state.identity,
                "storage": state.config.storage.to_string(),
                "board_ideas": ideas.len(),
                "model": model,
                "sessions": sessions.len(),
                "active_session": active,
                "focus": focus,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("  {}", style("MindMeld").cyan().bold());
    println!();

    match &state.identity.email {
        Some(email) => println!("  account   {}", style(email).cyan()),
        None => println!("  account   {}", style("anonymous device").dim()),
    }
    println!("  storage   {}", state.config.storage);
    println!("  model     {}", style(model_label(&model)).cyan());
    println!("  board     {} ideas", ideas.len());

    match &active {
        Some(active) => println!("  session   {} (active)", style(&active.name).cyan()),
        None => println!("  session   {} saved, none active", sessions.len()),
    }

    match &focus {
        Some(focus) => {
            let remaining = focus.remaining_secs(chrono::Utc::now());
            if remaining > 0 {
                println!(
                    "  focus     {} remaining",
                    style(format_countdown(remaining)).cyan()
                );
            } else {
                println!("  focus     finished, not cleared");
            }
        }
        None => println!("  focus     off"),
    }
    println!();
    Ok(())
}

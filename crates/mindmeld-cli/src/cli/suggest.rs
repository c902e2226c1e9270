//! Suggestion fetch command.
//!
//! Asks the completion service for complementary ideas based on the current
//! board, appends the accepted ones, and records them in the suggestion
//! history. Refused while a focus countdown is running.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use mindmeld_core::suggest::service::SuggestService;
use mindmeld_types::idea::Idea;
use mindmeld_types::model::model_label;

use crate::state::AppState;

pub async fn suggest(state: &AppState, dry_run: bool, json: bool) -> Result<()> {
    if state.focus.is_active().await? {
        if json {
            println!("{}", serde_json::json!({"error": "focus mode active"}));
        } else {
            println!(
                "  {} Focus mode is running; suggestions are disabled until it ends.",
                style("i").blue().bold()
            );
            println!("     Stop it early with: mindmeld focus stop");
        }
        return Ok(());
    }

    let model = state.prefs.selected_model().await?;
    let ideas = state.board.list().await?;
    let provider = state.provider()?;
    let svc = SuggestService::new(provider);

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

    let batch = svc.fetch(&model, &ideas).await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    let batch = match batch {
        Ok(batch) => batch,
        Err(e) => {
            if json {
                println!("{}", serde_json::json!({"error": e.to_string()}));
                return Ok(());
            }
            anyhow::bail!(e);
        }
    };

    if batch.texts.is_empty() {
        if json {
            println!("{}", serde_json::json!({"suggestions": []}));
        } else {
            println!(
                "  {} The model returned no usable suggestions.",
                style("i").blue().bold()
            );
        }
        return Ok(());
    }

    if !dry_run {
        let new_ideas: Vec<Idea> = batch.texts.iter().map(Idea::new).collect();
        state.board.append(&new_ideas).await?;
        state.history.record(&batch.texts).await?;
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "suggestions": batch.texts,
                "model": batch.model,
                "response_ms": batch.response_ms,
                "added_to_board": !dry_run,
            }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} suggestions from {} ({} ms)",
        batch.texts.len(),
        style(model_label(&batch.model)).cyan(),
        batch.response_ms
    );
    println!();
    for text in &batch.texts {
        println!("  {} {}", style("+").green(), text);
    }
    println!();
    if dry_run {
        println!("  (dry run: nothing was added to the board)");
        println!();
    }
    Ok(())
}

//! Session export command.
//!
//! Markdown and JSON rendering come from mindmeld-core; PDF assembly lives
//! here because it needs a document crate.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use console::style;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use mindmeld_core::export::json::render_json;
use mindmeld_core::export::markdown::render_markdown;
use mindmeld_core::export::suggested_filename;
use mindmeld_types::model::model_label;
use mindmeld_types::session::Session;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Markdown,
    Json,
    Pdf,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }
}

pub async fn export(
    state: &AppState,
    name: &str,
    format: ExportFormat,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let owner = state.identity.id;
    let Some(session) = state
        .sessions
        .list(&owner)
        .await?
        .into_iter()
        .find(|s| s.name == name)
    else {
        bail!("no session named '{name}'");
    };

    let model = state.prefs.selected_model().await?;
    let path = output.unwrap_or_else(|| PathBuf::from(suggested_filename(&session, format.extension())));

    match format {
        ExportFormat::Markdown => {
            let md = render_markdown(&session, &model, None);
            tokio::fs::write(&path, md)
                .await
                .with_context(|| format!("could not write {}", path.display()))?;
        }
        ExportFormat::Json => {
            let body = render_json(&session)?;
            tokio::fs::write(&path, body)
                .await
                .with_context(|| format!("could not write {}", path.display()))?;
        }
        ExportFormat::Pdf => {
            write_pdf(&session, &model, &path)?;
        }
    }

    if json {
        println!(
            "{}",
            serde_json::json!({"exported": session.name, "path": path.display().to_string()})
        );
    } else {
        println!(
            "  {} Exported '{}' to {}",
            style("ok").green(),
            style(&session.name).cyan(),
            style(path.display()).white()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// PDF assembly
// ---------------------------------------------------------------------------

const PAGE_W_MM: f32 = 210.0;
const PAGE_H_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_MM: f32 = 7.0;

/// Render one session as a single-column A4 PDF, paginating the idea list.
fn write_pdf(session: &Session, model_id: &str, path: &Path) -> Result<()> {
    let (doc, page, layer) =
        PdfDocument::new("MindMeld session", Mm(PAGE_W_MM), Mm(PAGE_H_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("could not load the builtin PDF font")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("could not load the builtin PDF font")?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_H_MM - MARGIN_MM;

    layer.use_text("MindMeld session", 18.0, Mm(MARGIN_MM), Mm(y), &bold);
    y -= 2.0 * LINE_MM;

    for line in [
        format!("Name: {}", session.name),
        format!(
            "Date: {}",
            session.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("AI model: {}", model_label(model_id)),
    ] {
        layer.use_text(line, 11.0, Mm(MARGIN_MM), Mm(y), &font);
        y -= LINE_MM;
    }
    y -= LINE_MM;

    layer.use_text("Ideas", 14.0, Mm(MARGIN_MM), Mm(y), &bold);
    y -= 1.5 * LINE_MM;

    if session.ideas.is_empty() {
        layer.use_text("(no ideas)", 11.0, Mm(MARGIN_MM), Mm(y), &font);
    } else {
        for (i, idea) in session.ideas.iter().enumerate() {
            if y < MARGIN_MM {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_W_MM), Mm(PAGE_H_MM), "Layer 1");
                layer = doc.get_page(next_page).get_layer(next_layer);
                y = PAGE_H_MM - MARGIN_MM;
            }
            layer.use_text(
                format!("{}. {}", i + 1, idea.text),
                11.0,
                Mm(MARGIN_MM),
                Mm(y),
                &font,
            );
            y -= LINE_MM;
        }
    }

    let file =
        File::create(path).with_context(|| format!("could not create {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .context("could not write the PDF document")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmeld_types::idea::Idea;
    use uuid::Uuid;

    #[test]
    fn test_write_pdf_produces_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let session = Session::new(
            Uuid::new_v4(),
            "sprint",
            vec![Idea::new("solar kiosk"), Idea::new("rain sensor")],
        );

        write_pdf(&session, "mistralai/mistral-nemo:free", &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf_paginates_long_boards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.pdf");
        let ideas: Vec<Idea> = (0..120).map(|i| Idea::new(format!("idea {i}"))).collect();
        let session = Session::new(Uuid::new_v4(), "long", ideas);

        write_pdf(&session, "acme/unknown", &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

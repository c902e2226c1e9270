//! Markdown session export.

use mindmeld_types::model::model_label;
use mindmeld_types::session::Session;

/// Render one session as a Markdown document.
///
/// Title block with date and model metadata, the idea list as bullets, and
/// a footer. `response_ms` is the last suggestion round-trip, when known.
pub fn render_markdown(session: &Session, model_id: &str, response_ms: Option<u64>) -> String {
    let mut md = String::new();
    md.push_str("# MindMeld session\n\n");
    md.push_str(&format!("**Name:** {}\n", session.name));
    md.push_str(&format!(
        "**Date:** {}\n",
        session.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("**AI model:** {}\n", model_label(model_id)));
    if let Some(ms) = response_ms {
        md.push_str(&format!("**AI response time:** {ms} ms\n"));
    }
    md.push_str("\n---\n\n## Ideas\n\n");

    if session.ideas.is_empty() {
        md.push_str("(no ideas)\n");
    } else {
        for idea in &session.ideas {
            md.push_str(&format!("- {}\n", idea.text));
        }
    }

    md.push_str("\n---\n\n*Generated with MindMeld*\n");
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmeld_types::idea::Idea;
    use uuid::Uuid;

    fn session() -> Session {
        Session::new(
            Uuid::new_v4(),
            "sprint",
            vec![Idea::new("first"), Idea::new("second")],
        )
    }

    #[test]
    fn test_markdown_lists_ideas_as_bullets() {
        let md = render_markdown(&session(), "mistralai/mistral-nemo:free", Some(120));
        assert!(md.contains("**Name:** sprint"));
        assert!(md.contains("**AI model:** Mistral Nemo"));
        assert!(md.contains("**AI response time:** 120 ms"));
        assert!(md.contains("- first\n- second\n"));
    }

    #[test]
    fn test_markdown_without_response_time() {
        let md = render_markdown(&session(), "acme/unknown", None);
        assert!(!md.contains("response time"));
        // Unknown models fall back to the raw id.
        assert!(md.contains("**AI model:** acme/unknown"));
    }

    #[test]
    fn test_markdown_empty_board() {
        let session = Session::new(Uuid::new_v4(), "empty", vec![]);
        let md = render_markdown(&session, "acme/unknown", None);
        assert!(md.contains("(no ideas)"));
    }
}

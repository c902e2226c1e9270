//! Session export rendering.
//!
//! Markdown and JSON rendering are pure and live here; the PDF document
//! assembly needs a rendering crate and lives with the CLI.

pub mod json;
pub mod markdown;

use mindmeld_types::session::Session;

/// Default output filename for an exported session.
pub fn suggested_filename(session: &Session, extension: &str) -> String {
    format!("mindmeld-{}.{extension}", session.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_suggested_filename_uses_session_id() {
        let mut session = Session::new(Uuid::new_v4(), "x", vec![]);
        session.id = 1234;
        assert_eq!(suggested_filename(&session, "md"), "mindmeld-1234.md");
    }
}

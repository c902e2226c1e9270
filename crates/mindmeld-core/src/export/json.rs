//! JSON session export.
//!
//! A pass-through serialization of one session object. The output is the
//! same shape `import` accepts, so an exported file round-trips.

use mindmeld_types::session::Session;

/// Render one session as pretty-printed JSON.
pub fn render_json(session: &Session) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(session)
}

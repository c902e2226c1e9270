//! Session import validation.
//!
//! Parses and validates the JSON shape `{id, name, ideas: [{id, text}]}`
//! produced by the JSON export. Validation is all-or-nothing: any failure
//! aborts the import with no state change.

use mindmeld_types::error::ImportError;
use mindmeld_types::idea::Idea;

/// A session file that passed shape validation.
///
/// The owner is deliberately absent: imports are always re-tagged with the
/// current user's id before persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedSession {
    pub id: i64,
    pub name: String,
    pub ideas: Vec<Idea>,
}

/// Parse and validate a raw session file.
pub fn parse_import(raw: &str) -> Result<ImportedSession, ImportError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let obj = value.as_object().ok_or(ImportError::NotAnObject)?;

    let id = obj
        .get("id")
        .and_then(serde_json::Value::as_i64)
        .ok_or(ImportError::MissingField("id"))?;

    let name = obj
        .get("name")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ImportError::MissingField("name"))?
        .to_string();

    let raw_ideas = match obj.get("ideas") {
        None => return Err(ImportError::MissingField("ideas")),
        Some(v) => v.as_array().ok_or(ImportError::IdeasNotAnArray)?,
    };

    let mut ideas = Vec::with_capacity(raw_ideas.len());
    for (index, raw_idea) in raw_ideas.iter().enumerate() {
        let idea: Idea = serde_json::from_value(raw_idea.clone())
            .map_err(|_| ImportError::MalformedIdea { index })?;
        ideas.push(idea);
    }

    Ok(ImportedSession { id, name, ideas })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_file_parses() {
        let raw = r#"{"id": 1700000000000, "name": "sprint", "ideas": [{"id": 1, "text": "a"}]}"#;
        let imported = parse_import(raw).unwrap();
        assert_eq!(imported.id, 1_700_000_000_000);
        assert_eq!(imported.name, "sprint");
        assert_eq!(imported.ideas.len(), 1);
        assert_eq!(imported.ideas[0].text, "a");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let raw = r#"{"id": 1, "name": "s", "ideas": [], "owner": "someone-else"}"#;
        let imported = parse_import(raw).unwrap();
        assert!(imported.ideas.is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            parse_import("{not json"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_non_object_rejected() {
        assert_eq!(parse_import("[1, 2]"), Err(ImportError::NotAnObject));
    }

    #[test]
    fn test_missing_id_rejected() {
        let raw = r#"{"name": "s", "ideas": []}"#;
        assert_eq!(parse_import(raw), Err(ImportError::MissingField("id")));
    }

    #[test]
    fn test_missing_name_rejected() {
        let raw = r#"{"id": 1, "ideas": []}"#;
        assert_eq!(parse_import(raw), Err(ImportError::MissingField("name")));
    }

    #[test]
    fn test_blank_name_rejected() {
        let raw = r#"{"id": 1, "name": "   ", "ideas": []}"#;
        assert_eq!(parse_import(raw), Err(ImportError::MissingField("name")));
    }

    #[test]
    fn test_ideas_not_an_array_rejected() {
        let raw = r#"{"id": 1, "name": "s", "ideas": "nope"}"#;
        assert_eq!(parse_import(raw), Err(ImportError::IdeasNotAnArray));
    }

    #[test]
    fn test_missing_ideas_rejected() {
        let raw = r#"{"id": 1, "name": "s"}"#;
        assert_eq!(parse_import(raw), Err(ImportError::MissingField("ideas")));
    }

    #[test]
    fn test_malformed_idea_carries_index() {
        let raw = r#"{"id": 1, "name": "s", "ideas": [{"id": 1, "text": "ok"}, {"id": 2}]}"#;
        assert_eq!(
            parse_import(raw),
            Err(ImportError::MalformedIdea { index: 1 })
        );
    }
}

//! Model catalog for the completion service.
//!
//! A static allow-list of known model identifiers. Chat-capable models are
//! sent `/chat/completions` requests with a `messages` array; anything else
//! falls back to the raw `/completions` shape with a `prompt` string.

/// One entry in the model catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    /// Provider-qualified model identifier.
    pub id: &'static str,
    /// Human-readable label for listings and exports.
    pub label: &'static str,
    /// Whether the model accepts chat-style requests.
    pub chat: bool,
}

/// Known models, in display order. The first entry is the default.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "mistralai/mistral-small-3.1-24b-instruct:free",
        label: "Mistral Small 3.1 24B",
        chat: true,
    },
    ModelInfo {
        id: "mistralai/mistral-small-24b-instruct-2501:free",
        label: "Mistral Small 3",
        chat: true,
    },
    ModelInfo {
        id: "mistralai/mistral-nemo:free",
        label: "Mistral Nemo",
        chat: true,
    },
    ModelInfo {
        id: "mistralai/mistral-7b-instruct:free",
        label: "Mistral 7B Instruct",
        chat: true,
    },
    ModelInfo {
        id: "huggingfaceh4/zephyr-7b-beta:free",
        label: "Zephyr 7B (HuggingFace)",
        chat: true,
    },
];

/// The default model identifier.
pub fn default_model() -> &'static str {
    MODELS[0].id
}

/// Look up a catalog entry by model identifier.
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}

/// Whether a model identifier is on the chat-capable allow-list.
///
/// Unknown models are not assumed to speak the chat shape.
pub fn is_chat_model(id: &str) -> bool {
    find_model(id).is_some_and(|m| m.chat)
}

/// Human-readable label for a model id, falling back to the id itself.
pub fn model_label(id: &str) -> &str {
    find_model(id).map_or(id, |m| m.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_first_entry() {
        assert_eq!(default_model(), MODELS[0].id);
    }

    #[test]
    fn test_known_model_is_chat_capable() {
        assert!(is_chat_model("mistralai/mistral-nemo:free"));
    }

    #[test]
    fn test_unknown_model_is_not_chat_capable() {
        assert!(!is_chat_model("acme/unknown-model"));
    }

    #[test]
    fn test_model_label_falls_back_to_id() {
        assert_eq!(model_label("acme/unknown-model"), "acme/unknown-model");
        assert_eq!(
            model_label("huggingfaceh4/zephyr-7b-beta:free"),
            "Zephyr 7B (HuggingFace)"
        );
    }
}

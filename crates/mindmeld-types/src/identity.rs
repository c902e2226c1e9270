//! User identity types for MindMeld.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the current user, as reported by the auth provider.
///
/// Scopes session visibility: listings only ever return sessions whose
/// owner equals this id. A signed-out device uses a locally generated,
/// persisted id instead (`email` is `None` in that case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: Uuid,
    pub email: Option<String>,
}

impl UserIdentity {
    /// Identity for an authenticated user.
    pub fn authenticated(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: Some(email.into()),
        }
    }

    /// Anonymous device-local identity.
    pub fn anonymous(id: Uuid) -> Self {
        Self { id, email: None }
    }

    /// Whether this identity came from the auth provider.
    pub fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity_is_not_authenticated() {
        let identity = UserIdentity::anonymous(Uuid::new_v4());
        assert!(!identity.is_authenticated());
    }

    #[test]
    fn test_authenticated_identity() {
        let identity = UserIdentity::authenticated(Uuid::new_v4(), "a@b.c");
        assert!(identity.is_authenticated());
        assert_eq!(identity.email.as_deref(), Some("a@b.c"));
    }
}

//! On-disk credential cache.
//!
//! Persists the signed-in user's tokens under `auth.json` in the data
//! directory so sign-in survives restarts. The file is written with
//! owner-only permissions on Unix.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mindmeld_types::error::AuthError;

use super::client::AuthSession;

const CACHE_FILE: &str = "auth.json";

/// Serialized form of a cached sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl StoredCredentials {
    pub fn from_session(session: &AuthSession) -> Self {
        Self {
            user_id: session.user_id,
            email: session.email.clone(),
            access_token: session.access_token.expose_secret().to_string(),
            refresh_token: session.refresh_token.expose_secret().to_string(),
        }
    }

    pub fn into_session(self) -> AuthSession {
        AuthSession {
            user_id: self.user_id,
            email: self.email,
            access_token: SecretString::from(self.access_token),
            refresh_token: SecretString::from(self.refresh_token),
        }
    }
}

/// Credential cache rooted at a data directory.
pub struct CredentialCache {
    path: PathBuf,
}

impl CredentialCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CACHE_FILE),
        }
    }

    /// Load cached credentials, or None if nobody is signed in.
    pub fn load(&self) -> Result<Option<StoredCredentials>, AuthError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let creds = serde_json::from_str(&contents).map_err(|e| {
                    AuthError::CredentialCache(format!("corrupt cache file: {e}"))
                })?;
                Ok(Some(creds))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::CredentialCache(e.to_string())),
        }
    }

    /// Persist credentials, replacing any previous sign-in.
    pub fn save(&self, creds: &StoredCredentials) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AuthError::CredentialCache(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(creds)
            .map_err(|e| AuthError::CredentialCache(e.to_string()))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| AuthError::CredentialCache(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| AuthError::CredentialCache(e.to_string()))?;
        }

        Ok(())
    }

    /// Remove the cache file. No-op if nobody is signed in.
    pub fn delete(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::CredentialCache(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> StoredCredentials {
        StoredCredentials {
            user_id: Uuid::new_v4(),
            email: "a@b.c".to_string(),
            access_token: "jwt-a".to_string(),
            refresh_token: "jwt-r".to_string(),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CredentialCache::new(dir.path());

        let saved = creds();
        cache.save(&saved).unwrap();
        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.user_id, saved.user_id);
        assert_eq!(loaded.email, "a@b.c");
        assert_eq!(loaded.access_token, "jwt-a");
    }

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CredentialCache::new(dir.path());

        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_delete_clears_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CredentialCache::new(dir.path());

        cache.save(&creds()).unwrap();
        cache.delete().unwrap();
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CredentialCache::new(dir.path());

        cache.delete().unwrap();
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CACHE_FILE), "not json").unwrap();
        let cache = CredentialCache::new(dir.path());

        let err = cache.load().unwrap_err();
        assert!(matches!(err, AuthError::CredentialCache(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_cache_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let cache = CredentialCache::new(dir.path());
        cache.save(&creds()).unwrap();

        let mode = std::fs::metadata(dir.path().join(CACHE_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

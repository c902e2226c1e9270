//! Auth provider integration.
//!
//! Wires the HTTP client and the on-disk credential cache into an
//! `AuthService`, and resolves the current owner identity (signed-in user
//! or persisted anonymous device id).

pub mod cache;
pub mod client;

use std::path::Path;

use uuid::Uuid;

use mindmeld_core::storage::{KvStore, keys};
use mindmeld_types::error::{AuthError, RepositoryError};
use mindmeld_types::identity::UserIdentity;

use cache::{CredentialCache, StoredCredentials};
use client::{AuthClient, AuthSession};

/// Sign-in, sign-up, and sign-out against the hosted auth provider, with
/// credentials cached on disk between runs.
pub struct AuthService {
    client: AuthClient,
    cache: CredentialCache,
}

impl AuthService {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>, data_dir: &Path) -> Self {
        Self {
            client: AuthClient::new(base_url, anon_key),
            cache: CredentialCache::new(data_dir),
        }
    }

    /// Sign in and cache the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.client.sign_in(email, password).await?;
        self.cache.save(&StoredCredentials::from_session(&session))?;
        tracing::info!(email = %session.email, "signed in");
        Ok(session)
    }

    /// Register a new account and cache the resulting session.
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.client.sign_up(email, password).await?;
        self.cache.save(&StoredCredentials::from_session(&session))?;
        tracing::info!(email = %session.email, "account created");
        Ok(session)
    }

    /// Sign out: revoke remotely when possible, always clear the cache.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Some(creds) = self.cache.load()? {
            let session = creds.into_session();
            if let Err(e) = self.client.sign_out(&session.access_token).await {
                tracing::warn!(error = %e, "remote sign-out failed; clearing local cache anyway");
            }
        }
        self.cache.delete()
    }

    /// The cached session, if somebody is signed in.
    pub fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        Ok(self.cache.load()?.map(StoredCredentials::into_session))
    }

    /// Refresh the cached session's tokens.
    pub async fn refresh(&self) -> Result<AuthSession, AuthError> {
        let creds = self.cache.load()?.ok_or(AuthError::NotSignedIn)?;
        let session = self.client.refresh(&creds.into_session().refresh_token).await?;
        self.cache.save(&StoredCredentials::from_session(&session))?;
        Ok(session)
    }

    /// Session to hand to the remote store.
    ///
    /// Refreshes the cached tokens first so a stale access token does not
    /// surface as an authorization failure mid-command. When the refresh
    /// endpoint cannot be reached the cached tokens are used as-is; a
    /// rejected refresh token still propagates, the user must sign in again.
    pub async fn remote_session(&self) -> Result<AuthSession, AuthError> {
        let creds = self.cache.load()?.ok_or(AuthError::NotSignedIn)?;
        match self.refresh().await {
            Ok(session) => Ok(session),
            Err(AuthError::Provider(message)) => {
                tracing::warn!(%message, "token refresh failed; using cached tokens");
                Ok(creds.into_session())
            }
            Err(e) => Err(e),
        }
    }
}

/// Resolve the owner identity for this run.
///
/// A signed-in user owns their sessions under their provider id. Otherwise
/// a device-local UUID is used, generated once and persisted in the KV
/// store so anonymous sessions stay reachable across runs.
pub async fn resolve_identity<K: KvStore>(
    session: Option<&AuthSession>,
    kv: &K,
) -> Result<UserIdentity, RepositoryError> {
    if let Some(session) = session {
        return Ok(UserIdentity::authenticated(
            session.user_id,
            session.email.clone(),
        ));
    }

    if let Some(value) = kv.get(keys::DEVICE_ID).await? {
        if let Some(id) = value.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
            return Ok(UserIdentity::anonymous(id));
        }
        tracing::warn!("stored device id is malformed; regenerating");
    }

    let id = Uuid::new_v4();
    kv.set(keys::DEVICE_ID, &serde_json::json!(id.to_string()))
        .await?;
    Ok(UserIdentity::anonymous(id))
}

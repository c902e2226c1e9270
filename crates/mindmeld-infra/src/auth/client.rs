//! Auth provider HTTP client.
//!
//! Talks to the hosted auth endpoints (`/auth/v1`): password-grant sign in,
//! sign up, token refresh, and sign out. Tokens are held in
//! [`secrecy::SecretString`] by the caller; this client only sees them at
//! request-build time.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use mindmeld_types::error::AuthError;

/// An authenticated session returned by the auth provider.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

/// HTTP client for the hosted auth provider.
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(self.url("/token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        Self::parse_session(response).await
    }

    /// Register a new account. The provider signs the user in on success.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(self.url("/signup"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        Self::parse_session(response).await
    }

    /// Exchange a refresh token for a fresh session.
    pub async fn refresh(&self, refresh_token: &SecretString) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(self.url("/token?grant_type=refresh_token"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token.expose_secret() }))
            .send()
            .await
            .map_err(transport)?;

        Self::parse_session(response).await
    }

    /// Revoke the session on the provider side. Local cleanup is the
    /// caller's job and proceeds even if this call fails.
    pub async fn sign_out(&self, access_token: &SecretString) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.url("/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(format!("HTTP {status}: {body}")));
        }
        Ok(())
    }

    async fn parse_session(response: reqwest::Response) -> Result<AuthSession, AuthError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 | 401 => AuthError::InvalidCredentials,
                _ => AuthError::Provider(format!("HTTP {status}: {body}")),
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("invalid response body: {e}")))?;

        Ok(AuthSession {
            user_id: token.user.id,
            email: token.user.email,
            access_token: SecretString::from(token.access_token),
            refresh_token: SecretString::from(token.refresh_token),
        })
    }
}

fn transport(e: reqwest::Error) -> AuthError {
    AuthError::Provider(format!("HTTP request failed: {e}"))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: WireUser,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: Uuid,
    email: String,
}

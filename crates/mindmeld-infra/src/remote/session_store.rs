//! Remote session store.
//!
//! `SessionRepository` implementation over the hosted REST storage API
//! (PostgREST conventions: `eq.` filters, `Prefer: return=representation`
//! when the affected rows matter). Requires a signed-in user; the access
//! token is sent as a bearer alongside the project's anon key.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mindmeld_core::session::repository::SessionRepository;
use mindmeld_types::error::RepositoryError;
use mindmeld_types::idea::Idea;
use mindmeld_types::session::Session;

const SESSIONS_PATH: &str = "/rest/v1/sessions";

/// Remote implementation of `SessionRepository`.
pub struct RemoteSessionStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: SecretString,
}

impl RemoteSessionStore {
    /// Create a store for a signed-in user.
    ///
    /// `base_url` is the project root (e.g. `https://xyz.example.co`);
    /// `access_token` is the user's session token from the auth provider.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        access_token: SecretString,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            access_token,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.access_token.expose_secret())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, RepositoryError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 409 {
                return Err(RepositoryError::Conflict(body));
            }
            return Err(RepositoryError::Query(format!("HTTP {status}: {body}")));
        }
        Ok(response)
    }

    async fn fetch_rows(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<RemoteRow>, RepositoryError> {
        let response = self
            .request(reqwest::Method::GET, SESSIONS_PATH)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        Self::check(response)
            .await?
            .json::<Vec<RemoteRow>>()
            .await
            .map_err(|e| RepositoryError::Query(format!("invalid response body: {e}")))
    }

    /// Send a PATCH/DELETE and return how many rows it touched.
    async fn mutate_counted(
        &self,
        method: reqwest::Method,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<u64, RepositoryError> {
        let mut builder = self
            .request(method, SESSIONS_PATH)
            .query(query)
            .header("Prefer", "return=representation");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport)?;
        let rows: Vec<serde_json::Value> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| RepositoryError::Query(format!("invalid response body: {e}")))?;

        Ok(rows.len() as u64)
    }
}

fn transport(e: reqwest::Error) -> RepositoryError {
    RepositoryError::Query(format!("HTTP request failed: {e}"))
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

// ---------------------------------------------------------------------------
// Wire row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemoteRow {
    id: i64,
    user_id: Uuid,
    name: String,
    data: RowData,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RowData {
    ideas: Vec<Idea>,
}

impl RemoteRow {
    fn from_session(session: &Session) -> Self {
        Self {
            id: session.id,
            user_id: session.owner,
            name: session.name.clone(),
            data: RowData {
                ideas: session.ideas.clone(),
            },
            created_at: session.created_at,
        }
    }

    fn into_session(self) -> Session {
        Session {
            id: self.id,
            owner: self.user_id,
            name: self.name,
            ideas: self.data.ideas,
            created_at: self.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionRepository implementation
// ---------------------------------------------------------------------------

impl SessionRepository for RemoteSessionStore {
    async fn list(&self, owner: &Uuid) -> Result<Vec<Session>, RepositoryError> {
        let rows = self
            .fetch_rows(&[
                ("user_id", eq(owner)),
                ("order", "created_at.desc,id.desc".to_string()),
            ])
            .await?;
        Ok(rows.into_iter().map(RemoteRow::into_session).collect())
    }

    async fn find_by_name(
        &self,
        owner: &Uuid,
        name: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        let rows = self
            .fetch_rows(&[
                ("user_id", eq(owner)),
                ("name", eq(name)),
                ("limit", "1".to_string()),
            ])
            .await?;
        Ok(rows.into_iter().next().map(RemoteRow::into_session))
    }

    async fn insert(&self, session: &Session) -> Result<(), RepositoryError> {
        let row = RemoteRow::from_session(session);
        let response = self
            .request(reqwest::Method::POST, SESSIONS_PATH)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(transport)?;

        Self::check(response).await?;
        Ok(())
    }

    async fn replace_ideas(
        &self,
        owner: &Uuid,
        id: i64,
        ideas: &[Idea],
    ) -> Result<(), RepositoryError> {
        let body = serde_json::json!({ "data": { "ideas": ideas } });
        let affected = self
            .mutate_counted(
                reqwest::Method::PATCH,
                &[("user_id", eq(owner)), ("id", eq(id))],
                Some(&body),
            )
            .await?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn rename(
        &self,
        owner: &Uuid,
        old_name: &str,
        new_name: &str,
    ) -> Result<u64, RepositoryError> {
        let body = serde_json::json!({ "name": new_name });
        self.mutate_counted(
            reqwest::Method::PATCH,
            &[("user_id", eq(owner)), ("name", eq(old_name))],
            Some(&body),
        )
        .await
    }

    async fn delete(&self, owner: &Uuid, id: i64) -> Result<(), RepositoryError> {
        let affected = self
            .mutate_counted(
                reqwest::Method::DELETE,
                &[("user_id", eq(owner)), ("id", eq(id))],
                None,
            )
            .await?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

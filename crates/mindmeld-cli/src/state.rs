//! Application state wiring all services together.
//!
//! Services in mindmeld-core are generic over repository traits; AppState
//! pins them to the concrete infra implementations. The session backend is
//! chosen at startup from configuration: local SQLite by default, the
//! hosted remote store when configured and signed in.

use std::path::PathBuf;

use anyhow::{Context, bail};
use uuid::Uuid;

use mindmeld_core::board::BoardService;
use mindmeld_core::focus::FocusService;
use mindmeld_core::history::HistoryService;
use mindmeld_core::prefs::PrefsService;
use mindmeld_core::session::repository::SessionRepository;
use mindmeld_core::session::service::SessionService;
use mindmeld_infra::auth::{AuthService, resolve_identity};
use mindmeld_infra::config::{database_url, load_config, resolve_data_dir};
use mindmeld_infra::llm::OpenRouterProvider;
use mindmeld_infra::remote::RemoteSessionStore;
use mindmeld_infra::sqlite::kv::SqliteKvStore;
use mindmeld_infra::sqlite::pool::DatabasePool;
use mindmeld_infra::sqlite::session::SqliteSessionRepository;
use mindmeld_types::config::{AppConfig, StorageBackend};
use mindmeld_types::error::RepositoryError;
use mindmeld_types::idea::Idea;
use mindmeld_types::identity::UserIdentity;
use mindmeld_types::llm::LlmError;
use mindmeld_types::session::Session;

/// Session repository pinned to whichever backend configuration selected.
///
/// Exactly one variant is live per process; there is no dual-write.
pub enum SessionBackend {
    Local(SqliteSessionRepository),
    Remote(RemoteSessionStore),
}

impl SessionRepository for SessionBackend {
    async fn list(&self, owner: &Uuid) -> Result<Vec<Session>, RepositoryError> {
        match self {
            SessionBackend::Local(repo) => repo.list(owner).await,
            SessionBackend::Remote(repo) => repo.list(owner).await,
        }
    }

    async fn find_by_name(
        &self,
        owner: &Uuid,
        name: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        match self {
            SessionBackend::Local(repo) => repo.find_by_name(owner, name).await,
            SessionBackend::Remote(repo) => repo.find_by_name(owner, name).await,
        }
    }

    async fn insert(&self, session: &Session) -> Result<(), RepositoryError> {
        match self {
            SessionBackend::Local(repo) => repo.insert(session).await,
            SessionBackend::Remote(repo) => repo.insert(session).await,
        }
    }

    async fn replace_ideas(
        &self,
        owner: &Uuid,
        id: i64,
        ideas: &[Idea],
    ) -> Result<(), RepositoryError> {
        match self {
            SessionBackend::Local(repo) => repo.replace_ideas(owner, id, ideas).await,
            SessionBackend::Remote(repo) => repo.replace_ideas(owner, id, ideas).await,
        }
    }

    async fn rename(
        &self,
        owner: &Uuid,
        old_name: &str,
        new_name: &str,
    ) -> Result<u64, RepositoryError> {
        match self {
            SessionBackend::Local(repo) => repo.rename(owner, old_name, new_name).await,
            SessionBackend::Remote(repo) => repo.rename(owner, old_name, new_name).await,
        }
    }

    async fn delete(&self, owner: &Uuid, id: i64) -> Result<(), RepositoryError> {
        match self {
            SessionBackend::Local(repo) => repo.delete(owner, id).await,
            SessionBackend::Remote(repo) => repo.delete(owner, id).await,
        }
    }
}

/// Shared application state holding all services.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub db_pool: DatabasePool,
    pub identity: UserIdentity,
    pub auth: Option<AuthService>,
    kv: SqliteKvStore,
    pub board: BoardService<SqliteKvStore>,
    pub prefs: PrefsService<SqliteKvStore>,
    pub focus: FocusService<SqliteKvStore>,
    pub history: HistoryService<SqliteKvStore>,
    pub sessions: SessionService<SessionBackend, SqliteKvStore>,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, resolve the identity, and wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("could not create data directory {}", data_dir.display()))?;

        let config = load_config(&data_dir).await;

        let db_pool = DatabasePool::new(&database_url(&data_dir))
            .await
            .context("could not open the local database")?;
        let kv = SqliteKvStore::new(db_pool.clone());

        let auth = config
            .remote
            .as_ref()
            .map(|r| AuthService::new(r.base_url.clone(), r.anon_key.clone(), &data_dir));

        let signed_in = match &auth {
            Some(auth) => auth.current_session()?,
            None => None,
        };
        let identity = resolve_identity(signed_in.as_ref(), &kv).await?;

        let backend = match config.storage {
            StorageBackend::Local => {
                SessionBackend::Local(SqliteSessionRepository::new(db_pool.clone()))
            }
            StorageBackend::Remote => {
                let Some(remote) = config.remote.as_ref() else {
                    bail!("storage is set to 'remote' but config.toml has no [remote] section");
                };
                if signed_in.is_none() {
                    bail!("remote storage requires an account; run `mindmeld auth login` first");
                }
                // auth is Some whenever config.remote is.
                let Some(auth) = auth.as_ref() else {
                    bail!("remote storage requires a [remote] section in config.toml");
                };
                // Refresh up front so an expired access token does not fail
                // every remote call mid-command.
                let session = auth
                    .remote_session()
                    .await
                    .context("stored sign-in is no longer valid; run `mindmeld auth login`")?;
                SessionBackend::Remote(RemoteSessionStore::new(
                    remote.base_url.clone(),
                    remote.anon_key.clone(),
                    session.access_token,
                ))
            }
        };

        Ok(Self {
            data_dir,
            db_pool: db_pool.clone(),
            identity,
            auth,
            board: BoardService::new(kv.clone()),
            prefs: PrefsService::new(kv.clone()),
            focus: FocusService::new(kv.clone()),
            history: HistoryService::new(kv.clone()),
            sessions: SessionService::new(backend, kv.clone()),
            kv,
            config,
        })
    }

    /// A fresh handle on the device key-value store (pool-backed, cheap).
    pub fn kv(&self) -> SqliteKvStore {
        self.kv.clone()
    }

    /// Build the completion provider from the environment.
    ///
    /// Checked here, before any request, so a missing key fails fast with
    /// the variable name in the message.
    pub fn provider(&self) -> Result<OpenRouterProvider, LlmError> {
        OpenRouterProvider::from_env(self.config.llm.base_url.as_str())
    }
}

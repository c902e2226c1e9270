//! Configuration and data-directory resolution.
//!
//! Reads `config.toml` from the data directory (`~/.mindmeld/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to the
//! local-only defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use mindmeld_types::config::AppConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MINDMELD_DATA_DIR";

/// Resolve the data directory.
///
/// `MINDMELD_DATA_DIR` wins when set; otherwise `~/.mindmeld`. Falls back
/// to `.mindmeld` in the working directory when no home is known.
pub fn resolve_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".mindmeld"),
        None => PathBuf::from(".mindmeld"),
    }
}

/// SQLite URL for the database file inside a data directory.
///
/// `mode=rwc` creates the file on first use.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("mindmeld.db").display())
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`] (local storage only).
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmeld_types::config::StorageBackend;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.storage, StorageBackend::Local);
        assert!(config.remote.is_none());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
storage = "remote"

[remote]
base_url = "https://example.supabase.co"
anon_key = "anon-123"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.storage, StorageBackend::Remote);
        assert_eq!(config.remote.unwrap().anon_key, "anon-123");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.storage, StorageBackend::Local);
    }

    #[test]
    fn database_url_points_into_data_dir() {
        let url = database_url(Path::new("/tmp/mm"));
        assert_eq!(url, "sqlite:///tmp/mm/mindmeld.db?mode=rwc");
    }
}

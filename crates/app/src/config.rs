//! Application configuration and process bootstrap.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use messmate_infra::{ROSTER_KEY, SqliteKeyValueStore};
use messmate_observability::LogConfig;

use crate::session::MessManager;

pub const ENV_DATA_DIR: &str = "MESSMATE_DATA_DIR";
pub const ENV_STORAGE_KEY: &str = "MESSMATE_STORAGE_KEY";
pub const ENV_LOG: &str = "MESSMATE_LOG";
pub const ENV_LOG_FORMAT: &str = "MESSMATE_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the SQLite database.
    pub data_dir: PathBuf,
    /// Key the roster is stored under.
    pub storage_key: String,
    pub log: LogConfig,
}

impl AppConfig {
    pub const DB_FILE_NAME: &'static str = "messmate.db";

    /// Defaults rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: ROSTER_KEY.to_string(),
            log: LogConfig::default(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (environment-like key access).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let mut config = Self::with_data_dir(data_dir);

        if let Some(key) = lookup(ENV_STORAGE_KEY).filter(|v| !v.trim().is_empty()) {
            config.storage_key = key;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.log.filter = filter;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            config.log.json = match format.trim().to_ascii_lowercase().as_str() {
                "json" => true,
                "pretty" | "text" => false,
                other => anyhow::bail!("{ENV_LOG_FORMAT} must be 'json' or 'pretty', got '{other}'"),
            };
        }

        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(Self::DB_FILE_NAME)
    }
}

/// Initialize logging, open the SQLite store and load the session.
pub fn bootstrap(config: &AppConfig) -> anyhow::Result<MessManager<SqliteKeyValueStore>> {
    messmate_observability::init_with(&config.log);

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("failed to create data directory at {:?}", config.data_dir))?;

    let db_path = config.db_path();
    let store = SqliteKeyValueStore::open(&db_path)
        .with_context(|| format!("failed to open roster store at {:?}", db_path))?;

    let manager = MessManager::open_with_key(store, config.storage_key.clone());
    tracing::info!(
        db = %db_path.display(),
        members = manager.members().len(),
        "session ready"
    );
    Ok(manager)
}

/// `{app_data_dir}/messmate`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;
    dir.push("messmate");
    Ok(dir)
}

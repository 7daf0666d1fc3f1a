//! Settings store backends.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shipcast_core::{ConfigError, TeamConfig};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Fixed key the team configuration is persisted under.
pub const SETTINGS_KEY: &str = "team_config";

/// Errors that can occur while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Refused to persist an invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Injected load/save capability for the team configuration.
///
/// The engine never touches storage itself; callers load the configuration
/// through this trait, pass it into the estimation calls, and save it back
/// when the user changes it.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the persisted team configuration, if one exists.
    async fn get_team_config(&self) -> Result<Option<TeamConfig>, SettingsError>;

    /// Persist the team configuration under [`SETTINGS_KEY`].
    async fn put_team_config(&self, config: &TeamConfig) -> Result<(), SettingsError>;
}

/// Envelope written to disk alongside the configuration.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedConfig {
    config: TeamConfig,
    updated_at: DateTime<Utc>,
}

/// File-based JSON settings backend.
///
/// Writes `<root>/settings/team_config.json`.
pub struct JsonSettingsStore {
    root: PathBuf,
}

impl JsonSettingsStore {
    /// Create the store, creating the settings directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("settings")).await?;
        Ok(Self { root })
    }

    fn settings_path(&self) -> PathBuf {
        self.root
            .join("settings")
            .join(format!("{SETTINGS_KEY}.json"))
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn get_team_config(&self) -> Result<Option<TeamConfig>, SettingsError> {
        match fs::read_to_string(self.settings_path()).await {
            Ok(raw) => {
                let persisted: PersistedConfig = serde_json::from_str(&raw)?;
                Ok(Some(persisted.config))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put_team_config(&self, config: &TeamConfig) -> Result<(), SettingsError> {
        // An invalid configuration must never reach disk; the engine would
        // reject it on the next load anyway.
        config.validate()?;
        let envelope = PersistedConfig {
            config: *config,
            updated_at: Utc::now(),
        };
        let raw = serde_json::to_string_pretty(&envelope)?;
        fs::write(self.settings_path(), raw).await?;
        debug!(path = %self.settings_path().display(), "saved team configuration");
        Ok(())
    }
}

/// In-memory settings backend for tests and embedded callers.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: Mutex<Option<TeamConfig>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_team_config(&self) -> Result<Option<TeamConfig>, SettingsError> {
        Ok(*self.inner.lock().await)
    }

    async fn put_team_config(&self, config: &TeamConfig) -> Result<(), SettingsError> {
        config.validate()?;
        *self.inner.lock().await = Some(*config);
        Ok(())
    }
}

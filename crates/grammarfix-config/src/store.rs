//! Settings stores.
//!
//! The coordinator only reads; the settings surface is the sole writer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::settings::Settings;

/// Persistent key-value store for endpoint settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings, ConfigError>;

    async fn save(&self, settings: &Settings) -> Result<(), ConfigError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings, ConfigError> {
        Ok(self.settings.read().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        *self.settings.write() = settings.clone();
        Ok(())
    }
}

/// TOML file store. A missing file reads as empty settings.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Settings, ConfigError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => ConfigLoader::load_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No settings file yet");
                Ok(Settings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = ConfigLoader::to_toml(settings)?;
        tokio::fs::write(&self.path, content).await?;
        tracing::info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

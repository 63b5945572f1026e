//! Application settings storage.
//!
//! Palette commands only ever write settings; reading them back and
//! reacting to changes is the host application's job.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{ConfigError, Result};

/// Well-known settings keys.
pub mod keys {
    pub const PAUSE_MONITORING: &str = "pauseMonitoring";
    pub const PLAY_SOUNDS: &str = "playSounds";
    pub const SHOW_NOTIFICATIONS: &str = "showNotifications";
    pub const STORE_IMAGES: &str = "storeImages";
    pub const DEDUPLICATE_ENTRIES: &str = "deduplicateEntries";
    pub const EXTRACT_CONTENT: &str = "extractContent";
    pub const SKIP_API_KEYS: &str = "skipAPIKeys";
    pub const APPEARANCE: &str = "appearance";
}

/// A value stored under a settings key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

/// UI appearance written under [`keys::APPEARANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    /// All themes, in command order.
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    /// The stored value for this theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Get the display name for this theme.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }
}

/// A write-only key/value store for application settings.
pub trait SettingsStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: SettingValue) -> Result<()>;
}

/// Settings kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<BTreeMap<String, SettingValue>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value for a key.
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.lock().ok()?.get(key).cloned()
    }
}

#[cfg(test)]
impl MemorySettingsStore {
    pub(crate) fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsStore for MemorySettingsStore {
    fn set(&self, key: &str, value: SettingValue) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| ConfigError::Poisoned)?;
        trace!(key, ?value, "Setting updated in memory");
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings persisted to a TOML file.
///
/// The whole file is rewritten on every change. A value only becomes
/// visible through [`get`](Self::get) once it has reached the file.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, SettingValue>>,
}

impl FileSettingsStore {
    /// Open the store at `path`, loading existing values if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values: BTreeMap<String, SettingValue> = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ConfigError::ReadError(e)),
        };

        debug!(path = %path.display(), count = values.len(), "Loaded settings");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Open the store at the default settings location.
    pub fn open_default() -> Result<Self> {
        Self::open(super::settings_path()?)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current value for a key.
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn persist(&self, values: &BTreeMap<String, SettingValue>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        let content = toml::to_string(values)?;
        fs::write(&self.path, content).map_err(ConfigError::WriteError)?;
        trace!(path = %self.path.display(), "Settings written");
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn set(&self, key: &str, value: SettingValue) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| ConfigError::Poisoned)?;
        debug!(key, ?value, "Saving setting");

        let mut updated = values.clone();
        updated.insert(key.to_string(), value);
        self.persist(&updated)?;

        *values = updated;
        Ok(())
    }
}

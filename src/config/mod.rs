//! Configuration management for Clippal.
//!
//! This module resolves the configuration directory and provides the
//! key/value settings store that palette commands write to.

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::{
    keys, FileSettingsStore, MemorySettingsStore, SettingValue, SettingsStore, Theme,
};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "CLIPPAL_CONFIG_DIR";

/// File name of the persisted settings inside the configuration directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration directory could be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings file could not be written.
    #[error("failed to write settings file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The settings file is not valid TOML.
    #[error("failed to parse settings file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A previous writer panicked while holding the settings lock.
    #[error("settings store is unavailable")]
    Poisoned,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Get the configuration directory.
///
/// Uses `$CLIPPAL_CONFIG_DIR` when set, otherwise the platform config
/// directory with `clippal` appended.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::config_dir()
        .map(|dir| dir.join("clippal"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Get the default path of the settings file.
pub fn settings_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(SETTINGS_FILE))
}

//! Centralized error types for Clippal.
//!
//! Command execution never fails with these: it reports problems as
//! `CommandResult::Error`. These types cover setup work around the palette,
//! such as opening the settings store.

use thiserror::Error;

use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Set CLIPPAL_CONFIG_DIR or check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read settings file. Please check the file is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save settings. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Settings file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save settings. Internal error.".to_string()
                }
                ConfigError::Poisoned => "Settings are temporarily unavailable.".to_string(),
            },
            AppError::Other(msg) => msg.clone(),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

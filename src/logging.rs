//! Logging configuration using the tracing ecosystem.
//!
//! Logs always go to a daily-rotated file so they never interleave with
//! command output. In verbose mode a compact copy is also written to
//! stderr.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "clippal=info,warn";

/// Default log level in verbose mode if RUST_LOG is not set.
const VERBOSE_LOG_FILTER: &str = "clippal=debug,warn";

/// Initialize the logging system.
///
/// `RUST_LOG` overrides the level in both modes.
///
/// # Log Directory
///
/// - Linux: `~/.local/share/clippal/logs/`
/// - macOS: `~/Library/Application Support/clippal/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\clippal\logs\`
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let log_dir = log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "clippal.log");

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(verbose.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
        }))
        .with(env_filter(verbose));

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), verbose, "Clippal starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("clippal").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("Clippal shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_directory_has_expected_structure() {
        if let Ok(dir) = log_directory() {
            assert!(dir.ends_with("clippal/logs"));
        }
    }

    #[test]
    #[serial]
    fn test_verbose_filter_enables_debug() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(env_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(env_filter(false).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_verbose() {
        std::env::set_var("RUST_LOG", "clippal=trace");
        let filter = env_filter(false);
        std::env::remove_var("RUST_LOG");

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}

//! Command execution.
//!
//! Commands carry a [`CommandAction`]; running it needs the host's handlers
//! and the settings store, which are bundled in an [`ExecutionContext`].
//! Every failure is reported as [`CommandResult::Error`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use super::dynamic::{describe_minutes, pluralize};
use super::registry::{capitalize, Command, CommandAction};
use crate::config::{keys, SettingValue, SettingsStore};
use crate::content_type::ContentType;

/// Deletes entries captured within the last N minutes, returning the count.
pub type DeleteRecentHandler =
    Arc<dyn Fn(u32) -> BoxFuture<'static, anyhow::Result<u64>> + Send + Sync>;

/// Deletes every entry, returning the count.
pub type DeleteAllHandler = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<u64>> + Send + Sync>;

/// Fire-and-forget UI trigger.
pub type Hook = Arc<dyn Fn() + Send + Sync>;

/// Opens the main window, optionally filtered to one content type.
pub type OpenMainWindowHandler = Arc<dyn Fn(Option<ContentType>) + Send + Sync>;

/// Outcome of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// The command completed.
    Success(String),
    /// The user must agree before `confirm` is run.
    NeedsConfirmation {
        message: String,
        confirm: CommandAction,
    },
    /// The command could not complete.
    Error(String),
    /// The host should show the main window with an optional filter.
    OpenMainWindow(Option<ContentType>),
    /// The palette should close without a message.
    Dismissed,
}

impl CommandResult {
    /// Get the message to show the user, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(msg) | Self::Error(msg) => Some(msg),
            Self::NeedsConfirmation { message, .. } => Some(message),
            Self::OpenMainWindow(_) | Self::Dismissed => None,
        }
    }
}

/// Callbacks into the host application.
///
/// Every handler is optional. A missing delete handler makes the clear
/// commands return an error; a missing UI hook is a no-op.
#[derive(Clone, Default)]
pub struct CommandHandlers {
    pub delete_recent: Option<DeleteRecentHandler>,
    pub delete_all: Option<DeleteAllHandler>,
    pub open_settings: Option<Hook>,
    pub check_for_updates: Option<Hook>,
    pub open_release_notes: Option<Hook>,
    pub quit_app: Option<Hook>,
    pub open_main_window: Option<OpenMainWindowHandler>,
}

impl CommandHandlers {
    /// Create an empty handler set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete entries newer than the given number of minutes.
    pub fn on_delete_recent<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<u64>> + Send + 'static,
    {
        self.delete_recent = Some(Arc::new(move |minutes| f(minutes).boxed()));
        self
    }

    /// Delete the whole history.
    pub fn on_delete_all<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<u64>> + Send + 'static,
    {
        self.delete_all = Some(Arc::new(move || f().boxed()));
        self
    }

    /// Show the settings window.
    pub fn on_open_settings(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.open_settings = Some(Arc::new(f));
        self
    }

    /// Start an update check.
    pub fn on_check_for_updates(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.check_for_updates = Some(Arc::new(f));
        self
    }

    /// Show the release notes.
    pub fn on_open_release_notes(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.open_release_notes = Some(Arc::new(f));
        self
    }

    /// Quit the host application.
    pub fn on_quit(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.quit_app = Some(Arc::new(f));
        self
    }

    /// Show the main window with an optional content filter.
    pub fn on_open_main_window(
        mut self,
        f: impl Fn(Option<ContentType>) + Send + Sync + 'static,
    ) -> Self {
        self.open_main_window = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for CommandHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHandlers")
            .field("delete_recent", &self.delete_recent.is_some())
            .field("delete_all", &self.delete_all.is_some())
            .field("open_settings", &self.open_settings.is_some())
            .field("check_for_updates", &self.check_for_updates.is_some())
            .field("open_release_notes", &self.open_release_notes.is_some())
            .field("quit_app", &self.quit_app.is_some())
            .field("open_main_window", &self.open_main_window.is_some())
            .finish()
    }
}

fn fire(hook: &Option<Hook>) {
    if let Some(hook) = hook {
        hook();
    }
}

/// Everything a command needs to run.
#[derive(Clone)]
pub struct ExecutionContext {
    handlers: CommandHandlers,
    settings: Arc<dyn SettingsStore>,
}

impl ExecutionContext {
    /// Create a context from host handlers and a settings store.
    pub fn new(handlers: CommandHandlers, settings: Arc<dyn SettingsStore>) -> Self {
        Self { handlers, settings }
    }

    /// Run a command's action.
    pub async fn execute(&self, command: &Command) -> CommandResult {
        self.run(&command.action).await
    }

    /// Run an action directly.
    ///
    /// Used for the `confirm` action of a
    /// [`CommandResult::NeedsConfirmation`] once the user has agreed.
    pub async fn run(&self, action: &CommandAction) -> CommandResult {
        match action {
            CommandAction::ClearRecent { minutes } => self.clear_recent(*minutes).await,
            CommandAction::ConfirmClearAll => CommandResult::NeedsConfirmation {
                message: "Clear all clipboard history? This cannot be undone.".to_string(),
                confirm: CommandAction::ClearAll,
            },
            CommandAction::ClearAll => self.clear_all().await,
            CommandAction::SetMonitoringPaused(paused) => {
                let message = if *paused {
                    "Clipboard monitoring paused"
                } else {
                    "Clipboard monitoring resumed"
                };
                self.write_setting(keys::PAUSE_MONITORING, (*paused).into(), message.to_string())
            }
            CommandAction::SetToggle { key, name, enabled } => {
                let state = if *enabled { "enabled" } else { "disabled" };
                self.write_setting(
                    key,
                    (*enabled).into(),
                    format!("{} {}", capitalize(name), state),
                )
            }
            CommandAction::SetTheme(theme) => self.write_setting(
                keys::APPEARANCE,
                theme.as_str().into(),
                format!("Theme set to {}", theme.display()),
            ),
            CommandAction::OpenSettings => {
                fire(&self.handlers.open_settings);
                CommandResult::Dismissed
            }
            CommandAction::CheckForUpdates => {
                fire(&self.handlers.check_for_updates);
                CommandResult::Success("Checking for updates...".to_string())
            }
            CommandAction::OpenReleaseNotes => {
                fire(&self.handlers.open_release_notes);
                CommandResult::Dismissed
            }
            CommandAction::Quit => {
                fire(&self.handlers.quit_app);
                CommandResult::Dismissed
            }
            CommandAction::FilterContent(content_type) => {
                CommandResult::OpenMainWindow(Some(*content_type))
            }
            CommandAction::ShowHelp => CommandResult::Success("Showing all commands".to_string()),
        }
    }

    /// Forward an [`CommandResult::OpenMainWindow`] outcome to the host.
    pub fn open_main_window(&self, content_type: Option<ContentType>) {
        if let Some(handler) = &self.handlers.open_main_window {
            handler(content_type);
        }
    }

    async fn clear_recent(&self, minutes: u32) -> CommandResult {
        let Some(delete_recent) = &self.handlers.delete_recent else {
            return CommandResult::Error("Delete handler not configured".to_string());
        };

        match delete_recent(minutes).await {
            Ok(count) => CommandResult::Success(format!(
                "Cleared {} {} from last {}",
                count,
                pluralize(count, "entry", "entries"),
                describe_minutes(minutes)
            )),
            Err(e) => CommandResult::Error(format!("Failed to clear: {}", e)),
        }
    }

    async fn clear_all(&self) -> CommandResult {
        let Some(delete_all) = &self.handlers.delete_all else {
            return CommandResult::Error("Delete handler not configured".to_string());
        };

        match delete_all().await {
            Ok(count) => CommandResult::Success(format!("Cleared all {} entries", count)),
            Err(e) => CommandResult::Error(format!("Failed to clear: {}", e)),
        }
    }

    fn write_setting(&self, key: &str, value: SettingValue, success: String) -> CommandResult {
        match self.settings.set(key, value) {
            Ok(()) => CommandResult::Success(success),
            Err(e) => CommandResult::Error(format!("Failed to save setting: {}", e)),
        }
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

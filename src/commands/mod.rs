//! Command system for the command palette.
//!
//! This module provides:
//! - Command definitions with categories
//! - Command registry with prefix and substring search
//! - Dynamic "clear N <unit>" commands
//! - Command execution against host handlers

mod dynamic;
mod execute;
mod registry;

pub use dynamic::{describe_minutes, parse_dynamic_clear, ClearDuration, TimeUnit};
pub use execute::{
    CommandHandlers, CommandResult, DeleteAllHandler, DeleteRecentHandler, ExecutionContext, Hook,
    OpenMainWindowHandler,
};
pub use registry::{build_catalog, Command, CommandAction, CommandCategory, CommandRegistry};

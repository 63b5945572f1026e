//! Clippal - a searchable command palette for a clipboard history manager.
//!
//! The palette holds a fixed catalog of commands ("clear 1 hour", "pause",
//! "theme dark", ...), ranks them against free-text queries and recognizes
//! ad-hoc `clear N <unit>` queries. Running a command goes through an
//! [`ExecutionContext`](commands::ExecutionContext) that supplies the host
//! application's callbacks and settings store.

pub mod commands;
pub mod config;
pub mod content_type;
pub mod error;
pub mod logging;

pub use commands::{Command, CommandRegistry, CommandResult, ExecutionContext};
pub use content_type::ContentType;
pub use error::{AppError, Result};

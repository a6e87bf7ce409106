//! # Command System
//!
//! Slash command (/) handling shared by the line REPL and the TUI.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod handler;
pub mod parse;

pub use handler::{execute, CommandOutcome};
pub use parse::{Command, HELP_LINES};

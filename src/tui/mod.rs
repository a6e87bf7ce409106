//! # TUI Module
//!
//! Terminal user interface for chatting with the personas.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial TUI with chat log, persona sidebar, shared memory stats and help overlay

pub mod app;
pub mod event;
pub mod ui;

pub use app::App;
pub use event::{Event, EventHandler};

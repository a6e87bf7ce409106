//! # Core Module
//!
//! Configuration, error handling and reply rendering shared by every front-end.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add response module with error sentinel rendering and text wrapping
//! - 1.0.0: Initial creation with config and error modules

pub mod config;
pub mod error;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use error::ChatError;
pub use response::{is_error_sentinel, preview, render_reply, wrap_text, ERROR_SENTINEL_PREFIX};

//! # Shared Memory Feature
//!
//! One conversation log shared by every persona of a session, bounded so the
//! oldest exchanges fall off first.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add stats() for per-persona counts and character totals
//! - 1.0.0: Initial release

pub mod store;

pub use store::{ConversationStore, Exchange, MemoryStats};

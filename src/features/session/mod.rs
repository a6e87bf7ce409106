//! # Chat Session Feature
//!
//! Ties personas, shared memory and the generation backend into one
//! interactive session.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Session owns its memory instead of sharing process-wide state
//! - 1.0.0: Initial release

pub mod chat;
pub mod state;

pub use chat::{PersonaChatSession, Reply, SessionSettings};
pub use state::{DisplayMessage, SessionState, SessionStatus, Speaker};

//! UI-facing session state

use chrono::{DateTime, Local};

/// Where a session is in its request/response cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    /// A generation request is in flight; input is not accepted
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One line of the chat transcript as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMessage {
    pub speaker: Speaker,
    pub content: String,
    /// Persona that produced an assistant message
    pub persona: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl DisplayMessage {
    pub fn user(content: impl Into<String>) -> Self {
        DisplayMessage {
            speaker: Speaker::User,
            content: content.into(),
            persona: None,
            timestamp: Local::now(),
        }
    }

    pub fn assistant(persona: impl Into<String>, content: impl Into<String>) -> Self {
        DisplayMessage {
            speaker: Speaker::Assistant,
            content: content.into(),
            persona: Some(persona.into()),
            timestamp: Local::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub active_persona: String,
    /// Transcript for display; may hold entries not yet committed to memory
    pub display_log: Vec<DisplayMessage>,
    pub status: SessionStatus,
}

impl SessionState {
    pub fn new(active_persona: impl Into<String>) -> Self {
        SessionState {
            active_persona: active_persona.into(),
            display_log: Vec::new(),
            status: SessionStatus::Idle,
        }
    }
}

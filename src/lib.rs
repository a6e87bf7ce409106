// Core layer - configuration, errors and reply rendering
pub mod core;

// Features layer - personas, shared memory, generation backend, sessions, export
pub mod features;

// Application layer - slash commands shared by every front-end
pub mod commands;

// TUI layer - terminal user interface (optional feature)
#[cfg(feature = "tui")]
pub mod tui;

pub use core::{ChatError, Config};

pub use features::{
    // Export
    ExportDocument, ExportError,
    // Generation
    GenerationError, GenerationParams, OpenAiGenerator, Role, TextGenerator, Turn,
    // Memory
    ConversationStore, Exchange, MemoryStats,
    // Personas
    Persona, PersonaManager, RequestBuilder,
    // Sessions
    PersonaChatSession, Reply, SessionSettings, SessionState, SessionStatus,
};

pub use commands::{execute, Command, CommandOutcome};

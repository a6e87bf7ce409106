//! # Features Layer
//!
//! - **personas**: fixed persona registry and request assembly
//! - **memory**: bounded conversation store shared across personas
//! - **generation**: backend seam and the OpenAI-compatible client
//! - **session**: one user's chat session
//! - **export**: JSON export of personas and memory

pub mod export;
pub mod generation;
pub mod memory;
pub mod personas;
pub mod session;

pub use export::{export_file_name, write_export, ExportDocument, ExportError};
pub use generation::{GenerationError, GenerationParams, OpenAiGenerator, Role, TextGenerator, Turn};
pub use memory::{ConversationStore, Exchange, MemoryStats};
pub use personas::{Persona, PersonaManager, RequestBuilder};
pub use session::{PersonaChatSession, Reply, SessionSettings, SessionState, SessionStatus};

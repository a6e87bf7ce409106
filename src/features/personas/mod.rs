//! # Personas Feature
//!
//! Fixed registry of 5 personas and the request builder that puts a persona's
//! prompt prefix in front of the shared conversation.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add choices module with case-insensitive name resolution
//! - 1.1.0: Add RequestBuilder with cross-persona annotations
//! - 1.0.0: Initial release

pub mod choices;
pub mod manager;
pub mod prompt_builder;

pub use choices::{is_valid_persona, resolve_persona, DEFAULT_PERSONA, PERSONA_NAMES};
pub use manager::{Persona, PersonaManager};
pub use prompt_builder::{persona_annotation, RequestBuilder};

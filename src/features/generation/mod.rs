//! # Generation Backend
//!
//! Role-tagged turns, sampling parameters and the seam to the hosted
//! text-generation service.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Explicit credentials and base URL for OpenAI-compatible routers
//! - 1.0.0: Initial release with OpenAI chat completions

mod error;
mod openai_client;

pub use error::GenerationError;
pub use openai_client::OpenAiGenerator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        f.write_str(name)
    }
}

/// One message of an outbound request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Turn { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Turn { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Turn { role: Role::Assistant, content: content.into() }
    }
}

/// Fixed per-session sampling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u64,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams {
            max_tokens: crate::core::config::DEFAULT_MAX_TOKENS,
            temperature: crate::core::config::DEFAULT_TEMPERATURE,
        }
    }
}

/// Opaque `generate(turns, max_tokens, temperature) -> text | error` backend.
///
/// # Example
///
/// ```ignore
/// struct Echo;
///
/// #[async_trait]
/// impl TextGenerator for Echo {
///     async fn generate(&self, turns: &[Turn], _: &GenerationParams) -> Result<String, GenerationError> {
///         Ok(turns.last().map(|t| t.content.clone()).unwrap_or_default())
///     }
///
///     fn model_id(&self) -> &str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        turns: &[Turn],
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;

    fn model_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The session holds generators behind Arc<dyn TextGenerator>
    fn _assert_object_safe(_: &dyn TextGenerator) {}

    #[test]
    fn test_turn_constructors() {
        assert_eq!(Turn::system("s").role, Role::System);
        assert_eq!(Turn::user("u").role, Role::User);
        assert_eq!(Turn::assistant("a").role, Role::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Turn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
        assert_eq!(Role::User.to_string(), "user");
    }
}

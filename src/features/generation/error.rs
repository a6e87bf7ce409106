//! Generation backend error types

use thiserror::Error;

/// Any failure of the external text-generation call.
///
/// None of these are retried: the turn completes with the error text instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl GenerationError {
    pub fn provider(message: impl Into<String>) -> Self {
        GenerationError::Provider(message.into())
    }
}

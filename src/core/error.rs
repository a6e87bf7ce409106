//! Crate-wide error type

use thiserror::Error;

use crate::features::export::ExportError;
use crate::features::generation::GenerationError;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Fatal at startup, the session is never created
    #[error("Configuration Error: {0}")]
    Configuration(String),

    #[error("Unknown persona '{0}'")]
    UnknownPersona(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_persona_message() {
        let err = ChatError::UnknownPersona("NinjaBot".to_string());
        assert_eq!(err.to_string(), "Unknown persona 'NinjaBot'");
    }

    #[test]
    fn test_generation_error_is_transparent() {
        let err: ChatError = GenerationError::Timeout(45).into();
        assert_eq!(err.to_string(), GenerationError::Timeout(45).to_string());
    }
}

//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Split prompt context window from retained history size
//! - 1.0.0: Initial release with HF_TOKEN, model and sampling settings

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::ChatError;
use crate::features::personas::{is_valid_persona, DEFAULT_PERSONA, PERSONA_NAMES};

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b:cerebras";
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1/";
pub const DEFAULT_MAX_TOKENS: u64 = 700;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Exchanges retained in shared memory
pub const DEFAULT_MAX_HISTORY: usize = 30;
/// Exchanges forwarded to the model on each request
pub const DEFAULT_CONTEXT_WINDOW: usize = 20;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub hf_token: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u64,
    pub temperature: f32,
    pub max_history: usize,
    pub context_window: usize,
    pub request_timeout_secs: u64,
    pub default_persona: String,
    pub export_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let hf_token = get("HF_TOKEN").ok_or_else(|| {
            ChatError::Configuration("HF_TOKEN environment variable is required".to_string())
        })?;

        let config = Config {
            hf_token,
            model: get("PERSONA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: normalize_base_url(
                &get("PERSONA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ),
            max_tokens: parse_or("PERSONA_MAX_TOKENS", get("PERSONA_MAX_TOKENS"), DEFAULT_MAX_TOKENS)?,
            temperature: parse_or(
                "PERSONA_TEMPERATURE",
                get("PERSONA_TEMPERATURE"),
                DEFAULT_TEMPERATURE,
            )?,
            max_history: parse_or(
                "PERSONA_MAX_HISTORY",
                get("PERSONA_MAX_HISTORY"),
                DEFAULT_MAX_HISTORY,
            )?,
            context_window: parse_or(
                "PERSONA_CONTEXT_WINDOW",
                get("PERSONA_CONTEXT_WINDOW"),
                DEFAULT_CONTEXT_WINDOW,
            )?,
            request_timeout_secs: parse_or(
                "PERSONA_REQUEST_TIMEOUT_SECS",
                get("PERSONA_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            default_persona: get("PERSONA_DEFAULT").unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
            export_dir: get("PERSONA_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ChatError> {
        if self.max_history == 0 {
            return Err(ChatError::Configuration(
                "PERSONA_MAX_HISTORY must be at least 1".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ChatError::Configuration(
                "PERSONA_MAX_TOKENS must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ChatError::Configuration(format!(
                "PERSONA_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ChatError::Configuration(
                "PERSONA_REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }
        if !is_valid_persona(&self.default_persona) {
            return Err(ChatError::Configuration(format!(
                "PERSONA_DEFAULT '{}' is not a known persona (expected one of: {})",
                self.default_persona,
                PERSONA_NAMES.join(", ")
            )));
        }
        Ok(())
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ChatError> {
    match raw {
        Some(value) => value.parse::<T>().map_err(|_| {
            ChatError::Configuration(format!("{key} has an invalid value: '{value}'"))
        }),
        None => Ok(default),
    }
}

/// The openai client appends routes directly to the base URL
fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

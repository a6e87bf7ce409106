//! Chat completions over an OpenAI-compatible endpoint

use async_trait::async_trait;
use log::{debug, warn};
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use openai::Credentials;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use uuid::Uuid;

use super::{GenerationError, GenerationParams, Role, TextGenerator, Turn};
use crate::core::Config;

/// Generator backed by the hosted inference router
#[derive(Clone)]
pub struct OpenAiGenerator {
    credentials: Credentials,
    model: String,
    request_timeout: Duration,
}

impl OpenAiGenerator {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        OpenAiGenerator {
            credentials: Credentials::new(api_key, base_url),
            model: model.into(),
            request_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.hf_token,
            &config.base_url,
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn to_message(turn: &Turn) -> ChatCompletionMessage {
        let role = match turn.role {
            Role::System => ChatCompletionMessageRole::System,
            Role::User => ChatCompletionMessageRole::User,
            Role::Assistant => ChatCompletionMessageRole::Assistant,
        };
        ChatCompletionMessage {
            role,
            content: Some(turn.content.clone()),
            name: None,
            function_call: None,
            tool_call_id: None,
            tool_calls: None,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        turns: &[Turn],
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();
        let messages: Vec<ChatCompletionMessage> = turns.iter().map(Self::to_message).collect();

        debug!(
            "[{request_id}] Sending {} messages to {} | max_tokens: {} | temperature: {}",
            messages.len(),
            self.model,
            params.max_tokens,
            params.temperature
        );

        let request = ChatCompletion::builder(&self.model, messages)
            .credentials(self.credentials.clone())
            .max_tokens(params.max_tokens)
            .temperature(params.temperature)
            .create();

        let completion = match timeout(self.request_timeout, request).await {
            Ok(Ok(completion)) => completion,
            Ok(Err(e)) => {
                warn!("[{request_id}] Provider error after {:?}: {e}", start.elapsed());
                return Err(GenerationError::provider(e.to_string()));
            }
            Err(_) => {
                warn!(
                    "[{request_id}] Request timed out after {}s",
                    self.request_timeout.as_secs()
                );
                return Err(GenerationError::Timeout(self.request_timeout.as_secs()));
            }
        };

        // An empty string is a valid reply; only missing content is an error
        let response = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|content| content.trim().to_string())
            .ok_or(GenerationError::EmptyResponse)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "[{request_id}] Usage | prompt: {} | completion: {} | total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        debug!(
            "[{request_id}] Got response: {} chars in {:?}",
            response.chars().count(),
            start.elapsed()
        );

        Ok(response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

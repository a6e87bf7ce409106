//! # PersonaChatSession
//!
//! One user's chat: persona registry, the active persona, the shared memory
//! and the generation backend. Nothing here is global, so any number of
//! sessions can live side by side in one process.

use chrono::Local;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use super::state::{DisplayMessage, SessionState, SessionStatus};
use crate::core::{preview, render_reply, ChatError, Config};
use crate::features::export::{write_export, ExportDocument};
use crate::features::generation::{GenerationError, GenerationParams, TextGenerator, Turn};
use crate::features::memory::{ConversationStore, Exchange, MemoryStats};
use crate::features::personas::{Persona, PersonaManager, RequestBuilder};

/// Per-session limits and parameters
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Exchanges retained in shared memory
    pub max_history: usize,
    /// Exchanges forwarded with each request
    pub context_window: usize,
    pub params: GenerationParams,
    pub export_dir: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            max_history: crate::core::config::DEFAULT_MAX_HISTORY,
            context_window: crate::core::config::DEFAULT_CONTEXT_WINDOW,
            params: GenerationParams::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        SessionSettings {
            max_history: config.max_history,
            context_window: config.context_window,
            params: GenerationParams {
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
            export_dir: config.export_dir.clone(),
        }
    }
}

/// Result of a completed round trip
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub persona: String,
    /// Text shown to the user and recorded in memory
    pub text: String,
    pub failed: bool,
}

pub struct PersonaChatSession {
    personas: PersonaManager,
    store: ConversationStore,
    generator: Arc<dyn TextGenerator>,
    settings: SessionSettings,
    state: SessionState,
}

impl PersonaChatSession {
    /// Create a session with `initial_persona` active.
    ///
    /// Fails with `UnknownPersona` if the name is not registered.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        settings: SessionSettings,
        initial_persona: &str,
    ) -> Result<Self, ChatError> {
        let personas = PersonaManager::new();
        if !personas.contains(initial_persona) {
            return Err(ChatError::UnknownPersona(initial_persona.to_string()));
        }

        Ok(PersonaChatSession {
            personas,
            store: ConversationStore::new(settings.max_history),
            generator,
            settings,
            state: SessionState::new(initial_persona),
        })
    }

    pub fn from_config(config: &Config, generator: Arc<dyn TextGenerator>) -> Result<Self, ChatError> {
        Self::new(generator, SessionSettings::from(config), &config.default_persona)
    }

    pub fn list_personas(&self) -> Vec<(&str, &str)> {
        self.personas.list_personas()
    }

    pub fn personas(&self) -> &PersonaManager {
        &self.personas
    }

    pub fn active_persona(&self) -> Option<&Persona> {
        self.personas.get_persona(&self.state.active_persona)
    }

    pub fn active_persona_name(&self) -> &str {
        &self.state.active_persona
    }

    /// Change the active persona. Shared memory is left as it is.
    pub fn switch_persona(&mut self, name: &str) -> Result<(), ChatError> {
        if !self.personas.contains(name) {
            debug!("Rejected switch to unknown persona '{name}'");
            return Err(ChatError::UnknownPersona(name.to_string()));
        }
        if self.state.active_persona != name {
            info!("Switching persona {} -> {name}", self.state.active_persona);
            self.state.active_persona = name.to_string();
        }
        Ok(())
    }

    pub fn build_request<'a, I>(&'a self, user_input: &str, history: I) -> Vec<Turn>
    where
        I: IntoIterator<Item = &'a Exchange>,
    {
        RequestBuilder::new(&self.personas, &self.state.active_persona)
            .with_history(history)
            .build(user_input)
    }

    /// Ask the backend for the active persona's reply to `user_input`.
    ///
    /// Does not touch memory; see `submit` for the full round trip.
    pub async fn get_response(&self, user_input: &str) -> Result<String, GenerationError> {
        let turns = self.build_request(
            user_input,
            self.store.recent_window(self.settings.context_window),
        );
        debug!(
            "Built request for {} | {} turns | model: {}",
            self.state.active_persona,
            turns.len(),
            self.generator.model_id()
        );

        self.generator
            .generate(&turns, &self.settings.params)
            .await
            .map(|text| text.trim().to_string())
    }

    /// Append an exchange under the active persona, stamped now
    pub fn record_exchange(&mut self, user_input: &str, response_text: &str) {
        self.store.append(Exchange::new(
            self.state.active_persona.clone(),
            user_input,
            response_text,
        ));
    }

    /// Full round trip: request, render, record.
    ///
    /// A failed generation still completes the turn; its error text is what
    /// gets shown and remembered.
    pub async fn submit(&mut self, user_input: &str) -> Reply {
        let request_id = Uuid::new_v4();
        let start = Instant::now();
        let persona = self.state.active_persona.clone();

        self.state.display_log.push(DisplayMessage::user(user_input));
        self.state.status = SessionStatus::AwaitingResponse;
        info!(
            "[{request_id}] {persona} is thinking... | input: {}",
            preview(user_input, 60)
        );

        let outcome = self.get_response(user_input).await;
        let failed = outcome.is_err();
        if let Err(e) = &outcome {
            warn!("[{request_id}] Generation failed for {persona}: {e}");
        }
        let text = render_reply(&outcome);

        self.record_exchange(user_input, &text);
        self.state
            .display_log
            .push(DisplayMessage::assistant(persona.clone(), text.clone()));
        self.state.status = SessionStatus::Idle;

        info!(
            "[{request_id}] Reply from {persona} | {} chars | {:?} | memory: {}",
            text.chars().count(),
            start.elapsed(),
            self.store.size()
        );

        Reply { persona, text, failed }
    }

    /// Forget every exchange and clear the transcript
    pub fn clear_memory(&mut self) {
        info!("Clearing {} exchanges from shared memory", self.store.size());
        self.store.clear();
        self.state.display_log.clear();
    }

    /// Write everything to a timestamped JSON file in the export directory
    pub fn export_all(&self) -> Result<PathBuf, ChatError> {
        let now = Local::now();
        let document = ExportDocument::new(&self.personas, &self.store, now);
        let path = write_export(&self.settings.export_dir, &document, now)?;
        Ok(path)
    }

    pub fn stats(&self) -> MemoryStats {
        self.store.stats()
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }
}

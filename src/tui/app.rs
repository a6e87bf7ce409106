//! # TUI Application Core
//!
//! Application state wrapped around one chat session.

use log::error;

use crate::commands::{execute, Command, CommandOutcome};
use crate::features::session::PersonaChatSession;

/// Main application state
pub struct App {
    /// The chat session this TUI drives
    pub session: PersonaChatSession,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Input buffer for the message line
    pub input_buffer: String,
    /// Help overlay visible
    pub show_help: bool,
    /// Lines scrolled up from the bottom of the chat log
    pub scroll_offset: u16,
    /// Furthest the chat log can scroll, as of the last draw
    pub max_scroll: u16,
    /// Persona currently generating a reply, shown as a spinner line
    pub thinking: Option<String>,
    /// Error message to display
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
}

impl App {
    pub fn new(session: PersonaChatSession) -> Self {
        App {
            session,
            should_quit: false,
            input_buffer: String::new(),
            show_help: false,
            scroll_offset: 0,
            max_scroll: 0,
            thinking: None,
            error_message: None,
            status_message: None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Take the current input line, leaving the buffer empty
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input_buffer)
    }

    /// Mark the start of a request so the next draw shows "thinking"
    pub fn begin_request(&mut self) {
        self.thinking = Some(self.session.active_persona_name().to_string());
        self.clear_messages();
    }

    /// Parse and run one input line against the session
    pub async fn run_command(&mut self, line: &str) {
        let command = Command::parse(line);
        let outcome = execute(&mut self.session, command).await;
        self.thinking = None;
        self.apply_outcome(outcome);
    }

    pub fn apply_outcome(&mut self, outcome: CommandOutcome) {
        match outcome {
            CommandOutcome::Reply(reply) => {
                self.scroll_offset = 0;
                if reply.failed {
                    self.error_message = Some(format!("{} could not answer", reply.persona));
                }
            }
            CommandOutcome::Info(lines) => {
                self.status_message = Some(lines.join(" | "));
                self.error_message = None;
            }
            CommandOutcome::Error(message) => {
                self.error_message = Some(message);
            }
            CommandOutcome::Quit => self.should_quit = true,
            CommandOutcome::Nothing => {}
        }
    }

    /// Cycle the active persona forwards (`step = 1`) or backwards (`step = -1`)
    pub fn cycle_persona(&mut self, step: isize) {
        let personas = self.session.personas();
        let count = personas.len() as isize;
        if count == 0 {
            return;
        }
        let current = personas
            .index_of(self.session.active_persona_name())
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(count) as usize;
        let Some(name) = personas.get_index(next).map(|p| p.name.clone()) else {
            return;
        };

        match self.session.switch_persona(&name) {
            Ok(()) => {
                self.status_message = Some(format!("Now chatting with {name}"));
                self.error_message = None;
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    pub fn clear_memory(&mut self) {
        self.session.clear_memory();
        self.scroll_offset = 0;
        self.status_message = Some("Memory cleared!".to_string());
        self.error_message = None;
    }

    pub fn export(&mut self) {
        match self.session.export_all() {
            Ok(path) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
                self.error_message = None;
            }
            Err(e) => {
                error!("Export failed: {e}");
                self.error_message = Some("Export failed!".to_string());
            }
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll);
    }

    /// Record how far the transcript can scroll and pull the offset back inside it
    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::generation::{GenerationError, GenerationParams, TextGenerator, Turn};
    use crate::features::session::SessionSettings;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Parrot;

    #[async_trait]
    impl TextGenerator for Parrot {
        async fn generate(
            &self,
            turns: &[Turn],
            _params: &GenerationParams,
        ) -> Result<String, GenerationError> {
            Ok(turns.last().map(|t| t.content.clone()).unwrap_or_default())
        }

        fn model_id(&self) -> &str {
            "parrot"
        }
    }

    fn app() -> App {
        let session =
            PersonaChatSession::new(Arc::new(Parrot), SessionSettings::default(), "RoastBot")
                .unwrap();
        App::new(session)
    }

    #[test]
    fn test_cycle_persona_wraps_both_ways() {
        let mut app = app();
        app.cycle_persona(-1);
        assert_eq!(app.session.active_persona_name(), "PirateBot");
        app.cycle_persona(1);
        assert_eq!(app.session.active_persona_name(), "RoastBot");
        app.cycle_persona(1);
        assert_eq!(app.session.active_persona_name(), "ShakespeareBot");
    }

    #[test]
    fn test_input_editing() {
        let mut app = app();
        app.push_char('h');
        app.push_char('i');
        app.push_char('!');
        app.backspace();
        assert_eq!(app.take_input(), "hi");
        assert!(app.input_buffer.is_empty());
    }

    #[tokio::test]
    async fn test_run_command_records_reply() {
        let mut app = app();
        app.begin_request();
        assert_eq!(app.thinking.as_deref(), Some("RoastBot"));

        app.run_command("echo me").await;
        assert!(app.thinking.is_none());
        assert_eq!(app.session.store().size(), 1);
        assert_eq!(app.session.store().iter().next().unwrap().bot_text, "echo me");
    }

    #[tokio::test]
    async fn test_run_command_quit() {
        let mut app = app();
        app.run_command("/quit").await;
        assert!(app.should_quit);
    }

    #[test]
    fn test_scroll_saturates() {
        let mut app = app();
        app.set_max_scroll(10);
        app.scroll_down(5);
        assert_eq!(app.scroll_offset, 0);
        app.scroll_up(3);
        app.scroll_down(1);
        assert_eq!(app.scroll_offset, 2);
    }

    #[test]
    fn test_scroll_up_stops_at_top_of_transcript() {
        let mut app = app();
        app.set_max_scroll(7);
        for _ in 0..10 {
            app.scroll_up(5);
        }
        assert_eq!(app.scroll_offset, 7);

        // One step back down moves the view right away
        app.scroll_down(5);
        assert_eq!(app.scroll_offset, 2);

        // A shorter transcript pulls the offset back in
        app.scroll_up(5);
        app.set_max_scroll(3);
        assert_eq!(app.scroll_offset, 3);
    }
}

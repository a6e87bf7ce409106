//! Request assembly from persona prefix, shared history and new input
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Annotate exchanges recorded under a different persona
//! - 1.0.0: Consolidated request building into fluent builder API

use super::PersonaManager;
use crate::features::generation::Turn;
use crate::features::memory::Exchange;

/// Annotation prepended to user text recorded under another persona
pub fn persona_annotation(persona_name: &str) -> String {
    format!("[Previous conversation with {persona_name}]")
}

/// Builder for the ordered, role-tagged turns sent to the backend
///
/// Turn order is fixed:
/// - one system turn with the active persona's prompt prefix
/// - a user and an assistant turn per history exchange, oldest first
/// - the new user input, verbatim
///
/// # Example
///
/// ```ignore
/// let turns = RequestBuilder::new(&persona_manager, "PirateBot")
///     .with_history(store.recent_window(20))
///     .build("where be the treasure?");
/// ```
pub struct RequestBuilder<'a> {
    persona_manager: &'a PersonaManager,
    active_persona: String,
    history: Vec<&'a Exchange>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(persona_manager: &'a PersonaManager, active_persona: &str) -> Self {
        Self {
            persona_manager,
            active_persona: active_persona.to_string(),
            history: Vec::new(),
        }
    }

    /// Set the history window, in chronological order
    pub fn with_history<I>(mut self, history: I) -> Self
    where
        I: IntoIterator<Item = &'a Exchange>,
    {
        self.history = history.into_iter().collect();
        self
    }

    pub fn build(self, user_input: &str) -> Vec<Turn> {
        let mut turns = Vec::with_capacity(self.history.len() * 2 + 2);

        turns.push(Turn::system(
            self.persona_manager.get_system_prompt(&self.active_persona),
        ));

        for exchange in &self.history {
            let user_content = if exchange.persona_name != self.active_persona {
                format!(
                    "{} {}",
                    persona_annotation(&exchange.persona_name),
                    exchange.user_text
                )
            } else {
                exchange.user_text.clone()
            };
            turns.push(Turn::user(user_content));
            turns.push(Turn::assistant(exchange.bot_text.clone()));
        }

        turns.push(Turn::user(user_input));
        turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::generation::Role;

    #[test]
    fn test_build_without_history() {
        let manager = PersonaManager::new();
        let turns = RequestBuilder::new(&manager, "RoastBot").build("hello");

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(
            turns[0].content,
            manager.get_persona("RoastBot").unwrap().system_prompt
        );
        assert_eq!(turns[1], Turn::user("hello"));
    }

    #[test]
    fn test_other_persona_history_is_annotated() {
        let manager = PersonaManager::new();
        let history = vec![Exchange::new("RoastBot", "roast me", "no")];
        let turns = RequestBuilder::new(&manager, "PirateBot")
            .with_history(&history)
            .build("ahoy");

        assert_eq!(turns.len(), 4);
        assert_eq!(turns[1].role, Role::User);
        assert!(turns[1]
            .content
            .starts_with("[Previous conversation with RoastBot]"));
        assert_eq!(
            turns[1].content,
            "[Previous conversation with RoastBot] roast me"
        );
        assert_eq!(turns[2], Turn::assistant("no"));
    }

    #[test]
    fn test_same_persona_history_is_verbatim() {
        let manager = PersonaManager::new();
        let history = vec![Exchange::new("PirateBot", "ahoy", "arr")];
        let turns = RequestBuilder::new(&manager, "PirateBot")
            .with_history(&history)
            .build("more");

        assert_eq!(turns[1], Turn::user("ahoy"));
        assert!(!turns[1].content.contains("[Previous conversation"));
    }

    #[test]
    fn test_turn_order_is_chronological() {
        let manager = PersonaManager::new();
        let history = vec![
            Exchange::new("EmojiBot", "one", "1️⃣"),
            Exchange::new("PhilosopherBot", "two", "why two?"),
        ];
        let turns = RequestBuilder::new(&manager, "PhilosopherBot")
            .with_history(&history)
            .build("three");

        let roles: Vec<Role> = turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User
            ]
        );
        assert_eq!(turns[1].content, "[Previous conversation with EmojiBot] one");
        assert_eq!(turns[3].content, "two");
        assert_eq!(turns[5].content, "three");
    }

    #[test]
    fn test_user_input_is_not_trimmed_or_altered() {
        let manager = PersonaManager::new();
        let turns = RequestBuilder::new(&manager, "EmojiBot").build("  spaced out  ");
        assert_eq!(turns.last().unwrap().content, "  spaced out  ");
    }
}

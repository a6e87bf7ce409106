//! # Feature: Persona System
//!
//! Five fixed personas (RoastBot, ShakespeareBot, EmojiBot, PhilosopherBot, PirateBot).
//! Each persona has a unique prompt prefix loaded from prompt/*.md files at compile time.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Registry kept in insertion order so listings are stable
//! - 1.1.0: Persona records serialize for conversation export
//! - 1.0.0: Initial release with 5 personas

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub description: String,
    pub system_prompt: String,
}

impl Persona {
    fn new(name: &str, description: &str, system_prompt: &str) -> Self {
        Persona {
            name: name.to_string(),
            description: description.to_string(),
            system_prompt: system_prompt.trim().to_string(),
        }
    }
}

/// Registry of persona definitions keyed by name.
///
/// Built once per session and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PersonaManager {
    personas: IndexMap<String, Persona>,
}

impl Default for PersonaManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonaManager {
    pub fn new() -> Self {
        let definitions = [
            Persona::new(
                "RoastBot",
                "Always responds with witty or sarcastic roasts",
                include_str!("../../../prompt/roastbot.md"),
            ),
            Persona::new(
                "ShakespeareBot",
                "Responds in old-English, Shakespeare-style prose",
                include_str!("../../../prompt/shakespearebot.md"),
            ),
            Persona::new(
                "EmojiBot",
                "Converts everything into emoji-speak",
                include_str!("../../../prompt/emojibot.md"),
            ),
            Persona::new(
                "PhilosopherBot",
                "Responds with deep philosophical insights and questions",
                include_str!("../../../prompt/philosopherbot.md"),
            ),
            Persona::new(
                "PirateBot",
                "Talks like a swashbuckling pirate like Captain Jack Sparrow",
                include_str!("../../../prompt/piratebot.md"),
            ),
        ];

        let personas = definitions
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        PersonaManager { personas }
    }

    pub fn get_persona(&self, name: &str) -> Option<&Persona> {
        self.personas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.personas.contains_key(name)
    }

    /// (name, description) pairs in registry order
    pub fn list_personas(&self) -> Vec<(&str, &str)> {
        self.personas
            .values()
            .map(|p| (p.name.as_str(), p.description.as_str()))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.personas.keys().map(String::as_str)
    }

    pub fn personas(&self) -> &IndexMap<String, Persona> {
        &self.personas
    }

    /// Position of a persona in registry order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.personas.get_index_of(name)
    }

    pub fn get_index(&self, index: usize) -> Option<&Persona> {
        self.personas.get_index(index).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Prompt prefix for a persona, or a neutral assistant prompt if unknown
    pub fn get_system_prompt(&self, persona_name: &str) -> String {
        self.personas
            .get(persona_name)
            .map(|p| p.system_prompt.clone())
            .unwrap_or_else(|| "You are a helpful assistant.".to_string())
    }
}

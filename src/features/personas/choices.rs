//! Persona names shared by the command layer and front-ends
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

/// Persona active when a session starts
pub const DEFAULT_PERSONA: &str = "RoastBot";

/// All persona names in registry order
pub const PERSONA_NAMES: &[&str] = &[
    "RoastBot",
    "ShakespeareBot",
    "EmojiBot",
    "PhilosopherBot",
    "PirateBot",
];

/// Validate a persona name exists (exact match)
pub fn is_valid_persona(name: &str) -> bool {
    PERSONA_NAMES.contains(&name)
}

/// Resolve user input like "pirate" or "piratebot" to a registered name
pub fn resolve_persona(input: &str) -> Option<&'static str> {
    let wanted = input.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    PERSONA_NAMES.iter().copied().find(|name| {
        let lower = name.to_lowercase();
        lower == wanted || lower.strip_suffix("bot") == Some(wanted.as_str())
    })
}

//! Input line parsing
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ordinary chat text for the active persona
    Message(String),
    ListPersonas,
    /// `/persona` with no argument shows the active persona
    SwitchPersona(Option<String>),
    Clear,
    Export,
    Stats,
    Memory,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        if trimmed.eq_ignore_ascii_case("quit") {
            return Command::Quit;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Message(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };

        match name.to_lowercase().as_str() {
            "personas" => Command::ListPersonas,
            "persona" | "p" => Command::SwitchPersona(arg.map(str::to_string)),
            "clear" => Command::Clear,
            "export" => Command::Export,
            "stats" => Command::Stats,
            "memory" => Command::Memory,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(name.to_string()),
        }
    }
}

pub const HELP_LINES: &[&str] = &[
    "/personas          list the available personas",
    "/persona <name>    switch persona (memory is kept)",
    "/memory            shared memory and transcript counts",
    "/stats             exchanges per persona and character totals",
    "/clear             forget all shared memory",
    "/export            write everything to a JSON file",
    "/help              show this help",
    "/quit or quit      leave the chat",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            Command::parse("hello there"),
            Command::Message("hello there".to_string())
        );
    }

    #[test]
    fn test_message_keeps_inner_whitespace() {
        assert_eq!(
            Command::parse("  indented  text\n"),
            Command::Message("  indented  text".to_string())
        );
    }

    #[test]
    fn test_quit_variants() {
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("  QUIT "), Command::Quit);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/exit"), Command::Quit);
    }

    #[test]
    fn test_persona_switch_with_argument() {
        assert_eq!(
            Command::parse("/persona PirateBot"),
            Command::SwitchPersona(Some("PirateBot".to_string()))
        );
        assert_eq!(
            Command::parse("/p   emoji  "),
            Command::SwitchPersona(Some("emoji".to_string()))
        );
        assert_eq!(Command::parse("/persona"), Command::SwitchPersona(None));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("/personas"), Command::ListPersonas);
        assert_eq!(Command::parse("/CLEAR"), Command::Clear);
        assert_eq!(Command::parse("/export"), Command::Export);
        assert_eq!(Command::parse("/stats"), Command::Stats);
        assert_eq!(Command::parse("/memory"), Command::Memory);
        assert_eq!(Command::parse("/help"), Command::Help);
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(
            Command::parse("/dance"),
            Command::Unknown("dance".to_string())
        );
        assert_eq!(Command::parse("   "), Command::Empty);
    }
}

//! Command dispatch against a chat session
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use log::{debug, error};

use super::parse::{Command, HELP_LINES};
use crate::core::ChatError;
use crate::features::personas::resolve_persona;
use crate::features::session::{PersonaChatSession, Reply};

/// What a front-end should show after a command ran
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Reply(Reply),
    Info(Vec<String>),
    Error(String),
    Quit,
    Nothing,
}

/// Run one parsed command.
///
/// Local failures (unknown persona, export errors) come back as
/// `CommandOutcome::Error` and never end the session.
pub async fn execute(session: &mut PersonaChatSession, command: Command) -> CommandOutcome {
    debug!("Executing command: {command:?}");

    match command {
        Command::Message(text) => CommandOutcome::Reply(session.submit(&text).await),
        Command::ListPersonas => {
            let active = session.active_persona_name().to_string();
            let lines = session
                .list_personas()
                .into_iter()
                .map(|(name, description)| {
                    let marker = if name == active { "*" } else { " " };
                    format!("{marker} {name:<15} {description}")
                })
                .collect();
            CommandOutcome::Info(lines)
        }
        Command::SwitchPersona(None) => {
            let description = session
                .active_persona()
                .map(|p| p.description.clone())
                .unwrap_or_default();
            CommandOutcome::Info(vec![format!(
                "Active: {} - {description}",
                session.active_persona_name()
            )])
        }
        Command::SwitchPersona(Some(name)) => {
            // Exact names first, then friendly forms like "pirate"
            let target = if session.personas().contains(&name) {
                name
            } else {
                resolve_persona(&name).map(str::to_string).unwrap_or(name)
            };
            match session.switch_persona(&target) {
                Ok(()) => {
                    let description = session
                        .active_persona()
                        .map(|p| p.description.clone())
                        .unwrap_or_default();
                    CommandOutcome::Info(vec![
                        format!("Now chatting with {target}"),
                        description,
                    ])
                }
                Err(e @ ChatError::UnknownPersona(_)) => {
                    let names: Vec<&str> = session.personas().names().collect();
                    CommandOutcome::Error(format!("{e}. Choose one of: {}", names.join(", ")))
                }
                Err(e) => CommandOutcome::Error(e.to_string()),
            }
        }
        Command::Clear => {
            session.clear_memory();
            CommandOutcome::Info(vec!["Memory cleared!".to_string()])
        }
        Command::Export => match session.export_all() {
            Ok(path) => CommandOutcome::Info(vec![format!("Exported to {}", path.display())]),
            Err(e) => {
                error!("Export failed: {e}");
                CommandOutcome::Error("Export failed!".to_string())
            }
        },
        Command::Stats => {
            let stats = session.stats();
            if stats.total_exchanges == 0 {
                return CommandOutcome::Info(vec!["No conversations yet.".to_string()]);
            }
            let mut lines = vec!["Messages by Persona:".to_string()];
            lines.extend(
                stats
                    .by_persona
                    .iter()
                    .map(|(persona, count)| format!("  • {persona}: {count}")),
            );
            lines.push(format!("Total Characters: {}", stats.total_chars));
            CommandOutcome::Info(lines)
        }
        Command::Memory => CommandOutcome::Info(vec![
            format!("Current Persona: {}", session.active_persona_name()),
            format!("Messages: {}", session.state().display_log.len()),
            format!(
                "Shared Memory: {} / {} exchanges (all personas can access this history)",
                session.store().size(),
                session.store().max_size()
            ),
        ]),
        Command::Help => CommandOutcome::Info(HELP_LINES.iter().map(|l| l.to_string()).collect()),
        Command::Quit => CommandOutcome::Quit,
        Command::Unknown(name) => {
            CommandOutcome::Error(format!("Unknown command '/{name}'. Try /help"))
        }
        Command::Empty => CommandOutcome::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::generation::{GenerationError, GenerationParams, TextGenerator, Turn};
    use crate::features::session::SessionSettings;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Fixed;

    #[async_trait]
    impl TextGenerator for Fixed {
        async fn generate(
            &self,
            _turns: &[Turn],
            _params: &GenerationParams,
        ) -> Result<String, GenerationError> {
            Ok("fixed".to_string())
        }

        fn model_id(&self) -> &str {
            "fixed"
        }
    }

    fn session() -> PersonaChatSession {
        PersonaChatSession::new(Arc::new(Fixed), SessionSettings::default(), "RoastBot").unwrap()
    }

    #[tokio::test]
    async fn test_message_produces_reply() {
        let mut session = session();
        let outcome = execute(&mut session, Command::parse("hello")).await;
        match outcome {
            CommandOutcome::Reply(reply) => {
                assert_eq!(reply.text, "fixed");
                assert_eq!(reply.persona, "RoastBot");
            }
            other => panic!("expected reply, got {other:?}"),
        }
        assert_eq!(session.store().size(), 1);
    }

    #[tokio::test]
    async fn test_switch_resolves_friendly_name() {
        let mut session = session();
        let outcome = execute(&mut session, Command::parse("/persona pirate")).await;
        assert!(matches!(outcome, CommandOutcome::Info(_)));
        assert_eq!(session.active_persona_name(), "PirateBot");
    }

    #[tokio::test]
    async fn test_switch_unknown_reports_error_and_keeps_persona() {
        let mut session = session();
        let outcome = execute(&mut session, Command::parse("/persona NinjaBot")).await;
        match outcome {
            CommandOutcome::Error(msg) => {
                assert!(msg.contains("NinjaBot"));
                assert!(msg.contains("PirateBot"));
            }
            other => panic!("expected error, got {other:?}"),
        }
        assert_eq!(session.active_persona_name(), "RoastBot");
    }

    #[tokio::test]
    async fn test_list_marks_active_persona() {
        let mut session = session();
        let CommandOutcome::Info(lines) = execute(&mut session, Command::ListPersonas).await else {
            panic!("expected info");
        };
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("* RoastBot"));
        assert!(lines[4].starts_with("  PirateBot"));
    }

    #[tokio::test]
    async fn test_stats_after_messages() {
        let mut session = session();
        execute(&mut session, Command::parse("hi")).await;
        execute(&mut session, Command::parse("/persona EmojiBot")).await;
        execute(&mut session, Command::parse("yo")).await;

        let CommandOutcome::Info(lines) = execute(&mut session, Command::Stats).await else {
            panic!("expected info");
        };
        assert!(lines.contains(&"  • RoastBot: 1".to_string()));
        assert!(lines.contains(&"  • EmojiBot: 1".to_string()));
        // "hi"+"fixed" + "yo"+"fixed"
        assert_eq!(lines.last().unwrap(), "Total Characters: 14");
    }

    #[tokio::test]
    async fn test_clear_and_quit() {
        let mut session = session();
        execute(&mut session, Command::parse("hi")).await;
        assert!(matches!(
            execute(&mut session, Command::Clear).await,
            CommandOutcome::Info(_)
        ));
        assert_eq!(session.store().size(), 0);
        assert_eq!(execute(&mut session, Command::parse("quit")).await, CommandOutcome::Quit);
        assert_eq!(execute(&mut session, Command::Empty).await, CommandOutcome::Nothing);
    }
}

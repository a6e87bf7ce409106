//! # Persona Chat
//!
//! Line-based chat with five personas that share one memory.
//!
//! Usage: `HF_TOKEN=... cargo run --bin chat`

use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use persona_chat::commands::{execute, Command, CommandOutcome};
use persona_chat::core::{wrap_text, Config};
use persona_chat::features::generation::OpenAiGenerator;
use persona_chat::features::session::PersonaChatSession;

const FALLBACK_WIDTH: usize = 80;

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(FALLBACK_WIDTH)
        .max(20)
}

fn print_banner(session: &PersonaChatSession) {
    println!("🤖 Persona Chat");
    println!("Personas:");
    for (name, description) in session.list_personas() {
        let marker = if name == session.active_persona_name() { "*" } else { " " };
        println!("  {marker} {name:<15} {description}");
    }
    println!("Type /help for commands, quit to leave.\n");
}

fn print_outcome(outcome: &CommandOutcome, width: usize) {
    match outcome {
        CommandOutcome::Reply(reply) => {
            let prefix = format!("{}: ", reply.persona);
            let body_width = width.saturating_sub(prefix.chars().count()).max(10);
            let indent = " ".repeat(prefix.chars().count());
            for (i, line) in wrap_text(&reply.text, body_width).iter().enumerate() {
                if i == 0 {
                    println!("{prefix}{line}");
                } else {
                    println!("{indent}{line}");
                }
            }
            println!();
        }
        CommandOutcome::Info(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        CommandOutcome::Error(message) => println!("❌ {message}"),
        CommandOutcome::Quit => {
            println!("👋 Thanks for chatting! Run again to start a new session.")
        }
        CommandOutcome::Nothing => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            if e.to_string().contains("HF_TOKEN") {
                eprintln!("💡 Please set your HF_TOKEN environment variable");
            }
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!(
        "Starting Persona Chat | model: {} | endpoint: {}",
        config.model, config.base_url
    );

    let generator = Arc::new(OpenAiGenerator::from_config(&config));
    let mut session = PersonaChatSession::from_config(&config, generator).map_err(|e| {
        error!("Failed to start session: {e}");
        anyhow::anyhow!("Session creation failed: {}", e)
    })?;

    print_banner(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You ({}) > ", session.active_persona_name());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            // EOF
            println!();
            break;
        };

        let command = Command::parse(&line);
        if matches!(command, Command::Message(_)) {
            println!("{} is thinking...", session.active_persona_name());
        }

        let outcome = execute(&mut session, command).await;
        print_outcome(&outcome, terminal_width());

        if outcome == CommandOutcome::Quit {
            break;
        }
    }

    info!(
        "Persona Chat shutdown | {} exchanges in memory",
        session.store().size()
    );
    Ok(())
}

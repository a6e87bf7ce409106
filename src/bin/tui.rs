//! # Persona Chat TUI
//!
//! Terminal user interface for chatting with the personas.
//!
//! Usage: `cargo run --features tui --bin persona-tui`

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dotenvy::dotenv;
use log::{error, info};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use persona_chat::commands::Command;
use persona_chat::core::Config;
use persona_chat::features::generation::OpenAiGenerator;
use persona_chat::features::session::PersonaChatSession;
use persona_chat::tui::event::{map_key_event, KeyAction};
use persona_chat::tui::{App, Event, EventHandler};

/// TUI refresh rate
const TICK_RATE: Duration = Duration::from_millis(250);

/// Lines moved per PageUp/PageDown
const SCROLL_STEP: u16 = 5;

#[tokio::main]
async fn main() -> Result<()> {
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

    // Anything louder than warn would draw over the alternate screen
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    info!("Starting Persona Chat TUI | model: {}", config.model);

    let generator = Arc::new(OpenAiGenerator::from_config(&config));
    let session = PersonaChatSession::from_config(&config, generator)
        .map_err(|e| anyhow::anyhow!("Session creation failed: {}", e))?;
    let mut app = App::new(session);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(TICK_RATE);

    // Main loop
    let result = run_app(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("Application error: {}", e);
        return Err(e);
    }

    info!(
        "Persona Chat TUI shutdown complete | {} exchanges in memory",
        app.session.store().size()
    );
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            persona_chat::tui::ui::render(frame, app);
        })?;

        let Some(event) = events.next().await else {
            break;
        };

        match event {
            Event::Key(key) => {
                let action = map_key_event(key);
                handle_action(terminal, app, action).await?;
                if action == KeyAction::Submit {
                    events.drain();
                }
            }
            Event::Resize(_, _) | Event::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_action(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    action: KeyAction,
) -> Result<()> {
    if app.show_help && !matches!(action, KeyAction::ToggleHelp | KeyAction::Quit) {
        app.show_help = false;
        return Ok(());
    }

    match action {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::Submit => {
            let input = app.take_input();
            if matches!(Command::parse(&input), Command::Message(_)) {
                app.begin_request();
                // Draw the thinking indicator before awaiting the reply
                terminal.draw(|frame| {
                    persona_chat::tui::ui::render(frame, app);
                })?;
            }
            app.run_command(&input).await;
        }
        KeyAction::Char(c) => app.push_char(c),
        KeyAction::Backspace => app.backspace(),
        KeyAction::NextPersona => app.cycle_persona(1),
        KeyAction::PreviousPersona => app.cycle_persona(-1),
        KeyAction::ClearMemory => app.clear_memory(),
        KeyAction::Export => app.export(),
        KeyAction::ScrollUp => app.scroll_up(SCROLL_STEP),
        KeyAction::ScrollDown => app.scroll_down(SCROLL_STEP),
        KeyAction::ToggleHelp => app.toggle_help(),
        KeyAction::None => {}
    }

    Ok(())
}

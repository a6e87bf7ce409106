//! # TUI Event Handling
//!
//! Keyboard input and tick event handling.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for periodic updates
    Tick,
}

/// Event handler that combines keyboard and tick events
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => {
                        if tx.send(Event::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            } else if tx.send(Event::Tick).is_err() {
                break;
            }
        });

        EventHandler { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Drop everything queued so far
    ///
    /// Keys pressed while a reply was generating would otherwise replay
    /// into the input line.
    pub fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action
    None,
    /// Quit the application
    Quit,
    /// Submit the input line
    Submit,
    /// Character input
    Char(char),
    /// Backspace
    Backspace,
    /// Switch to the next persona
    NextPersona,
    /// Switch to the previous persona
    PreviousPersona,
    /// Clear shared memory
    ClearMemory,
    /// Export all conversations
    Export,
    /// Scroll chat log up
    ScrollUp,
    /// Scroll chat log down
    ScrollDown,
    /// Show or hide help
    ToggleHelp,
}

/// Map a key event to an action
pub fn map_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => KeyAction::ClearMemory,
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => KeyAction::Export,

        (KeyCode::Enter, _) => KeyAction::Submit,
        (KeyCode::Backspace, _) => KeyAction::Backspace,
        (KeyCode::Tab, _) => KeyAction::NextPersona,
        (KeyCode::BackTab, _) => KeyAction::PreviousPersona,
        (KeyCode::PageUp, _) => KeyAction::ScrollUp,
        (KeyCode::PageDown, _) => KeyAction::ScrollDown,
        (KeyCode::F(1), _) => KeyAction::ToggleHelp,

        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => KeyAction::Char(c),

        _ => KeyAction::None,
    }
}

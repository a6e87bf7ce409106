//! # TUI UI Components
//!
//! Ratatui-based rendering for the chat screen.

mod chat;
mod help;
mod sidebar;

pub use chat::{chat_lines, render_chat};
pub use help::render_help;
pub use sidebar::render_sidebar;

use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Chat + sidebar
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    render_chat(frame, app, main[0]);
    render_sidebar(frame, app, main[1]);
    render_input(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        render_help(frame, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.session.active_persona_name();
    let description = app
        .session
        .active_persona()
        .map(|p| p.description.as_str())
        .unwrap_or_default();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Chatting with {active}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::Gray)),
    ]))
    .block(titled_block("🤖 Persona Chat"));

    frame.render_widget(header, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let busy = app.thinking.is_some();
    let style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let title = format!("Chat with {}", app.session.active_persona_name());
    let input = Paragraph::new(app.input_buffer.as_str())
        .style(style)
        .block(titled_block(&title));
    frame.render_widget(input, area);

    if !busy && !app.show_help {
        let typed = UnicodeWidthStr::width(app.input_buffer.as_str()) as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1 + typed).min(max_x);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let activity = match &app.thinking {
        Some(persona) => Span::styled(
            format!("● {persona} is thinking..."),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled("● Ready", Style::default().fg(Color::Green)),
    };

    let message = if let Some(err) = &app.error_message {
        Span::styled(format!(" Error: {} ", err), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        Span::styled(format!(" {} ", status), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };

    let help_hint = Span::styled(
        " Esc:Quit F1:Help Tab:Persona ",
        Style::default().fg(Color::DarkGray),
    );

    let status_line = Line::from(vec![activity, Span::raw(" |"), message, Span::raw(" "), help_hint]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Helper to create a block with title
pub fn titled_block(title: &str) -> Block {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

/// Rectangle of the given percentage size centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

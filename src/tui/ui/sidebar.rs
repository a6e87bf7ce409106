//! # Sidebar UI
//!
//! Persona list, shared memory and conversation statistics.

use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};

/// Render the sidebar
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let persona_count = app.session.personas().len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(persona_count + 2), // Persona list
            Constraint::Length(5),                 // Active persona
            Constraint::Length(4),                 // Shared memory
            Constraint::Min(0),                    // Stats
        ])
        .split(area);

    render_persona_list(frame, app, chunks[0]);
    render_active_persona(frame, app, chunks[1]);
    render_memory(frame, app, chunks[2]);
    render_stats(frame, app, chunks[3]);
}

fn render_persona_list(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.session.active_persona_name();
    let items: Vec<ListItem> = app
        .session
        .list_personas()
        .into_iter()
        .map(|(name, _)| {
            if name == active {
                ListItem::new(format!("▶ {name}"))
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {name}")).style(Style::default().fg(Color::White))
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(titled_block("🎭 Personas")), area);
}

fn render_active_persona(frame: &mut Frame, app: &App, area: Rect) {
    let text = app
        .session
        .active_persona()
        .map(|p| p.description.clone())
        .unwrap_or_default();

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(titled_block("About"));

    frame.render_widget(paragraph, area);
}

fn render_memory(frame: &mut Frame, app: &App, area: Rect) {
    let store = app.session.store();
    let lines = vec![
        Line::from(vec![
            Span::raw("Messages: "),
            Span::styled(
                format!("{}/{}", store.size(), store.max_size()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(Span::styled(
            "All personas can access this conversation history",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(titled_block("🧠 Shared Memory"));

    frame.render_widget(paragraph, area);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.session.stats();
    let mut lines = Vec::new();

    if stats.total_exchanges == 0 {
        lines.push(Line::from(Span::styled(
            "No conversations yet",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Messages by Persona:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (persona, count) in &stats.by_persona {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(format!("{persona}: "), Style::default().fg(Color::Yellow)),
                Span::raw(count.to_string()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Total Characters: "),
            Span::styled(stats.total_chars.to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("📊 Stats")),
        area,
    );
}

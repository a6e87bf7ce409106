//! # Help UI
//!
//! Keybindings and slash commands.

use crate::commands::HELP_LINES;
use crate::tui::ui::titled_block;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Render the help overlay
pub fn render_help(frame: &mut Frame, area: Rect) {
    let keybindings = vec![
        ("Chat", vec![
            ("Enter", "Send message"),
            ("Backspace", "Delete character"),
            ("PgUp/PgDn", "Scroll conversation"),
        ]),
        ("Personas", vec![
            ("Tab", "Next persona"),
            ("Shift+Tab", "Previous persona"),
        ]),
        ("Memory", vec![
            ("Ctrl+l", "Clear shared memory"),
            ("Ctrl+e", "Export all conversations"),
        ]),
        ("General", vec![
            ("F1", "Toggle this help"),
            ("Esc / Ctrl+c", "Quit application"),
        ]),
    ];

    let mut lines = vec![];

    for (section, bindings) in keybindings {
        lines.push(Line::from(vec![Span::styled(
            section,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]));

        for (key, desc) in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(Color::Cyan)),
                Span::raw(desc),
            ]));
        }

        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![Span::styled(
        "Commands",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )]));
    for line in HELP_LINES {
        lines.push(Line::from(format!("  {line}")));
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Keybindings"))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

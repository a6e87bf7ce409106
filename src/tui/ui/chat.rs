//! # Chat UI
//!
//! Conversation log with user and persona-tagged messages.

use crate::core::wrap_text;
use crate::features::session::{DisplayMessage, Speaker};
use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Build the wrapped transcript lines for a given inner width
///
/// Wrapping happens here rather than in the widget so the scroll position
/// can be computed from the exact line count.
pub fn chat_lines<'a>(
    messages: &'a [DisplayMessage],
    thinking: Option<&str>,
    width: usize,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let width = width.max(10);

    for message in messages {
        let (header, color) = match message.speaker {
            Speaker::User => ("👤 You:".to_string(), Color::Cyan),
            Speaker::Assistant => (
                format!("🤖 {}:", message.persona.as_deref().unwrap_or("Bot")),
                Color::Yellow,
            ),
        };

        lines.push(Line::from(vec![
            Span::styled(header, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" {}", message.timestamp.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        for wrapped in wrap_text(&message.content, width.saturating_sub(2)) {
            lines.push(Line::from(format!("  {wrapped}")));
        }
        lines.push(Line::from(""));
    }

    if let Some(persona) = thinking {
        lines.push(Line::from(Span::styled(
            format!("🤖 {persona} is thinking..."),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

/// Render the conversation log
pub fn render_chat(frame: &mut Frame, app: &mut App, area: Rect) {
    let log = app.session.state().display_log.clone();
    let block = titled_block("Conversation");

    if log.is_empty() && app.thinking.is_none() {
        app.set_max_scroll(0);
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No messages yet. Say hello!",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let lines = chat_lines(&log, app.thinking.as_deref(), inner_width);

    // Stick to the bottom, then move up by the user's scroll offset
    let max_scroll = lines.len().saturating_sub(inner_height).min(u16::MAX as usize);
    app.set_max_scroll(max_scroll as u16);
    let scroll = max_scroll - app.scroll_offset as usize;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_lines_layout() {
        let messages = vec![
            DisplayMessage::user("hello"),
            DisplayMessage::assistant("PirateBot", "Ahoy matey"),
        ];
        let lines = chat_lines(&messages, None, 40);

        // header + body + spacer per message
        assert_eq!(lines.len(), 6);
        assert!(lines[0].spans[0].content.contains("You"));
        assert!(lines[3].spans[0].content.contains("PirateBot"));
        assert_eq!(lines[4].spans[0].content, "  Ahoy matey");
    }

    #[test]
    fn test_chat_lines_thinking_indicator() {
        let lines = chat_lines(&[], Some("EmojiBot"), 40);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans[0].content.contains("EmojiBot is thinking"));
    }
}

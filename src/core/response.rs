//! Reply rendering and terminal text utilities
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: wrap_text measures terminal columns so wide glyphs no longer overflow
//! - 1.1.0: Add wrap_text for the line REPL
//! - 1.0.0: Error sentinel rendering and UTF-8 safe previews

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::features::generation::GenerationError;

/// Prefix of the text recorded in place of a bot reply when generation fails
pub const ERROR_SENTINEL_PREFIX: &str = "🚨 Oops! I encountered an error:";

/// Turn a generation outcome into the text shown to the user and kept in memory.
///
/// Failures become an ordinary message so a broken backend never ends the chat.
pub fn render_reply(outcome: &Result<String, GenerationError>) -> String {
    match outcome {
        Ok(text) => text.clone(),
        Err(e) => format!("{ERROR_SENTINEL_PREFIX} {e}"),
    }
}

pub fn is_error_sentinel(text: &str) -> bool {
    text.starts_with(ERROR_SENTINEL_PREFIX)
}

/// Truncate to at most `max_chars` characters, appending "..." when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Wrap text to `width` columns (counted in chars), preserving line breaks.
///
/// Words longer than the width are split at character boundaries.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;

        for word in raw_line.split_whitespace() {
            let word_len = UnicodeWidthStr::width(word);

            if word_len > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let mut pieces = split_long_word(word, width);
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current_len = UnicodeWidthStr::width(last.as_str());
                    current = last;
                }
                continue;
            }

            let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_len = needed;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut columns = 0;

    for ch in word.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        // A glyph wider than the line still gets a line of its own
        if columns + ch_width > width && !current.is_empty() {
            result.push(std::mem::take(&mut current));
            columns = 0;
        }
        current.push(ch);
        columns += ch_width;
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

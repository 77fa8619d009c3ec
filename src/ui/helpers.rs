//! Shared rendering utilities and helpers.
//!
//! Components write into a frame buffer (`String`) instead of stdout so a whole
//! frame is flushed at once and rendering can be inspected in tests.
//!
//! # Features
//!
//! - **Match Highlighting**: Renders text with highlighted character ranges
//! - **Width Handling**: Truncates and pads by character count, not bytes
//! - **Wrapping**: Word-wraps long lines for the detail modal
//!
//! # Example
//!
//! ```rust
//! use zellidex::ui::helpers::push_highlighted_text;
//! use zellidex::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut out = String::new();
//! push_highlighted_text(&mut out, "PIKACHU", &[(0, 4)], &theme, ("#000000", "#f59e0b"));
//! assert!(out.ends_with("CHU"));
//! ```

use crate::ui::theme::Theme;
use std::fmt::Write;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Appends `text` with highlighted character ranges for search matches.
///
/// Ranges use character indices, `(start, end)` with exclusive end. After each
/// highlighted section the `restore` colours (`(fg, bg)`) are re-applied so the
/// rest of the text keeps the surrounding style.
pub fn push_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    restore: (&str, &str),
) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(&Theme::fg(restore.0));
        out.push_str(&Theme::bg(restore.1));

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Right-pads `text` with spaces to exactly `width` characters, truncating if longer.
#[must_use]
pub fn pad_to(text: &str, width: usize) -> String {
    let truncated = truncate(text, width);
    let len = truncated.chars().count();
    format!("{truncated}{}", " ".repeat(width - len))
}

/// Greedy word wrap at `width` characters; words longer than a line are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }

        let line_len = line.chars().count();
        if line_len > 0 && line_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pad_to_counts_characters() {
        assert_eq!(pad_to("FLABÉBÉ", 9), "FLABÉBÉ  ");
        assert_eq!(pad_to("BULBASAUR", 4), "BULB");
    }

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("Moves: razor-wind, swords-dance, cut", 20),
            vec!["Moves: razor-wind,", "swords-dance, cut"]
        );
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert!(wrap_text("anything", 0).is_empty());
    }

    #[test]
    fn highlight_restores_surrounding_colours() {
        let theme = Theme::default();
        let mut out = String::new();
        push_highlighted_text(&mut out, "ABRA", &[(1, 2)], &theme, ("#000000", "#ffffff"));

        let highlight = format!(
            "{}{}B{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::fg("#000000"),
            Theme::bg("#ffffff"),
        );
        assert_eq!(out, format!("A{highlight}RA"));
    }

    #[test]
    fn highlight_ignores_out_of_range() {
        let theme = Theme::default();
        let mut out = String::new();
        push_highlighted_text(&mut out, "MEW", &[(5, 9)], &theme, ("#000000", "#ffffff"));
        assert_eq!(out, "MEW");
    }
}

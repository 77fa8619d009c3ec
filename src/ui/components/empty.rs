//! Empty state component renderer.
//!
//! Shown in place of the card grid when nothing is visible: before the first
//! page arrives, while it loads, or when the active filter matches nothing.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at `row`.
///
/// The message uses the `empty_state_fg` theme color, and the subtitle uses
/// `text_dim` with dim styling.
///
/// # Returns
///
/// The row after the subtitle.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    render_centered(out, row, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    render_centered(out, row + 1, &empty.subtitle, &subtitle_style, cols);
    row + 2
}

fn render_centered(out: &mut String, row: usize, text: &str, style: &str, cols: usize) {
    let len = text.chars().count();
    let padding = (cols.saturating_sub(len)) / 2;

    position_cursor(out, row, 1);
    out.push_str(style);
    out.push_str(&" ".repeat(padding));
    out.push_str(text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
    out.push_str(Theme::reset());
}

//! Load-more line renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoadMoreState;

/// Renders the load-more affordance centered on `row`.
///
/// Nothing but a blank line is drawn once the catalog is exhausted.
pub fn render_load_more(out: &mut String, row: usize, state: LoadMoreState, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match state {
        LoadMoreState::Hidden => ("", &theme.colors.text_dim),
        LoadMoreState::Available => ("[ m ] Load more", &theme.colors.header_fg),
        LoadMoreState::Loading => ("Loading...", &theme.colors.text_dim),
    };

    let len = text.chars().count();
    let padding = (cols.saturating_sub(len)) / 2;

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&" ".repeat(padding));
    out.push_str(text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
    out.push_str(Theme::reset());
    row + 1
}

//! Detail modal renderer.
//!
//! Drawn last, over whatever the grid rendered, as a framed box centered in the
//! pane and filled with the creature's type colour.

use crate::ui::helpers::{pad_to, position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

const MAX_MODAL_WIDTH: usize = 60;
const DISMISS_HINT: &str = "ESC / Enter to close";

/// Renders the detail modal overlay.
pub fn render_detail(out: &mut String, detail: &DetailView, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_MODAL_WIDTH);
    if width < 10 {
        return;
    }
    let inner = width - 4;

    let mut lines = vec![detail.name.clone(), String::new()];
    lines.extend(wrap_text(&detail.image, inner));
    lines.push(detail.types.clone());
    lines.push(detail.weight.clone());
    lines.push(detail.height.clone());
    lines.extend(wrap_text(&detail.moves, inner));
    lines.push(String::new());
    lines.push(DISMISS_HINT.to_string());

    let max_lines = rows.saturating_sub(4);
    lines.truncate(max_lines);

    let height = lines.len() + 2;
    let top = (rows.saturating_sub(height)) / 2 + 1;
    let left = (cols.saturating_sub(width)) / 2 + 1;

    let border = Theme::fg(&theme.colors.modal_border);
    let fill = Theme::bg(&detail.background);
    let text = Theme::fg(&detail.foreground);

    position_cursor(out, top, left);
    out.push_str(&fill);
    out.push_str(&border);
    out.push('╭');
    out.push_str(&"─".repeat(width - 2));
    out.push('╮');

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(out, top + 1 + offset, left);
        out.push_str(&border);
        out.push('│');
        out.push_str(&text);
        if offset == 0 {
            out.push_str(Theme::bold());
        }
        out.push(' ');
        out.push_str(&pad_to(line, inner));
        out.push(' ');
        out.push_str(Theme::reset());
        out.push_str(&fill);
        out.push_str(&border);
        out.push('│');
    }

    position_cursor(out, top + height - 1, left);
    out.push_str(&border);
    out.push('╰');
    out.push_str(&"─".repeat(width - 2));
    out.push('╯');
    out.push_str(Theme::reset());
}

//! Category bar component renderer.
//!
//! One chip per category plus `all`. The bar rarely fits on one line, so it
//! scrolls to keep the active chip on screen, marking hidden chips with `‹`/`›`.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CategoryBarInfo, CategoryChip};

/// Columns reserved on each side for the overflow markers.
const MARKER_WIDTH: usize = 2;

/// Renders the category bar at the specified row.
///
/// The active chip is drawn reversed in its own colour; the others are drawn
/// as coloured text.
pub fn render_category_bar(out: &mut String, row: usize, bar: &CategoryBarInfo, theme: &Theme, cols: usize) -> usize {
    let widths: Vec<usize> = bar.chips.iter().map(chip_width).collect();
    let active = bar.chips.iter().position(|chip| chip.is_active).unwrap_or(0);
    let (start, end) = chip_window(&widths, active, cols.saturating_sub(MARKER_WIDTH * 2));

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(if start > 0 { "‹ " } else { "  " });

    let mut used = MARKER_WIDTH;
    for chip in &bar.chips[start..end] {
        if chip.is_active {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&chip.color));
        } else {
            out.push_str(&Theme::fg(&chip.color));
        }
        out.push(' ');
        out.push_str(&chip.label);
        out.push(' ');
        out.push_str(Theme::reset());
        out.push(' ');
        used += chip_width(chip);
    }

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    if end < bar.chips.len() {
        out.push_str(&" ".repeat(cols.saturating_sub(used + 1)));
        out.push('›');
    } else {
        out.push_str(&" ".repeat(cols.saturating_sub(used)));
    }
    out.push_str(Theme::reset());
    row + 1
}

/// Width of a chip including its padding and trailing gap.
fn chip_width(chip: &CategoryChip) -> usize {
    chip.label.chars().count() + 3
}

/// The half-open range of chips that fits in `width` and contains `active`.
///
/// Prefers starting at the first chip; scrolls right only as far as needed.
fn chip_window(widths: &[usize], active: usize, width: usize) -> (usize, usize) {
    if widths.is_empty() {
        return (0, 0);
    }
    let active = active.min(widths.len() - 1);

    let mut start = 0;
    while start < active && widths[start..=active].iter().sum::<usize>() > width {
        start += 1;
    }

    let mut end = start;
    let mut used = 0;
    while end < widths.len() && used + widths[end] <= width {
        used += widths[end];
        end += 1;
    }

    (start, end.max(active + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn window_starts_at_first_chip_when_active_fits() {
        assert_eq!(chip_window(&[5, 5, 5, 5], 1, 12), (0, 2));
    }

    #[test]
    fn window_scrolls_to_active_chip() {
        assert_eq!(chip_window(&[5, 5, 5, 5], 3, 12), (2, 4));
    }

    #[test]
    fn window_always_contains_active_even_when_too_narrow() {
        assert_eq!(chip_window(&[5, 9, 5], 1, 4), (1, 2));
        assert_eq!(chip_window(&[], 0, 80), (0, 0));
    }

    #[test]
    fn overflow_marker_shown_when_chips_hidden() {
        let chips = ["all", "normal", "fire", "water"]
            .iter()
            .map(|label| CategoryChip {
                label: (*label).to_string(),
                color: "#ffffff".to_string(),
                is_active: *label == "all",
            })
            .collect();
        let mut out = String::new();
        render_category_bar(&mut out, 4, &CategoryBarInfo { chips }, &Theme::default(), 20);

        assert!(out.contains(" all "));
        assert!(out.contains('›'));
        assert!(!out.contains('‹'));
    }
}

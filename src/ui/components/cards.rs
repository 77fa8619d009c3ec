//! Card grid renderer.
//!
//! Each card is a block of [`CARD_HEIGHT`] rows by [`CARD_WIDTH`] columns,
//! painted in its creature's type colour:
//!
//! ```text
//! ┌────────────────────┐
//! │ ▸ BULBASAUR        │
//! │ 1.png              │
//! │ GRASS              │
//! └────────────────────┘
//! ```
//!
//! The frame is drawn only around the selected card; other cards get a
//! same-coloured blank edge so the grid does not shift when selection moves.

use crate::ui::helpers::{self, pad_to, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

/// Card width in columns, frame included.
pub const CARD_WIDTH: usize = 22;

/// Rows per card, frame included.
pub const CARD_HEIGHT: usize = 5;

/// Columns between neighbouring cards.
pub const CARD_GAP: usize = 1;

const INNER_WIDTH: usize = CARD_WIDTH - 2;

/// Renders `cards` left to right, top to bottom, `columns` per row.
///
/// # Returns
///
/// The row after the last card row.
pub fn render_card_grid(out: &mut String, row: usize, cards: &[CardItem], columns: usize, theme: &Theme) -> usize {
    let columns = columns.max(1);
    let mut next_row = row;

    for (index, card) in cards.iter().enumerate() {
        let top = row + (index / columns) * CARD_HEIGHT;
        let left = (index % columns) * (CARD_WIDTH + CARD_GAP) + 1;
        render_card(out, top, left, card, theme);
        next_row = top + CARD_HEIGHT;
    }

    next_row
}

fn render_card(out: &mut String, top: usize, left: usize, card: &CardItem, theme: &Theme) {
    let fill = Theme::bg(&card.background);
    let text = Theme::fg(&card.foreground);
    let (frame, edges) = if card.is_selected {
        (Theme::fg(&theme.colors.selection_bg), ('┌', '┐', '└', '┘', '─', '│'))
    } else {
        (text.clone(), (' ', ' ', ' ', ' ', ' ', ' '))
    };
    let (top_left, top_right, bottom_left, bottom_right, horizontal, vertical) = edges;

    position_cursor(out, top, left);
    out.push_str(&fill);
    out.push_str(&frame);
    out.push(top_left);
    out.push_str(&horizontal.to_string().repeat(INNER_WIDTH));
    out.push(top_right);

    // Name line, with search matches highlighted.
    position_cursor(out, top + 1, left);
    out.push(vertical);
    out.push_str(&text);
    if card.is_selected {
        out.push_str(Theme::bold());
        out.push_str(" ▸ ");
    } else {
        out.push_str("   ");
    }
    let name = truncate(&card.name, INNER_WIDTH - 3);
    helpers::push_highlighted_text(out, &name, &card.highlight_ranges, theme, (&card.foreground, &card.background));
    out.push_str(&" ".repeat(INNER_WIDTH - 3 - name.chars().count()));
    out.push_str(Theme::reset());
    out.push_str(&fill);
    out.push_str(&frame);
    out.push(vertical);

    for (offset, line) in [&card.image_label, &card.type_label].into_iter().enumerate() {
        position_cursor(out, top + 2 + offset, left);
        out.push(vertical);
        out.push_str(&text);
        out.push_str(&pad_to(&format!("   {line}"), INNER_WIDTH));
        out.push_str(&frame);
        out.push(vertical);
    }

    position_cursor(out, top + 4, left);
    out.push(bottom_left);
    out.push_str(&horizontal.to_string().repeat(INNER_WIDTH));
    out.push(bottom_right);
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, selected: bool) -> CardItem {
        CardItem {
            name: name.to_string(),
            image_label: format!("{}.png", name.to_lowercase()),
            type_label: "FIRE".to_string(),
            background: "#EF4444".to_string(),
            foreground: "#F9FAFB".to_string(),
            is_selected: selected,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn grid_places_cards_by_column() {
        let mut out = String::new();
        let next = render_card_grid(&mut out, 5, &[card("A", false), card("B", false), card("C", false)], 2, &Theme::default());

        assert_eq!(next, 5 + 2 * CARD_HEIGHT);
        assert!(out.contains("\u{1b}[5;1H"));
        assert!(out.contains(&format!("\u{1b}[5;{}H", CARD_WIDTH + CARD_GAP + 1)));
        assert!(out.contains(&format!("\u{1b}[{};1H", 5 + CARD_HEIGHT)));
    }

    #[test]
    fn only_selected_card_is_framed() {
        let mut out = String::new();
        render_card_grid(&mut out, 1, &[card("VULPIX", true)], 1, &Theme::default());
        assert!(out.contains('┌'));
        assert!(out.contains("▸ "));

        let mut out = String::new();
        render_card_grid(&mut out, 1, &[card("VULPIX", false)], 1, &Theme::default());
        assert!(!out.contains('┌'));
        assert!(out.contains("VULPIX"));
        assert!(out.contains("vulpix.png"));
    }
}

//! Composable UI component renderers.
//!
//! Each component writes one part of the interface into the frame buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with catalog counts
//! - [`categories`]: Scrolling category selector
//! - [`search`]: Search input box (border, query text)
//! - [`cards`]: Creature card grid
//! - [`empty`]: Message shown instead of the grid when nothing is visible
//! - [`load_more`]: Load-more affordance
//! - [`footer`]: Help text and keybinding hints
//! - [`detail`]: Modal overlay for one creature
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Category bar]
//! [Search Bar - 3 lines, search mode only]
//! [Card grid or empty state]
//! [Load more]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod categories;
mod detail;
mod empty;
mod footer;
mod header;
mod load_more;
mod search;

pub use cards::{CARD_GAP, CARD_HEIGHT, CARD_WIDTH};

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use cards::render_card_grid;
use categories::render_category_bar;
use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use load_more::render_load_more;
use search::render_search_bar;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders a full frame for `vm` into `out`.
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_category_bar(out, current_row, &vm.category_bar, theme, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(out, current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, current_row + 2, empty, theme, cols);
    } else {
        render_card_grid(out, current_row, &vm.cards, vm.columns, theme);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let load_more_row = border_row.saturating_sub(1);

    render_load_more(out, load_more_row, vm.load_more, theme, cols);
    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_start, &vm.footer, theme, cols);

    if let Some(detail) = &vm.detail {
        render_detail(out, detail, theme, rows, cols);
    }
}

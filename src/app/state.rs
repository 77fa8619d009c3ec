//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin.
//! It owns the [`Catalog`] and its [`Fetcher`], the active [`Predicate`], the
//! derived list of visible creatures, the selection, and the modal state.
//!
//! # State Components
//!
//! - **Catalog**: Every creature fetched so far plus the next-page cursor
//! - **Visible**: The catalog filtered by the active predicate
//! - **Predicate**: Last text search or category selection (never both)
//! - **Selection**: Cursor position within the visible cards
//! - **Modal**: Hidden, or showing one creature's details
//!
//! # Example
//!
//! ```rust
//! use zellidex::app::AppState;
//! use zellidex::catalog::Catalog;
//! use zellidex::ui::Theme;
//!
//! let mut state = AppState::new(Catalog::new("https://pokeapi.co/api/v2/pokemon?limit=150"), Theme::default());
//! state.apply_filter();
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.cards.is_empty());
//! ```

use super::modes::{InputMode, ModalState, SearchFocus};
use crate::catalog::{Catalog, Fetcher, LoadedPage, Predicate, ALL_CATEGORIES, CATEGORIES};
use crate::domain::Creature;
use crate::ui::components::{CARD_GAP, CARD_HEIGHT, CARD_WIDTH};
use crate::ui::palette;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, CategoryBarInfo, CategoryChip, DetailView, EmptyState, FooterInfo, HeaderInfo,
    LoadMoreState, SearchBarInfo, UIViewModel,
};

/// Longest name shown on a card before truncation.
const CARD_NAME_WIDTH: usize = CARD_WIDTH - 5;

/// Rows used by the header, category bar, load-more line, borders and footer.
const NORMAL_CHROME_ROWS: usize = 8;

/// Extra rows used by the search box.
const SEARCH_BAR_ROWS: usize = 3;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Every creature fetched so far, in arrival order.
    pub catalog: Catalog,

    /// The single in-flight page load, if any.
    pub fetcher: Fetcher,

    /// Creatures passing the active predicate.
    ///
    /// Recomputed by `apply_filter()` after every predicate change and after
    /// every catalog append.
    pub visible: Vec<Creature>,

    /// The filter the user last chose.
    pub predicate: Predicate,

    /// Zero-based index of the selected card within `visible`.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Current search query string.
    pub search_query: String,

    /// Detail modal visibility.
    pub modal: ModalState,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a new application state around an (empty) catalog.
    #[must_use]
    pub fn new(catalog: Catalog, theme: Theme) -> Self {
        Self {
            catalog,
            fetcher: Fetcher::new(),
            visible: vec![],
            predicate: Predicate::default(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            modal: ModalState::Hidden,
            theme,
        }
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Returns the currently selected creature, if any.
    #[must_use]
    pub fn selected_creature(&self) -> Option<&Creature> {
        self.visible.get(self.selected_index)
    }

    /// Re-runs the active predicate over the catalog.
    ///
    /// Updates `visible` and clamps `selected_index` to valid bounds.
    pub fn apply_filter(&mut self) {
        let _span = tracing::debug_span!("apply_filter",
            total_creatures = self.catalog.len(),
            predicate = ?self.predicate
        )
        .entered();

        self.visible = self.predicate.apply(self.catalog.creatures());

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }
    }

    /// Replaces the active predicate with a text search for `search_query`.
    pub fn search_by_text(&mut self) {
        self.predicate = Predicate::Text(self.search_query.clone());
        self.apply_filter();
    }

    /// Replaces the active predicate with a category filter.
    ///
    /// Clears any search text, since only one filter is active at a time.
    pub fn select_category(&mut self, category: &str) {
        tracing::debug!(category = %category, "category selected");
        self.search_query.clear();
        self.predicate = Predicate::Category(category.to_lowercase());
        self.selected_index = 0;
        self.apply_filter();
    }

    /// Drops any filter and shows the whole catalog.
    pub fn clear_filter(&mut self) {
        self.search_query.clear();
        self.predicate = Predicate::default();
        self.apply_filter();
    }

    /// The category currently filtering the grid; `"all"` when searching by text.
    #[must_use]
    pub fn active_category(&self) -> &str {
        match &self.predicate {
            Predicate::Category(category) => category,
            Predicate::Text(_) => ALL_CATEGORIES,
        }
    }

    /// Steps the category selector forwards or backwards, wrapping around.
    pub fn cycle_category(&mut self, forward: bool) {
        let choices = category_choices();
        let current = choices
            .iter()
            .position(|choice| choice.eq_ignore_ascii_case(self.active_category()))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % choices.len()
        } else {
            (current + choices.len() - 1) % choices.len()
        };
        self.select_category(choices[next]);
    }

    /// Appends a completed page and re-applies the active predicate.
    pub fn append_page(&mut self, page: LoadedPage) {
        self.catalog.append_page(page.creatures, page.next);
        self.apply_filter();
    }

    /// Computes a renderable UI view model from current state and pane dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Derive the grid column count from the pane width
    /// 2. Derive how many card rows fit after subtracting UI chrome
    /// 3. Center the window on the row holding the selected card
    /// 4. Clamp the window so the last card row is flush with the bottom
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let columns = Self::grid_columns(cols);
        let visible_rows = self.calculate_available_rows(rows) / CARD_HEIGHT;

        let (cards, selected_index) = if self.visible.is_empty() || visible_rows == 0 {
            (vec![], 0)
        } else {
            let total_rows = self.visible.len().div_ceil(columns);
            let selected_row = self.selected_index / columns;

            let mut start_row = selected_row.saturating_sub(visible_rows / 2);
            if start_row + visible_rows > total_rows {
                start_row = total_rows.saturating_sub(visible_rows);
            }

            let start = start_row * columns;
            let end = ((start_row + visible_rows) * columns).min(self.visible.len());

            let cards = self.visible[start..end]
                .iter()
                .enumerate()
                .map(|(relative_idx, creature)| self.compute_card(creature, start + relative_idx))
                .collect();

            (cards, self.selected_index.saturating_sub(start))
        };

        UIViewModel {
            cards,
            selected_index,
            columns,
            header: self.compute_header(),
            footer: self.compute_footer(),
            category_bar: self.compute_category_bar(),
            search_bar: self.compute_search_bar(),
            empty_state: self.compute_empty_state(),
            load_more: self.load_more_state(),
            detail: self.modal.creature().map(Self::compute_detail),
        }
    }

    /// Load-more affordance derived from the fetcher and the cursor.
    #[must_use]
    pub const fn load_more_state(&self) -> LoadMoreState {
        if self.fetcher.is_loading() {
            LoadMoreState::Loading
        } else if self.catalog.is_exhausted() {
            LoadMoreState::Hidden
        } else {
            LoadMoreState::Available
        }
    }

    fn compute_card(&self, creature: &Creature, absolute_idx: usize) -> CardItem {
        let primary = creature.primary_type().unwrap_or("unknown");
        let background = palette::type_color(primary);

        let name = creature.name.to_uppercase();
        let name = if name.chars().count() > CARD_NAME_WIDTH {
            let kept: String = name.chars().take(CARD_NAME_WIDTH - 3).collect();
            format!("{kept}...")
        } else {
            name
        };

        let highlight_ranges = match &self.predicate {
            Predicate::Text(query) if !query.is_empty() => match_ranges(&name, query),
            _ => vec![],
        };

        CardItem {
            name,
            image_label: creature.image_label().to_string(),
            type_label: primary.to_uppercase(),
            background: background.to_string(),
            foreground: palette::readable_fg(background).to_string(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_detail(creature: &Creature) -> DetailView {
        let background = palette::type_color(creature.primary_type().unwrap_or("unknown"));
        DetailView {
            name: creature.name.to_uppercase(),
            image: creature
                .image_url
                .clone()
                .unwrap_or_else(|| "no sprite".to_string()),
            types: format!("Type: {}", creature.types.join(", ")),
            weight: format!("Weight: {} kg", creature.weight_kg()),
            height: format!("Height: {} m", creature.height_m()),
            moves: format!("Moves: {}", creature.moves.join(", ")),
            background: background.to_string(),
            foreground: palette::readable_fg(background).to_string(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let shown = self.visible.len();
        let total = self.catalog.len();
        let title = if self.predicate.is_unfiltered() {
            format!(" Zellidex ({total}) ")
        } else {
            format!(" Zellidex ({shown} of {total}) ")
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.modal.is_shown() {
            "ESC/Enter/q: close details".to_string()
        } else {
            match self.input_mode {
                InputMode::Search(SearchFocus::Typing) => {
                    "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter".to_string()
                }
                InputMode::Search(SearchFocus::Navigating) => {
                    "ESC: exit search  /: edit query  j/k: navigate  Enter: details".to_string()
                }
                InputMode::Normal => {
                    "j/k: navigate  /: search  [ ]: type  a: all  m: more  Enter: details  q: quit".to_string()
                }
            }
        };

        FooterInfo { keybindings }
    }

    fn compute_category_bar(&self) -> CategoryBarInfo {
        let active = self.active_category();
        let chips = category_choices()
            .into_iter()
            .map(|choice| CategoryChip {
                label: choice.to_string(),
                color: if choice == ALL_CATEGORIES {
                    self.theme.colors.header_fg.clone()
                } else {
                    palette::type_color(choice).to_string()
                },
                is_active: choice.eq_ignore_ascii_case(active),
            })
            .collect();
        CategoryBarInfo { chips }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        if matches!(self.input_mode, InputMode::Search(_)) {
            Some(SearchBarInfo {
                query: self.search_query.clone(),
            })
        } else {
            None
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.visible.is_empty() {
            return None;
        }

        let (message, subtitle) = if !self.catalog.is_empty() {
            ("No creatures match", "ESC clears the filter")
        } else if self.fetcher.is_loading() {
            ("Loading creatures...", "Fetching the first page")
        } else if self.catalog.is_exhausted() {
            ("The catalog is empty", "Nothing more to load")
        } else {
            ("No creatures loaded", "Press m to load a page")
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    /// Calculates rows available for the card grid after subtracting UI chrome.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(NORMAL_CHROME_ROWS),
            InputMode::Search(_) => total_rows.saturating_sub(NORMAL_CHROME_ROWS + SEARCH_BAR_ROWS),
        }
    }

    fn grid_columns(cols: usize) -> usize {
        ((cols + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1)
    }
}

/// "all" followed by every category, in display order.
fn category_choices() -> Vec<&'static str> {
    std::iter::once(ALL_CATEGORIES).chain(CATEGORIES).collect()
}

/// Character ranges in `text` where `query` occurs, case-insensitively.
fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    let needle: Vec<char> = query.to_lowercase().chars().collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

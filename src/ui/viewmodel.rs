//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! upper-cased names, resolved colours, formatted units and highlight ranges.

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Cards inside the visible window, in catalog order.
    pub cards: Vec<CardItem>,

    /// Index of the selected card within `cards`.
    pub selected_index: usize,

    /// Number of cards per grid row.
    pub columns: usize,

    /// Header information (title, counts).
    pub header: HeaderInfo,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Category selector line.
    pub category_bar: CategoryBarInfo,

    /// Optional search bar information (when in search mode).
    pub search_bar: Option<SearchBarInfo>,

    /// Optional empty state message (when no cards are visible).
    pub empty_state: Option<EmptyState>,

    /// Load-more affordance.
    pub load_more: LoadMoreState,

    /// Detail modal contents, when the modal is shown.
    pub detail: Option<DetailView>,
}

/// Display information for one creature card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Upper-cased, width-limited name.
    pub name: String,

    /// Sprite file name standing in for the image.
    pub image_label: String,

    /// Upper-cased primary type.
    pub type_label: String,

    /// Card background (hex), from the primary type.
    pub background: String,

    /// Card text colour (hex), readable on `background`.
    pub foreground: String,

    /// Whether this card is currently selected.
    pub is_selected: bool,

    /// Character ranges of `name` matching the search text.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No creatures match").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}

/// The category selector, one chip per category plus "all".
#[derive(Debug, Clone)]
pub struct CategoryBarInfo {
    pub chips: Vec<CategoryChip>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChip {
    pub label: String,
    /// Chip colour (hex).
    pub color: String,
    pub is_active: bool,
}

/// Load-more affordance, reconciled from the cursor after every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreState {
    /// The catalog is exhausted.
    Hidden,
    /// Another page can be requested.
    Available,
    /// A page load is in flight.
    Loading,
}

/// Pre-formatted detail modal lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub name: String,
    pub image: String,
    pub types: String,
    pub weight: String,
    pub height: String,
    pub moves: String,
    /// Modal background (hex), from the primary type.
    pub background: String,
    pub foreground: String,
}

//! Input and modal state types for the application.
//!
//! These enums determine which keybindings are active and whether the detail
//! view is covering the card grid.
//!
//! # State Machine
//!
//! The application operates in one of two input modes:
//! - **Normal**: Card navigation, category selection, load more
//! - **Search**: Active search with typing or result navigation focus
//!
//! Independently, the detail modal is either hidden or showing exactly one
//! creature. It only opens from `Hidden` and only closes on explicit dismissal.
//!
//! # Example
//!
//! ```rust
//! use zellidex::app::modes::{InputMode, ModalState, SearchFocus};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! let modal = ModalState::Hidden;
//! assert!(!modal.is_shown());
//! ```

use crate::domain::Creature;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through filtered search results.
    ///
    /// Accepts j/k for movement, enter to open details, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), / (search), [ ] (category),
    /// a (all categories), m (load more), enter (details), q (quit).
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),
}

/// Detail modal visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    /// Showing the details of one creature.
    Shown(Box<Creature>),
}

impl ModalState {
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        matches!(self, Self::Shown(_))
    }

    /// The creature on display, if any.
    #[must_use]
    pub fn creature(&self) -> Option<&Creature> {
        match self {
            Self::Hidden => None,
            Self::Shown(creature) => Some(&**creature),
        }
    }
}

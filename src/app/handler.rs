//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! host responses, translating them into state changes and action sequences.
//! It serves as the primary control flow coordinator for the application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenDetail`, `CloseDetail`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Filtering**: `SearchMode`, `NextCategory`, `PreviousCategory`, `SelectCategory`
//! - **Loading**: `LoadMore`, `PermissionsResult`, `WebResponse`
//!
//! # Example
//!
//! ```rust
//! use zellidex::app::{handle_event, AppState, Event};
//! use zellidex::catalog::Catalog;
//! use zellidex::ui::Theme;
//!
//! let mut state = AppState::new(Catalog::new("https://pokeapi.co/api/v2/pokemon"), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::LoadMore)?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::{InputMode, ModalState, SearchFocus};
use crate::app::{Action, AppState};
use crate::catalog::{FetchProgress, Predicate, RequestTag};
use crate::domain::error::Result;

/// Events triggered by user input or host responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Opens the detail modal for the selected card.
    OpenDetail,
    /// Dismisses the detail modal.
    CloseDetail,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the filtered cards (from typing mode).
    FocusResults,
    /// Exits search mode and drops the text filter.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Clears any filter and returns to normal mode.
    Escape,

    /// Selects the category after the active one.
    NextCategory,
    /// Selects the category before the active one.
    PreviousCategory,
    /// Selects a category by name; `"all"` removes the category filter.
    SelectCategory(String),

    /// Requests the page at the catalog cursor.
    ///
    /// Ignored while a page is in flight or once the catalog is exhausted.
    LoadMore,

    /// Reports whether the user granted the permissions the plugin asked for.
    ///
    /// The first page is requested once web access is available.
    PermissionsResult {
        granted: bool,
    },

    /// A host HTTP response for a request issued by [`Action::Fetch`].
    WebResponse {
        /// Tag recovered from the request context.
        tag: RequestTag,
        status: u16,
        body: Vec<u8>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. Actions are executed in order by the
/// plugin runtime.
///
/// # Errors
///
/// Currently infallible; fetch failures are logged and absorbed so the catalog
/// stays as it was before the failed attempt.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    if state.modal.is_shown() {
        return Ok(handle_modal_event(state, event));
    }

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::OpenDetail => {
            let Some(creature) = state.selected_creature() else {
                tracing::debug!("no creature selected");
                if matches!(state.input_mode, InputMode::Search(_)) {
                    tracing::debug!("exiting search mode (no selection)");
                    state.input_mode = InputMode::Normal;
                    state.clear_filter();
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            };

            tracing::debug!(creature = %creature.name, "opening details");
            state.modal = ModalState::Shown(Box::new(creature.clone()));
            Ok((true, vec![]))
        }
        Event::CloseDetail => Ok((false, vec![])),
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query = String::new();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }

            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            if matches!(state.predicate, Predicate::Text(_)) {
                state.clear_filter();
            }
            state.search_query = String::new();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }

            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, char = %c, "search query updated");
            state.search_by_text();

            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }

            state.search_query.pop();
            state.search_by_text();

            Ok((true, vec![]))
        }
        Event::Escape => {
            state.input_mode = InputMode::Normal;
            state.clear_filter();
            Ok((true, vec![]))
        }
        Event::NextCategory => {
            state.cycle_category(true);
            Ok((true, vec![]))
        }
        Event::PreviousCategory => {
            state.cycle_category(false);
            Ok((true, vec![]))
        }
        Event::SelectCategory(category) => {
            state.select_category(category);
            Ok((true, vec![]))
        }
        Event::LoadMore => Ok(begin_load(state)),
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::info!("web access granted, loading first page");
                Ok(begin_load(state))
            } else {
                tracing::warn!("web access denied, catalog will stay empty");
                Ok((true, vec![]))
            }
        }
        Event::WebResponse { tag, status, body } => Ok(handle_response(state, *tag, *status, body)),
    }
}

/// While the modal is up only dismissal and background loading get through.
fn handle_modal_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::CloseDetail | Event::Escape => {
            tracing::debug!("closing details");
            state.modal = ModalState::Hidden;
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::PermissionsResult { granted: true } => begin_load(state),
        Event::WebResponse { tag, status, body } => handle_response(state, *tag, *status, body),
        _ => (false, vec![]),
    }
}

fn begin_load(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.fetcher.begin(&state.catalog) {
        Some(request) => (true, vec![Action::Fetch(request)]),
        None => (false, vec![]),
    }
}

fn handle_response(state: &mut AppState, tag: RequestTag, status: u16, body: &[u8]) -> (bool, Vec<Action>) {
    match state.fetcher.on_response(tag, status, body) {
        FetchProgress::Requests(requests) => {
            tracing::debug!(requests = requests.len(), "issuing detail requests");
            (false, requests.into_iter().map(Action::Fetch).collect())
        }
        FetchProgress::Pending { remaining } => {
            tracing::trace!(remaining, "detail slot filled");
            (false, vec![])
        }
        FetchProgress::Completed(page) => {
            tracing::info!(
                creatures = page.creatures.len(),
                has_next = page.next.is_some(),
                "page loaded"
            );
            state.append_page(page);
            (true, vec![])
        }
        FetchProgress::Failed(e) => {
            tracing::error!(error = %e, load_id = tag.load_id, "page load failed");
            (true, vec![])
        }
        FetchProgress::Stale => (false, vec![]),
    }
}

/// Event label for tracing; keeps response bodies out of the span.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::CloseFocus => "CloseFocus",
        Event::OpenDetail => "OpenDetail",
        Event::CloseDetail => "CloseDetail",
        Event::SearchMode => "SearchMode",
        Event::FocusSearchBar => "FocusSearchBar",
        Event::FocusResults => "FocusResults",
        Event::ExitSearch => "ExitSearch",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::Escape => "Escape",
        Event::NextCategory => "NextCategory",
        Event::PreviousCategory => "PreviousCategory",
        Event::SelectCategory(_) => "SelectCategory",
        Event::LoadMore => "LoadMore",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::WebResponse { .. } => "WebResponse",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, FetchRequest, Stage};
    use crate::domain::Creature;
    use crate::ui::theme::Theme;
    use pretty_assertions::assert_eq;

    fn creature(name: &str, kind: &str) -> Creature {
        Creature {
            name: name.to_string(),
            image_url: None,
            types: vec![kind.to_string()],
            weight: 10,
            height: 10,
            moves: vec![],
        }
    }

    fn state_with(creatures: Vec<Creature>) -> AppState {
        let mut state = AppState::new(Catalog::new("page-1"), Theme::default());
        state.catalog.append_page(creatures, Some("page-2".to_string()));
        state.apply_filter();
        state
    }

    #[test]
    fn load_more_emits_single_listing_fetch() {
        let mut state = state_with(vec![]);
        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();

        assert!(render);
        assert_eq!(
            actions,
            vec![Action::Fetch(FetchRequest {
                url: "page-2".to_string(),
                tag: RequestTag { load_id: 1, stage: Stage::Listing },
            })]
        );

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn denied_permissions_do_not_fetch() {
        let mut state = state_with(vec![]);
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(actions.is_empty());
        assert!(!state.fetcher.is_loading());
    }

    #[test]
    fn typing_filters_by_text() {
        let mut state = state_with(vec![creature("pikachu", "electric"), creature("raichu", "electric")]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "pika".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.visible.len(), 1);

        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.visible.len(), 2);
    }

    #[test]
    fn chars_ignored_outside_search() {
        let mut state = state_with(vec![creature("pikachu", "electric")]);
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn category_replaces_text_filter() {
        let mut state = state_with(vec![creature("charmander", "fire"), creature("squirtle", "water")]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('s')).unwrap();
        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.visible.len(), 2);

        handle_event(&mut state, &Event::SelectCategory("Fire".to_string())).unwrap();
        assert_eq!(state.predicate, Predicate::Category("fire".to_string()));
        assert_eq!(state.visible[0].name, "charmander");

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(state.predicate.is_unfiltered());
        assert_eq!(state.visible.len(), 2);
    }

    #[test]
    fn modal_blocks_navigation_until_closed() {
        let mut state = state_with(vec![creature("eevee", "normal"), creature("ditto", "normal")]);
        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert_eq!(state.modal.creature().map(|c| c.name.as_str()), Some("eevee"));

        let (render, _) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(!render);
        assert_eq!(state.selected_index, 0);

        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert_eq!(state.modal.creature().map(|c| c.name.as_str()), Some("eevee"));

        handle_event(&mut state, &Event::CloseDetail).unwrap();
        assert!(!state.modal.is_shown());

        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert_eq!(state.modal.creature().map(|c| c.name.as_str()), Some("ditto"));
    }

    #[test]
    fn open_detail_without_selection_is_noop() {
        let mut state = state_with(vec![]);
        let (render, actions) = handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(!state.modal.is_shown());
    }

    #[test]
    fn failed_listing_leaves_catalog_untouched() {
        let mut state = state_with(vec![creature("mew", "psychic")]);
        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        let Action::Fetch(request) = &actions[0] else {
            panic!("expected fetch");
        };

        let (render, actions) = handle_event(
            &mut state,
            &Event::WebResponse { tag: request.tag, status: 503, body: vec![] },
        )
        .unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.catalog.len(), 1);
        assert_eq!(state.catalog.cursor(), Some("page-2"));
        assert!(!state.fetcher.is_loading());
    }

    #[test]
    fn close_focus_hides_plugin() {
        let mut state = state_with(vec![]);
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}

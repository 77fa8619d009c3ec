//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Zellidex library
//! and the Zellij plugin system. It is the only place that talks to the host:
//! it translates Zellij events into library events, and library actions into
//! Zellij API calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; the first page loads once granted
//! 3. **Update**: Map keys and web responses to library events
//! 4. **Act**: Issue `web_request`s for `Action::Fetch`, hide on `Action::CloseFocus`
//! 5. **Render**: Call library render function
//!
//! # Web Requests
//!
//! Every request carries its [`RequestTag`] in the request context. Zellij
//! hands the context back with `WebRequestResult`, which is how responses are
//! matched to their page and slot. Responses without a tag are not ours.
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`/`l`/`Right`: Move down
//! - `k`/`Up`/`h`/`Left`: Move up
//! - `Enter`: Open details
//! - `/`: Enter search mode
//! - `]`/`Tab`: Next type filter
//! - `[`/`Shift+Tab`: Previous type filter
//! - `a`: Show all types
//! - `m`: Load more
//! - `Esc`: Clear filter
//! - `q`: Close plugin
//!
//! In search mode:
//! - Characters: Type into the query
//! - `Enter`: Focus results, then open details
//! - `/`: Return to search input
//! - `Esc`: Exit search
//!
//! With the detail view open:
//! - `Esc`/`Enter`/`q`: Close details

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zellidex::catalog::{FetchRequest, RequestTag, ALL_CATEGORIES};
use zellidex::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: zellidex::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zellidex::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Fetch the catalog
    /// - `ChangeApplicationState`: Hide the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zellidex::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "parsed configuration");
        self.app = zellidex::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::ChangeApplicationState]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => Event::PermissionsResult {
                granted: matches!(permissions, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zellidex::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.modal.is_shown() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseDetail),
                _ => None,
            };
        }

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::FocusResults,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::OpenDetail,
                BareKey::Char('/') => Event::FocusSearchBar,
                BareKey::Down | BareKey::Right | BareKey::Char('j' | 'l') => Event::KeyDown,
                BareKey::Up | BareKey::Left | BareKey::Char('k' | 'h') => Event::KeyUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char('m') => Event::LoadMore,
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Down | BareKey::Right | BareKey::Char('j' | 'l') => Event::KeyDown,
                BareKey::Up | BareKey::Left | BareKey::Char('k' | 'h') => Event::KeyUp,
                BareKey::Enter => Event::OpenDetail,
                BareKey::Esc => Event::Escape,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PreviousCategory,
                BareKey::Tab | BareKey::Char(']') => Event::NextCategory,
                BareKey::Char('[') => Event::PreviousCategory,
                BareKey::Char('a') => Event::SelectCategory(ALL_CATEGORIES.to_string()),
                BareKey::Char('m') => Event::LoadMore,
                _ => return None,
            }),
        }
    }

    /// Maps a web response back to the page load that requested it.
    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(tag) = RequestTag::from_context(context) else {
            tracing::debug!(status, "ignoring untagged web response");
            return None;
        };

        tracing::debug!(status, load_id = tag.load_id, stage = ?tag.stage, bytes = body.len(), "web response");
        Some(Event::WebResponse { tag, status, body })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(FetchRequest { url, tag }) => {
                tracing::debug!(url = %url, load_id = tag.load_id, "issuing web request");
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], tag.to_context());
            }
        }
    }
}

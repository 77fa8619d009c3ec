//! Zellidex: A Zellij plugin for browsing a creature catalog.
//!
//! Zellidex pages through a public creature API (the `PokeAPI` by default) and
//! shows what it has fetched as a grid of colour-coded cards:
//! - Paginated loading: one listing request, then a detail request per entry
//! - Client-side search by name and filtering by type
//! - A detail view with types, weight, height and moves
//! - Catppuccin themes, or a custom theme from a TOML file

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point, all host I/O
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!              │                          │
//! ┌────────────────────────┐   ┌────────────────────────┐
//! │ UI Layer (ui/)         │   │ Catalog Layer          │
//! │ - Rendering            │   │ (catalog/)             │
//! │ - Theming              │   │ - API decoding         │
//! │ - Components           │   │ - Store and cursor     │
//! │                        │   │ - Filters, page loads  │
//! └────────────────────────┘   └────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Creature model (domain/creature)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zellidex.wasm" {
//!         api_url "https://pokeapi.co/api/v2/pokemon"
//!         page_size "150"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create `AppState`, request web access
//! 2. **Permission Granted**: the first listing request is issued
//! 3. **Listing Response**: one detail request per entry is issued
//! 4. **Detail Responses**: joined by position; once all arrive the page is
//!    appended and the active filter re-applied
//!
//! # Example
//!
//! ```rust
//! use zellidex::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! let Action::Fetch(request) = &actions[0] else { unreachable!() };
//! assert_eq!(request.url, "https://pokeapi.co/api/v2/pokemon?limit=150");
//! # Ok::<(), zellidex::ZellidexError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, ModalState, SearchFocus};
pub use catalog::Catalog;
pub use domain::{Creature, Result, ZellidexError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default catalog endpoint.
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Default number of creatures requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 150;

/// Plugin configuration parsed from the Zellij plugin block.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing endpoint of the catalog API.
    pub api_url: String,

    /// Creatures per page; never zero.
    pub page_size: u32,

    /// Built-in theme name.
    pub theme_name: Option<String>,

    /// Path to a custom theme TOML; takes precedence over `theme_name`.
    ///
    /// A leading `~` resolves to the host mount.
    pub theme_file: Option<String>,

    /// Tracing filter directive (e.g. `info`, `zellidex=debug`).
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the plugin configuration map, falling back to defaults for
    /// missing or invalid values.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let api_url = config
            .get("api_url")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            api_url,
            page_size,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// URL of the first listing page.
    ///
    /// A URL that already carries a query string is used as given.
    #[must_use]
    pub fn first_page_url(&self) -> String {
        if self.api_url.contains('?') {
            self.api_url.clone()
        } else {
            format!("{}?limit={}", self.api_url, self.page_size)
        }
    }
}

/// Builds the initial application state: an empty catalog whose cursor points
/// at the first page, and the configured theme.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "initializing zellidex plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(Catalog::new(config.first_page_url()), theme)
}

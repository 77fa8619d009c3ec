//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin runtime executes them in order; the library itself never performs
//! I/O, which keeps the whole catalog pipeline testable without a host.
//!
//! # Example
//!
//! ```rust
//! use zellidex::app::Action;
//! use zellidex::catalog::{FetchRequest, RequestTag, Stage};
//!
//! let actions = vec![Action::Fetch(FetchRequest {
//!     url: "https://pokeapi.co/api/v2/pokemon?limit=150".to_string(),
//!     tag: RequestTag { load_id: 1, stage: Stage::Listing },
//! })];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::catalog::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g., pressing 'q').
    CloseFocus,

    /// Issues an HTTP GET whose response must be fed back as
    /// [`Event::WebResponse`](crate::app::Event::WebResponse) carrying the same tag.
    Fetch(FetchRequest),
}

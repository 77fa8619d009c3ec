//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to component renderers, which fill a frame buffer
//!
//! # Example
//!
//! ```rust
//! use zellidex::app::AppState;
//! use zellidex::catalog::Catalog;
//! use zellidex::ui::{render_to_string, Theme};
//!
//! let state = AppState::new(Catalog::new("https://pokeapi.co/api/v2/pokemon"), Theme::default());
//! let frame = render_to_string(&state, 24, 80);
//! assert!(frame.contains("Zellidex"));
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and prints the whole frame
/// in one write. Does not clear the screen.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the plugin UI into a string of ANSI-positioned output.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);

    let mut frame = String::new();
    components::render_frame(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame
}

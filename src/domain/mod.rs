//! Domain layer for the Zellidex plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs or the shape of the remote catalog API.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`creature`]: Creature record and unit conversions

pub mod creature;
pub mod error;

pub use creature::{Creature, MAX_MOVES};
pub use error::{Result, ZellidexError};

//! Catalog layer: API decoding, the creature store, filtering and page loading.
//!
//! # Architecture
//!
//! - `api`: Wire types for the listing and detail endpoints, projection into [`Creature`](crate::Creature)
//! - `store`: [`Catalog`], the append-only creature collection and its cursor
//! - `filter`: Pure text and category predicates over the catalog
//! - `fetcher`: [`Fetcher`], the single in-flight page load and its fan-out

pub mod api;
pub mod fetcher;
pub mod filter;
pub mod store;

pub use fetcher::{FetchProgress, FetchRequest, Fetcher, LoadedPage, RequestTag, Stage};
pub use filter::{filter_by_category, filter_by_text, Predicate, ALL_CATEGORIES, CATEGORIES};
pub use store::Catalog;

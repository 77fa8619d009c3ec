//! Filter engine: pure predicates over the catalog.
//!
//! Both filters return a fresh vector holding an ordered subsequence of their
//! input. The catalog itself is never mutated, so re-running a filter after a
//! new page arrives is always safe.

use crate::domain::Creature;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// The closed set of category tags the API uses, in display order.
pub const CATEGORIES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// A filter criterion. Only one is active at a time; the last user
/// interaction replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring over the name and every category tag.
    Text(String),
    /// Exact (case-insensitive) category tag, or [`ALL_CATEGORIES`].
    Category(String),
}

impl Default for Predicate {
    fn default() -> Self {
        Self::Category(ALL_CATEGORIES.to_string())
    }
}

impl Predicate {
    /// Runs the matching filter against `creatures`.
    #[must_use]
    pub fn apply(&self, creatures: &[Creature]) -> Vec<Creature> {
        match self {
            Self::Text(text) => filter_by_text(creatures, text),
            Self::Category(category) => filter_by_category(creatures, category),
        }
    }

    /// Returns `true` when the predicate lets every creature through.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Category(category) => category.eq_ignore_ascii_case(ALL_CATEGORIES),
        }
    }
}

/// Keeps creatures whose name or any category tag contains `text`.
///
/// Matching is case-insensitive. An empty `text` matches everything.
///
/// # Examples
///
/// ```
/// use zellidex::catalog::filter_by_text;
/// use zellidex::Creature;
///
/// let catalog = vec![Creature {
///     name: "bulbasaur".to_string(),
///     image_url: None,
///     types: vec!["grass".to_string(), "poison".to_string()],
///     weight: 69,
///     height: 7,
///     moves: vec![],
/// }];
/// assert_eq!(filter_by_text(&catalog, "SAUR").len(), 1);
/// assert_eq!(filter_by_text(&catalog, "pois").len(), 1);
/// assert!(filter_by_text(&catalog, "fire").is_empty());
/// ```
#[must_use]
pub fn filter_by_text(creatures: &[Creature], text: &str) -> Vec<Creature> {
    let needle = text.to_lowercase();
    let _span = tracing::debug_span!("filter_by_text", total = creatures.len(), query_len = needle.len())
        .entered();

    let filtered: Vec<Creature> = creatures
        .iter()
        .filter(|creature| {
            needle.is_empty()
                || creature.name.to_lowercase().contains(&needle)
                || creature
                    .types
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "text filter applied");
    filtered
}

/// Keeps creatures carrying the `category` tag; `"all"` keeps everything.
///
/// # Examples
///
/// ```
/// use zellidex::catalog::{filter_by_category, ALL_CATEGORIES};
///
/// assert!(filter_by_category(&[], ALL_CATEGORIES).is_empty());
/// ```
#[must_use]
pub fn filter_by_category(creatures: &[Creature], category: &str) -> Vec<Creature> {
    let _span = tracing::debug_span!("filter_by_category", total = creatures.len(), category = %category)
        .entered();

    if category.eq_ignore_ascii_case(ALL_CATEGORIES) {
        return creatures.to_vec();
    }

    let filtered: Vec<Creature> = creatures
        .iter()
        .filter(|creature| creature.types.iter().any(|tag| tag.eq_ignore_ascii_case(category)))
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "category filter applied");
    filtered
}

//! The catalog store: every creature fetched so far plus the pagination cursor.
//!
//! [`Catalog`] is an explicit owned value held by
//! [`AppState`](crate::app::AppState). The filter engine reads it by reference
//! and the fetcher only ever hands back finished pages; the single writer is
//! [`Catalog::append_page`].

use crate::domain::Creature;

/// Append-only ordered creature collection with its next-page cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    creatures: Vec<Creature>,
    cursor: Option<String>,
}

impl Catalog {
    /// Creates an empty catalog whose first page lives at `first_page_url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zellidex::catalog::Catalog;
    ///
    /// let catalog = Catalog::new("https://pokeapi.co/api/v2/pokemon?limit=150");
    /// assert!(catalog.is_empty());
    /// assert!(!catalog.is_exhausted());
    /// ```
    #[must_use]
    pub fn new(first_page_url: impl Into<String>) -> Self {
        Self {
            creatures: Vec::new(),
            cursor: Some(first_page_url.into()),
        }
    }

    /// All creatures in arrival order.
    #[must_use]
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// URL of the next page to fetch, `None` once exhausted.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Returns `true` once the API has reported no further page.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Appends one complete page in listing order and advances the cursor.
    ///
    /// Existing entries are never touched. Uniqueness is guaranteed upstream so
    /// no de-duplication happens here.
    pub fn append_page(&mut self, page: Vec<Creature>, next: Option<String>) {
        tracing::debug!(
            appended = page.len(),
            total = self.creatures.len() + page.len(),
            exhausted = next.is_none(),
            "catalog page appended"
        );
        self.creatures.extend(page);
        self.cursor = next;
    }
}

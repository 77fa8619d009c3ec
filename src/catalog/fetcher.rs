//! Page loader driving the listing → detail fan-out.
//!
//! The host performs the HTTP requests; the [`Fetcher`] only decides which
//! requests to issue and assembles their responses. Each request carries a
//! [`RequestTag`] in the host's context map so responses (which complete in any
//! order) can be joined back into their page by position.
//!
//! # Page Lifecycle
//!
//! ```text
//!  begin ──► Listing ──200──► Details { slots[0..n] } ──all filled──► Completed
//!              │                    │
//!              └──non-2xx/decode────┴──────────────────────────────► Failed
//! ```
//!
//! Only one page may be in flight per fetcher. A failed page leaves nothing
//! behind: its partially filled slots are dropped and any responses still
//! arriving for it are reported as [`FetchProgress::Stale`].

use super::api;
use super::store::Catalog;
use crate::domain::error::ZellidexError;
use crate::domain::Creature;
use std::collections::BTreeMap;

/// Context key holding the page load identifier.
pub const CONTEXT_LOAD_ID: &str = "zellidex_load";

/// Context key holding `listing` or the detail slot index.
pub const CONTEXT_STAGE: &str = "zellidex_stage";

const LISTING_STAGE: &str = "listing";

/// Which half of a page load a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Listing,
    /// Detail request for the summary at this listing position.
    Detail(usize),
}

/// Identifies the page load and slot a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub load_id: u64,
    pub stage: Stage,
}

impl RequestTag {
    /// Encodes the tag into a host request context map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zellidex::catalog::{RequestTag, Stage};
    ///
    /// let tag = RequestTag { load_id: 3, stage: Stage::Detail(7) };
    /// assert_eq!(RequestTag::from_context(&tag.to_context()), Some(tag));
    /// ```
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let stage = match self.stage {
            Stage::Listing => LISTING_STAGE.to_string(),
            Stage::Detail(index) => index.to_string(),
        };
        BTreeMap::from([
            (CONTEXT_LOAD_ID.to_string(), self.load_id.to_string()),
            (CONTEXT_STAGE.to_string(), stage),
        ])
    }

    /// Decodes a tag from a host context map.
    ///
    /// Returns `None` for responses to requests this plugin did not tag.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let load_id = context.get(CONTEXT_LOAD_ID)?.parse().ok()?;
        let stage = match context.get(CONTEXT_STAGE)?.as_str() {
            LISTING_STAGE => Stage::Listing,
            index => Stage::Detail(index.parse().ok()?),
        };
        Some(Self { load_id, stage })
    }
}

/// A request the host should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub tag: RequestTag,
}

/// A fully assembled page ready to be appended to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    /// Creatures in listing order.
    pub creatures: Vec<Creature>,
    /// Cursor reported by the listing.
    pub next: Option<String>,
}

/// Outcome of feeding one response to the fetcher.
#[derive(Debug)]
pub enum FetchProgress {
    /// The listing arrived; issue these detail requests.
    Requests(Vec<FetchRequest>),
    /// A detail slot was filled; `remaining` slots are outstanding.
    Pending { remaining: usize },
    /// Every slot is filled.
    Completed(LoadedPage),
    /// The page load was aborted and discarded.
    Failed(ZellidexError),
    /// The response does not belong to the in-flight load.
    Stale,
}

#[derive(Debug)]
enum PendingStage {
    Listing,
    Details {
        next: Option<String>,
        urls: Vec<String>,
        slots: Vec<Option<Creature>>,
        remaining: usize,
    },
}

#[derive(Debug)]
struct PendingPage {
    load_id: u64,
    url: String,
    stage: PendingStage,
}

/// Tracks the single in-flight page load of a catalog.
#[derive(Debug, Default)]
pub struct Fetcher {
    pending: Option<PendingPage>,
    last_load_id: u64,
}

impl Fetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a page load is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts loading the page at the catalog cursor.
    ///
    /// Returns the listing request, or `None` when the catalog is exhausted or
    /// a load is already in flight.
    pub fn begin(&mut self, catalog: &Catalog) -> Option<FetchRequest> {
        if let Some(pending) = &self.pending {
            tracing::debug!(load_id = pending.load_id, "page load already in flight, ignoring trigger");
            return None;
        }

        let Some(url) = catalog.cursor() else {
            tracing::debug!("catalog exhausted, nothing to load");
            return None;
        };

        self.last_load_id += 1;
        let load_id = self.last_load_id;
        tracing::debug!(load_id, url = %url, "page load started");

        self.pending = Some(PendingPage {
            load_id,
            url: url.to_string(),
            stage: PendingStage::Listing,
        });

        Some(FetchRequest {
            url: url.to_string(),
            tag: RequestTag {
                load_id,
                stage: Stage::Listing,
            },
        })
    }

    /// Feeds one host response into the in-flight load.
    pub fn on_response(&mut self, tag: RequestTag, status: u16, body: &[u8]) -> FetchProgress {
        let _span = tracing::debug_span!("fetch_response", load_id = tag.load_id, stage = ?tag.stage, status)
            .entered();

        let Some(pending) = self.pending.as_mut().filter(|p| p.load_id == tag.load_id) else {
            tracing::debug!("response for inactive load dropped");
            return FetchProgress::Stale;
        };

        let progress = match tag.stage {
            Stage::Listing if matches!(pending.stage, PendingStage::Listing) => {
                Self::accept_listing(pending, status, body)
            }
            Stage::Detail(index) => Self::accept_detail(pending, index, status, body),
            Stage::Listing => {
                tracing::debug!("listing response after details were issued");
                return FetchProgress::Stale;
            }
        };

        match progress {
            FetchProgress::Failed(e) => {
                self.pending = None;
                FetchProgress::Failed(e)
            }
            FetchProgress::Pending { remaining: 0 } => self.finish(),
            other => other,
        }
    }

    fn accept_listing(pending: &mut PendingPage, status: u16, body: &[u8]) -> FetchProgress {
        if !is_success(status) {
            return FetchProgress::Failed(ZellidexError::HttpStatus {
                url: pending.url.clone(),
                status,
            });
        }

        let listing = match api::decode_listing(body) {
            Ok(listing) => listing,
            Err(e) => return FetchProgress::Failed(e),
        };

        let count = listing.results.len();
        tracing::debug!(summaries = count, has_next = listing.next.is_some(), "listing received");

        let urls: Vec<String> = listing.results.into_iter().map(|entry| entry.url).collect();
        let requests = urls
            .iter()
            .enumerate()
            .map(|(index, url)| FetchRequest {
                url: url.clone(),
                tag: RequestTag {
                    load_id: pending.load_id,
                    stage: Stage::Detail(index),
                },
            })
            .collect();

        pending.stage = PendingStage::Details {
            next: listing.next,
            urls,
            slots: vec![None; count],
            remaining: count,
        };

        if count == 0 {
            FetchProgress::Pending { remaining: 0 }
        } else {
            FetchProgress::Requests(requests)
        }
    }

    fn accept_detail(pending: &mut PendingPage, index: usize, status: u16, body: &[u8]) -> FetchProgress {
        let PendingStage::Details { urls, slots, remaining, .. } = &mut pending.stage else {
            tracing::debug!(index, "detail response before listing");
            return FetchProgress::Stale;
        };

        if !matches!(slots.get(index), Some(None)) {
            tracing::debug!(index, "unexpected or duplicate detail slot");
            return FetchProgress::Stale;
        }

        match Self::decode_detail(&urls[index], status, body) {
            Ok(creature) => {
                slots[index] = Some(creature);
                *remaining -= 1;
                FetchProgress::Pending { remaining: *remaining }
            }
            Err(e) => FetchProgress::Failed(e),
        }
    }

    fn decode_detail(url: &str, status: u16, body: &[u8]) -> Result<Creature, ZellidexError> {
        if !is_success(status) {
            return Err(ZellidexError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        api::decode_creature(body)
    }

    fn finish(&mut self) -> FetchProgress {
        match self.pending.take().map(|pending| pending.stage) {
            Some(PendingStage::Details { next, slots, .. }) => {
                let creatures: Vec<Creature> = slots.into_iter().flatten().collect();
                tracing::debug!(creatures = creatures.len(), "page assembled");
                FetchProgress::Completed(LoadedPage { creatures, next })
            }
            _ => FetchProgress::Stale,
        }
    }
}

const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(urls: &[&str], next: Option<&str>) -> Vec<u8> {
        let results: Vec<serde_json::Value> = urls
            .iter()
            .map(|url| serde_json::json!({ "name": "x", "url": url }))
            .collect();
        serde_json::json!({ "results": results, "next": next }).to_string().into_bytes()
    }

    fn detail(name: &str, kind: &str) -> Vec<u8> {
        serde_json::json!({
            "name": name,
            "weight": 10,
            "height": 5,
            "sprites": { "front_default": format!("https://img.test/{name}.png") },
            "types": [ { "slot": 1, "type": { "name": kind } } ],
            "moves": [ { "move": { "name": "tackle" } } ]
        })
        .to_string()
        .into_bytes()
    }

    fn detail_tag(request: &FetchRequest) -> RequestTag {
        assert!(matches!(request.tag.stage, Stage::Detail(_)));
        request.tag
    }

    fn start(fetcher: &mut Fetcher, catalog: &Catalog, urls: &[&str], next: Option<&str>) -> Vec<FetchRequest> {
        let listing_request = fetcher.begin(catalog).expect("listing request");
        match fetcher.on_response(listing_request.tag, 200, &listing(urls, next)) {
            FetchProgress::Requests(requests) => requests,
            other => panic!("expected detail requests, got {other:?}"),
        }
    }

    #[test]
    fn begin_targets_catalog_cursor() {
        let catalog = Catalog::new("https://api.test/pokemon?limit=2");
        let mut fetcher = Fetcher::new();

        let request = fetcher.begin(&catalog).unwrap();
        assert_eq!(request.url, "https://api.test/pokemon?limit=2");
        assert_eq!(request.tag.stage, Stage::Listing);
        assert!(fetcher.is_loading());
    }

    #[test]
    fn second_trigger_while_in_flight_is_ignored() {
        let catalog = Catalog::new("page-1");
        let mut fetcher = Fetcher::new();

        assert!(fetcher.begin(&catalog).is_some());
        assert!(fetcher.begin(&catalog).is_none());
    }

    #[test]
    fn exhausted_catalog_issues_nothing() {
        let mut catalog = Catalog::new("page-1");
        catalog.append_page(vec![], None);
        let mut fetcher = Fetcher::new();

        assert!(fetcher.begin(&catalog).is_none());
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn details_are_joined_by_listing_position() {
        let catalog = Catalog::new("page-1");
        let mut fetcher = Fetcher::new();
        let requests = start(&mut fetcher, &catalog, &["u/1", "u/2", "u/3"], Some("page-2"));
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].url, "u/3");

        let bodies = [detail("bulbasaur", "grass"), detail("ivysaur", "grass"), detail("venusaur", "grass")];

        // Complete out of order: 3rd, 1st, 2nd.
        assert!(matches!(
            fetcher.on_response(detail_tag(&requests[2]), 200, &bodies[2]),
            FetchProgress::Pending { remaining: 2 }
        ));
        assert!(matches!(
            fetcher.on_response(detail_tag(&requests[0]), 200, &bodies[0]),
            FetchProgress::Pending { remaining: 1 }
        ));
        let FetchProgress::Completed(page) = fetcher.on_response(detail_tag(&requests[1]), 200, &bodies[1]) else {
            panic!("page should complete");
        };

        let names: Vec<&str> = page.creatures.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);
        assert_eq!(page.next.as_deref(), Some("page-2"));
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn failed_detail_aborts_page_and_drops_late_responses() {
        let catalog = Catalog::new("page-1");
        let mut fetcher = Fetcher::new();
        let requests = start(&mut fetcher, &catalog, &["u/1", "u/2", "u/3", "u/4", "u/5"], Some("page-2"));

        fetcher.on_response(requests[0].tag, 200, &detail("a", "fire"));
        fetcher.on_response(requests[1].tag, 200, &detail("b", "fire"));
        let failed = fetcher.on_response(requests[2].tag, 500, b"oops");
        match failed {
            FetchProgress::Failed(ZellidexError::HttpStatus { url, status }) => {
                assert_eq!(url, "u/3");
                assert_eq!(status, 500);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!fetcher.is_loading());

        assert!(matches!(
            fetcher.on_response(requests[3].tag, 200, &detail("d", "fire")),
            FetchProgress::Stale
        ));

        // The cursor was never advanced, so the same page can be retried.
        let retry = fetcher.begin(&catalog).unwrap();
        assert_eq!(retry.url, "page-1");
        assert_ne!(retry.tag.load_id, requests[0].tag.load_id);
    }

    #[test]
    fn malformed_detail_is_a_failure() {
        let catalog = Catalog::new("page-1");
        let mut fetcher = Fetcher::new();
        let requests = start(&mut fetcher, &catalog, &["u/1"], None);

        assert!(matches!(
            fetcher.on_response(requests[0].tag, 200, b"{\"name\": 1}"),
            FetchProgress::Failed(ZellidexError::Decode(_))
        ));
    }

    #[test]
    fn failed_listing_clears_in_flight_state() {
        let catalog = Catalog::new("page-1");
        let mut fetcher = Fetcher::new();
        let request = fetcher.begin(&catalog).unwrap();

        assert!(matches!(
            fetcher.on_response(request.tag, 404, b""),
            FetchProgress::Failed(ZellidexError::HttpStatus { status: 404, .. })
        ));
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn empty_listing_completes_immediately() {
        let catalog = Catalog::new("page-1");
        let mut fetcher = Fetcher::new();
        let request = fetcher.begin(&catalog).unwrap();

        let FetchProgress::Completed(page) = fetcher.on_response(request.tag, 200, &listing(&[], None)) else {
            panic!("empty page should complete");
        };
        assert!(page.creatures.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn duplicate_detail_response_is_stale() {
        let catalog = Catalog::new("page-1");
        let mut fetcher = Fetcher::new();
        let requests = start(&mut fetcher, &catalog, &["u/1", "u/2"], None);

        fetcher.on_response(requests[0].tag, 200, &detail("a", "ice"));
        assert!(matches!(
            fetcher.on_response(requests[0].tag, 200, &detail("a", "ice")),
            FetchProgress::Stale
        ));
        assert!(fetcher.is_loading());
    }

    #[test]
    fn request_tag_context_round_trip_and_foreign_context() {
        let listing_tag = RequestTag { load_id: 1, stage: Stage::Listing };
        assert_eq!(RequestTag::from_context(&listing_tag.to_context()), Some(listing_tag));

        let foreign = BTreeMap::from([("other".to_string(), "1".to_string())]);
        assert_eq!(RequestTag::from_context(&foreign), None);

        let mut garbled = listing_tag.to_context();
        garbled.insert(CONTEXT_STAGE.to_string(), "nope".to_string());
        assert_eq!(RequestTag::from_context(&garbled), None);
    }
}

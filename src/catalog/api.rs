//! Wire types for the PokeAPI listing and detail endpoints.
//!
//! The API is an external, fixed contract. Only the fields the plugin keeps are
//! declared here; serde ignores everything else in the (large) detail payloads.
//!
//! ```text
//! GET /pokemon?limit=150
//! { "next": "https://.../pokemon?offset=150&limit=150",
//!   "results": [ { "name": "bulbasaur", "url": "https://.../pokemon/1/" } ] }
//!
//! GET /pokemon/1/
//! { "name": "bulbasaur", "weight": 69, "height": 7,
//!   "sprites": { "front_default": "https://.../1.png" },
//!   "types": [ { "slot": 1, "type": { "name": "grass" } } ],
//!   "moves": [ { "move": { "name": "razor-wind" } } ] }
//! ```

use crate::domain::error::Result;
use crate::domain::{Creature, MAX_MOVES};
use serde::Deserialize;

/// One page of the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingPage {
    /// Summaries in listing order.
    pub results: Vec<ListingEntry>,
    /// URL of the following page, `None` once the catalog is exhausted.
    #[serde(default)]
    pub next: Option<String>,
}

/// A summary pointing at one detail record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
}

/// The subset of the detail endpoint that survives projection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatureRecord {
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub weight: u32,
    pub height: u32,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

impl From<CreatureRecord> for Creature {
    fn from(record: CreatureRecord) -> Self {
        Self {
            name: record.name,
            image_url: record.sprites.front_default,
            types: record
                .types
                .into_iter()
                .map(|slot| slot.kind.name.to_lowercase())
                .collect(),
            weight: record.weight,
            height: record.height,
            moves: record
                .moves
                .into_iter()
                .take(MAX_MOVES)
                .map(|slot| slot.move_ref.name)
                .collect(),
        }
    }
}

/// Decodes a listing page body.
///
/// # Errors
///
/// Returns [`ZellidexError::Decode`](crate::ZellidexError::Decode) if the body is
/// not a listing document.
pub fn decode_listing(body: &[u8]) -> Result<ListingPage> {
    Ok(serde_json::from_slice(body)?)
}

/// Decodes a detail body and projects it into a [`Creature`].
///
/// # Errors
///
/// Returns [`ZellidexError::Decode`](crate::ZellidexError::Decode) if a required
/// field is missing or has the wrong type.
pub fn decode_creature(body: &[u8]) -> Result<Creature> {
    let record: CreatureRecord = serde_json::from_slice(body)?;
    Ok(record.into())
}

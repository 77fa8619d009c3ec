//! Creature domain model.
//!
//! A [`Creature`] is one fully resolved catalog record. Only the attributes the
//! plugin displays are retained; everything else the API returns is dropped at
//! decode time (see [`crate::catalog::api`]).

use serde::{Deserialize, Serialize};

/// Maximum number of move names kept per creature.
pub const MAX_MOVES: usize = 10;

/// One creature record, immutable once fetched.
///
/// # Fields
///
/// - `name`: Identifier, unique within the catalog by API contract
/// - `image_url`: Front sprite URL (the API may report none)
/// - `types`: Ordered category tags, lowercase, one or two entries
/// - `weight`: Hectograms, as reported by the API
/// - `height`: Decimetres, as reported by the API
/// - `moves`: At most [`MAX_MOVES`] move names, in API order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub image_url: Option<String>,
    pub types: Vec<String>,
    pub weight: u32,
    pub height: u32,
    pub moves: Vec<String>,
}

impl Creature {
    /// Returns the first category tag, used for card colouring.
    ///
    /// # Examples
    ///
    /// ```
    /// use zellidex::Creature;
    ///
    /// let bulbasaur = Creature {
    ///     name: "bulbasaur".to_string(),
    ///     image_url: None,
    ///     types: vec!["grass".to_string(), "poison".to_string()],
    ///     weight: 69,
    ///     height: 7,
    ///     moves: vec![],
    /// };
    /// assert_eq!(bulbasaur.primary_type(), Some("grass"));
    /// ```
    #[must_use]
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    /// Weight in kilograms (API hectograms ÷ 10).
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Height in metres (API decimetres ÷ 10).
    #[must_use]
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Returns the trailing path segment of the sprite URL (e.g. `25.png`).
    ///
    /// Terminals cannot draw the sprite, so cards show its file name instead.
    #[must_use]
    pub fn image_label(&self) -> &str {
        self.image_url
            .as_deref()
            .and_then(|url| url.rsplit('/').find(|segment| !segment.is_empty()))
            .unwrap_or("no sprite")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> Creature {
        Creature {
            name: "pikachu".to_string(),
            image_url: Some(
                "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png"
                    .to_string(),
            ),
            types: vec!["electric".to_string()],
            weight: 60,
            height: 4,
            moves: vec!["mega-punch".to_string()],
        }
    }

    #[test]
    fn converts_api_units() {
        let creature = pikachu();
        assert!((creature.weight_kg() - 6.0).abs() < f64::EPSILON);
        assert!((creature.height_m() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn image_label_uses_file_name() {
        assert_eq!(pikachu().image_label(), "25.png");

        let mut missing = pikachu();
        missing.image_url = None;
        assert_eq!(missing.image_label(), "no sprite");
    }

    #[test]
    fn primary_type_is_none_without_tags() {
        let mut creature = pikachu();
        creature.types.clear();
        assert_eq!(creature.primary_type(), None);
    }
}

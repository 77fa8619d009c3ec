//! Category colours for cards and the detail modal.
//!
//! Unlike [`Theme`](super::Theme) colours these are fixed: a creature's card is
//! always painted with its primary type's colour, whatever theme is active.

use crate::ui::theme::Theme;

/// Colour for types outside the known set.
pub const DEFAULT_TYPE_COLOR: &str = "#D1D5DB";

const DARK_TEXT: &str = "#111827";
const LIGHT_TEXT: &str = "#F9FAFB";

/// Hex background colour for a creature type (case-insensitive).
#[must_use]
pub fn type_color(kind: &str) -> &'static str {
    match kind.to_ascii_lowercase().as_str() {
        "normal" => "#D1D5DB",
        "fire" => "#EF4444",
        "water" => "#3B82F6",
        "electric" => "#F59E0B",
        "grass" => "#10B981",
        "ice" => "#14B8A6",
        "fighting" => "#F97316",
        "poison" => "#A855F7",
        "ground" => "#FCD34D",
        "flying" | "ghost" => "#6366F1",
        "psychic" => "#EC4899",
        "bug" => "#84CC16",
        "rock" => "#78716C",
        "dragon" => "#8B5CF6",
        "dark" => "#1F2937",
        "steel" => "#64748B",
        "fairy" => "#D685AD",
        _ => DEFAULT_TYPE_COLOR,
    }
}

/// Dark or light text colour, whichever reads better on `background`.
#[must_use]
pub fn readable_fg(background: &str) -> &'static str {
    let (r, g, b) = Theme::hex_to_rgb(background);
    let luminance = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luminance >= 150_000 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

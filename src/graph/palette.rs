//! Label → display color mapping.

/// Display label used when a node carries no labels
pub const FALLBACK_LABEL: &str = "Concept";

/// Display name used when a node has no `name` property
pub const FALLBACK_NAME: &str = "N/A";

/// Color for any label not in the palette
pub const FALLBACK_COLOR: &str = "#97C2FC";

/// Fixed palette. `TestProblem` has a color but is not a creatable label.
const PALETTE: [(&str, &str); 6] = [
    ("Theory", "#FF6B6B"),
    ("Element", "#4ECDC4"),
    ("TestProblem", "#FFE66D"),
    ("Solution", "#1A535C"),
    ("Case", "#FF9F1C"),
    ("Concept", "#C7C7C7"),
];

/// Color for a display label, falling back to [`FALLBACK_COLOR`]
pub fn color_for(label: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// All palette entries, for legends
pub fn entries() -> &'static [(&'static str, &'static str)] {
    &PALETTE
}

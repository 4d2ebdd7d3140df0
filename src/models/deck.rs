use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

/// A deck archetype in the catalog.
///
/// `variant_of` is a weak, name-based back-reference: it holds the *name*
/// (not the id) of the base deck this deck is a cosmetic/tech variant of.
/// A name that resolves to no deck still contributes a base name for family
/// grouping ("family of one").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub variant_of: Option<String>,
    /// JSON-encoded array of icon URLs, as persisted by the catalog.
    #[serde(default)]
    pub icons: Option<String>,
}

impl Deck {
    /// Decode the persisted icon encoding into a list of icon URLs.
    ///
    /// Absent or malformed encodings decode to an empty list.
    pub fn icon_list(&self) -> Vec<String> {
        decode_icons(self.icons.as_deref())
    }
}

/// Decode the persisted icon string (a JSON array of URLs).
///
/// `None`, empty, or malformed input decodes to an empty list rather than
/// failing.
pub fn decode_icons(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) => serde_json::from_str(s).unwrap_or_default(),
        None => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Deck identity plus decoded icons, embedded in matchup and queue responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub id: i64,
    pub name: String,
    pub icons: Vec<String>,
}

/// Bare deck reference, used for the `relatedDecks` list of a matchup
/// response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckRef {
    pub id: i64,
    pub name: String,
}

use serde::{Deserialize, Serialize};

/// Chapter type value marking a segment that depicts a match against an
/// opposing deck.
pub const MATCHUP: &str = "Matchup";

// ---------------------------------------------------------------------------
// Chapter
// ---------------------------------------------------------------------------

/// A timestamped segment of a content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: i64,
    pub resource_id: i64,
    /// Human timestamp, `HH:MM:SS` or `MM:SS`.
    pub timestamp: String,
    pub title: String,
    pub chapter_type: String,
    /// The deck played against in this segment. `None` on a matchup chapter
    /// means the matchup is unresolved and awaiting curator input.
    #[serde(default)]
    pub opposing_deck_id: Option<i64>,
}

impl Chapter {
    pub fn is_matchup(&self) -> bool {
        self.chapter_type == MATCHUP
    }

    /// A matchup chapter with no opposing deck assigned yet.
    pub fn is_unresolved_matchup(&self) -> bool {
        self.is_matchup() && self.opposing_deck_id.is_none()
    }
}

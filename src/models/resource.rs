use serde::{Deserialize, Serialize};

/// Lifecycle status of an approved, publicly visible content item.
pub const STATUS_APPROVED: &str = "approved";

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

/// A content item ("resource"): a video or guide about a deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: i64,
    pub title: String,
    pub url: String,
    /// Free-text category, e.g. "Gameplay", "Tournament Report", "Tierlist".
    #[serde(rename = "type")]
    pub type_field: String,
    /// Lifecycle: pending -> approved, or rejected/deleted.
    pub status: String,
    #[serde(default)]
    pub platform: Option<String>,
    /// ISO-8601 date string, when known.
    #[serde(default)]
    pub publication_date: Option<String>,
    /// ISO-8601 timestamp string.
    pub created_at: String,
    /// The deck the content is primarily about, when assigned.
    #[serde(default)]
    pub deck_id: Option<i64>,
    #[serde(default)]
    pub author_profile_id: Option<i64>,
}

impl Resource {
    pub fn is_approved(&self) -> bool {
        self.status == STATUS_APPROVED
    }
}

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AuthorProfile
// ---------------------------------------------------------------------------

/// Creator profile a content item is attributed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

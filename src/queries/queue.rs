//! Matchup review queue classification.
//!
//! Scans approved content for items that still need curator attention:
//! either an annotated matchup chapter with no opposing deck assigned, or
//! gameplay content that was never broken into matchup chapters at all.
//! Pure classification over one bounded query; nothing is written.

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{chapter, decode_icons, resource, DeckSummary};
use crate::sql_builder::SqlBuilder;
use crate::timestamp::timestamp_to_seconds;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// One chapter of a queued resource, with its opposing deck joined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueChapter {
    pub id: i64,
    pub timestamp: String,
    pub title: String,
    pub chapter_type: String,
    pub opposing_deck_id: Option<i64>,
    pub opposing_deck: Option<DeckSummary>,
}

impl QueueChapter {
    fn is_matchup(&self) -> bool {
        self.chapter_type == chapter::MATCHUP
    }
}

/// An approved content item flagged for matchup curation, with its chapters
/// attached in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueResource {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub status: String,
    pub platform: Option<String>,
    pub publication_date: Option<String>,
    pub created_at: String,
    pub deck: Option<DeckSummary>,
    pub chapters: Vec<QueueChapter>,
}

// ---------------------------------------------------------------------------
// Classification rule
// ---------------------------------------------------------------------------

/// Whether an approved content item still needs matchup annotation.
///
/// Qualifies when either holds:
/// - at least one matchup chapter has no opposing deck assigned, or
/// - the type contains `"Gameplay"` and there are no matchup chapters
///   at all (gameplay content never broken into matchups).
pub fn needs_matchup_review(type_field: &str, chapters: &[QueueChapter]) -> bool {
    let has_unresolved = chapters
        .iter()
        .any(|c| c.is_matchup() && c.opposing_deck_id.is_none());
    if has_unresolved {
        return true;
    }

    type_field.contains("Gameplay") && !chapters.iter().any(|c| c.is_matchup())
}

// ---------------------------------------------------------------------------
// Flat row shape returned by the join query
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueueRow {
    resource_id: i64,
    resource_title: String,
    resource_url: String,
    resource_type: String,
    status: String,
    platform: Option<String>,
    publication_date: Option<String>,
    created_at: String,
    source_deck_id: Option<i64>,
    source_deck_name: Option<String>,
    source_deck_icons: Option<String>,
    // Chapter columns are null for resources with no chapters (LEFT JOIN).
    chapter_id: Option<i64>,
    timestamp: Option<String>,
    chapter_title: Option<String>,
    chapter_type: Option<String>,
    opposing_deck_id: Option<i64>,
    opposing_deck_name: Option<String>,
    opposing_deck_icons: Option<String>,
}

const QUEUE_COLUMNS: &[&str] = &[
    "r.id AS \"resourceId\"",
    "r.title AS \"resourceTitle\"",
    "r.url AS \"resourceUrl\"",
    "r.\"type\" AS \"resourceType\"",
    "r.status AS \"status\"",
    "r.platform AS \"platform\"",
    "r.publicationDate AS \"publicationDate\"",
    "r.createdAt AS \"createdAt\"",
    "d.id AS \"sourceDeckId\"",
    "d.name AS \"sourceDeckName\"",
    "d.icons AS \"sourceDeckIcons\"",
    "c.id AS \"chapterId\"",
    "c.\"timestamp\" AS \"timestamp\"",
    "c.title AS \"chapterTitle\"",
    "c.chapterType AS \"chapterType\"",
    "c.opposingDeckId AS \"opposingDeckId\"",
    "od.name AS \"opposingDeckName\"",
    "od.icons AS \"opposingDeckIcons\"",
];

// ---------------------------------------------------------------------------
// QueueQuery
// ---------------------------------------------------------------------------

/// Query interface for the matchup review queue.
pub struct QueueQuery<'a> {
    conn: &'a Connection,
}

impl<'a> QueueQuery<'a> {
    /// Create a new `QueueQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Approved content items that still need matchup curation, newest
    /// first (by `createdAt`). Chapters on each item are chronologically
    /// ordered. Read-only and idempotent.
    pub fn pending(&self) -> Result<Vec<QueueResource>> {
        self.conn
            .ensure_tables(&["decks", "resources", "chapters"])?;

        let (sql, params) = SqlBuilder::new("resources r")
            .select(QUEUE_COLUMNS)
            .join("LEFT JOIN decks d ON r.deckId = d.id")
            .join("LEFT JOIN chapters c ON c.resourceId = r.id")
            .join("LEFT JOIN decks od ON c.opposingDeckId = od.id")
            .where_eq("r.status", resource::STATUS_APPROVED)
            .order_by(&["r.createdAt DESC", "r.id ASC", "c.id ASC"])
            .build();

        let rows: Vec<QueueRow> = self.conn.execute_into(&sql, &params)?;

        let mut resources = assemble(rows);

        for res in &mut resources {
            res.chapters
                .sort_by_key(|c| timestamp_to_seconds(&c.timestamp));
        }

        resources.retain(|r| needs_matchup_review(&r.type_field, &r.chapters));
        Ok(resources)
    }
}

/// Fold the flat resource x chapter rows back into nested resources,
/// preserving the query's `createdAt DESC` order.
fn assemble(rows: Vec<QueueRow>) -> Vec<QueueResource> {
    let mut resources: Vec<QueueResource> = Vec::new();

    for row in rows {
        let is_new = resources.last().map(|r| r.id) != Some(row.resource_id);
        if is_new {
            let deck = match (row.source_deck_id, &row.source_deck_name) {
                (Some(id), Some(name)) => Some(DeckSummary {
                    id,
                    name: name.clone(),
                    icons: decode_icons(row.source_deck_icons.as_deref()),
                }),
                _ => None,
            };
            resources.push(QueueResource {
                id: row.resource_id,
                title: row.resource_title.clone(),
                url: row.resource_url.clone(),
                type_field: row.resource_type.clone(),
                status: row.status.clone(),
                platform: row.platform.clone(),
                publication_date: row.publication_date.clone(),
                created_at: row.created_at.clone(),
                deck,
                chapters: Vec::new(),
            });
        }

        if let (Some(id), Some(timestamp), Some(title), Some(chapter_type)) = (
            row.chapter_id,
            row.timestamp,
            row.chapter_title,
            row.chapter_type,
        ) {
            let opposing_deck = match (row.opposing_deck_id, row.opposing_deck_name) {
                (Some(deck_id), Some(name)) => Some(DeckSummary {
                    id: deck_id,
                    name,
                    icons: decode_icons(row.opposing_deck_icons.as_deref()),
                }),
                _ => None,
            };
            if let Some(res) = resources.last_mut() {
                res.chapters.push(QueueChapter {
                    id,
                    timestamp,
                    title,
                    chapter_type,
                    opposing_deck_id: row.opposing_deck_id,
                    opposing_deck,
                });
            }
        }
    }

    resources
}

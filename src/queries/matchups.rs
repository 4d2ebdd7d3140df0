//! Family-expanded matchup aggregation.
//!
//! Answering "what matchups exist against deck X" must cover X's whole
//! variant family: a chapter recorded against "Charizard Pidgeot" counts as
//! a Charizard matchup and vice versa. The aggregation expands the target
//! deck into its family, pulls every matchup chapter whose opponent is in
//! that family (joined to the owning resource, its deck and author), and
//! groups the result by the source deck of the content.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::connection::Connection;
use crate::error::{MatchdexError, Result};
use crate::models::{chapter, decode_icons, AuthorProfile, Deck, DeckRef, DeckSummary};
use crate::sql_builder::SqlBuilder;
use crate::variants;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// The content item a matchup chapter was found in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupResource {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub platform: Option<String>,
    pub publication_date: Option<String>,
    /// The source deck the content is about. Always present in aggregated
    /// output; chapters from deck-less resources are discarded.
    pub deck: Option<DeckSummary>,
    pub author_profile: Option<AuthorProfile>,
}

/// One matchup chapter, joined to its resource and opposing deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupChapter {
    pub id: i64,
    pub timestamp: String,
    pub title: String,
    pub chapter_type: String,
    pub opposing_deck: Option<DeckSummary>,
    pub resource: MatchupResource,
}

/// Matchup chapters from one source deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckMatchupGroup {
    pub deck: DeckSummary,
    pub chapters: Vec<MatchupChapter>,
}

/// Aggregated matchup data for a deck and its whole variant family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckMatchups {
    /// The family's base archetype name.
    pub base_deck: String,
    /// Every deck in the family, the target included.
    pub related_decks: Vec<DeckRef>,
    pub total_chapters: usize,
    /// Flat chapter list, most recent content first.
    pub chapters: Vec<MatchupChapter>,
    /// Chapters grouped by source deck, in first-seen order.
    pub grouped_by_deck: Vec<DeckMatchupGroup>,
}

// ---------------------------------------------------------------------------
// Flat row shape returned by the join query
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchupRow {
    id: i64,
    timestamp: String,
    title: String,
    chapter_type: String,
    opposing_deck_id: Option<i64>,
    opposing_deck_name: Option<String>,
    opposing_deck_icons: Option<String>,
    resource_id: i64,
    resource_title: String,
    resource_url: String,
    resource_type: String,
    platform: Option<String>,
    publication_date: Option<String>,
    source_deck_id: Option<i64>,
    source_deck_name: Option<String>,
    source_deck_icons: Option<String>,
    author_id: Option<i64>,
    author_name: Option<String>,
    author_slug: Option<String>,
}

const MATCHUP_COLUMNS: &[&str] = &[
    "c.id AS \"id\"",
    "c.\"timestamp\" AS \"timestamp\"",
    "c.title AS \"title\"",
    "c.chapterType AS \"chapterType\"",
    "c.opposingDeckId AS \"opposingDeckId\"",
    "od.name AS \"opposingDeckName\"",
    "od.icons AS \"opposingDeckIcons\"",
    "r.id AS \"resourceId\"",
    "r.title AS \"resourceTitle\"",
    "r.url AS \"resourceUrl\"",
    "r.\"type\" AS \"resourceType\"",
    "r.platform AS \"platform\"",
    "r.publicationDate AS \"publicationDate\"",
    "d.id AS \"sourceDeckId\"",
    "d.name AS \"sourceDeckName\"",
    "d.icons AS \"sourceDeckIcons\"",
    "a.id AS \"authorId\"",
    "a.name AS \"authorName\"",
    "a.slug AS \"authorSlug\"",
];

// ---------------------------------------------------------------------------
// MatchupQuery
// ---------------------------------------------------------------------------

/// Query interface for family-expanded matchup aggregation.
pub struct MatchupQuery<'a> {
    conn: &'a Connection,
}

impl<'a> MatchupQuery<'a> {
    /// Create a new `MatchupQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Aggregate every matchup recorded against `deck_id`'s variant family.
    ///
    /// Fails with `NotFound` when the deck does not exist. An empty result
    /// (no matchups anywhere) is a valid outcome, not an error.
    pub fn for_deck(&self, deck_id: i64) -> Result<DeckMatchups> {
        self.conn
            .ensure_tables(&["decks", "resources", "chapters", "author_profiles"])?;

        let (sql, params) = SqlBuilder::new("decks").order_by(&["name ASC"]).build();
        let decks: Vec<Deck> = self.conn.execute_into(&sql, &params)?;

        let target = decks
            .iter()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| MatchdexError::NotFound(format!("Deck {} not found", deck_id)))?;

        let base_deck = variants::base_name_of(target).to_string();
        let family = variants::family_of(deck_id, &decks)?;
        let related_decks: Vec<DeckRef> = family
            .iter()
            .map(|d| DeckRef {
                id: d.id,
                name: d.name.clone(),
            })
            .collect();

        let id_strings: Vec<String> = family.iter().map(|d| d.id.to_string()).collect();
        let id_refs: Vec<&str> = id_strings.iter().map(|s| s.as_str()).collect();

        let (sql, params) = SqlBuilder::new("chapters c")
            .select(MATCHUP_COLUMNS)
            .join("JOIN resources r ON c.resourceId = r.id")
            .join("LEFT JOIN decks d ON r.deckId = d.id")
            .join("LEFT JOIN author_profiles a ON r.authorProfileId = a.id")
            .join("LEFT JOIN decks od ON c.opposingDeckId = od.id")
            .where_eq("c.chapterType", chapter::MATCHUP)
            .where_in("c.opposingDeckId", &id_refs)
            .order_by(&["r.publicationDate DESC"])
            .build();

        let rows: Vec<MatchupRow> = self.conn.execute_into(&sql, &params)?;

        // A matchup cannot be attributed to an unknown source deck.
        let chapters: Vec<MatchupChapter> = rows
            .into_iter()
            .filter(|row| row.source_deck_id.is_some())
            .map(MatchupChapter::from_row)
            .collect();

        let grouped_by_deck = group_by_source_deck(&chapters);

        Ok(DeckMatchups {
            base_deck,
            related_decks,
            total_chapters: chapters.len(),
            chapters,
            grouped_by_deck,
        })
    }
}

impl MatchupChapter {
    fn from_row(row: MatchupRow) -> Self {
        let opposing_deck = match (row.opposing_deck_id, row.opposing_deck_name) {
            (Some(id), Some(name)) => Some(DeckSummary {
                id,
                name,
                icons: decode_icons(row.opposing_deck_icons.as_deref()),
            }),
            _ => None,
        };

        let deck = match (row.source_deck_id, row.source_deck_name) {
            (Some(id), Some(name)) => Some(DeckSummary {
                id,
                name,
                icons: decode_icons(row.source_deck_icons.as_deref()),
            }),
            _ => None,
        };

        let author_profile = match (row.author_id, row.author_name, row.author_slug) {
            (Some(id), Some(name), Some(slug)) => Some(AuthorProfile { id, name, slug }),
            _ => None,
        };

        MatchupChapter {
            id: row.id,
            timestamp: row.timestamp,
            title: row.title,
            chapter_type: row.chapter_type,
            opposing_deck,
            resource: MatchupResource {
                id: row.resource_id,
                title: row.resource_title,
                url: row.resource_url,
                type_field: row.resource_type,
                platform: row.platform,
                publication_date: row.publication_date,
                deck,
                author_profile,
            },
        }
    }
}

/// Group chapters by the name of their source deck, preserving the
/// first-seen order of the (already publication-date-ordered) input.
fn group_by_source_deck(chapters: &[MatchupChapter]) -> Vec<DeckMatchupGroup> {
    let mut groups: Vec<DeckMatchupGroup> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for chapter in chapters {
        let deck = match &chapter.resource.deck {
            Some(deck) => deck,
            None => continue,
        };

        let idx = match index_by_name.get(&deck.name) {
            Some(&idx) => idx,
            None => {
                groups.push(DeckMatchupGroup {
                    deck: deck.clone(),
                    chapters: Vec::new(),
                });
                index_by_name.insert(deck.name.clone(), groups.len() - 1);
                groups.len() - 1
            }
        };

        groups[idx].chapters.push(chapter.clone());
    }

    groups
}

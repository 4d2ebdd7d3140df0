//! Variant family resolution over the live deck table.
//!
//! Thin wrapper that fetches the deck list once and runs the pure logic in
//! [`crate::variants`].

use crate::connection::Connection;
use crate::error::{MatchdexError, Result};
use crate::models::Deck;
use crate::queries::decks::DeckQuery;
use crate::variants::{self, VariantAssignment, VariantRules};

// ---------------------------------------------------------------------------
// VariantQuery
// ---------------------------------------------------------------------------

/// Query interface for deck variant families.
pub struct VariantQuery<'a> {
    conn: &'a Connection,
}

impl<'a> VariantQuery<'a> {
    /// Create a new `VariantQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The base archetype name of the deck with `deck_id`.
    ///
    /// Fails with `NotFound` when the deck does not exist.
    pub fn base_of(&self, deck_id: i64) -> Result<String> {
        let decks = DeckQuery::new(self.conn).list()?;
        let target = decks
            .iter()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| MatchdexError::NotFound(format!("Deck {} not found", deck_id)))?;
        Ok(variants::base_name_of(target).to_string())
    }

    /// Every member of the family the deck with `deck_id` belongs to,
    /// including itself.
    pub fn family_of(&self, deck_id: i64) -> Result<Vec<Deck>> {
        let decks = DeckQuery::new(self.conn).list()?;
        let family = variants::family_of(deck_id, &decks)?;
        Ok(family.into_iter().cloned().collect())
    }

    /// Run the offline auto-classification pass and return the proposed
    /// `variantOf` assignments. Nothing is written; applying the plan
    /// belongs to the curation side.
    pub fn plan(&self, rules: &VariantRules) -> Result<Vec<VariantAssignment>> {
        let decks = DeckQuery::new(self.conn).list()?;
        Ok(rules.classify(&decks))
    }
}

//! Deck variant family resolution.
//!
//! Decks that are cosmetic/tech variants of one base archetype form a
//! *family*: the base deck plus every deck whose `variantOf` names it.
//! `variantOf` is a name-based weak reference resolved at read time; a name
//! with no matching deck still acts as a base name for grouping.
//!
//! The data model assumes a single level of variance. A variant whose base
//! itself carries a `variantOf` is an ingestion defect; resolution here is
//! deliberately non-recursive.

use crate::config;
use crate::error::{MatchdexError, Result};
use crate::models::Deck;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Family resolution
// ---------------------------------------------------------------------------

/// The base archetype name of a deck: its `variantOf` when set and
/// non-empty, else its own name.
pub fn base_name_of(deck: &Deck) -> &str {
    match deck.variant_of.as_deref() {
        Some(base) if !base.is_empty() => base,
        _ => &deck.name,
    }
}

/// All members of the variant family the deck with `deck_id` belongs to:
/// the base deck plus every variant, regardless of which member was asked
/// about. Order follows the input slice.
///
/// Fails with `NotFound` when `deck_id` matches no deck.
pub fn family_of(deck_id: i64, decks: &[Deck]) -> Result<Vec<&Deck>> {
    let target = decks
        .iter()
        .find(|d| d.id == deck_id)
        .ok_or_else(|| MatchdexError::NotFound(format!("Deck {} not found", deck_id)))?;

    let base = base_name_of(target);
    Ok(decks
        .iter()
        .filter(|d| d.name == base || base_name_of(d) == base)
        .collect())
}

/// Ids of every deck in the family of `deck_id`. Always contains `deck_id`
/// itself.
pub fn family_ids(deck_id: i64, decks: &[Deck]) -> Result<Vec<i64>> {
    Ok(family_of(deck_id, decks)?.into_iter().map(|d| d.id).collect())
}

// ---------------------------------------------------------------------------
// Auto-classification
// ---------------------------------------------------------------------------

/// A proposed `variantOf` assignment produced by [`VariantRules::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAssignment {
    pub deck_id: i64,
    pub deck_name: String,
    pub base_name: String,
}

/// Rules for the offline variant-classification pass.
///
/// The override table is consulted before the prefix heuristic, which makes
/// known misclassifications correctable without touching the heuristic.
#[derive(Debug, Clone)]
pub struct VariantRules {
    overrides: HashMap<String, String>,
}

impl Default for VariantRules {
    fn default() -> Self {
        let overrides = config::variant_overrides()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { overrides }
    }
}

impl VariantRules {
    /// Rules with no overrides at all (prefix heuristic only).
    pub fn empty() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Add or replace a name -> base-name override.
    pub fn with_override(mut self, name: &str, base: &str) -> Self {
        self.overrides.insert(name.to_string(), base.to_string());
        self
    }

    /// Compute `variantOf` assignments for every deck lacking one.
    ///
    /// For each unclassified deck the override table wins; otherwise all
    /// decks are scanned alphabetically by name and the first other deck
    /// whose name is a space-separated prefix of this deck's name becomes
    /// the base (`"Charizard Pidgeot"` is a variant of `"Charizard"`).
    ///
    /// The first alphabetical match wins, which can misclassify when
    /// several candidate bases are prefixes of each other. That ambiguity
    /// is accepted; add an override instead of special-casing the scan.
    ///
    /// Decks matching no rule get no assignment and stay their own base.
    /// This is a plan: nothing is written here.
    pub fn classify(&self, decks: &[Deck]) -> Vec<VariantAssignment> {
        let mut by_name: Vec<&Deck> = decks.iter().collect();
        by_name.sort_by(|a, b| a.name.cmp(&b.name));

        let mut assignments = Vec::new();

        for deck in &by_name {
            if deck.variant_of.as_deref().is_some_and(|v| !v.is_empty()) {
                continue;
            }

            let base = match self.overrides.get(&deck.name) {
                Some(base) => Some(base.clone()),
                None => by_name
                    .iter()
                    .find(|b| {
                        b.name != deck.name
                            && deck
                                .name
                                .strip_prefix(&b.name)
                                .is_some_and(|rest| rest.starts_with(' '))
                    })
                    .map(|b| b.name.clone()),
            };

            // A deck never varies itself, even via a bad override.
            if let Some(base_name) = base {
                if base_name != deck.name {
                    assignments.push(VariantAssignment {
                        deck_id: deck.id,
                        deck_name: deck.name.clone(),
                        base_name,
                    });
                }
            }
        }

        assignments
    }
}

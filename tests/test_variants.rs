//! Tests for variant family resolution and auto-classification.

mod common;

use matchdex::models::Deck;
use matchdex::queries::variants::VariantQuery;
use matchdex::variants::{base_name_of, family_ids, family_of, VariantRules};
use matchdex::MatchdexError;

fn deck(id: i64, name: &str, variant_of: Option<&str>) -> Deck {
    Deck {
        id,
        name: name.to_string(),
        variant_of: variant_of.map(|s| s.to_string()),
        icons: None,
    }
}

fn sample_decks() -> Vec<Deck> {
    vec![
        deck(1, "Charizard", None),
        deck(2, "Charizard Pidgeot", Some("Charizard")),
        deck(3, "Gardevoir", None),
        deck(4, "Raging Bolt", None),
        deck(5, "Raging Bolt Ogerpon", Some("Raging Bolt")),
        deck(6, "Lost Box", None),
        deck(7, "Dragapult Dusknoir", Some("Dragapult")),
    ]
}

// ---------------------------------------------------------------------------
// base_name_of
// ---------------------------------------------------------------------------

#[test]
fn test_base_name_of_variant() {
    let d = deck(2, "Charizard Pidgeot", Some("Charizard"));
    assert_eq!(base_name_of(&d), "Charizard");
}

#[test]
fn test_base_name_of_base_deck() {
    let d = deck(1, "Charizard", None);
    assert_eq!(base_name_of(&d), "Charizard");
}

#[test]
fn test_empty_variant_of_means_base() {
    let d = deck(1, "Charizard", Some(""));
    assert_eq!(base_name_of(&d), "Charizard");
}

// ---------------------------------------------------------------------------
// family_of
// ---------------------------------------------------------------------------

#[test]
fn test_family_from_base() {
    let decks = sample_decks();
    let ids = family_ids(1, &decks).unwrap();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_family_is_symmetric() {
    // Asking from the variant yields the same family as from the base.
    let decks = sample_decks();
    let from_base = family_ids(1, &decks).unwrap();
    let from_variant = family_ids(2, &decks).unwrap();
    assert_eq!(from_base, from_variant);
}

#[test]
fn test_family_always_contains_self() {
    let decks = sample_decks();
    for d in &decks {
        let ids = family_ids(d.id, &decks).unwrap();
        assert!(ids.contains(&d.id), "family of {} misses itself", d.name);
    }
}

#[test]
fn test_families_do_not_leak_across() {
    let decks = sample_decks();
    let charizard = family_ids(1, &decks).unwrap();
    let raging_bolt = family_ids(4, &decks).unwrap();
    assert_eq!(raging_bolt, vec![4, 5]);
    assert!(charizard.iter().all(|id| !raging_bolt.contains(id)));
}

#[test]
fn test_lone_base_deck_is_family_of_one() {
    let decks = sample_decks();
    let ids = family_ids(3, &decks).unwrap();
    assert_eq!(ids, vec![3]);
}

#[test]
fn test_dangling_variant_of_is_family_of_one() {
    // "Dragapult Dusknoir" points at a base with no deck row. The name still
    // groups, but nothing else shares it.
    let decks = sample_decks();
    let ids = family_ids(7, &decks).unwrap();
    assert_eq!(ids, vec![7]);
}

#[test]
fn test_dangling_variants_with_shared_base_group_together() {
    let decks = vec![
        deck(1, "Dragapult Dusknoir", Some("Dragapult")),
        deck(2, "Dragapult Charizard", Some("Dragapult")),
        deck(3, "Gardevoir", None),
    ];
    let ids = family_ids(1, &decks).unwrap();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_family_of_unknown_deck_is_not_found() {
    let decks = sample_decks();
    let err = family_of(999, &decks).unwrap_err();
    assert!(matches!(err, MatchdexError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// VariantRules::classify
// ---------------------------------------------------------------------------

#[test]
fn test_classify_by_prefix() {
    let decks = vec![
        deck(1, "Charizard", None),
        deck(2, "Charizard Pidgeot", None),
        deck(3, "Gardevoir", None),
    ];

    let plan = VariantRules::empty().classify(&decks);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].deck_id, 2);
    assert_eq!(plan[0].base_name, "Charizard");
}

#[test]
fn test_classify_requires_word_boundary() {
    // "Charizarder" shares the prefix but not at a space boundary.
    let decks = vec![deck(1, "Charizard", None), deck(2, "Charizarder", None)];
    let plan = VariantRules::empty().classify(&decks);
    assert!(plan.is_empty());
}

#[test]
fn test_classify_skips_already_classified() {
    let decks = vec![
        deck(1, "Charizard", None),
        deck(2, "Charizard Pidgeot", Some("Charizard")),
    ];
    let plan = VariantRules::empty().classify(&decks);
    assert!(plan.is_empty());
}

#[test]
fn test_classify_first_alphabetical_prefix_wins() {
    // Both "Lugia" and "Lugia Archeops" are prefixes of the longer name;
    // the alphabetical scan picks "Lugia" first.
    let decks = vec![
        deck(1, "Lugia", None),
        deck(2, "Lugia Archeops", None),
        deck(3, "Lugia Archeops Control", None),
    ];

    let plan = VariantRules::empty().classify(&decks);
    let control = plan.iter().find(|a| a.deck_id == 3).unwrap();
    assert_eq!(control.base_name, "Lugia");
}

#[test]
fn test_classify_override_beats_prefix() {
    let decks = vec![
        deck(1, "Lugia", None),
        deck(2, "Lugia Archeops", None),
        deck(3, "Lugia Archeops Control", None),
    ];

    let rules = VariantRules::empty().with_override("Lugia Archeops Control", "Lugia Archeops");
    let plan = rules.classify(&decks);
    let control = plan.iter().find(|a| a.deck_id == 3).unwrap();
    assert_eq!(control.base_name, "Lugia Archeops");
}

#[test]
fn test_classify_ignores_self_override() {
    let decks = vec![deck(1, "Charizard", None)];
    let rules = VariantRules::empty().with_override("Charizard", "Charizard");
    assert!(rules.classify(&decks).is_empty());
}

#[test]
fn test_classify_output_is_alphabetical() {
    let decks = vec![
        deck(1, "Raging Bolt", None),
        deck(2, "Raging Bolt Ogerpon", None),
        deck(3, "Charizard", None),
        deck(4, "Charizard Pidgeot", None),
    ];

    let plan = VariantRules::empty().classify(&decks);
    let names: Vec<&str> = plan.iter().map(|a| a.deck_name.as_str()).collect();
    assert_eq!(names, vec!["Charizard Pidgeot", "Raging Bolt Ogerpon"]);
}

#[test]
fn test_default_rules_carry_known_overrides() {
    let decks = vec![
        deck(1, "Charizard", None),
        deck(2, "Charizard Dusknoir", None),
    ];

    let plan = VariantRules::default().classify(&decks);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].base_name, "Charizard");
}

// ---------------------------------------------------------------------------
// VariantQuery against the sample database
// ---------------------------------------------------------------------------

#[test]
fn test_query_base_of() {
    let (conn, _tmp) = common::setup_sample_db();
    let query = VariantQuery::new(&conn);

    assert_eq!(query.base_of(1).unwrap(), "Charizard");
    assert_eq!(query.base_of(2).unwrap(), "Charizard");
    assert_eq!(query.base_of(7).unwrap(), "Dragapult");
}

#[test]
fn test_query_family_of() {
    let (conn, _tmp) = common::setup_sample_db();
    let query = VariantQuery::new(&conn);

    let family = query.family_of(5).unwrap();
    let mut names: Vec<&str> = family.iter().map(|d| d.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Raging Bolt", "Raging Bolt Ogerpon"]);
}

#[test]
fn test_query_unknown_deck_is_not_found() {
    let (conn, _tmp) = common::setup_sample_db();
    let query = VariantQuery::new(&conn);

    let err = query.base_of(999).unwrap_err();
    assert!(matches!(err, MatchdexError::NotFound(_)));
}

#[test]
fn test_query_plan_over_sample_data() {
    // Only "Lost Box" and the base decks lack a variantOf, and none of them
    // is a prefix of another, so the plan is empty.
    let (conn, _tmp) = common::setup_sample_db();
    let query = VariantQuery::new(&conn);

    let plan = query.plan(&VariantRules::empty()).unwrap();
    assert!(plan.is_empty());
}

use std::collections::HashMap;
use std::path::PathBuf;

/// Default base URL for the published catalog export.
///
/// The ingestion side publishes a versioned NDJSON export of the catalog
/// (decks, resources, chapters, author profiles) plus a `meta.json` version
/// stamp. Overridable via [`MatchdexBuilder::export_base`](crate::MatchdexBuilder::export_base).
pub const EXPORT_BASE: &str = "https://catalog.matchdex.gg/export/v1";

/// Path of the version stamp relative to the export base.
pub const META_FILE: &str = "meta.json";

pub fn export_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("decks", "decks.ndjson"),
        ("resources", "resources.ndjson"),
        ("chapters", "chapters.ndjson"),
        ("author_profiles", "authorProfiles.ndjson"),
    ])
}

/// Explicit column schemas for the export tables.
///
/// Registration passes these to `read_json` instead of letting DuckDB sniff
/// types: dates in the export are ISO-8601 strings ordered lexicographically,
/// and chapter timestamps are `MM:SS`/`HH:MM:SS` strings parsed by
/// [`crate::timestamp`] -- the sniffer would otherwise type them as
/// DATE/TIMESTAMP/TIME and mangle them on the way back out.
pub fn table_schemas() -> HashMap<&'static str, Vec<(&'static str, &'static str)>> {
    HashMap::from([
        (
            "decks",
            vec![
                ("id", "BIGINT"),
                ("name", "VARCHAR"),
                ("variantOf", "VARCHAR"),
                ("icons", "VARCHAR"),
            ],
        ),
        (
            "resources",
            vec![
                ("id", "BIGINT"),
                ("title", "VARCHAR"),
                ("url", "VARCHAR"),
                ("type", "VARCHAR"),
                ("status", "VARCHAR"),
                ("platform", "VARCHAR"),
                ("publicationDate", "VARCHAR"),
                ("createdAt", "VARCHAR"),
                ("deckId", "BIGINT"),
                ("authorProfileId", "BIGINT"),
            ],
        ),
        (
            "chapters",
            vec![
                ("id", "BIGINT"),
                ("resourceId", "BIGINT"),
                ("timestamp", "VARCHAR"),
                ("title", "VARCHAR"),
                ("chapterType", "VARCHAR"),
                ("opposingDeckId", "BIGINT"),
            ],
        ),
        (
            "author_profiles",
            vec![("id", "BIGINT"), ("name", "VARCHAR"), ("slug", "VARCHAR")],
        ),
    ])
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("matchdex")
    } else {
        PathBuf::from(".matchdex-cache")
    }
}

/// Maintained overrides for the variant auto-classification pass.
///
/// Checked before the prefix heuristic. Keys are deck names, values the
/// base deck name they are a variant of.
pub fn variant_overrides() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        // Charizard variants
        ("Charizard Pidgeot", "Charizard"),
        ("Charizard Dusknoir", "Charizard"),
        ("Charizard Bibarel", "Charizard"),
        // Raging Bolt variants
        ("Raging Bolt Ogerpon", "Raging Bolt"),
        ("Raging Bolt Gouging Fire", "Raging Bolt"),
        // Other known variants
        ("Lugia Archeops", "Lugia"),
        ("Giratina Comfey", "Giratina"),
        ("Gardevoir Drifloon", "Gardevoir"),
    ])
}

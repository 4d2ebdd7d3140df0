//! Shared test fixtures for the Matchdex integration tests.
//!
//! Provides `setup_sample_db()` which creates an in-memory DuckDB connection
//! populated with a small sample catalog (decks, resources, chapters,
//! author_profiles) via NDJSON temp files.

use matchdex::{Connection, SnapshotManager};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Create a `Connection` backed by a temporary cache directory with sample
/// catalog data loaded into DuckDB tables via NDJSON temp files.
///
/// Returns `(Connection, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test so the cache directory is
/// not deleted prematurely.
///
/// Sample layout:
/// - Decks: Charizard (1) with variant Charizard Pidgeot (2); Gardevoir (3);
///   Raging Bolt (4) with variant Raging Bolt Ogerpon (5); Lost Box (6);
///   Dragapult Dusknoir (7) whose `variantOf` dangles.
/// - Matchups against the Charizard family come from Gardevoir (pub day 1),
///   Lost Box (pub day 2) and Raging Bolt (pub day 3) content, plus one
///   chapter on a resource with no deck assigned.
/// - The review queue should contain exactly resource 4 (gameplay, no
///   chapters) and resource 2 (unresolved matchup), in that order.
pub fn setup_sample_db() -> (Connection, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let snapshot = SnapshotManager::new(
        Some(tmp_dir.path().to_path_buf()),
        None,
        true,
        Duration::from_secs(30),
    )
    .unwrap();
    let conn = Connection::new(snapshot).unwrap();

    register_decks(&conn);
    register_author_profiles(&conn);
    register_resources(&conn);
    register_chapters(&conn);

    (conn, tmp_dir)
}

fn register_decks(conn: &Connection) {
    let decks = vec![
        serde_json::json!({
            "id": 1,
            "name": "Charizard",
            "variantOf": null,
            "icons": "[\"https://img.example/charizard.png\"]"
        }),
        serde_json::json!({
            "id": 2,
            "name": "Charizard Pidgeot",
            "variantOf": "Charizard",
            "icons": "[\"https://img.example/charizard.png\",\"https://img.example/pidgeot.png\"]"
        }),
        serde_json::json!({
            "id": 3,
            "name": "Gardevoir",
            "variantOf": null,
            // Deliberately malformed encoding; must decode to an empty list
            "icons": "not-json"
        }),
        serde_json::json!({
            "id": 4,
            "name": "Raging Bolt",
            "variantOf": null,
            "icons": null
        }),
        serde_json::json!({
            "id": 5,
            "name": "Raging Bolt Ogerpon",
            "variantOf": "Raging Bolt",
            "icons": "[\"https://img.example/raging-bolt.png\"]"
        }),
        serde_json::json!({
            "id": 6,
            "name": "Lost Box",
            "variantOf": null,
            "icons": "[]"
        }),
        serde_json::json!({
            "id": 7,
            "name": "Dragapult Dusknoir",
            "variantOf": "Dragapult",
            "icons": null
        }),
    ];

    write_ndjson_and_register(conn, "decks", &decks);
}

fn register_author_profiles(conn: &Connection) {
    let authors = vec![
        serde_json::json!({"id": 1, "name": "Keedris", "slug": "keedris"}),
        serde_json::json!({"id": 2, "name": "Table Town", "slug": "table-town"}),
    ];

    write_ndjson_and_register(conn, "author_profiles", &authors);
}

fn register_resources(conn: &Connection) {
    let resources = vec![
        serde_json::json!({
            "id": 1,
            "title": "Gardevoir ladder session",
            "url": "https://youtube.com/watch?v=gardy1",
            "type": "Gameplay",
            "status": "approved",
            "platform": "youtube",
            "publicationDate": "2024-06-01T00:00:00Z",
            "createdAt": "2024-06-02T10:00:00Z",
            "deckId": 3,
            "authorProfileId": 1
        }),
        serde_json::json!({
            "id": 2,
            "title": "Raging Bolt tournament run",
            "url": "https://youtube.com/watch?v=bolt1",
            "type": "Gameplay",
            "status": "approved",
            "platform": "youtube",
            "publicationDate": "2024-06-03T00:00:00Z",
            "createdAt": "2024-06-03T09:00:00Z",
            "deckId": 4,
            "authorProfileId": 2
        }),
        serde_json::json!({
            "id": 3,
            "title": "Mystery gameplay (deck unknown)",
            "url": "https://youtube.com/watch?v=mystery",
            "type": "Gameplay",
            "status": "approved",
            "platform": "youtube",
            "publicationDate": "2024-06-02T00:00:00Z",
            "createdAt": "2024-06-02T11:00:00Z",
            "deckId": null,
            "authorProfileId": null
        }),
        serde_json::json!({
            "id": 4,
            "title": "Best plays of the week",
            "url": "https://youtube.com/watch?v=highlights",
            "type": "Gameplay Highlights",
            "status": "approved",
            "platform": "youtube",
            "publicationDate": "2024-06-04T00:00:00Z",
            "createdAt": "2024-06-05T08:00:00Z",
            "deckId": 3,
            "authorProfileId": 1
        }),
        serde_json::json!({
            "id": 5,
            "title": "June tierlist",
            "url": "https://youtube.com/watch?v=tierlist",
            "type": "Tierlist",
            "status": "approved",
            "platform": "youtube",
            "publicationDate": "2024-06-04T00:00:00Z",
            "createdAt": "2024-06-04T08:00:00Z",
            "deckId": 1,
            "authorProfileId": null
        }),
        serde_json::json!({
            "id": 6,
            "title": "Unreviewed gameplay upload",
            "url": "https://youtube.com/watch?v=pending",
            "type": "Gameplay",
            "status": "pending",
            "platform": "youtube",
            "publicationDate": "2024-06-06T00:00:00Z",
            "createdAt": "2024-06-06T07:00:00Z",
            "deckId": 6,
            "authorProfileId": null
        }),
        serde_json::json!({
            "id": 7,
            "title": "Lost Box grind",
            "url": "https://youtube.com/watch?v=lostbox",
            "type": "Gameplay",
            "status": "approved",
            "platform": "twitch",
            "publicationDate": "2024-06-02T12:00:00Z",
            "createdAt": "2024-06-02T12:00:00Z",
            "deckId": 6,
            "authorProfileId": 2
        }),
    ];

    write_ndjson_and_register(conn, "resources", &resources);
}

fn register_chapters(conn: &Connection) {
    // Chapter rows are intentionally not in chronological order, so tests
    // can observe the timestamp sort.
    let chapters = vec![
        serde_json::json!({
            "id": 1,
            "resourceId": 1,
            "timestamp": "10:15",
            "title": "vs Charizard Pidgeot",
            "chapterType": "Matchup",
            "opposingDeckId": 2
        }),
        serde_json::json!({
            "id": 2,
            "resourceId": 1,
            "timestamp": "01:02:03",
            "title": "vs Raging Bolt",
            "chapterType": "Matchup",
            "opposingDeckId": 4
        }),
        serde_json::json!({
            "id": 3,
            "resourceId": 1,
            "timestamp": "00:30",
            "title": "Deck overview",
            "chapterType": "Discussion",
            "opposingDeckId": null
        }),
        serde_json::json!({
            "id": 4,
            "resourceId": 2,
            "timestamp": "12:00",
            "title": "vs ???",
            "chapterType": "Matchup",
            "opposingDeckId": null
        }),
        serde_json::json!({
            "id": 5,
            "resourceId": 2,
            "timestamp": "05:00",
            "title": "vs Charizard",
            "chapterType": "Matchup",
            "opposingDeckId": 1
        }),
        serde_json::json!({
            "id": 6,
            "resourceId": 3,
            "timestamp": "03:00",
            "title": "vs Charizard",
            "chapterType": "Matchup",
            "opposingDeckId": 1
        }),
        serde_json::json!({
            "id": 7,
            "resourceId": 7,
            "timestamp": "02:00",
            "title": "vs Charizard Pidgeot",
            "chapterType": "Matchup",
            "opposingDeckId": 2
        }),
    ];

    write_ndjson_and_register(conn, "chapters", &chapters);
}

/// Write a slice of JSON values as NDJSON to a temp file and register it
/// as a DuckDB table via `Connection::register_table_from_ndjson`.
fn write_ndjson_and_register(conn: &Connection, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    conn.register_table_from_ndjson(table_name, path).unwrap();
    // NamedTempFile is dropped here, but DuckDB has already read the data
    // into an in-memory table, so this is fine.
}

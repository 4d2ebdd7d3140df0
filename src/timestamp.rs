//! Chapter timestamp ordering.
//!
//! Converts the human `MM:SS` / `HH:MM:SS` timestamps on chapters into a
//! comparable scalar. Every component that orders chapters goes through
//! this module.

use crate::models::Chapter;

/// Convert a chapter timestamp into seconds.
///
/// Accepts `"MM:SS"` or `"HH:MM:SS"`. Any other shape (wrong component
/// count, non-numeric parts) yields `0`, so malformed timestamps sort
/// first instead of aborting the whole ordering. Absurdly large numeric
/// components saturate rather than overflow, so they sort last.
///
/// ```
/// use matchdex::timestamp::timestamp_to_seconds;
/// assert_eq!(timestamp_to_seconds("01:02:03"), 3723);
/// assert_eq!(timestamp_to_seconds("02:03"), 123);
/// assert_eq!(timestamp_to_seconds("garbage"), 0);
/// assert_eq!(timestamp_to_seconds("1300000:00:00"), 4_680_000_000);
/// ```
pub fn timestamp_to_seconds(timestamp: &str) -> u64 {
    let parts: Option<Vec<u64>> = timestamp
        .split(':')
        .map(|p| p.trim().parse::<u64>().ok())
        .collect();

    match parts.as_deref() {
        Some(&[h, m, s]) => h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(s),
        Some(&[m, s]) => m.saturating_mul(60).saturating_add(s),
        _ => 0,
    }
}

/// Sort chapters chronologically by their timestamp scalar.
///
/// The sort is stable: chapters with equal scalars (including malformed
/// timestamps, which all map to `0`) keep their relative input order.
pub fn sort_chapters_by_time(mut chapters: Vec<Chapter>) -> Vec<Chapter> {
    chapters.sort_by_key(|c| timestamp_to_seconds(&c.timestamp));
    chapters
}

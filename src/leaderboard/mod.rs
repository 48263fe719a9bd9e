//! Local leaderboard: a short list of `{name, score}` records kept sorted by
//! score, highest first.
//!
//! Storage sits behind [`LeaderboardStore`] so the simulation never knows
//! whether it is talking to a JSON file or an in-memory buffer.

pub mod store;

pub use store::{JsonFileStore, MemoryStore};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Entries kept after every write.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Fixed storage identifier (file name under the data directory).
pub const LEADERBOARD_FILE: &str = "canton_halloween_leaderboard.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Backing storage for the leaderboard.
pub trait LeaderboardStore {
    /// Stored entries in stored order. Missing or unreadable data yields an
    /// empty list.
    fn load(&self) -> Vec<LeaderboardEntry>;

    /// Replace the stored entries.
    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError>;
}

/// Sort highest score first and cap at [`LEADERBOARD_CAPACITY`].
///
/// The sort is stable: on equal scores earlier entries stay ahead, so a new
/// entry never displaces an existing one with the same score.
pub fn rank(entries: &mut Vec<LeaderboardEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_CAPACITY);
}

/// Current standings, ranked.
pub fn standings<S: LeaderboardStore + ?Sized>(store: &S) -> Vec<LeaderboardEntry> {
    let mut entries = store.load();
    rank(&mut entries);
    entries
}

/// Merge `entry` into the stored leaderboard and write it back.
///
/// Returns the ranked list that was saved.
pub fn record<S: LeaderboardStore + ?Sized>(
    store: &mut S,
    entry: LeaderboardEntry,
) -> Result<Vec<LeaderboardEntry>, StoreError> {
    let mut entries = store.load();
    entries.push(entry);
    rank(&mut entries);
    store.save(&entries)?;
    Ok(entries)
}

/// 1-based position of `entry` in `entries`, if present.
pub fn position_of(entries: &[LeaderboardEntry], entry: &LeaderboardEntry) -> Option<usize> {
    entries.iter().rposition(|e| e == entry).map(|i| i + 1)
}

pub fn decode_entries(text: &str) -> Result<Vec<LeaderboardEntry>, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn encode_entries(entries: &[LeaderboardEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score)
    }

    #[test]
    fn test_rank_sorts_descending() {
        let mut entries = vec![entry("a", 1), entry("b", 7), entry("c", 3)];
        rank(&mut entries);
        let scores: Vec<u32> = entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![7, 3, 1]);
    }

    #[test]
    fn test_rank_truncates_to_capacity() {
        let mut entries: Vec<LeaderboardEntry> =
            (0..25).map(|i| entry(&format!("p{}", i), i)).collect();
        rank(&mut entries);
        assert_eq!(entries.len(), LEADERBOARD_CAPACITY);
        assert_eq!(entries[0].score, 24);
        assert_eq!(entries[9].score, 15);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        let mut entries = vec![entry("first", 5), entry("second", 5)];
        rank(&mut entries);
        assert_eq!(entries[0].name, "first");
        assert_eq!(entries[1].name, "second");
    }

    #[test]
    fn test_record_merges_and_saves() {
        let mut store = MemoryStore::with_entries(&[entry("A", 5)]);
        let saved = record(&mut store, entry("B", 10)).unwrap();

        assert_eq!(saved, vec![entry("B", 10), entry("A", 5)]);
        assert_eq!(store.load(), saved);
    }

    #[test]
    fn test_record_low_score_falls_off_full_board() {
        let full: Vec<LeaderboardEntry> = (1..=10).map(|i| entry("p", i * 10)).collect();
        let mut store = MemoryStore::with_entries(&full);

        let saved = record(&mut store, entry("late", 1)).unwrap();
        assert_eq!(saved.len(), LEADERBOARD_CAPACITY);
        assert!(position_of(&saved, &entry("late", 1)).is_none());
    }

    #[test]
    fn test_position_of() {
        let entries = vec![entry("B", 10), entry("A", 5)];
        assert_eq!(position_of(&entries, &entry("A", 5)), Some(2));
        assert_eq!(position_of(&entries, &entry("C", 1)), None);
    }

    #[test]
    fn test_decode_record_format() {
        let entries = decode_entries(r#"[{"name":"A","score":5}]"#).unwrap();
        assert_eq!(entries, vec![entry("A", 5)]);
    }

    #[test]
    fn test_standings_ranks_unsorted_storage() {
        let store = MemoryStore::with_raw(
            r#"[{"name":"low","score":1},{"name":"high","score":9}]"#,
        );
        let ranked = standings(&store);
        assert_eq!(ranked[0].name, "high");
    }
}

//! Integration test: leaderboard persistence
//!
//! Exercises the JSON file store on a temp directory, both directly and
//! through finished runs.

use canton_run::leaderboard::{
    self, JsonFileStore, LeaderboardEntry, LeaderboardStore, LEADERBOARD_CAPACITY,
    LEADERBOARD_FILE,
};
use canton_run::runner::{Pickup, RunOutcome, RunStatus, RunnerConfig, RunnerSimulation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join(LEADERBOARD_FILE))
}

fn entry(name: &str, score: u32) -> LeaderboardEntry {
    LeaderboardEntry::new(name, score)
}

#[test]
fn test_record_into_existing_board() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.save(&[entry("A", 5)]).unwrap();

    let saved = leaderboard::record(&mut store, entry("B", 10)).unwrap();

    assert_eq!(saved, vec![entry("B", 10), entry("A", 5)]);
    assert_eq!(store.load(), saved);
}

#[test]
fn test_full_board_drops_lowest() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let full: Vec<LeaderboardEntry> = (1..=10).map(|i| entry(&format!("p{}", i), i * 10)).collect();
    store.save(&full).unwrap();

    let saved = leaderboard::record(&mut store, entry("new", 55)).unwrap();

    assert_eq!(saved.len(), LEADERBOARD_CAPACITY);
    assert!(saved.contains(&entry("new", 55)));
    assert!(!saved.contains(&entry("p1", 10)));
    assert!(saved.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_low_score_on_full_board_is_discarded() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let full: Vec<LeaderboardEntry> = (1..=10).map(|i| entry(&format!("p{}", i), i * 10)).collect();
    store.save(&full).unwrap();

    let saved = leaderboard::record(&mut store, entry("late", 1)).unwrap();

    assert_eq!(leaderboard::position_of(&saved, &entry("late", 1)), None);
    assert_eq!(saved.len(), LEADERBOARD_CAPACITY);
}

#[test]
fn test_corrupt_file_is_replaced() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    fs::write(store.path(), "{ not json").unwrap();

    assert!(store.load().is_empty());

    let saved = leaderboard::record(&mut store, entry("C", 3)).unwrap();
    assert_eq!(saved, vec![entry("C", 3)]);

    let on_disk = fs::read_to_string(store.path()).unwrap();
    assert_eq!(leaderboard::decode_entries(&on_disk).unwrap(), saved);
}

#[test]
fn test_missing_parent_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("nested/deeper").join(LEADERBOARD_FILE));

    store.save(&[entry("D", 4)]).unwrap();

    assert_eq!(store.load(), vec![entry("D", 4)]);
}

#[test]
fn test_unsorted_file_is_ranked_on_read() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(
        store.path(),
        r#"[{"name":"low","score":1},{"name":"high","score":9}]"#,
    )
    .unwrap();

    let standings = leaderboard::standings(&store);
    assert_eq!(standings, vec![entry("high", 9), entry("low", 1)]);
}

#[test]
fn test_finished_runs_reach_the_file() {
    let dir = TempDir::new().unwrap();
    let config = RunnerConfig {
        first_obstacle_delay_ticks: u64::MAX,
        pickup_interval_ticks: 0,
        win_threshold: Some(2),
        ..RunnerConfig::default()
    };
    let mut sim = RunnerSimulation::new(config, ChaCha8Rng::seed_from_u64(9), store_in(&dir));

    for name in ["Ada", "Bo"] {
        sim.start(name);
        for _ in 0..2 {
            sim.pickups.push(Pickup {
                x: sim.player.x + sim.run.speed,
                y: sim.player.y,
                size: 20.0,
            });
        }
        sim.advance(1);
        assert_eq!(sim.run.status, RunStatus::Ended(RunOutcome::Won));
        assert_eq!(sim.end_run(), Some(entry(name, 2)));
        assert_eq!(sim.end_run(), None);
    }

    // Equal scores keep the earlier finisher first.
    let reopened = store_in(&dir);
    assert_eq!(reopened.load(), vec![entry("Ada", 2), entry("Bo", 2)]);
    assert_eq!(sim.standings(), reopened.load());
}

//! Canton Halloween Run - terminal side-scroller library.
//!
//! The simulation core ([`runner`]) and the leaderboard ([`leaderboard`]) are
//! independent of the terminal; [`ui`] and [`input`] adapt them to ratatui and
//! crossterm for the `canton-run` binary.

pub mod error;
pub mod input;
pub mod leaderboard;
pub mod runner;
pub mod ui;
pub mod utils;

pub use error::StoreError;
pub use leaderboard::{
    JsonFileStore, LeaderboardEntry, LeaderboardStore, MemoryStore, LEADERBOARD_CAPACITY,
};
pub use runner::{
    process_input, FrameClock, RunOutcome, RunState, RunStatus, RunnerConfig, RunnerInput,
    RunnerPreset, RunnerSimulation, Snapshot,
};

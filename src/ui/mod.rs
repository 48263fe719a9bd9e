//! Terminal rendering. Reads simulation snapshots; never mutates them.

pub mod game_common;
pub mod leaderboard_panel;
pub mod name_entry;
pub mod runner_scene;

//! Side-scrolling runner: jump obstacles, collect pumpkins.

pub mod config;
pub mod logic;
pub mod types;

pub use config::{RunnerConfig, RunnerPreset, SpawnRange};
pub use logic::{process_input, FrameClock, RunnerInput, RunnerSimulation, PHYSICS_TICK_MS};
pub use types::{
    Bounds, Obstacle, Pickup, Player, RunOutcome, RunState, RunStatus, Snapshot, StepReport,
};

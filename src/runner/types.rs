//! Runner data structures.
//!
//! The player sprints along a ground line at a fixed column while obstacles
//! and pickups scroll in from the right edge. All coordinates are world
//! units with the origin at the top-left corner and `y` growing downward,
//! so "higher" on screen means a smaller `y`.

use serde::{Deserialize, Serialize};

use super::config::RunnerConfig;

/// Axis-aligned bounding box in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Overlap test on half-open intervals. Boxes that only share an edge
    /// do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The player ran into an obstacle.
    Collided,
    /// The pickup count reached the configured win threshold.
    Won,
}

/// Lifecycle of a run: `NotStarted -> Running -> Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    NotStarted,
    Running,
    Ended(RunOutcome),
}

/// The runner controlled by the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Left edge (fixed column).
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Vertical velocity in units/tick (negative = upward).
    pub velocity: f64,
    pub width: f64,
    pub height: f64,
    pub grounded: bool,
    /// Jumps available before the next landing.
    pub jumps_left: u32,
    /// Cosmetic vertical wobble while running. Never used for collision.
    pub bob_offset: f64,
    pub bob_rising: bool,
}

impl Player {
    /// A player standing on the ground with a full jump budget.
    pub fn new(config: &RunnerConfig) -> Self {
        let mut player = Self {
            x: 0.0,
            y: 0.0,
            velocity: 0.0,
            width: 0.0,
            height: 0.0,
            grounded: true,
            jumps_left: 0,
            bob_offset: 0.0,
            bob_rising: true,
        };
        player.reset(config);
        player
    }

    /// Put the player back on the ground in place, ready for a new run.
    pub fn reset(&mut self, config: &RunnerConfig) {
        self.x = config.player_x;
        self.width = config.player_width;
        self.height = config.player_height;
        self.y = config.ground_y - config.player_height;
        self.velocity = 0.0;
        self.grounded = true;
        self.jumps_left = config.max_jumps;
        self.bob_offset = 0.0;
        self.bob_rising = true;
    }

    /// Lowest allowed `y` for the player's top edge.
    pub fn floor(&self, ground_y: f64) -> f64 {
        ground_y - self.height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// A ground hazard. Touching one ends the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// A collectible pumpkin. Touching one adds to the pickup count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Pickup {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.size, self.size)
    }
}

/// Per-run bookkeeping, reset by every `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub player_name: String,
    /// Pickups collected; this is the leaderboard score.
    pub pickups: u32,
    /// Horizontal scroll per tick.
    pub speed: f64,
    /// Simulation ticks elapsed since `start`.
    pub tick: u64,
    /// Whole seconds survived, derived from `tick`.
    pub elapsed_secs: u64,
    pub status: RunStatus,
    /// The obstacle that ended the run, kept for the renderer.
    pub crashed_into: Option<Obstacle>,
}

impl RunState {
    pub fn not_started(speed: f64) -> Self {
        Self {
            player_name: String::new(),
            pickups: 0,
            speed,
            tick: 0,
            elapsed_secs: 0,
            status: RunStatus::NotStarted,
            crashed_into: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        match self.status {
            RunStatus::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub run: RunState,
}

/// What happened during the most recent `advance` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub ticks: u32,
    pub obstacles_spawned: u32,
    /// Obstacles removed for scrolling off the left edge.
    pub obstacles_expired: u32,
    pub pickups_spawned: u32,
    /// Pickups removed for scrolling off the left edge.
    pub pickups_expired: u32,
    /// Pickups removed by touching the player.
    pub pickups_collected: u32,
    pub collided: bool,
    pub speed_boosts: u32,
}

//! Runner game logic: physics, spawning, collision detection, scoring.
//!
//! [`RunnerSimulation`] owns every piece of run state and is advanced one
//! fixed tick at a time by whatever drives the frame loop. It never draws
//! and never touches the terminal; the only I/O it triggers is the
//! leaderboard write in [`RunnerSimulation::end_run`].

use rand::Rng;

use super::config::RunnerConfig;
use super::types::*;
use crate::leaderboard::{self, LeaderboardEntry, LeaderboardStore};

/// Physics tick interval in milliseconds (~60 FPS).
pub const PHYSICS_TICK_MS: u64 = 16;

/// Frame time beyond this is dropped rather than simulated.
const MAX_FRAME_MS: u64 = 100;

// Idle bob animation (world units per tick).
const BOB_STEP: f64 = 0.4;
const BOB_MAX: f64 = 4.0;
const BOB_MIN: f64 = -2.0;
const BOB_DECAY: f64 = 0.9;

/// Converts wall-clock frame time into whole simulation ticks.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulated_ms: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks to simulate for a frame that took `dt_ms`. Leftover time
    /// carries into the next frame.
    pub fn ticks_due(&mut self, dt_ms: u64) -> u32 {
        self.accumulated_ms += dt_ms.min(MAX_FRAME_MS);
        let ticks = self.accumulated_ms / PHYSICS_TICK_MS;
        self.accumulated_ms %= PHYSICS_TICK_MS;
        ticks as u32
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerInput {
    Jump,
    /// Start a fresh run with the current player name.
    Restart,
}

/// A single runner game plus the leaderboard it reports to.
///
/// `R` is the random source for spawn sizes and cadence; pass a seeded
/// generator for reproducible runs.
pub struct RunnerSimulation<R, S> {
    pub config: RunnerConfig,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub run: RunState,
    /// Tick on which the next obstacle appears.
    pub next_obstacle_tick: u64,
    rng: R,
    store: S,
    last_step: StepReport,
    result_recorded: bool,
}

impl<R: Rng, S: LeaderboardStore> RunnerSimulation<R, S> {
    pub fn new(config: RunnerConfig, rng: R, store: S) -> Self {
        let player = Player::new(&config);
        let run = RunState::not_started(config.initial_speed);
        let next_obstacle_tick = config.first_obstacle_delay_ticks.max(1);
        Self {
            config,
            player,
            obstacles: Vec::new(),
            pickups: Vec::new(),
            run,
            next_obstacle_tick,
            rng,
            store,
            last_step: StepReport::default(),
            result_recorded: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Summary of the most recent `advance` that ran at least one tick.
    pub fn last_step(&self) -> &StepReport {
        &self.last_step
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.clone(),
            obstacles: self.obstacles.clone(),
            pickups: self.pickups.clone(),
            run: self.run.clone(),
        }
    }

    /// Current leaderboard, highest score first.
    pub fn standings(&self) -> Vec<LeaderboardEntry> {
        leaderboard::standings(&self.store)
    }

    /// Begin a new run. A blank name falls back to the configured default.
    pub fn start(&mut self, name: &str) -> &RunState {
        let name = match name.trim() {
            "" => self.config.default_player_name.clone(),
            trimmed => trimmed.to_string(),
        };

        self.player.reset(&self.config);
        self.obstacles.clear();
        self.pickups.clear();
        self.run = RunState {
            player_name: name,
            status: RunStatus::Running,
            ..RunState::not_started(self.config.initial_speed)
        };
        self.next_obstacle_tick = self.config.first_obstacle_delay_ticks.max(1);
        self.last_step = StepReport::default();
        self.result_recorded = false;

        log::info!(
            "run started: player={} preset={}",
            self.run.player_name,
            self.config.preset.name()
        );
        &self.run
    }

    /// Step the simulation `delta_ticks` times and return the resulting
    /// snapshot. Does nothing unless the run is in progress; stops early on
    /// the tick that ends the run.
    pub fn advance(&mut self, delta_ticks: u32) -> Snapshot {
        if self.run.is_running() {
            let mut report = StepReport::default();
            for _ in 0..delta_ticks {
                self.step(&mut report);
                if !self.run.is_running() {
                    break;
                }
            }
            self.last_step = report;
        }
        self.snapshot()
    }

    /// Spend one jump from the budget. Returns false if the jump was refused
    /// (run not in progress, budget exhausted, or above the jump ceiling).
    pub fn jump(&mut self) -> bool {
        if !self.run.is_running() || self.player.jumps_left == 0 {
            return false;
        }
        if let Some(ceiling) = self.config.jump_ceiling {
            if self.player.y <= ceiling {
                return false;
            }
        }

        let impulse = if self.player.jumps_left >= self.config.max_jumps {
            self.config.jump_force
        } else {
            self.config.double_jump_force
        };
        self.player.velocity = -impulse;
        self.player.jumps_left -= 1;
        self.player.grounded = false;
        true
    }

    /// Turn a finished run into a leaderboard entry and record it.
    ///
    /// Returns `None` while the run is still going or once the result has
    /// already been recorded. A failed write is logged, not returned.
    pub fn end_run(&mut self) -> Option<LeaderboardEntry> {
        self.run.outcome()?;
        if self.result_recorded {
            return None;
        }
        self.result_recorded = true;

        let entry = LeaderboardEntry::new(self.run.player_name.clone(), self.run.pickups);
        match leaderboard::record(&mut self.store, entry.clone()) {
            Ok(saved) => match leaderboard::position_of(&saved, &entry) {
                Some(rank) => log::info!(
                    "{} placed #{} with {} pickups",
                    entry.name,
                    rank,
                    entry.score
                ),
                None => log::info!("{} finished unranked with {} pickups", entry.name, entry.score),
            },
            Err(e) => log::warn!("leaderboard not saved: {}", e),
        }
        Some(entry)
    }

    /// Single physics step (one tick).
    fn step(&mut self, report: &mut StepReport) {
        self.run.tick += 1;
        self.run.elapsed_secs = self.config.ticks_to_secs(self.run.tick);
        report.ticks += 1;
        let tick = self.run.tick;

        // 1. Player physics
        self.update_player();

        // 2. Spawn new entities at the right edge
        if tick >= self.next_obstacle_tick {
            self.spawn_obstacle();
            report.obstacles_spawned += 1;
        }
        let pickup_every = self.config.pickup_interval_ticks;
        if pickup_every > 0 && tick % pickup_every == 0 {
            self.spawn_pickup();
            report.pickups_spawned += 1;
        }

        // 3. Scroll everything left
        let speed = self.run.speed;
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
        for pickup in &mut self.pickups {
            pickup.x -= speed;
        }

        let player_box = self.player.bounds();
        let left_limit = -self.config.offscreen_margin;

        // 4. Obstacles: each one either expires, ends the run, or stays
        let mut crashed: Option<Obstacle> = None;
        let mut expired = 0;
        self.obstacles.retain(|obstacle| {
            if crashed.is_some() {
                return true;
            }
            let bounds = obstacle.bounds();
            if bounds.right() < left_limit {
                expired += 1;
                false
            } else if bounds.intersects(&player_box) {
                crashed = Some(obstacle.clone());
                false
            } else {
                true
            }
        });
        report.obstacles_expired += expired;

        if let Some(obstacle) = crashed {
            report.collided = true;
            self.run.crashed_into = Some(obstacle);
            self.finish(RunOutcome::Collided);
            return;
        }

        // 5. Pickups: each one either expires, is collected, or stays
        let threshold = self.config.win_threshold;
        let mut count = self.run.pickups;
        let mut expired = 0;
        let mut collected = 0;
        self.pickups.retain(|pickup| {
            if threshold.is_some_and(|t| count >= t) {
                return true;
            }
            let bounds = pickup.bounds();
            if bounds.right() < left_limit {
                expired += 1;
                false
            } else if bounds.intersects(&player_box) {
                count += 1;
                collected += 1;
                false
            } else {
                true
            }
        });
        self.run.pickups = count;
        report.pickups_expired += expired;
        report.pickups_collected += collected;

        // 6. Win condition
        if threshold.is_some_and(|t| self.run.pickups >= t) {
            self.finish(RunOutcome::Won);
            return;
        }

        // 7. Periodic speed boost, felt from the next tick on
        let boost_every = self.config.speed_boost_interval_ticks;
        if boost_every > 0 && tick % boost_every == 0 {
            self.run.speed *= self.config.speed_growth.max(1.0);
            report.speed_boosts += 1;
            log::debug!("speed boost at tick {}: {:.2}", tick, self.run.speed);
        }
    }

    fn update_player(&mut self) {
        let floor = self.player.floor(self.config.ground_y);
        let player = &mut self.player;

        player.velocity += self.config.gravity;
        player.y += player.velocity;

        if player.y >= floor {
            player.y = floor;
            player.velocity = 0.0;
            player.grounded = true;
            player.jumps_left = self.config.max_jumps;
        } else {
            player.grounded = false;
        }

        if player.grounded {
            player.bob_offset += if player.bob_rising { BOB_STEP } else { -BOB_STEP };
            if player.bob_offset > BOB_MAX || player.bob_offset < BOB_MIN {
                player.bob_rising = !player.bob_rising;
            }
        } else {
            player.bob_offset *= BOB_DECAY;
        }
    }

    fn spawn_obstacle(&mut self) {
        let height = self.config.obstacle_height.sample(&mut self.rng);
        let width = self.config.obstacle_width.sample(&mut self.rng);
        self.obstacles.push(Obstacle {
            x: self.config.world_width,
            y: self.config.ground_y - height,
            width,
            height,
        });

        let jitter = self.config.obstacle_cadence_jitter.sample(&mut self.rng);
        let cadence = (self.config.obstacle_cadence_at(self.run.tick) + jitter)
            .max(self.config.obstacle_cadence_min_ticks)
            .max(1.0);
        self.next_obstacle_tick = self.run.tick.saturating_add(cadence.round() as u64);
    }

    fn spawn_pickup(&mut self) {
        let lift = self.config.pickup_lift.sample(&mut self.rng);
        self.pickups.push(Pickup {
            x: self.config.world_width,
            y: self.config.ground_y - lift,
            size: self.config.pickup_size,
        });
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.run.status = RunStatus::Ended(outcome);
        log::info!(
            "run ended: player={} outcome={:?} pickups={} seconds={}",
            self.run.player_name,
            outcome,
            self.run.pickups,
            self.run.elapsed_secs
        );
    }
}

/// Apply one input action. Returns true if the simulation changed.
pub fn process_input<R: Rng, S: LeaderboardStore>(
    sim: &mut RunnerSimulation<R, S>,
    input: RunnerInput,
) -> bool {
    match input {
        RunnerInput::Jump => sim.jump(),
        RunnerInput::Restart => {
            if sim.run.is_running() {
                return false;
            }
            // Make sure a finished run reaches the leaderboard before it is wiped.
            sim.end_run();
            let name = sim.run.player_name.clone();
            sim.start(&name);
            true
        }
    }
}

//! Runner tuning: physics, spawning, scoring.
//!
//! Every constant the simulation uses lives in [`RunnerConfig`]. The three
//! presets mirror the variants the game has shipped as: the canonical
//! double-jump run with a pumpkin target, the looser Halloween build, and a
//! single-jump endless mode.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive-low, exclusive-high sampling range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: f64,
    pub max: f64,
}

impl SpawnRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A degenerate range (`min >= max`) always yields `min`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.min < self.max {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerPreset {
    #[default]
    Canton,
    Halloween,
    Classic,
}

impl RunnerPreset {
    pub const ALL: [RunnerPreset; 3] = [
        RunnerPreset::Canton,
        RunnerPreset::Halloween,
        RunnerPreset::Classic,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(RunnerPreset::Canton)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Canton => "Canton",
            Self::Halloween => "Halloween",
            Self::Classic => "Classic",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn config(&self) -> RunnerConfig {
        match self {
            Self::Canton => RunnerConfig::canton(),
            Self::Halloween => RunnerConfig::halloween(),
            Self::Classic => RunnerConfig {
                preset: RunnerPreset::Classic,
                max_jumps: 1,
                win_threshold: None,
                ..RunnerConfig::canton()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Preset this configuration was derived from (informational).
    pub preset: RunnerPreset,

    // -- World --
    pub world_width: f64,
    pub world_height: f64,
    /// `y` of the ground line; the player's bottom edge rests here.
    pub ground_y: f64,
    /// Spawned entities are dropped once their right edge is this far left of 0.
    pub offscreen_margin: f64,
    pub ticks_per_second: u32,

    // -- Player --
    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,
    /// Added to vertical velocity each tick.
    pub gravity: f64,
    /// Upward impulse of the first jump after landing.
    pub jump_force: f64,
    /// Upward impulse of every further airborne jump.
    pub double_jump_force: f64,
    /// Jumps allowed between landings.
    pub max_jumps: u32,
    /// Jumps are refused while the player's top edge is at or above this `y`.
    pub jump_ceiling: Option<f64>,

    // -- Speed --
    pub initial_speed: f64,
    /// Multiplier applied to the scroll speed on every boost.
    pub speed_growth: f64,
    /// Ticks between speed boosts; 0 disables boosting.
    pub speed_boost_interval_ticks: u64,

    // -- Obstacles --
    pub obstacle_height: SpawnRange,
    pub obstacle_width: SpawnRange,
    pub first_obstacle_delay_ticks: u64,
    /// Spawn cadence at tick 0.
    pub obstacle_cadence_ticks: f64,
    /// The cadence never drops below this.
    pub obstacle_cadence_min_ticks: f64,
    /// Ticks shaved off the cadence per elapsed tick.
    pub obstacle_cadence_ramp: f64,
    /// Random extra ticks added to each cadence.
    pub obstacle_cadence_jitter: SpawnRange,

    // -- Pickups --
    /// Ticks between pickups; 0 disables pickups.
    pub pickup_interval_ticks: u64,
    pub pickup_size: f64,
    /// Distance of a pickup's top edge above the ground line.
    pub pickup_lift: SpawnRange,

    // -- Scoring --
    /// Pickup count that wins the run. `None` runs until a collision.
    pub win_threshold: Option<u32>,
    /// Name used when the player leaves the name blank.
    pub default_player_name: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::canton()
    }
}

impl RunnerConfig {
    fn canton() -> Self {
        Self {
            preset: RunnerPreset::Canton,
            world_width: 900.0,
            world_height: 300.0,
            ground_y: 240.0,
            offscreen_margin: 50.0,
            ticks_per_second: 60,

            player_x: 50.0,
            player_width: 50.0,
            player_height: 50.0,
            gravity: 0.8,
            jump_force: 14.0,
            double_jump_force: 18.0,
            max_jumps: 2,
            jump_ceiling: None,

            initial_speed: 6.0,
            speed_growth: 1.10,
            speed_boost_interval_ticks: 15 * 60,

            obstacle_height: SpawnRange::new(100.0, 170.0),
            obstacle_width: SpawnRange::new(20.0, 40.0),
            first_obstacle_delay_ticks: 60,
            obstacle_cadence_ticks: 60.0,
            obstacle_cadence_min_ticks: 36.0,
            obstacle_cadence_ramp: 0.005,
            obstacle_cadence_jitter: SpawnRange::new(0.0, 15.0),

            pickup_interval_ticks: 150,
            pickup_size: 32.0,
            pickup_lift: SpawnRange::new(80.0, 160.0),

            win_threshold: Some(100),
            default_player_name: "Player".to_string(),
        }
    }

    fn halloween() -> Self {
        Self {
            preset: RunnerPreset::Halloween,
            world_width: 900.0,
            world_height: 300.0,
            ground_y: 250.0,
            offscreen_margin: 50.0,
            ticks_per_second: 60,

            player_x: 100.0,
            player_width: 80.0,
            player_height: 80.0,
            gravity: 1.0,
            jump_force: 15.0,
            double_jump_force: 15.0,
            max_jumps: 1,
            jump_ceiling: Some(50.0),

            initial_speed: 5.0,
            speed_growth: 1.10,
            speed_boost_interval_ticks: 15 * 60,

            obstacle_height: SpawnRange::new(30.0, 80.0),
            obstacle_width: SpawnRange::new(30.0, 60.0),
            first_obstacle_delay_ticks: 60,
            obstacle_cadence_ticks: 90.0,
            obstacle_cadence_min_ticks: 90.0,
            obstacle_cadence_ramp: 0.0,
            obstacle_cadence_jitter: SpawnRange::new(0.0, 60.0),

            pickup_interval_ticks: 120,
            pickup_size: 30.0,
            pickup_lift: SpawnRange::new(80.0, 80.0),

            win_threshold: Some(100),
            default_player_name: "Anonymous".to_string(),
        }
    }

    /// Whole seconds represented by `ticks`.
    pub fn ticks_to_secs(&self, ticks: u64) -> u64 {
        ticks / u64::from(self.ticks_per_second.max(1))
    }

    /// Obstacle spawn cadence (before jitter) once `tick` ticks have elapsed.
    pub fn obstacle_cadence_at(&self, tick: u64) -> f64 {
        (self.obstacle_cadence_ticks - tick as f64 * self.obstacle_cadence_ramp)
            .max(self.obstacle_cadence_min_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_default_is_canton() {
        let config = RunnerConfig::default();
        assert_eq!(config.preset, RunnerPreset::Canton);
        assert_eq!(config.max_jumps, 2);
        assert_eq!(config.win_threshold, Some(100));
        assert!((config.jump_force - 14.0).abs() < f64::EPSILON);
        assert!((config.double_jump_force - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classic_is_single_jump_endless() {
        let config = RunnerPreset::Classic.config();
        assert_eq!(config.max_jumps, 1);
        assert_eq!(config.win_threshold, None);
        assert!((config.gravity - RunnerConfig::default().gravity).abs() < f64::EPSILON);
    }

    #[test]
    fn test_halloween_is_ground_only_jump() {
        let config = RunnerPreset::Halloween.config();
        assert_eq!(config.max_jumps, 1);
        assert_eq!(config.jump_ceiling, Some(50.0));
        assert!((config.jump_force - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_preset_from_index() {
        assert_eq!(RunnerPreset::from_index(0), RunnerPreset::Canton);
        assert_eq!(RunnerPreset::from_index(1), RunnerPreset::Halloween);
        assert_eq!(RunnerPreset::from_index(2), RunnerPreset::Classic);
        assert_eq!(RunnerPreset::from_index(99), RunnerPreset::Canton);
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(
            RunnerPreset::from_name("halloween"),
            Some(RunnerPreset::Halloween)
        );
        assert_eq!(
            RunnerPreset::from_name(" CLASSIC "),
            Some(RunnerPreset::Classic)
        );
        assert_eq!(RunnerPreset::from_name("turbo"), None);
    }

    #[test]
    fn test_spawn_range_degenerate() {
        let mut rng = StepRng::new(0, 1);
        let range = SpawnRange::new(80.0, 80.0);
        assert!((range.sample(&mut rng) - 80.0).abs() < f64::EPSILON);

        let inverted = SpawnRange::new(10.0, 5.0);
        assert!((inverted.sample(&mut rng) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spawn_range_in_bounds() {
        let mut rng = rand::thread_rng();
        let range = SpawnRange::new(100.0, 170.0);
        for _ in 0..200 {
            let v = range.sample(&mut rng);
            assert!((100.0..170.0).contains(&v));
        }
    }

    #[test]
    fn test_cadence_ramps_down_to_minimum() {
        let config = RunnerConfig::default();
        assert!((config.obstacle_cadence_at(0) - 60.0).abs() < f64::EPSILON);
        assert!(config.obstacle_cadence_at(1200) < 60.0);
        assert!(
            (config.obstacle_cadence_at(1_000_000) - config.obstacle_cadence_min_ticks).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_ticks_to_secs() {
        let config = RunnerConfig::default();
        assert_eq!(config.ticks_to_secs(59), 0);
        assert_eq!(config.ticks_to_secs(60), 1);
        assert_eq!(config.ticks_to_secs(905), 15);
    }

    #[test]
    fn test_partial_config_json_fills_defaults() {
        let config: RunnerConfig =
            serde_json::from_str(r#"{"max_jumps": 3, "win_threshold": null}"#).unwrap();
        assert_eq!(config.max_jumps, 3);
        assert_eq!(config.win_threshold, None);
        assert!((config.gravity - 0.8).abs() < f64::EPSILON);
    }
}

//! Data-driven game balance
//!
//! Every number the simulation reads comes from a [`Tuning`]. The defaults
//! mirror [`crate::consts`]; a JSON table can override any subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance table passed by reference into the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub max_frame_dt: f32,

    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_ground_margin: f32,
    pub jump_force: f32,
    pub gravity: f32,

    pub ground_height: f32,

    pub start_speed: f32,
    pub speed_ramp: f32,
    pub score_rate: f32,

    pub spawn_interval_start: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_decay: f32,
    pub spawn_offset: f32,

    pub obstacle_height: (f32, f32),
    pub obstacle_width: (f32, f32),

    pub coin_chance: f64,
    pub coin_radius: f32,
    pub coin_lift: (f32, f32),
    pub coin_bonus: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_frame_dt: MAX_FRAME_DT,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_ground_margin: PLAYER_GROUND_MARGIN,
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,

            ground_height: GROUND_HEIGHT,

            start_speed: START_SPEED,
            speed_ramp: SPEED_RAMP,
            score_rate: SCORE_RATE,

            spawn_interval_start: SPAWN_INTERVAL_START,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            spawn_offset: SPAWN_OFFSET,

            obstacle_height: (OBSTACLE_MIN_HEIGHT, OBSTACLE_MAX_HEIGHT),
            obstacle_width: (OBSTACLE_MIN_WIDTH, OBSTACLE_MAX_WIDTH),

            coin_chance: COIN_CHANCE,
            coin_radius: COIN_RADIUS,
            coin_lift: (COIN_MIN_LIFT, COIN_MAX_LIFT),
            coin_bonus: COIN_BONUS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) balance table. Values that would stall or
    /// break the simulation are rejected.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(tuning)
    }

    /// Check the values the frame loop depends on
    pub fn validate(&self) -> Result<(), String> {
        fn positive(name: &str, value: f32) -> Result<(), String> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(format!("{name} must be positive, got {value}"))
            }
        }

        positive("max_frame_dt", self.max_frame_dt)?;
        positive("spawn_interval_start", self.spawn_interval_start)?;
        positive("spawn_interval_min", self.spawn_interval_min)?;

        let decay = self.spawn_interval_decay;
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(format!("spawn_interval_decay must be in (0, 1], got {decay}"));
        }
        if !(0.0..=1.0).contains(&self.coin_chance) {
            return Err(format!(
                "coin_chance must be in [0, 1], got {}",
                self.coin_chance
            ));
        }
        Ok(())
    }

    /// Clamp a raw frame delta (seconds) into the range the physics tolerates
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.max(0.0).min(self.max_frame_dt.max(0.0))
        } else {
            0.0
        }
    }
}

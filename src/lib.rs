//! Dash Runner - An endless runner for the browser
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, spawning, collisions, game state)
//! - `game`: Session controller, frame clock and loop cancellation
//! - `renderer`: 2D drawing surface abstraction and scene drawing
//! - `audio`: Tone requests and the Web Audio beeper
//! - `highscores` / `settings`: Locally persisted leaderboard and preferences

pub mod audio;
pub mod game;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, LoopControl, LoopToken};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player box and spawn position
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Gap between the player's feet line and the canvas bottom
    pub const PLAYER_GROUND_MARGIN: f32 = 22.0;
    /// Upward impulse applied on jump
    pub const JUMP_FORCE: f32 = 16.0;
    /// Added to the vertical velocity once per simulated frame
    pub const GRAVITY: f32 = 0.8;

    /// Ground strip drawn along the bottom edge
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Scroll speed at session start (units/s)
    pub const START_SPEED: f32 = 240.0;
    /// Scroll speed gained per second of play
    pub const SPEED_RAMP: f32 = 4.0;
    /// Score points per second of play
    pub const SCORE_RATE: f32 = 60.0;

    /// Spawn cadence
    pub const SPAWN_INTERVAL_START: f32 = 1.2;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.55;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.992;
    /// Distance beyond the right edge where entities appear
    pub const SPAWN_OFFSET: f32 = 16.0;

    /// Obstacle size ranges (half-open)
    pub const OBSTACLE_MIN_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 90.0;
    pub const OBSTACLE_MIN_WIDTH: f32 = 30.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 54.0;

    /// Coin placement
    pub const COIN_CHANCE: f64 = 0.55;
    pub const COIN_RADIUS: f32 = 14.0;
    pub const COIN_MIN_LIFT: f32 = 80.0;
    pub const COIN_MAX_LIFT: f32 = 200.0;
    /// Bonus points per coin on the final score
    pub const COIN_BONUS: u32 = 10;
}

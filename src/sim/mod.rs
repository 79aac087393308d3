//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module stays free of platform code:
//! - Everything it reads comes from `Tuning` and the per-frame `Viewport`
//! - Randomness comes from the seeded spawner RNG only
//! - Entity collections keep spawn order

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tuning;

pub use collision::{Rect, capture_radius, coin_in_reach, collides};
pub use spawn::Spawner;
pub use state::{
    Coin, GameEvent, GamePhase, GameState, Obstacle, Player, Scrolling, Viewport,
};
pub use tick::tick;
pub use tuning::Tuning;

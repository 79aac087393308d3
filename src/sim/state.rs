//! Game state and core simulation types
//!
//! Everything a running session mutates lives in [`GameState`].

use glam::Vec2;

use super::collision::Rect;
use super::spawn::Spawner;
use super::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No session started yet
    Idle,
    /// Active gameplay
    Running,
    /// Frames keep coming but nothing is simulated
    Paused,
    /// Run ended on a collision; state is frozen
    GameOver,
}

/// Things that happened during a tick, drained by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player left the ground
    Jumped,
    /// Player picked up a coin
    CoinCollected,
    /// Player ran into an obstacle
    Crashed,
}

/// Pixel dimensions of the drawing surface, read fresh every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top edge of the ground strip
    #[inline]
    pub fn ground_top(&self, tuning: &Tuning) -> f32 {
        self.height - tuning.ground_height
    }
}

/// Leftward-moving scenery the player interacts with
pub trait Scrolling {
    /// Move left by this frame's scroll distance
    fn advance(&mut self, scroll: f32);

    /// True once the entity has left the screen on the left
    fn is_offscreen(&self) -> bool;
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive is downward), in units per frame
    pub dy: f32,
    pub jump_force: f32,
    pub grounded: bool,
    /// Seconds of animation, drives the leg cycle
    pub anim_time: f32,
}

impl Player {
    /// Fresh player dropped in from the top of the screen
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, 0.0),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            dy: 0.0,
            jump_force: tuning.jump_force,
            grounded: false,
            anim_time: 0.0,
        }
    }

    /// Resting height for the player's top edge
    #[inline]
    pub fn ground_y(&self, viewport: Viewport, tuning: &Tuning) -> f32 {
        viewport.height - self.size.y - tuning.player_ground_margin
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Start a jump if standing on the ground. Returns whether it happened;
    /// airborne requests are dropped.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.dy = -self.jump_force;
        self.grounded = false;
        true
    }

    /// Apply gravity, integrate, and clamp to the ground line
    pub fn update(&mut self, dt: f32, viewport: Viewport, tuning: &Tuning) {
        self.dy += tuning.gravity;
        self.pos.y += self.dy;
        self.anim_time += dt;

        let ground_y = self.ground_y(viewport, tuning);
        if self.pos.y > ground_y {
            self.pos.y = ground_y;
            self.dy = 0.0;
            self.grounded = true;
        }
    }
}

/// A box to jump over
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Scenery theme active when it spawned; keeps its color across theme switches
    pub theme_index: usize,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

impl Scrolling for Obstacle {
    fn advance(&mut self, scroll: f32) {
        self.pos.x -= scroll;
    }

    fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A floating pickup
#[derive(Debug, Clone)]
pub struct Coin {
    pub center: Vec2,
    pub radius: f32,
}

impl Scrolling for Coin {
    fn advance(&mut self, scroll: f32) {
        self.center.x -= scroll;
    }

    fn is_offscreen(&self) -> bool {
        self.center.x + self.radius < 0.0
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the spawner was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Spawn order
    pub obstacles: Vec<Obstacle>,
    /// Spawn order
    pub coins: Vec<Coin>,
    pub score: u32,
    pub coins_collected: u32,
    /// Scroll speed in units per second
    pub speed: f32,
    /// Distance entities moved during the last simulated frame
    pub scroll: f32,
    /// Delta of the last simulated frame (seconds)
    pub last_dt: f32,
    pub spawner: Spawner,
    /// Theme stamped onto newly spawned obstacles
    pub theme_index: usize,
    /// Bonus per coin, captured at creation so the final score is fixed
    coin_bonus: u32,
    /// Pending events for the controller
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state; nothing is simulated until [`GameState::start`]
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            player: Player::new(tuning),
            obstacles: Vec::new(),
            coins: Vec::new(),
            score: 0,
            coins_collected: 0,
            speed: tuning.start_speed,
            scroll: 0.0,
            last_dt: 0.0,
            spawner: Spawner::new(seed, tuning),
            theme_index: 0,
            coin_bonus: tuning.coin_bonus,
            events: Vec::new(),
        }
    }

    /// Create a fresh running session
    pub fn start(seed: u64, tuning: &Tuning) -> Self {
        let mut state = Self::new(seed, tuning);
        state.phase = GamePhase::Running;
        state
    }

    /// Jump request from input. Only honoured while running.
    pub fn request_jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let jumped = self.player.jump();
        if jumped {
            self.events.push(GameEvent::Jumped);
        }
        jumped
    }

    /// Flip between Running and Paused; other phases are unaffected
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// Score submitted to the leaderboard
    pub fn final_score(&self) -> u32 {
        self.score
            .saturating_add(self.coins_collected.saturating_mul(self.coin_bonus))
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

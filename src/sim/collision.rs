//! Collision tests
//!
//! Hazards use an exact box overlap; coins use a generous circular capture
//! radius around the player's center. The two tests are intentionally
//! different shapes.

use glam::Vec2;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Strict overlap on both axes. Touching edges do not collide.
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

/// Radius around the player's center inside which a coin is captured
#[inline]
pub fn capture_radius(player: &Rect, coin_radius: f32) -> f32 {
    player.size.max_element() / 2.0 + coin_radius
}

/// Check whether a coin centered at `coin_center` is within reach of the player
pub fn coin_in_reach(player: &Rect, coin_center: Vec2, coin_radius: f32) -> bool {
    player.center().distance(coin_center) < capture_radius(player, coin_radius)
}

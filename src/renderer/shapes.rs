//! Scene drawing for the runner, background and entities

use glam::Vec2;

use super::theme::{self, Theme, colors};
use super::Surface;
use crate::sim::{Coin, GamePhase, GameState, Obstacle, Player, Rect, Tuning};

/// Length of one leg swing (seconds)
const RUN_CYCLE: f32 = 0.3;
/// Extra leg length at the far point of the swing
const LEG_SWING: f32 = 8.0;
const LEG_LENGTH: f32 = 12.0;
const LEG_WIDTH: f32 = 6.0;
const HEAD_HEIGHT: f32 = 12.0;

/// Parallax mountains
const MOUNTAIN_COUNT: usize = 3;
const MOUNTAIN_SPACING: f32 = 200.0;
const MOUNTAIN_HALF_WIDTH: f32 = 120.0;
const MOUNTAIN_BASE_LIFT: f32 = 40.0;
const MOUNTAIN_PEAK_LIFT: f32 = 140.0;

/// Something that knows how to put itself on a surface
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface, theme: &Theme);
}

impl Draw for Player {
    fn draw(&self, surface: &mut dyn Surface, _theme: &Theme) {
        let (x, y) = (self.pos.x, self.pos.y);
        let (w, h) = (self.size.x, self.size.y);

        surface.fill_rect(self.rect(), colors::PLAYER);
        surface.fill_rect(
            Rect::new(x + w * 0.15, y - HEAD_HEIGHT, w * 0.7, HEAD_HEIGHT),
            colors::PLAYER_HEAD,
        );

        let swing = leg_swing(self.anim_time);
        surface.fill_rect(
            Rect::new(x + 4.0, y + h, LEG_WIDTH, LEG_LENGTH + swing),
            colors::PLAYER,
        );
        surface.fill_rect(
            Rect::new(
                x + w - 10.0,
                y + h,
                LEG_WIDTH,
                LEG_LENGTH + (LEG_SWING - swing),
            ),
            colors::PLAYER,
        );
    }
}

impl Draw for Obstacle {
    fn draw(&self, surface: &mut dyn Surface, _theme: &Theme) {
        surface.fill_rect(self.rect(), theme::theme(self.theme_index).obstacle);
    }
}

impl Draw for Coin {
    fn draw(&self, surface: &mut dyn Surface, _theme: &Theme) {
        surface.fill_circle(self.center, self.radius, colors::COIN);
    }
}

/// Ping-pong leg offset in `0..=LEG_SWING`
pub fn leg_swing(anim_time: f32) -> f32 {
    let t = anim_time.rem_euclid(RUN_CYCLE) / RUN_CYCLE;
    let tri = if t < 0.5 { t } else { 1.0 - t };
    tri * LEG_SWING
}

/// Sky, parallax mountains and the ground strip.
///
/// Mountains slide with the score so they keep moving at a calmer pace than
/// the foreground.
pub fn draw_background(surface: &mut dyn Surface, theme: &Theme, score: u32, tuning: &Tuning) {
    let (w, h) = surface.size();

    surface.fill_rect(Rect::new(0.0, 0.0, w, h), theme.sky);

    let shift = (score % MOUNTAIN_SPACING as u32) as f32;
    for i in 0..MOUNTAIN_COUNT {
        let base = (i as f32 * MOUNTAIN_SPACING + shift).rem_euclid(w + MOUNTAIN_SPACING)
            - MOUNTAIN_SPACING;
        surface.fill_triangle(
            [
                Vec2::new(base, h - MOUNTAIN_BASE_LIFT),
                Vec2::new(base + MOUNTAIN_HALF_WIDTH, h - MOUNTAIN_PEAK_LIFT),
                Vec2::new(base + MOUNTAIN_HALF_WIDTH * 2.0, h - MOUNTAIN_BASE_LIFT),
            ],
            theme.mountain,
        );
    }

    surface.fill_rect(
        Rect::new(0.0, h - tuning.ground_height, w, tuning.ground_height),
        theme.ground,
    );
}

/// Frame timing and entity counts in the top-left corner
pub fn draw_debug_overlay(surface: &mut dyn Surface, state: &GameState) {
    surface.fill_rect(Rect::new(8.0, 8.0, 170.0, 58.0), colors::DEBUG_PANEL);
    surface.fill_text(
        &format!("dt: {:.3}  spd: {:.2}", state.last_dt, state.scroll),
        Vec2::new(16.0, 28.0),
        colors::DEBUG_TEXT,
    );
    surface.fill_text(
        &format!("obs: {} coin: {}", state.obstacles.len(), state.coins.len()),
        Vec2::new(16.0, 46.0),
        colors::DEBUG_TEXT,
    );
}

/// Draw one frame for the given state.
///
/// A paused session only refreshes the background.
pub fn draw_frame(
    surface: &mut dyn Surface,
    state: &GameState,
    theme: &Theme,
    tuning: &Tuning,
    show_debug: bool,
) {
    if state.phase == GamePhase::Paused {
        draw_background(surface, theme, state.score, tuning);
        return;
    }

    surface.clear();
    draw_background(surface, theme, state.score, tuning);

    state.player.draw(surface, theme);
    for obstacle in &state.obstacles {
        obstacle.draw(surface, theme);
    }
    for coin in &state.coins {
        coin.draw(surface, theme);
    }

    if show_debug {
        draw_debug_overlay(surface, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};
    use crate::renderer::theme::THEMES;

    #[test]
    fn test_leg_swing_ping_pong() {
        assert_eq!(leg_swing(0.0), 0.0);
        assert!((leg_swing(0.15) - 4.0).abs() < 1e-4);
        assert!(leg_swing(0.075) < leg_swing(0.15));
        assert!(leg_swing(0.225) < leg_swing(0.15));
        assert!((leg_swing(0.3) - leg_swing(0.0)).abs() < 1e-4);
    }

    #[test]
    fn test_background_layers() {
        let tuning = Tuning::default();
        let mut surface = RecordingSurface::new(800.0, 450.0);
        draw_background(&mut surface, &THEMES[0], 0, &tuning);

        let commands = surface.commands();
        assert_eq!(commands.len(), 1 + MOUNTAIN_COUNT + 1);
        assert_eq!(
            commands[0],
            DrawCommand::Rect {
                rect: Rect::new(0.0, 0.0, 800.0, 450.0),
                color: THEMES[0].sky,
            }
        );
        assert_eq!(
            commands[4],
            DrawCommand::Rect {
                rect: Rect::new(0.0, 430.0, 800.0, 20.0),
                color: THEMES[0].ground,
            }
        );
    }

    #[test]
    fn test_paused_frame_draws_background_only() {
        let tuning = Tuning::default();
        let mut state = GameState::start(3, &tuning);
        state.toggle_pause();

        let mut surface = RecordingSurface::new(800.0, 450.0);
        draw_frame(&mut surface, &state, &THEMES[0], &tuning, true);
        assert!(surface.commands().iter().all(|c| !matches!(
            c,
            DrawCommand::Clear | DrawCommand::Circle { .. } | DrawCommand::Text { .. }
        )));
        assert_eq!(surface.commands().len(), 1 + MOUNTAIN_COUNT + 1);
    }

    #[test]
    fn test_debug_overlay_text() {
        let tuning = Tuning::default();
        let state = GameState::start(3, &tuning);
        let mut surface = RecordingSurface::new(800.0, 450.0);

        draw_frame(&mut surface, &state, &THEMES[0], &tuning, false);
        assert!(surface.texts().is_empty());

        surface.take_commands();
        draw_frame(&mut surface, &state, &THEMES[0], &tuning, true);
        assert_eq!(
            surface.texts(),
            vec!["dt: 0.000  spd: 0.00".to_string(), "obs: 0 coin: 0".to_string()]
        );
    }

    #[test]
    fn test_obstacle_keeps_spawn_theme_color() {
        let obstacle = Obstacle {
            pos: Vec2::new(100.0, 380.0),
            size: Vec2::new(30.0, 50.0),
            theme_index: 2,
        };
        let mut surface = RecordingSurface::new(800.0, 450.0);
        obstacle.draw(&mut surface, &THEMES[0]);
        assert_eq!(
            surface.commands(),
            &[DrawCommand::Rect {
                rect: obstacle.rect(),
                color: THEMES[2].obstacle,
            }]
        );
    }
}

//! Session controller
//!
//! [`Game`] owns the one live [`GameState`] and is the single writer to it.
//! The platform calls [`Game::frame`] once per display refresh and keeps
//! rescheduling until it gets [`LoopControl::Stop`]. Every session start
//! hands out a fresh [`LoopToken`]; frames carrying an older token are
//! ignored, so a callback queued before a game over or restart never runs a
//! step.

use crate::audio::{SoundEffect, ToneSink};
use crate::renderer::{Surface, draw_frame, theme};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Tuning, tick};

/// Identifies the session a scheduled frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopToken(u64);

/// What the scheduler should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Request another frame
    Continue,
    /// Cancel scheduling; the session is over or stale
    Stop,
}

/// Turns display timestamps into clamped simulation deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous call, clamped by the tuning.
    /// The first call after a reset yields zero.
    pub fn delta(&mut self, now_ms: f64, tuning: &Tuning) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        tuning.clamp_dt(dt)
    }
}

/// Values the UI shows every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub coins: u32,
    pub paused: bool,
}

/// Game instance holding all session state
pub struct Game<A: ToneSink> {
    tuning: Tuning,
    state: GameState,
    clock: FrameClock,
    audio: A,
    generation: u64,
    theme_index: usize,
    sound_on: bool,
    show_debug: bool,
}

impl<A: ToneSink> Game<A> {
    /// Create an idle game. Nothing runs until [`Game::start`].
    pub fn new(tuning: Tuning, audio: A) -> Self {
        let state = GameState::new(0, &tuning);
        Self {
            tuning,
            state,
            clock: FrameClock::default(),
            audio,
            generation: 0,
            theme_index: 0,
            sound_on: true,
            show_debug: false,
        }
    }

    /// Take theme, sound and overlay preferences from stored settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        let settings = settings.sanitized();
        self.theme_index = settings.theme_index;
        self.state.theme_index = self.theme_index;
        self.sound_on = settings.sound_on;
        self.show_debug = settings.show_debug;
    }

    /// Begin a fresh session from any phase, discarding the previous one
    pub fn start(&mut self, seed: u64) -> LoopToken {
        self.generation += 1;
        self.state = GameState::start(seed, &self.tuning);
        self.state.theme_index = self.theme_index;
        self.clock.reset();
        // First start comes from a user gesture, which unlocks audio
        self.audio.resume();
        log::info!("Session {} started with seed {}", self.generation, seed);
        LoopToken(self.generation)
    }

    /// Whether frames for `token` should still run
    pub fn is_current(&self, token: LoopToken) -> bool {
        token.0 == self.generation
            && matches!(self.state.phase, GamePhase::Running | GamePhase::Paused)
    }

    /// Run one display frame: simulate (unless paused), play sounds, draw.
    pub fn frame(&mut self, token: LoopToken, now_ms: f64, surface: &mut dyn Surface) -> LoopControl {
        if !self.is_current(token) {
            return LoopControl::Stop;
        }

        // Keep the clock moving while paused so resuming doesn't jump
        let dt = self.clock.delta(now_ms, &self.tuning);
        let viewport = surface.viewport();

        tick(&mut self.state, dt, viewport, &self.tuning);
        self.play_events();
        draw_frame(
            surface,
            &self.state,
            theme::theme(self.theme_index),
            &self.tuning,
            self.show_debug,
        );

        if self.state.is_over() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    /// Jump input. Returns whether the player actually left the ground.
    pub fn request_jump(&mut self) -> bool {
        let jumped = self.state.request_jump();
        self.play_events();
        jumped
    }

    /// Pause/resume input. Returns the resulting phase.
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.state.toggle_pause();
        match self.state.phase {
            GamePhase::Paused => log::info!("Paused"),
            GamePhase::Running => log::info!("Resumed"),
            _ => {}
        }
        self.state.phase
    }

    /// Returns whether the overlay is now shown
    pub fn toggle_debug_overlay(&mut self) -> bool {
        self.show_debug = !self.show_debug;
        self.show_debug
    }

    /// Returns whether sound is now on
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_on = !self.sound_on;
        self.sound_on
    }

    /// Switch to the next scenery theme, returning its index
    pub fn cycle_theme(&mut self) -> usize {
        self.theme_index = theme::next_theme(self.theme_index);
        // Obstacles already on screen keep the color they spawned with
        self.state.theme_index = self.theme_index;
        self.theme_index
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            coins: self.state.coins_collected,
            paused: self.state.phase == GamePhase::Paused,
        }
    }

    /// Leaderboard score, available once the session has ended
    pub fn final_score(&self) -> Option<u32> {
        self.state.is_over().then(|| self.state.final_score())
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn theme_index(&self) -> usize {
        self.theme_index
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    /// Forward pending simulation events to the audio sink
    fn play_events(&mut self) {
        for event in self.state.drain_events() {
            if !self.sound_on {
                continue;
            }
            let effect = match event {
                GameEvent::Jumped => SoundEffect::Jump,
                GameEvent::CoinCollected => SoundEffect::Coin,
                GameEvent::Crashed => SoundEffect::Crash,
            };
            self.audio.play_tone(effect.tone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::renderer::RecordingSurface;

    #[test]
    fn test_first_frame_has_zero_delta() {
        let tuning = Tuning::default();
        let mut clock = FrameClock::default();
        assert_eq!(clock.delta(5000.0, &tuning), 0.0);
        assert!((clock.delta(5016.0, &tuning) - 0.016).abs() < 1e-6);
        // A long stall is clamped
        assert_eq!(clock.delta(9000.0, &tuning), tuning.max_frame_dt);
        clock.reset();
        assert_eq!(clock.delta(9500.0, &tuning), 0.0);
    }

    #[test]
    fn test_idle_game_stops_immediately() {
        let mut game = Game::new(Tuning::default(), SilentAudio);
        let mut surface = RecordingSurface::new(800.0, 450.0);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.frame(LoopToken(0), 0.0, &mut surface), LoopControl::Stop);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_stale_token_is_ignored() {
        let mut game = Game::new(Tuning::default(), SilentAudio);
        let mut surface = RecordingSurface::new(800.0, 450.0);

        let old = game.start(1);
        assert_eq!(game.frame(old, 0.0, &mut surface), LoopControl::Continue);

        let new = game.start(2);
        assert_ne!(old, new);
        surface.take_commands();
        assert_eq!(game.frame(old, 16.0, &mut surface), LoopControl::Stop);
        assert!(surface.commands().is_empty());
        assert_eq!(game.frame(new, 16.0, &mut surface), LoopControl::Continue);
    }

    #[test]
    fn test_final_score_only_after_game_over() {
        let mut game = Game::new(Tuning::default(), SilentAudio);
        game.start(1);
        assert_eq!(game.final_score(), None);
    }

    #[test]
    fn test_toggles() {
        let mut game = Game::new(Tuning::default(), SilentAudio);
        assert_eq!(game.toggle_pause(), GamePhase::Idle);
        game.start(1);
        assert_eq!(game.toggle_pause(), GamePhase::Paused);
        assert!(game.hud().paused);
        assert_eq!(game.toggle_pause(), GamePhase::Running);

        assert!(game.toggle_debug_overlay());
        assert!(!game.toggle_debug_overlay());
        assert!(!game.toggle_sound());
        assert_eq!(game.cycle_theme(), 1);
    }

    #[test]
    fn test_theme_switch_applies_to_new_obstacles() {
        let mut game = Game::new(Tuning::default(), SilentAudio);
        game.cycle_theme();
        game.start(1);
        assert_eq!(game.state().theme_index, 1);
        assert_eq!(game.cycle_theme(), 2);
        assert_eq!(game.state().theme_index, 2);
    }

    #[test]
    fn test_settings_are_sanitized() {
        let mut game = Game::new(Tuning::default(), SilentAudio);
        let settings = Settings {
            theme_index: 42,
            sound_on: false,
            show_debug: true,
            ..Settings::default()
        };
        game.apply_settings(&settings);
        assert_eq!(game.theme_index(), 0);
        assert!(!game.sound_on());
        assert!(game.show_debug());
    }
}

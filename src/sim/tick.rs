//! Per-frame simulation step
//!
//! Advances a running session by one display frame: player physics, hazards,
//! pickups, spawning, then score and speed.

use super::collision::{coin_in_reach, collides};
use super::state::{GameEvent, GamePhase, GameState, Scrolling, Viewport};
use super::tuning::Tuning;

/// Advance the game state by one frame of `dt` seconds.
///
/// Does nothing unless the session is running. `dt` is clamped by
/// [`Tuning::clamp_dt`] so a stalled tab cannot launch the player through
/// the floor.
pub fn tick(state: &mut GameState, dt: f32, viewport: Viewport, tuning: &Tuning) {
    if state.phase != GamePhase::Running {
        return;
    }

    let dt = tuning.clamp_dt(dt);
    // Speed is a rate; entities move rate * frame time
    let scroll = state.speed * dt;
    state.last_dt = dt;
    state.scroll = scroll;

    state.player.update(dt, viewport, tuning);
    let player = state.player.rect();

    // Hazards
    advance_all(&mut state.obstacles, scroll);
    if state.obstacles.iter().any(|o| collides(&player, &o.rect())) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Crashed);
        log::info!(
            "Game over: score {} coins {} final {}",
            state.score,
            state.coins_collected,
            state.final_score()
        );
        return;
    }
    state.obstacles.retain(|o| !o.is_offscreen());

    // Pickups
    advance_all(&mut state.coins, scroll);
    let mut collected = 0;
    state.coins.retain(|coin| {
        if coin_in_reach(&player, coin.center, coin.radius) {
            collected += 1;
            false
        } else {
            !coin.is_offscreen()
        }
    });
    state.coins_collected += collected;
    state
        .events
        .extend(std::iter::repeat_n(GameEvent::CoinCollected, collected as usize));

    let spawned = state
        .spawner
        .update(dt, viewport, tuning, &mut state.obstacles, &mut state.coins);
    let first_new = state.obstacles.len() - spawned;
    for obstacle in &mut state.obstacles[first_new..] {
        obstacle.theme_index = state.theme_index;
    }

    state.score += (tuning.score_rate * dt).floor() as u32;
    state.speed += tuning.speed_ramp * dt;

    log::trace!(
        "tick dt={dt:.3} scroll={scroll:.2} obstacles={} coins={}",
        state.obstacles.len(),
        state.coins.len()
    );
}

fn advance_all<T: Scrolling>(items: &mut [T], scroll: f32) {
    for item in items {
        item.advance(scroll);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::{Coin, Obstacle};

    const VIEW: Viewport = Viewport::new(800.0, 450.0);
    const DT: f32 = 0.05;

    fn settle(state: &mut GameState, viewport: Viewport, tuning: &Tuning) {
        state.player.pos.y = state.player.ground_y(viewport, tuning);
        state.player.dy = 0.0;
        state.player.grounded = true;
    }

    fn count(state: &GameState, event: GameEvent) -> usize {
        state.events.iter().filter(|e| **e == event).count()
    }

    #[test]
    fn test_idle_does_not_tick() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        tick(&mut state, DT, VIEW, &tuning);
        assert_eq!(state.player.pos.y, 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_score_and_speed_ramp() {
        let tuning = Tuning::default();
        let mut state = GameState::start(1, &tuning);

        tick(&mut state, DT, VIEW, &tuning);
        assert_eq!(state.score, 3);
        assert!((state.speed - 240.2).abs() < 1e-4);
        assert!((state.scroll - 12.0).abs() < 1e-4);

        // Short frames score nothing on their own
        let before = state.score;
        tick(&mut state, 0.01, VIEW, &tuning);
        assert_eq!(state.score, before);
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let tuning = Tuning::default();
        let mut state = GameState::start(1, &tuning);
        tick(&mut state, 5.0, VIEW, &tuning);
        assert_eq!(state.last_dt, tuning.max_frame_dt);
        assert_eq!(state.score, 3);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_in_path_ends_session_once() {
        let tuning = Tuning::default();
        let view = Viewport::new(800.0, 200.0);
        let mut state = GameState::start(5, &tuning);
        // Tall block on the ground, arriving under the player after ~0.9s
        state.obstacles.push(Obstacle {
            pos: Vec2::new(300.0, view.ground_top(&tuning) - 89.0),
            size: Vec2::new(54.0, 89.0),
            theme_index: 0,
        });

        let mut frozen = None;
        for _ in 0..24 {
            tick(&mut state, DT, view, &tuning);
            if state.is_over() && frozen.is_none() {
                frozen = Some((
                    state.score,
                    state.coins_collected,
                    state.player.pos,
                    state.obstacles.len(),
                    state.spawner.elapsed,
                    state.speed,
                ));
            }
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(count(&state, GameEvent::Crashed), 1);
        let after = (
            state.score,
            state.coins_collected,
            state.player.pos,
            state.obstacles.len(),
            state.spawner.elapsed,
            state.speed,
        );
        assert_eq!(frozen, Some(after));
        assert_eq!(
            state.final_score(),
            state.score + state.coins_collected * tuning.coin_bonus
        );
    }

    #[test]
    fn test_coin_pickup_threshold() {
        let tuning = Tuning::default();
        let eps = 0.01;

        for (offset, picked) in [(39.0 - eps, true), (39.0 + eps, false)] {
            let mut state = GameState::start(1, &tuning);
            settle(&mut state, VIEW, &tuning);
            let center = state.player.rect().center();
            state.coins.push(Coin {
                center: center + Vec2::new(offset, 0.0),
                radius: 14.0,
            });

            // Zero-length frame: nothing scrolls, the grounded player stays put
            tick(&mut state, 0.0, VIEW, &tuning);
            assert_eq!(state.player.rect().center(), center);
            assert_eq!(state.coins_collected, u32::from(picked));
            assert_eq!(state.coins.is_empty(), picked);
            assert_eq!(count(&state, GameEvent::CoinCollected), usize::from(picked));
        }
    }

    #[test]
    fn test_offscreen_entities_removed() {
        let tuning = Tuning::default();
        let mut state = GameState::start(1, &tuning);
        settle(&mut state, VIEW, &tuning);
        state.obstacles.push(Obstacle {
            pos: Vec2::new(-40.0, 380.0),
            size: Vec2::new(30.0, 50.0),
            theme_index: 0,
        });
        state.coins.push(Coin {
            center: Vec2::new(-10.0, 100.0),
            radius: 14.0,
        });

        tick(&mut state, DT, VIEW, &tuning);
        assert!(state.obstacles.is_empty());
        assert!(state.coins.is_empty());
        assert_eq!(state.coins_collected, 0);
    }

    #[test]
    fn test_spawned_obstacles_take_current_theme() {
        let tuning = Tuning::default();
        let mut state = GameState::start(4, &tuning);
        settle(&mut state, VIEW, &tuning);
        state.theme_index = 2;
        while state.obstacles.is_empty() {
            tick(&mut state, DT, VIEW, &tuning);
        }
        assert_eq!(state.obstacles.len(), 1);

        state.theme_index = 1;
        while state.obstacles.len() < 2 {
            tick(&mut state, DT, VIEW, &tuning);
        }
        assert_eq!(state.obstacles[0].theme_index, 2);
        assert_eq!(state.obstacles[1].theme_index, 1);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let tuning = Tuning::default();
        let mut state = GameState::start(11, &tuning);
        for _ in 0..10 {
            tick(&mut state, DT, VIEW, &tuning);
        }
        state.toggle_pause();
        let snapshot = (state.score, state.player.pos, state.speed, state.spawner.elapsed);
        for _ in 0..50 {
            tick(&mut state, DT, VIEW, &tuning);
        }
        assert_eq!(
            (state.score, state.player.pos, state.speed, state.spawner.elapsed),
            snapshot
        );

        state.toggle_pause();
        tick(&mut state, DT, VIEW, &tuning);
        assert!(state.score > snapshot.0);
    }

    #[test]
    fn test_score_non_decreasing_while_running() {
        let tuning = Tuning::default();
        let mut state = GameState::start(2024, &tuning);
        let mut last = 0;
        for frame in 0..2000 {
            let dt = 0.008 + (frame % 7) as f32 * 0.006;
            // Hop whenever something is close
            if state
                .obstacles
                .iter()
                .any(|o| o.pos.x > state.player.pos.x && o.pos.x < state.player.pos.x + 120.0)
            {
                state.request_jump();
            }
            tick(&mut state, dt, VIEW, &tuning);
            assert!(state.score >= last);
            last = state.score;
            if state.is_over() {
                break;
            }
        }
        assert!(last > 0);
    }
}

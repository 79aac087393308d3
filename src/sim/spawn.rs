//! Procedural spawning with a tightening cadence
//!
//! Elapsed time accumulates into a counter; every full interval produces one
//! obstacle and maybe one coin, then the interval shrinks toward its floor.
//! A long frame can therefore produce several spawns at once.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Coin, Obstacle, Viewport};
use super::tuning::Tuning;

/// Time-driven obstacle/coin generator
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Seconds accumulated since the last spawn
    pub elapsed: f32,
    /// Current gap between spawns (seconds)
    pub interval: f32,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            elapsed: 0.0,
            interval: tuning.spawn_interval_start,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Advance the spawn clock, pushing new entities past the right edge.
    /// Returns how many obstacles were spawned.
    pub fn update(
        &mut self,
        dt: f32,
        viewport: Viewport,
        tuning: &Tuning,
        obstacles: &mut Vec<Obstacle>,
        coins: &mut Vec<Coin>,
    ) -> usize {
        self.elapsed += dt;

        let mut spawned = 0;
        // A non-positive interval would never drain the accumulator
        while self.interval > 0.0 && self.elapsed >= self.interval {
            self.elapsed -= self.interval;

            obstacles.push(self.spawn_obstacle(viewport, tuning));
            if self.rng.random_bool(tuning.coin_chance.clamp(0.0, 1.0)) {
                coins.push(self.spawn_coin(viewport, tuning));
            }

            self.interval = (self.interval * tuning.spawn_interval_decay)
                .max(tuning.spawn_interval_min);
            spawned += 1;
        }
        spawned
    }

    fn spawn_obstacle(&mut self, viewport: Viewport, tuning: &Tuning) -> Obstacle {
        let h = self.sample(tuning.obstacle_height);
        let w = self.sample(tuning.obstacle_width);
        Obstacle {
            pos: Vec2::new(
                viewport.width + tuning.spawn_offset,
                viewport.ground_top(tuning) - h,
            ),
            size: Vec2::new(w, h),
            theme_index: 0,
        }
    }

    fn spawn_coin(&mut self, viewport: Viewport, tuning: &Tuning) -> Coin {
        let lift = self.sample(tuning.coin_lift);
        Coin {
            center: Vec2::new(viewport.width + tuning.spawn_offset, viewport.height - lift),
            radius: tuning.coin_radius,
        }
    }

    /// Uniform sample from a half-open range; a degenerate range yields its start
    fn sample(&mut self, (lo, hi): (f32, f32)) -> f32 {
        if lo < hi {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEW: Viewport = Viewport::new(800.0, 450.0);

    #[test]
    fn test_no_spawn_before_interval() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(1, &tuning);
        let (mut obstacles, mut coins) = (Vec::new(), Vec::new());

        assert_eq!(spawner.update(1.0, VIEW, &tuning, &mut obstacles, &mut coins), 0);
        assert!(obstacles.is_empty());
        assert_eq!(spawner.interval, tuning.spawn_interval_start);
    }

    #[test]
    fn test_spawn_shape_and_placement() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(42, &tuning);
        let (mut obstacles, mut coins) = (Vec::new(), Vec::new());

        for _ in 0..500 {
            spawner.update(0.05, VIEW, &tuning, &mut obstacles, &mut coins);
        }
        assert!(!obstacles.is_empty());
        assert!(!coins.is_empty());
        assert!(coins.len() < obstacles.len());

        for o in &obstacles {
            assert!((40.0..90.0).contains(&o.size.y));
            assert!((30.0..54.0).contains(&o.size.x));
            assert_eq!(o.pos.x, 816.0);
            // Resting on the ground strip
            assert!((o.pos.y + o.size.y - 430.0).abs() < 1e-3);
        }
        for c in &coins {
            assert_eq!(c.radius, 14.0);
            assert_eq!(c.center.x, 816.0);
            assert!(c.center.y >= 450.0 - 200.0 && c.center.y <= 450.0 - 80.0);
        }
    }

    #[test]
    fn test_zero_interval_does_not_spin() {
        let tuning = Tuning {
            spawn_interval_start: 0.0,
            spawn_interval_min: 0.0,
            ..Tuning::default()
        };
        let mut spawner = Spawner::new(1, &tuning);
        let (mut obstacles, mut coins) = (Vec::new(), Vec::new());

        assert_eq!(spawner.update(0.016, VIEW, &tuning, &mut obstacles, &mut coins), 0);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_large_delta_spawns_multiple() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(3, &tuning);
        let (mut obstacles, mut coins) = (Vec::new(), Vec::new());

        // 1.2 + 1.1904 < 2.5 < 1.2 + 1.1904 + 1.1809
        let spawned = spawner.update(2.5, VIEW, &tuning, &mut obstacles, &mut coins);
        assert_eq!(spawned, 2);
        assert_eq!(obstacles.len(), 2);
        assert!(spawner.elapsed < spawner.interval);
    }

    #[test]
    fn test_interval_reaches_floor() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(9, &tuning);
        let (mut obstacles, mut coins) = (Vec::new(), Vec::new());

        for _ in 0..20_000 {
            spawner.update(0.05, VIEW, &tuning, &mut obstacles, &mut coins);
        }
        assert_eq!(spawner.interval, tuning.spawn_interval_min);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let tuning = Tuning::default();
        let run = |seed| {
            let mut spawner = Spawner::new(seed, &tuning);
            let (mut obstacles, mut coins) = (Vec::new(), Vec::new());
            for _ in 0..200 {
                spawner.update(0.05, VIEW, &tuning, &mut obstacles, &mut coins);
            }
            let heights: Vec<f32> = obstacles.iter().map(|o| o.size.y).collect();
            (heights, coins.len())
        };
        assert_eq!(run(77), run(77));
    }

    proptest! {
        #[test]
        fn prop_interval_non_increasing_and_floored(
            seed in any::<u64>(),
            deltas in proptest::collection::vec(0.0f32..=0.05, 1..400),
        ) {
            let tuning = Tuning::default();
            let mut spawner = Spawner::new(seed, &tuning);
            let (mut obstacles, mut coins) = (Vec::new(), Vec::new());
            let mut last = spawner.interval;
            for dt in deltas {
                spawner.update(dt, VIEW, &tuning, &mut obstacles, &mut coins);
                prop_assert!(spawner.interval <= last);
                prop_assert!(spawner.interval >= 0.55);
                last = spawner.interval;
            }
        }
    }
}

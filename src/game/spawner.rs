//! Obstacle spawn timing, spacing and variant selection.

use super::obstacle::ObstacleKind;
use crate::config::GameConfig;
use rand::Rng;

/// Outcome of one spawn check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnDecision {
    /// The randomized delay has not elapsed.
    Wait,
    /// Due, but the last obstacle is still too close to the right edge.
    /// The spawn timer is left untouched so the next tick retries.
    TooClose,
    Spawn(ObstacleKind),
}

#[derive(Debug, Clone)]
pub struct Spawner {
    pub last_spawn_ms: u64,
}

impl Spawner {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_spawn_ms: now_ms,
        }
    }

    /// Decide whether to spawn this tick.
    ///
    /// The delay is re-rolled on every check: `interval ± variance / 2`.
    pub fn decide<R: Rng>(
        &self,
        now_ms: u64,
        last_obstacle_x: Option<f64>,
        field_width: f64,
        config: &GameConfig,
        rng: &mut R,
    ) -> SpawnDecision {
        let elapsed = now_ms.saturating_sub(self.last_spawn_ms) as f64;
        if elapsed <= spawn_delay(config, rng.gen::<f64>()) {
            return SpawnDecision::Wait;
        }

        if let Some(x) = last_obstacle_x {
            if x > field_width - config.min_spacing {
                return SpawnDecision::TooClose;
            }
        }

        SpawnDecision::Spawn(choose_kind(config, rng))
    }

    pub fn mark_spawned(&mut self, now_ms: u64) {
        self.last_spawn_ms = now_ms;
    }
}

/// Spawn delay for a uniform sample `r` in `[0, 1)`.
pub fn spawn_delay(config: &GameConfig, r: f64) -> f64 {
    config.spawn_interval_ms as f64 + (r - 0.5) * config.spawn_variance_ms as f64
}

/// Treats at `treat_chance`, otherwise uniform over the regular variants.
pub fn choose_kind<R: Rng>(config: &GameConfig, rng: &mut R) -> ObstacleKind {
    if rng.gen::<f64>() < config.treat_chance {
        return ObstacleKind::Treat;
    }
    let regular = &ObstacleKind::REGULAR;
    let index = ((rng.gen::<f64>() * regular.len() as f64) as usize).min(regular.len() - 1);
    regular[index]
}

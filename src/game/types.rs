//! Shared game data: field layout, lifecycle status and per-tick results.

use super::obstacle::ObstacleKind;

/// Height of the scrolling ground strip at the bottom of the field.
pub const BASE_HEIGHT: f64 = 112.0;

/// Distance between the top of the ground strip and the player's resting y.
pub const GROUND_CLEARANCE: f64 = 98.0;

/// Field dimensions derived from the drawing surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// Player's resting y (top edge of the sprite when standing).
    pub ground_level: f64,
}

impl Layout {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ground_level: (height - BASE_HEIGHT - GROUND_CLEARANCE).max(0.0),
        }
    }
}

/// Lifecycle state derived from the game flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Fresh session, nothing scored or spawned yet.
    Start,
    Running,
    Paused,
    /// Lethal hit landed; game over is scheduled but has not fired yet.
    Dying,
    GameOver,
}

/// Everything that happened during one call to `Game::update`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// The tick ran the full running pipeline.
    pub advanced: bool,
    /// Variant spawned this tick.
    pub spawned: Option<ObstacleKind>,
    /// Spawn was due but skipped because the last obstacle was too close.
    pub spawn_skipped: bool,
    /// Catchable obstacles caught this tick.
    pub caught: Vec<ObstacleKind>,
    /// Points added this tick.
    pub points: u32,
    /// A treat reset the speed this tick.
    pub speed_reset: bool,
    /// A lethal obstacle was hit this tick.
    pub hit: bool,
    /// Obstacles dropped by the off-screen sweep.
    pub removed_off_screen: usize,
    /// Caught obstacles removed by their deferred cleanup.
    pub removed_caught: usize,
    /// The deferred game-over fired this tick.
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_ground_level() {
        let layout = Layout::new(1000.0, 500.0);
        assert!((layout.ground_level - 290.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_layout_ground_never_negative() {
        let layout = Layout::new(80.0, 100.0);
        assert_eq!(layout.ground_level, 0.0);
    }
}

//! Tunable game constants.
//!
//! Defaults reproduce the arcade tuning. A partial JSON file can
//! override any subset of fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Gameplay configuration shared by the tick, the spawner and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Downward velocity added per tick.
    pub gravity: f64,
    /// Vertical velocity applied by a jump (negative = upward).
    pub jump_force: f64,
    /// Scroll speed at the start of a run and after a treat.
    pub base_speed: f64,
    /// Scroll speed added at the end of every running tick.
    pub speed_increment: f64,
    /// Mean delay between spawns in milliseconds.
    pub spawn_interval_ms: u64,
    /// Full width of the uniform jitter applied to the spawn delay.
    pub spawn_variance_ms: u64,
    /// Probability that a spawn is a treat.
    pub treat_chance: f64,
    /// Minimum distance between the last obstacle and the field's right edge.
    pub min_spacing: f64,
    /// Extra distance beyond the right edge where obstacles appear.
    pub spawn_buffer: f64,
    pub treat_points: u32,
    pub catch_points: u32,
    /// Delay before a caught obstacle disappears.
    pub catch_removal_delay_ms: u64,
    /// Delay between a lethal hit and the game-over transition.
    pub game_over_delay_ms: u64,
    /// Delay between the hit cue and the die cue.
    pub die_cue_delay_ms: u64,
    /// Width of one scrolling ground tile.
    pub ground_tile_width: f64,
    /// Lifetime of the persisted high score entry.
    pub high_score_ttl_days: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: 0.4,
            jump_force: -14.0,
            base_speed: 5.0,
            speed_increment: 0.001,
            spawn_interval_ms: 2500,
            spawn_variance_ms: 800,
            treat_chance: 0.08,
            min_spacing: 400.0,
            spawn_buffer: 300.0,
            treat_points: 5,
            catch_points: 1,
            catch_removal_delay_ms: 100,
            game_over_delay_ms: 200,
            die_cue_delay_ms: 100,
            ground_tile_width: 336.0,
            high_score_ttl_days: 365,
        }
    }
}

impl GameConfig {
    /// Read a config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read a config file, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded game config");
                config
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arcade_tuning() {
        let c = GameConfig::default();
        assert!((c.gravity - 0.4).abs() < f64::EPSILON);
        assert!((c.jump_force - (-14.0)).abs() < f64::EPSILON);
        assert!((c.base_speed - 5.0).abs() < f64::EPSILON);
        assert_eq!(c.spawn_interval_ms, 2500);
        assert_eq!(c.spawn_variance_ms, 800);
        assert_eq!(c.treat_points, 5);
        assert_eq!(c.high_score_ttl_days, 365);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c: GameConfig = serde_json::from_str(r#"{ "gravity": 0.8 }"#).unwrap();
        assert!((c.gravity - 0.8).abs() < f64::EPSILON);
        assert_eq!(c.spawn_interval_ms, 2500);
    }

    #[test]
    fn test_load_or_default_handles_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(GameConfig::load_or_default(&missing), GameConfig::default());

        let broken = dir.path().join("config.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(GameConfig::load_or_default(&broken), GameConfig::default());

        fs::write(&broken, r#"{ "treat_chance": 0.5 }"#).unwrap();
        let loaded = GameConfig::load_or_default(&broken);
        assert!((loaded.treat_chance - 0.5).abs() < f64::EPSILON);
    }
}

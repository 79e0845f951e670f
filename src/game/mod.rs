//! Billy Run game core: entities, spawning, collisions and the tick.

pub mod collision;
pub mod logic;
pub mod obstacle;
pub mod player;
pub mod scheduler;
pub mod spawner;
pub mod types;

pub use collision::{overlaps, Rect};
pub use logic::Game;
pub use obstacle::{Obstacle, ObstacleKind};
pub use player::{Animation, Player};
pub use types::{GameStatus, Layout, TickResult};

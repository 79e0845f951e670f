//! Game state manager: session lifecycle, the per-tick pipeline and
//! collision outcomes.
//!
//! Time is passed in explicitly as milliseconds so the whole tick is
//! deterministic under a simulated clock.

use super::collision::overlaps;
use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use super::scheduler::{Deferred, Scheduler};
use super::spawner::{SpawnDecision, Spawner};
use super::types::{GameStatus, Layout, TickResult};
use crate::audio::{AudioCues, Cue};
use crate::config::GameConfig;
use crate::storage::{load_high_score, save_high_score, KeyValueStore, HIGH_SCORE_KEY};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;

pub struct Game {
    pub config: GameConfig,
    pub layout: Layout,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_muted: bool,
    pub score: u32,
    pub high_score: u32,
    /// Scroll speed in world units per tick.
    pub game_speed: f64,
    pub frame_count: u64,
    pub player: Player,
    /// Live obstacles in spawn order.
    pub obstacles: Vec<Obstacle>,
    /// Horizontal offset of the ground tiles, in `(-tile_width, 0]`.
    pub ground_offset: f64,
    spawner: Spawner,
    scheduler: Scheduler,
    next_obstacle_id: u64,
    rng: StdRng,
    store: Box<dyn KeyValueStore>,
    audio: AudioCues,
}

impl Game {
    /// Create a game on the start screen, reading the high score from `store`.
    pub fn new(
        config: GameConfig,
        width: f64,
        height: f64,
        store: Box<dyn KeyValueStore>,
        now_ms: u64,
    ) -> Self {
        let layout = Layout::new(width, height);
        let high_score = load_high_score(store.as_ref());
        let mut game = Self {
            game_speed: config.base_speed,
            config,
            layout,
            is_running: false,
            is_paused: false,
            is_muted: false,
            score: 0,
            high_score,
            frame_count: 0,
            player: Player::new(layout.ground_level),
            obstacles: Vec::new(),
            ground_offset: 0.0,
            spawner: Spawner::new(now_ms),
            scheduler: Scheduler::new(),
            next_obstacle_id: 0,
            rng: StdRng::from_entropy(),
            store,
            audio: AudioCues::silent(),
        };
        game.init(now_ms);
        game
    }

    /// Use a fixed seed for spawn timing and variant selection.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_audio(mut self, audio: AudioCues) -> Self {
        self.audio = audio;
        self
    }

    /// Reset the session to the start screen. Keeps mute and high score.
    pub fn init(&mut self, now_ms: u64) {
        self.is_running = false;
        self.is_paused = false;
        self.score = 0;
        self.game_speed = self.config.base_speed;
        self.frame_count = 0;
        self.player = Player::new(self.layout.ground_level);
        self.obstacles.clear();
        self.ground_offset = 0.0;
        self.spawner = Spawner::new(now_ms);
    }

    /// Start a fresh run. Also used for restart.
    ///
    /// A game over still waiting on its delay is committed first, so a fast
    /// restart cannot lose a new high score.
    pub fn start(&mut self, now_ms: u64) {
        self.audio.unlock();
        if self.scheduler.contains(Deferred::GameOver) {
            self.game_over();
        }
        self.scheduler.clear();
        self.init(now_ms);
        self.is_running = true;
        tracing::info!(high_score = self.high_score, "run started");
    }

    /// Toggle pause. Only a running game can pause.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_paused = !self.is_paused;
        tracing::debug!(paused = self.is_paused, "pause toggled");
        true
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.is_muted = !self.is_muted;
        self.is_muted
    }

    /// Jump if running, unpaused and grounded. Returns whether a jump began.
    pub fn jump(&mut self) -> bool {
        if !self.is_running || self.is_paused {
            return false;
        }
        if !self.player.jump(self.config.jump_force) {
            return false;
        }
        self.audio.play(Cue::Jump, self.is_muted);
        true
    }

    /// Recompute the layout for a new surface size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout = Layout::new(width, height);
        self.player.clamp_to_ground(self.layout.ground_level);
    }

    pub fn is_start_screen(&self) -> bool {
        !self.is_running && self.score == 0 && self.obstacles.is_empty()
    }

    pub fn status(&self) -> GameStatus {
        if self.is_running {
            if self.is_paused {
                GameStatus::Paused
            } else {
                GameStatus::Running
            }
        } else if self.scheduler.contains(Deferred::GameOver) {
            GameStatus::Dying
        } else if self.is_start_screen() {
            GameStatus::Start
        } else {
            GameStatus::GameOver
        }
    }

    /// Number of deferred tasks still waiting to fire.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn audio_unlocked(&self) -> bool {
        self.audio.is_unlocked()
    }

    /// Put an obstacle on the field at `x`, bypassing the spawner.
    pub fn place_obstacle(&mut self, kind: ObstacleKind, x: f64) -> u64 {
        let id = self.next_obstacle_id;
        self.next_obstacle_id += 1;
        self.obstacles
            .push(Obstacle::new(id, kind, x, self.layout.ground_level));
        id
    }

    /// Forget the stored high score.
    pub fn reset_high_score(&mut self) -> io::Result<()> {
        self.store.remove(HIGH_SCORE_KEY)?;
        self.high_score = 0;
        tracing::info!("high score reset");
        Ok(())
    }

    /// Advance one tick at time `now_ms`.
    pub fn update(&mut self, now_ms: u64) -> TickResult {
        let mut result = TickResult::default();
        self.run_due_tasks(now_ms, &mut result);

        if self.is_start_screen() {
            self.player.idle_tick();
            return result;
        }
        if !self.is_running || self.is_paused {
            return result;
        }

        result.advanced = true;
        self.frame_count += 1;

        // 1. Player physics and animation
        self.player
            .update(self.config.gravity, self.layout.ground_level);

        // 2. Ground scroll
        self.ground_offset -= self.game_speed;
        if self.ground_offset <= -self.config.ground_tile_width {
            self.ground_offset += self.config.ground_tile_width;
        }

        // 3. Spawn
        self.spawn(now_ms, &mut result);

        // 4. Move obstacles, sweep the ones that left the field
        for obstacle in &mut self.obstacles {
            obstacle.update(self.game_speed);
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen());
        result.removed_off_screen = before - self.obstacles.len();

        // 5. Collisions; a lethal hit ends the tick
        if self.resolve_collisions(now_ms, &mut result) {
            return result;
        }

        // 6. Difficulty ramp
        if !result.speed_reset {
            self.game_speed += self.config.speed_increment;
        }

        result
    }

    fn run_due_tasks(&mut self, now_ms: u64, result: &mut TickResult) {
        for task in self.scheduler.take_due(now_ms) {
            match task {
                Deferred::RemoveObstacle(id) => {
                    // May already be gone through the off-screen sweep
                    if let Some(index) = self.obstacles.iter().position(|o| o.id == id) {
                        self.obstacles.remove(index);
                        result.removed_caught += 1;
                    }
                }
                Deferred::PlayCue(cue) => {
                    self.audio.play(cue, self.is_muted);
                }
                Deferred::GameOver => {
                    self.game_over();
                    result.game_over = true;
                }
            }
        }
    }

    fn spawn(&mut self, now_ms: u64, result: &mut TickResult) {
        let last_x = self.obstacles.last().map(|o| o.x);
        let decision = self.spawner.decide(
            now_ms,
            last_x,
            self.layout.width,
            &self.config,
            &mut self.rng,
        );

        match decision {
            SpawnDecision::Wait => {}
            SpawnDecision::TooClose => result.spawn_skipped = true,
            SpawnDecision::Spawn(kind) => {
                let x = self.layout.width + self.config.spawn_buffer;
                self.place_obstacle(kind, x);
                self.spawner.mark_spawned(now_ms);
                result.spawned = Some(kind);
                tracing::debug!(kind = kind.name(), x, "spawned obstacle");
            }
        }
    }

    /// Resolve overlaps newest-first. Returns true on a lethal hit.
    fn resolve_collisions(&mut self, now_ms: u64, result: &mut TickResult) -> bool {
        let player_box = self.player.collision_box();

        for index in (0..self.obstacles.len()).rev() {
            let obstacle = &mut self.obstacles[index];
            if obstacle.has_collided || !overlaps(&player_box, &obstacle.collision_box()) {
                continue;
            }
            obstacle.has_collided = true;
            let (id, kind, spec) = (obstacle.id, obstacle.kind, obstacle.spec);

            if !spec.catchable {
                self.player.land(self.layout.ground_level);
                self.player.play_hit();
                self.audio.play(Cue::Hit, self.is_muted);
                self.scheduler
                    .schedule(now_ms, self.config.die_cue_delay_ms, Deferred::PlayCue(Cue::Die));
                self.scheduler
                    .schedule(now_ms, self.config.game_over_delay_ms, Deferred::GameOver);
                self.is_running = false;
                result.hit = true;
                tracing::info!(kind = kind.name(), score = self.score, "lethal hit");
                return true;
            }

            let points = if spec.treat {
                self.game_speed = self.config.base_speed;
                result.speed_reset = true;
                self.config.treat_points
            } else {
                self.config.catch_points
            };
            self.score += points;
            result.points += points;
            result.caught.push(kind);
            self.audio.play(Cue::Point, self.is_muted);
            self.scheduler.schedule(
                now_ms,
                self.config.catch_removal_delay_ms,
                Deferred::RemoveObstacle(id),
            );
        }

        false
    }

    fn game_over(&mut self) {
        self.is_running = false;
        self.is_paused = false;

        if self.score > self.high_score {
            self.high_score = self.score;
            if let Err(e) = save_high_score(
                self.store.as_mut(),
                self.high_score,
                self.config.high_score_ttl_days,
            ) {
                tracing::warn!(error = %e, "failed to save high score");
            }
        }
        tracing::info!(score = self.score, high_score = self.high_score, "game over");
    }
}

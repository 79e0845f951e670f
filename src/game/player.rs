//! The player character: jump physics, animation selection and hitbox.

use super::collision::Rect;

/// Fixed horizontal position of the player.
pub const PLAYER_X: f64 = 70.0;
pub const PLAYER_WIDTH: f64 = 100.0;
pub const PLAYER_HEIGHT: f64 = 100.0;

/// Hitbox inset relative to the sprite's top-left corner.
const HITBOX: Rect = Rect::new(20.0, 60.0, 60.0, 40.0);

/// How far above ground the player must be to count as airborne.
const AIRBORNE_EPSILON: f64 = 5.0;

/// Both player sheets are laid out as 4 columns x 2 rows.
pub const SHEET_COLUMNS: usize = 4;
pub const SHEET_ROWS: usize = 2;

/// Player animation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Idle,
    Run,
    Jump,
    Fall,
    Hit,
}

/// Frame range and playback speed of one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// First frame index in the main sheet.
    pub start_frame: usize,
    pub frames: usize,
    /// Frame accumulator advance per tick.
    pub speed: f64,
}

impl Animation {
    pub const fn spec(self) -> AnimationSpec {
        match self {
            // Idle plays from its own 8-frame sheet
            Self::Idle => AnimationSpec {
                start_frame: 0,
                frames: 8,
                speed: 0.03,
            },
            Self::Run => AnimationSpec {
                start_frame: 1,
                frames: 3,
                speed: 0.167,
            },
            Self::Jump => AnimationSpec {
                start_frame: 3,
                frames: 2,
                speed: 0.1,
            },
            Self::Fall => AnimationSpec {
                start_frame: 5,
                frames: 1,
                speed: 0.017,
            },
            Self::Hit => AnimationSpec {
                start_frame: 7,
                frames: 1,
                speed: 0.067,
            },
        }
    }
}

/// Which sheet a player frame comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSheet {
    Main,
    Idle,
}

/// A resolved sprite frame: sheet plus grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub sheet: PlayerSheet,
    pub column: usize,
    pub row: usize,
}

impl SpriteFrame {
    fn from_index(sheet: PlayerSheet, index: usize) -> Self {
        Self {
            sheet,
            column: index % SHEET_COLUMNS,
            row: index / SHEET_COLUMNS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    /// Top edge of the sprite.
    pub y: f64,
    pub velocity_y: f64,
    pub is_jumping: bool,
    pub animation: Animation,
    /// Monotonic accumulator; wrapped into the frame range when drawing.
    pub animation_frame: f64,
}

impl Player {
    pub fn new(ground_level: f64) -> Self {
        Self {
            x: PLAYER_X,
            y: ground_level,
            velocity_y: 0.0,
            is_jumping: false,
            animation: Animation::Idle,
            animation_frame: 0.0,
        }
    }

    /// Start a jump. Returns false (and does nothing) when already airborne.
    pub fn jump(&mut self, jump_force: f64) -> bool {
        if self.is_jumping {
            return false;
        }
        self.velocity_y = jump_force;
        self.is_jumping = true;
        true
    }

    /// One running tick: integrate gravity and derive the animation.
    pub fn update(&mut self, gravity: f64, ground_level: f64) {
        self.velocity_y += gravity;
        self.y += self.velocity_y;

        if self.y < ground_level - AIRBORNE_EPSILON {
            self.animation = if self.velocity_y < 0.0 {
                Animation::Jump
            } else {
                Animation::Fall
            };
        } else {
            self.land(ground_level);
            self.animation = Animation::Run;
        }

        self.animation_frame += self.animation.spec().speed;
    }

    /// Start-screen tick: idle animation only, no physics.
    pub fn idle_tick(&mut self) {
        self.animation = Animation::Idle;
        self.animation_frame += Animation::Idle.spec().speed;
    }

    /// Put the player back on the ground at rest.
    pub fn land(&mut self, ground_level: f64) {
        self.y = ground_level;
        self.velocity_y = 0.0;
        self.is_jumping = false;
    }

    /// Switch to the hit animation from its first frame.
    pub fn play_hit(&mut self) {
        self.animation = Animation::Hit;
        self.animation_frame = 0.0;
    }

    /// Re-seat the player after the ground level moved.
    pub fn clamp_to_ground(&mut self, ground_level: f64) {
        if !self.is_jumping || self.y > ground_level {
            self.y = ground_level;
        }
    }

    pub fn collision_box(&self) -> Rect {
        Rect::new(
            self.x + HITBOX.x,
            self.y + HITBOX.y,
            HITBOX.width,
            HITBOX.height,
        )
    }

    /// Visual bounds at whole-unit coordinates.
    pub fn draw_rect(&self) -> Rect {
        Rect::new(
            self.x.round(),
            self.y.round(),
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }

    /// Pick the frame to draw. Idle uses its own sheet when it is loaded,
    /// otherwise the first frame of the main sheet.
    pub fn sprite_frame(&self, idle_sheet_ready: bool) -> SpriteFrame {
        let spec = self.animation.spec();
        let step = self.animation_frame.floor() as usize % spec.frames;

        match self.animation {
            Animation::Idle if idle_sheet_ready => SpriteFrame::from_index(PlayerSheet::Idle, step),
            Animation::Idle => SpriteFrame::from_index(PlayerSheet::Main, 0),
            _ => SpriteFrame::from_index(PlayerSheet::Main, spec.start_frame + step),
        }
    }
}

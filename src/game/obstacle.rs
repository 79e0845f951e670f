//! Scrolling obstacles: birds, priests, mice and treats.

use super::collision::Rect;

/// Animation accumulator advance per tick.
const ANIMATION_SPEED: f64 = 0.03;

/// Non-treat sheets: two idle frames followed by one hit frame.
pub const IDLE_FRAMES: usize = 2;
pub const HIT_FRAME: usize = 2;
pub const SHEET_FRAMES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Bird,
    Priest,
    Mouse,
    Treat,
}

/// Static per-variant configuration, fixed for the life of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub width: f64,
    pub height: f64,
    /// Bottom edge relative to the player's ground level.
    pub anchor_offset: f64,
    /// Hitbox relative to the sprite's top-left corner.
    pub hitbox: Rect,
    /// Awards points on contact instead of ending the run.
    pub catchable: bool,
    pub treat: bool,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [Self::Bird, Self::Priest, Self::Mouse, Self::Treat];

    /// The variants the spawner picks from when it does not roll a treat.
    pub const REGULAR: [ObstacleKind; 3] = [Self::Priest, Self::Bird, Self::Mouse];

    pub const fn spec(self) -> ObstacleSpec {
        match self {
            // Flies low enough to be caught at the top of a jump
            Self::Bird => ObstacleSpec {
                width: 80.0,
                height: 80.0,
                anchor_offset: -30.0,
                hitbox: Rect::new(15.0, 20.0, 50.0, 50.0),
                catchable: true,
                treat: false,
            },
            Self::Priest => ObstacleSpec {
                width: 200.0,
                height: 200.0,
                anchor_offset: 100.0,
                hitbox: Rect::new(80.0, 80.0, 80.0, 120.0),
                catchable: false,
                treat: false,
            },
            Self::Mouse => ObstacleSpec {
                width: 80.0,
                height: 80.0,
                anchor_offset: 100.0,
                hitbox: Rect::new(15.0, 50.0, 55.0, 30.0),
                catchable: true,
                treat: false,
            },
            // 768x500 artwork scaled to 50 wide
            Self::Treat => ObstacleSpec {
                width: 50.0,
                height: 33.0,
                anchor_offset: 100.0,
                hitbox: Rect::new(0.0, 0.0, 50.0, 32.0),
                catchable: true,
                treat: true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bird => "bird",
            Self::Priest => "priest",
            Self::Mouse => "mouse",
            Self::Treat => "treat",
        }
    }
}

/// Sprite selection for one obstacle frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleFrame {
    pub index: usize,
    /// Draw mirrored so the sprite faces the player.
    pub mirrored: bool,
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Unique within a session; used by deferred removal.
    pub id: u64,
    pub kind: ObstacleKind,
    pub spec: ObstacleSpec,
    pub x: f64,
    /// Bottom edge of the sprite.
    pub y: f64,
    /// One-shot latch: set on first contact, never cleared.
    pub has_collided: bool,
    pub animation_frame: f64,
}

impl Obstacle {
    pub fn new(id: u64, kind: ObstacleKind, x: f64, ground_level: f64) -> Self {
        let spec = kind.spec();
        Self {
            id,
            kind,
            spec,
            x,
            y: ground_level + spec.anchor_offset,
            has_collided: false,
            animation_frame: 0.0,
        }
    }

    /// Scroll left by the current game speed.
    pub fn update(&mut self, speed: f64) {
        self.x -= speed;
        self.animation_frame += ANIMATION_SPEED;
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.spec.width < 0.0
    }

    pub fn collision_box(&self) -> Rect {
        let hitbox = self.spec.hitbox;
        Rect::new(
            self.x + hitbox.x,
            self.y - self.spec.height + hitbox.y,
            hitbox.width,
            hitbox.height,
        )
    }

    /// Visual bounds.
    pub fn draw_rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.y - self.spec.height,
            self.spec.width,
            self.spec.height,
        )
    }

    pub fn sprite_frame(&self) -> ObstacleFrame {
        if self.spec.treat {
            return ObstacleFrame {
                index: 0,
                mirrored: false,
            };
        }

        let index = if self.has_collided {
            HIT_FRAME
        } else {
            self.animation_frame.floor() as usize % IDLE_FRAMES
        };
        ObstacleFrame {
            index,
            mirrored: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f64 = 290.0;

    #[test]
    fn test_variant_table() {
        assert!(ObstacleKind::Bird.spec().catchable);
        assert!(ObstacleKind::Mouse.spec().catchable);
        assert!(!ObstacleKind::Priest.spec().catchable);
        assert!(ObstacleKind::Treat.spec().catchable);
        assert!(ObstacleKind::Treat.spec().treat);
        for kind in ObstacleKind::REGULAR {
            assert!(!kind.spec().treat);
        }
        for kind in ObstacleKind::ALL {
            let spec = kind.spec();
            assert!(spec.hitbox.right() <= spec.width);
        }
    }

    #[test]
    fn test_vertical_anchor() {
        let bird = Obstacle::new(0, ObstacleKind::Bird, 500.0, GROUND);
        let mouse = Obstacle::new(1, ObstacleKind::Mouse, 500.0, GROUND);
        assert_eq!(bird.y, GROUND - 30.0);
        assert_eq!(mouse.y, GROUND + 100.0);
        assert!(bird.draw_rect().y < mouse.draw_rect().y);
    }

    #[test]
    fn test_update_scrolls_and_animates() {
        let mut o = Obstacle::new(0, ObstacleKind::Priest, 500.0, GROUND);
        o.update(5.0);
        assert_eq!(o.x, 495.0);
        assert!((o.animation_frame - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_off_screen_uses_right_edge() {
        let mut o = Obstacle::new(0, ObstacleKind::Mouse, -79.0, GROUND);
        assert!(!o.is_off_screen());
        o.x = -80.0;
        assert!(!o.is_off_screen());
        o.x = -80.5;
        assert!(o.is_off_screen());
    }

    #[test]
    fn test_collision_box_offsets() {
        let o = Obstacle::new(0, ObstacleKind::Priest, 100.0, GROUND);
        let b = o.collision_box();
        assert_eq!(b.x, 180.0);
        assert_eq!(b.y, GROUND + 100.0 - 200.0 + 80.0);
        assert_eq!(b.width, 80.0);
        assert_eq!(b.height, 120.0);
    }

    #[test]
    fn test_sprite_frames() {
        let mut bird = Obstacle::new(0, ObstacleKind::Bird, 0.0, GROUND);
        assert_eq!(bird.sprite_frame(), ObstacleFrame { index: 0, mirrored: true });
        bird.animation_frame = 1.5;
        assert_eq!(bird.sprite_frame().index, 1);
        bird.animation_frame = 2.1;
        assert_eq!(bird.sprite_frame().index, 0);
        bird.has_collided = true;
        assert_eq!(bird.sprite_frame().index, HIT_FRAME);

        let mut treat = Obstacle::new(1, ObstacleKind::Treat, 0.0, GROUND);
        treat.animation_frame = 1.5;
        treat.has_collided = true;
        assert_eq!(treat.sprite_frame(), ObstacleFrame { index: 0, mirrored: false });
    }
}

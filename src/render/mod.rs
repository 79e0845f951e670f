//! Frame renderer: background, scrolling ground, entities and score digits.
//!
//! Every image is optional. Anything not loaded yet is drawn as a flat
//! fallback (or skipped, for digits) so a frame can always be produced.

pub mod surface;

pub use surface::{PixelCanvas, Surface, MIN_UNITS_PER_PIXEL, WORLD_HEIGHT};

use crate::assets::{AssetStore, ImageId, Rgb};
use crate::game::obstacle::{ObstacleKind, SHEET_FRAMES};
use crate::game::player::{PlayerSheet, PLAYER_HEIGHT, SHEET_COLUMNS, SHEET_ROWS};
use crate::game::types::BASE_HEIGHT;
use crate::game::{Game, Obstacle, Rect};

const SKY_TOP: Rgb = Rgb(0x87, 0xce, 0xeb);
const SKY_BOTTOM: Rgb = Rgb(0xe0, 0xf6, 0xff);
const GROUND_LINE: Rgb = Rgb(0x8b, 0x6f, 0x47);
const GROUND_LINE_HEIGHT: f64 = 2.0;
/// Adjacent ground tiles overlap to hide seams.
const TILE_OVERLAP: f64 = 2.0;

const PLAYER_TINT: Rgb = Rgb(230, 140, 50);

const DIGIT_WIDTH: f64 = 24.0;
const DIGIT_HEIGHT: f64 = 36.0;
const DIGIT_SPACING: f64 = 4.0;
const SCORE_Y: f64 = 50.0;

/// Night runs from 18:00 to 06:00 local time.
pub fn is_night_time(hour: u32) -> bool {
    !(6..18).contains(&hour)
}

fn obstacle_tint(kind: ObstacleKind) -> Rgb {
    match kind {
        ObstacleKind::Bird => Rgb(70, 110, 200),
        ObstacleKind::Priest => Rgb(25, 25, 35),
        ObstacleKind::Mouse => Rgb(150, 150, 160),
        ObstacleKind::Treat => Rgb(200, 130, 70),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    pub night: bool,
}

impl Renderer {
    pub fn new(night: bool) -> Self {
        Self { night }
    }

    pub fn for_hour(hour: u32) -> Self {
        Self::new(is_night_time(hour))
    }

    /// Draw one full frame of `game` onto `surface`.
    pub fn draw<S: Surface>(&self, surface: &mut S, game: &Game, assets: &AssetStore) {
        surface.clear();
        self.draw_background(surface, assets);
        draw_ground(surface, game, assets);
        // Obstacles draw over the player
        draw_player(surface, game, assets);
        for obstacle in &game.obstacles {
            draw_obstacle(surface, obstacle, assets);
        }
        if !game.is_start_screen() {
            draw_score(surface, game.score, assets);
        }
    }

    fn draw_background<S: Surface>(&self, surface: &mut S, assets: &AssetStore) {
        let full = Rect::new(0.0, 0.0, surface.width(), surface.height());
        let id = if self.night {
            ImageId::BackgroundNight
        } else {
            ImageId::BackgroundDay
        };
        match assets.get(id) {
            Some(image) => {
                let src = Rect::new(0.0, 0.0, image.width as f64, image.height as f64);
                surface.draw_image(image, src, full, false);
            }
            None => surface.fill_vertical_gradient(full, SKY_TOP, SKY_BOTTOM),
        }
    }
}

fn draw_ground<S: Surface>(surface: &mut S, game: &Game, assets: &AssetStore) {
    let Some(tile) = assets.get(ImageId::Base) else {
        let line = Rect::new(
            0.0,
            game.layout.ground_level + PLAYER_HEIGHT,
            surface.width(),
            GROUND_LINE_HEIGHT,
        );
        surface.fill_rect(line, GROUND_LINE);
        return;
    };

    let tile_width = game.config.ground_tile_width;
    let step = tile_width - TILE_OVERLAP;
    if step <= 0.0 {
        return;
    }
    let src = Rect::new(0.0, 0.0, tile.width as f64, tile.height as f64);
    let y = surface.height() - BASE_HEIGHT;
    let mut x = game.ground_offset;
    while x < surface.width() {
        surface.draw_image(tile, src, Rect::new(x, y, tile_width, BASE_HEIGHT), false);
        x += step;
    }
}

fn draw_obstacle<S: Surface>(surface: &mut S, obstacle: &Obstacle, assets: &AssetStore) {
    let dest = obstacle.draw_rect();
    let Some(sheet) = assets.get(ImageId::for_obstacle(obstacle.kind)) else {
        surface.fill_rect(dest, obstacle_tint(obstacle.kind));
        return;
    };

    let frame = obstacle.sprite_frame();
    let src = if obstacle.spec.treat {
        Rect::new(0.0, 0.0, sheet.width as f64, sheet.height as f64)
    } else {
        let frame_width = (sheet.width / SHEET_FRAMES) as f64;
        Rect::new(
            frame.index as f64 * frame_width,
            0.0,
            frame_width,
            sheet.height as f64,
        )
    };
    surface.draw_image(sheet, src, dest, frame.mirrored);
}

fn draw_player<S: Surface>(surface: &mut S, game: &Game, assets: &AssetStore) {
    let dest = game.player.draw_rect();
    let frame = game
        .player
        .sprite_frame(assets.is_ready(ImageId::PlayerIdle));
    let id = match frame.sheet {
        PlayerSheet::Main => ImageId::Player,
        PlayerSheet::Idle => ImageId::PlayerIdle,
    };

    let Some(sheet) = assets.get(id) else {
        surface.fill_rect(dest, PLAYER_TINT);
        return;
    };
    let frame_width = (sheet.width / SHEET_COLUMNS) as f64;
    let frame_height = (sheet.height / SHEET_ROWS) as f64;
    let src = Rect::new(
        frame.column as f64 * frame_width,
        frame.row as f64 * frame_height,
        frame_width,
        frame_height,
    );
    surface.draw_image(sheet, src, dest, false);
}

/// Centred row of digit sprites. Digits not loaded yet are left out.
fn draw_score<S: Surface>(surface: &mut S, score: u32, assets: &AssetStore) {
    let digits: Vec<u8> = score
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect();
    let count = digits.len() as f64;
    let total_width = count * DIGIT_WIDTH + (count - 1.0) * DIGIT_SPACING;
    let mut x = (surface.width() - total_width) / 2.0;

    for digit in digits {
        if let Some(image) = assets.get(ImageId::Digit(digit)) {
            let src = Rect::new(0.0, 0.0, image.width as f64, image.height as f64);
            let dest = Rect::new(x, SCORE_Y, DIGIT_WIDTH, DIGIT_HEIGHT);
            surface.draw_image(image, src, dest, false);
        }
        x += DIGIT_WIDTH + DIGIT_SPACING;
    }
}

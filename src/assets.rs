//! Sprite sheets and their readiness flags.
//!
//! Images are loaded on a background thread and published one by one into
//! `OnceLock` slots. The renderer polls the slots every frame and draws a
//! flat fallback for anything not ready yet, so loading never blocks a tick.
//!
//! Sheets come from built-in pixel art or from a directory of text files
//! (`<name>.txt`): a palette block, a `---` line, then one row of pixels per
//! line. `.` and spaces are transparent.
//!
//! ```text
//! o #e68c32
//! e #1e1e1e
//! ---
//! .oo.
//! oeeo
//! ```

use crate::game::ObstacleKind;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend, `t_256` in 0..=256.
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// A small RGBA-ish image: each pixel is a colour or transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Option<Rgb>>,
}

impl Image {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = Some(color);
        }
    }

    /// Copy the opaque pixels of `src` with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, src: &Image, x: usize, y: usize) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                if let Some(color) = src.get(sx, sy) {
                    self.set(x + sx, y + sy, color);
                }
            }
        }
    }

    /// Lay equally sized frames out in a `columns`-wide grid.
    pub fn sheet(frames: &[Image], columns: usize) -> Image {
        let Some(first) = frames.first() else {
            return Image::new(0, 0);
        };
        let rows = frames.len().div_ceil(columns);
        let mut sheet = Image::new(first.width * columns, first.height * rows);
        for (i, frame) in frames.iter().enumerate() {
            sheet.blit(
                frame,
                (i % columns) * first.width,
                (i / columns) * first.height,
            );
        }
        sheet
    }

    fn from_rows(rows: &[&str], palette: &[(char, Rgb)]) -> Image {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut image = Image::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if let Some((_, color)) = palette.iter().find(|(c, _)| *c == ch) {
                    image.set(x, y, *color);
                }
            }
        }
        image
    }
}

/// Every image the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Player,
    PlayerIdle,
    Bird,
    Priest,
    Mouse,
    Treat,
    BackgroundDay,
    BackgroundNight,
    Base,
    Digit(u8),
}

impl ImageId {
    pub fn all() -> Vec<ImageId> {
        let mut ids = vec![
            Self::Player,
            Self::PlayerIdle,
            Self::Bird,
            Self::Priest,
            Self::Mouse,
            Self::Treat,
            Self::BackgroundDay,
            Self::BackgroundNight,
            Self::Base,
        ];
        ids.extend((0..10).map(Self::Digit));
        ids
    }

    pub fn for_obstacle(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Bird => Self::Bird,
            ObstacleKind::Priest => Self::Priest,
            ObstacleKind::Mouse => Self::Mouse,
            ObstacleKind::Treat => Self::Treat,
        }
    }

    /// File stem used when loading from an asset directory.
    pub fn file_name(self) -> String {
        match self {
            Self::Player => "player".to_string(),
            Self::PlayerIdle => "player_idle".to_string(),
            Self::Bird => "bird".to_string(),
            Self::Priest => "priest".to_string(),
            Self::Mouse => "mouse".to_string(),
            Self::Treat => "treat".to_string(),
            Self::BackgroundDay => "background_day".to_string(),
            Self::BackgroundNight => "background_night".to_string(),
            Self::Base => "base".to_string(),
            Self::Digit(d) => format!("digit_{}", d),
        }
    }
}

type Slot = Arc<OnceLock<Image>>;

/// Readiness slots for every image. Cheap to share with a loader thread.
#[derive(Debug, Clone)]
pub struct AssetStore {
    slots: HashMap<ImageId, Slot>,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    /// An empty store: nothing is ready.
    pub fn new() -> Self {
        Self {
            slots: ImageId::all()
                .into_iter()
                .map(|id| (id, Arc::new(OnceLock::new())))
                .collect(),
        }
    }

    pub fn get(&self, id: ImageId) -> Option<&Image> {
        self.slots.get(&id).and_then(|slot| slot.get())
    }

    pub fn is_ready(&self, id: ImageId) -> bool {
        self.get(id).is_some()
    }

    /// Publish an image. The first value wins; returns false if already set.
    pub fn publish(&self, id: ImageId, image: Image) -> bool {
        match self.slots.get(&id) {
            Some(slot) => slot.set(image).is_ok(),
            None => false,
        }
    }

    pub fn ready_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Where sheets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Builtin,
    Directory(PathBuf),
}

/// Load one image from `source`.
pub fn load_image(id: ImageId, source: &AssetSource) -> io::Result<Image> {
    match source {
        AssetSource::Builtin => Ok(builtin::image(id)),
        AssetSource::Directory(dir) => {
            let path = dir.join(format!("{}.txt", id.file_name()));
            let text = fs::read_to_string(&path)?;
            parse_pixel_art(&text)
        }
    }
}

/// Load every image on a background thread, publishing each as it finishes.
/// Failed images stay not ready. The handle yields the number published.
pub fn spawn_loader(store: &AssetStore, source: AssetSource) -> thread::JoinHandle<usize> {
    let store = store.clone();
    thread::spawn(move || {
        let mut loaded = 0;
        for id in ImageId::all() {
            match load_image(id, &source) {
                Ok(image) => {
                    if store.publish(id, image) {
                        loaded += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(image = %id.file_name(), error = %e, "asset failed to load");
                }
            }
        }
        tracing::info!(loaded, total = store.len(), "assets loaded");
        loaded
    })
}

/// Parse the text pixel-art format described in the module docs.
pub fn parse_pixel_art(text: &str) -> io::Result<Image> {
    let invalid = |msg: String| io::Error::new(io::ErrorKind::InvalidData, msg);

    let mut palette: Vec<(char, Rgb)> = Vec::new();
    let mut lines = text.lines();

    for line in lines.by_ref() {
        let line = line.trim();
        if line == "---" {
            break;
        }
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(key), Some(hex), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid(format!("bad palette line: {}", line)));
        };
        let mut key_chars = key.chars();
        let (Some(ch), None) = (key_chars.next(), key_chars.next()) else {
            return Err(invalid(format!("palette key must be one character: {}", key)));
        };
        if ch == '.' {
            return Err(invalid("'.' is reserved for transparency".to_string()));
        }
        let color = Rgb::from_hex(hex).ok_or_else(|| invalid(format!("bad colour: {}", hex)))?;
        palette.push((ch, color));
    }

    let rows: Vec<&str> = lines.filter(|l| !l.trim().is_empty()).collect();
    if rows.is_empty() {
        return Err(invalid("image has no pixel rows".to_string()));
    }

    let width = rows[0].chars().count();
    let mut image = Image::new(width, rows.len());
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(invalid(format!("row {} has the wrong width", y)));
        }
        for (x, ch) in row.chars().enumerate() {
            if ch == '.' || ch == ' ' {
                continue;
            }
            let color = palette
                .iter()
                .find(|(c, _)| *c == ch)
                .map(|(_, color)| *color)
                .ok_or_else(|| invalid(format!("unknown palette key '{}'", ch)))?;
            image.set(x, y, color);
        }
    }
    Ok(image)
}

/// Built-in pixel art.
mod builtin {
    use super::{Image, ImageId, Rgb};

    const FUR: Rgb = Rgb(230, 140, 50);
    const STRIPE: Rgb = Rgb(180, 95, 30);
    const EYE: Rgb = Rgb(30, 30, 30);
    const NOSE: Rgb = Rgb(240, 150, 160);
    const HURT: Rgb = Rgb(220, 40, 40);
    const WHITE: Rgb = Rgb(255, 255, 255);
    const SHADOW: Rgb = Rgb(30, 30, 30);

    #[rustfmt::skip]
    const CAT_BODY: [&str; 12] = [
        "................",
        "..........o...o.",
        "..........oo.oo.",
        ".t........ooooo.",
        ".t.......oeoooe.",
        "..t......oooopo.",
        "..t.oooooooooo..",
        "...oooosoosoo...",
        "...ooooooooooo..",
        "...ooosoosoooo..",
        "....oooooooooo..",
        "....oooooooooo..",
    ];

    #[rustfmt::skip]
    const LEGS_STAND: [&str; 4] = [
        "....oo.oo.oo.oo.",
        "....oo.oo.oo.oo.",
        "....oo.oo.oo.oo.",
        "...ooo.oooooooo.",
    ];

    #[rustfmt::skip]
    const LEGS_RUN_A: [&str; 4] = [
        "...oo...oo.oo...",
        "..oo.....oo.oo..",
        ".oo.......o..oo.",
        "..............o.",
    ];

    #[rustfmt::skip]
    const LEGS_RUN_B: [&str; 4] = [
        "....oo.oo.oo.oo.",
        "....o..o..o..o..",
        "...oo.oo.oo.oo..",
        "................",
    ];

    #[rustfmt::skip]
    const LEGS_RUN_C: [&str; 4] = [
        ".....oooo..ooo..",
        "......oo...oo...",
        ".....oo...oo....",
        "................",
    ];

    #[rustfmt::skip]
    const LEGS_TUCK: [&str; 4] = [
        "....oooooooooo..",
        "................",
        "................",
        "................",
    ];

    #[rustfmt::skip]
    const LEGS_STRETCH: [&str; 4] = [
        "...oo........oo.",
        "..oo..........oo",
        ".oo.............",
        "................",
    ];

    fn cat_frame(legs: &[&str; 4], hurt: bool, blink: bool, tail_up: bool) -> Image {
        let eye = if hurt {
            HURT
        } else if blink {
            FUR
        } else {
            EYE
        };
        let palette = [
            ('o', FUR),
            ('s', STRIPE),
            ('e', eye),
            ('p', NOSE),
            ('t', FUR),
        ];
        let mut rows: Vec<&str> = CAT_BODY.to_vec();
        rows.extend_from_slice(legs);
        let mut frame = Image::from_rows(&rows, &palette);
        if tail_up {
            frame.set(1, 1, FUR);
            frame.set(1, 2, FUR);
        }
        frame
    }

    /// Main sheet, 4x2: stand, run x3, jump, fall, stand, hit.
    fn player() -> Image {
        let frames = [
            cat_frame(&LEGS_STAND, false, false, false),
            cat_frame(&LEGS_RUN_A, false, false, false),
            cat_frame(&LEGS_RUN_B, false, false, true),
            cat_frame(&LEGS_RUN_C, false, false, false),
            cat_frame(&LEGS_TUCK, false, false, true),
            cat_frame(&LEGS_STRETCH, false, false, true),
            cat_frame(&LEGS_STAND, false, true, false),
            cat_frame(&LEGS_STAND, true, false, false),
        ];
        Image::sheet(&frames, 4)
    }

    /// Idle sheet, 4x2: tail sway with a blink.
    fn player_idle() -> Image {
        let frames: Vec<Image> = (0..8)
            .map(|i| cat_frame(&LEGS_STAND, false, i == 5, i % 2 == 1))
            .collect();
        Image::sheet(&frames, 4)
    }

    const BIRD_BODY: Rgb = Rgb(70, 110, 200);
    const BIRD_WING: Rgb = Rgb(50, 80, 160);
    const BEAK: Rgb = Rgb(245, 190, 40);

    #[rustfmt::skip]
    const BIRD_UP: [&str; 12] = [
        "............",
        "...w........",
        "...ww.......",
        "....ww......",
        "....bwwb....",
        "...bbbbbbe..",
        "..bbbbbbbbk.",
        ".bbbbbbbb...",
        "....bbbb....",
        ".....y.y....",
        "............",
        "............",
    ];

    #[rustfmt::skip]
    const BIRD_DOWN: [&str; 12] = [
        "............",
        "............",
        "............",
        "............",
        "....bbbb....",
        "...bbbbbbe..",
        "..bbwwbbbbk.",
        ".bbbbwwbb...",
        "....bwwb....",
        ".....ww.....",
        ".....y.y....",
        "............",
    ];

    #[rustfmt::skip]
    const BIRD_HIT: [&str; 12] = [
        "..w......w..",
        "...w....w...",
        "............",
        "....bbbb....",
        "...bbbbbbx..",
        "..bbbbbbbbk.",
        ".bbbbbbbb...",
        "....bbbb....",
        ".w..y..y..w.",
        "............",
        "............",
        "............",
    ];

    fn bird() -> Image {
        let palette = [
            ('b', BIRD_BODY),
            ('w', BIRD_WING),
            ('e', EYE),
            ('x', HURT),
            ('k', BEAK),
            ('y', BEAK),
        ];
        let frames = [
            Image::from_rows(&BIRD_UP, &palette),
            Image::from_rows(&BIRD_DOWN, &palette),
            Image::from_rows(&BIRD_HIT, &palette),
        ];
        Image::sheet(&frames, 3)
    }

    const ROBE: Rgb = Rgb(25, 25, 35);
    const COLLAR: Rgb = Rgb(240, 240, 240);
    const SKIN: Rgb = Rgb(240, 200, 160);
    const GOLD: Rgb = Rgb(220, 180, 40);

    #[rustfmt::skip]
    const PRIEST_A: [&str; 16] = [
        "................",
        "......ssss......",
        ".....ssssss.....",
        ".....sesses.....",
        ".....ssssss.....",
        "......ssss......",
        ".....rrwwrr.....",
        "....rrrrrrrr....",
        "...rrrrggrrrr...",
        "...rsrrggrrrs...",
        "...rrrggggrrr...",
        "...rrrrggrrrr...",
        "...rrrrrrrrrr...",
        "..rrrrrrrrrrrr..",
        "..rrrrrrrrrrrr..",
        "..kk........kk..",
    ];

    #[rustfmt::skip]
    const PRIEST_B: [&str; 16] = [
        "................",
        "......ssss......",
        ".....ssssss.....",
        ".....sesses.....",
        ".....ssssss.....",
        "......ssss......",
        ".....rrwwrr..s..",
        "....rrrrrrrrrr..",
        "...rrrrggrrrr...",
        "...rsrrggrrrr...",
        "...rrrggggrrr...",
        "...rrrrggrrrr...",
        "...rrrrrrrrrr...",
        "..rrrrrrrrrrrr..",
        "..rrrrrrrrrrrr..",
        "...kk......kk...",
    ];

    #[rustfmt::skip]
    const PRIEST_HIT: [&str; 16] = [
        "................",
        "......ssss......",
        ".....ssssss.....",
        ".....sxssxs.....",
        ".....ssssss.....",
        "..s...ssss...s..",
        "..rr.rrwwrr.rr..",
        "...rrrrrrrrrr...",
        "...rrrrggrrrr...",
        "...rrrrggrrrr...",
        "...rrrggggrrr...",
        "...rrrrggrrrr...",
        "...rrrrrrrrrr...",
        "..rrrrrrrrrrrr..",
        "..rrrrrrrrrrrr..",
        "..kk........kk..",
    ];

    fn priest() -> Image {
        let palette = [
            ('r', ROBE),
            ('w', COLLAR),
            ('s', SKIN),
            ('e', EYE),
            ('x', HURT),
            ('g', GOLD),
            ('k', EYE),
        ];
        let frames = [
            Image::from_rows(&PRIEST_A, &palette),
            Image::from_rows(&PRIEST_B, &palette),
            Image::from_rows(&PRIEST_HIT, &palette),
        ];
        Image::sheet(&frames, 3)
    }

    const MOUSE_FUR: Rgb = Rgb(150, 150, 160);
    const MOUSE_EAR: Rgb = Rgb(230, 160, 170);

    #[rustfmt::skip]
    const MOUSE_A: [&str; 12] = [
        "............",
        "............",
        "............",
        "............",
        "............",
        "............",
        "........pp..",
        "...gggggppg.",
        "..gggggggegg",
        "t.gggggggggp",
        ".tggggggggg.",
        "...g..g.g...",
    ];

    #[rustfmt::skip]
    const MOUSE_B: [&str; 12] = [
        "............",
        "............",
        "............",
        "............",
        "............",
        "............",
        "........pp..",
        "...gggggppg.",
        "t.gggggggegg",
        ".tgggggggggp",
        "..ggggggggg.",
        "..g..g...g..",
    ];

    #[rustfmt::skip]
    const MOUSE_HIT: [&str; 12] = [
        "............",
        "............",
        "............",
        "............",
        "............",
        "............",
        "..g.....pp..",
        "...gggggppg.",
        "..gggggggxgg",
        "t.gggggggggp",
        ".tggggggggg.",
        ".g...g.g..g.",
    ];

    fn mouse() -> Image {
        let palette = [
            ('g', MOUSE_FUR),
            ('p', MOUSE_EAR),
            ('t', MOUSE_EAR),
            ('e', EYE),
            ('x', HURT),
        ];
        let frames = [
            Image::from_rows(&MOUSE_A, &palette),
            Image::from_rows(&MOUSE_B, &palette),
            Image::from_rows(&MOUSE_HIT, &palette),
        ];
        Image::sheet(&frames, 3)
    }

    #[rustfmt::skip]
    const TREAT: [&str; 7] = [
        "..........",
        "..bbbb..b.",
        ".bbddbbbb.",
        "bbdbbbbbb.",
        ".bbbbdbbb.",
        "..bbbb..b.",
        "..........",
    ];

    fn treat() -> Image {
        Image::from_rows(
            &TREAT,
            &[('b', Rgb(200, 130, 70)), ('d', Rgb(150, 90, 40))],
        )
    }

    const BG_WIDTH: usize = 100;
    const BG_HEIGHT: usize = 50;

    fn sky(top: Rgb, bottom: Rgb) -> Image {
        let mut image = Image::new(BG_WIDTH, BG_HEIGHT);
        for y in 0..BG_HEIGHT {
            let color = Rgb::lerp(top, bottom, (y * 256 / BG_HEIGHT) as u16);
            for x in 0..BG_WIDTH {
                image.set(x, y, color);
            }
        }
        image
    }

    fn disc(image: &mut Image, cx: usize, cy: usize, r: usize, color: Rgb) {
        for y in cy.saturating_sub(r)..=cy + r {
            for x in cx.saturating_sub(r)..=cx + r {
                let dx = x.abs_diff(cx);
                let dy = y.abs_diff(cy);
                if dx * dx + dy * dy <= r * r {
                    image.set(x, y, color);
                }
            }
        }
    }

    fn background_day() -> Image {
        let mut image = sky(Rgb(90, 170, 230), Rgb(215, 240, 255));
        disc(&mut image, 82, 9, 4, Rgb(255, 220, 90));
        for (cx, cy) in [(15, 10), (22, 9), (45, 16), (52, 15), (68, 7)] {
            disc(&mut image, cx, cy, 3, WHITE);
        }
        image
    }

    fn background_night() -> Image {
        let mut image = sky(Rgb(10, 15, 45), Rgb(40, 50, 100));
        // Fixed star field
        for i in 0..40usize {
            let x = (i * 37 + 11) % BG_WIDTH;
            let y = (i * 17 + 3) % (BG_HEIGHT / 2);
            image.set(x, y, Rgb(230, 230, 200));
        }
        disc(&mut image, 80, 10, 4, Rgb(240, 240, 210));
        disc(&mut image, 82, 9, 3, Rgb(10, 15, 45));
        image
    }

    /// One ground tile: 336x112 world units at 8 units per pixel.
    fn base() -> Image {
        const WIDTH: usize = 42;
        const HEIGHT: usize = 14;
        let grass = Rgb(90, 170, 60);
        let grass_dark = Rgb(70, 140, 45);
        let dirt = Rgb(210, 180, 110);
        let dirt_dark = Rgb(180, 150, 90);

        let mut image = Image::new(WIDTH, HEIGHT);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let color = match y {
                    0 | 1 => grass,
                    2 if (x / 3) % 2 == 0 => grass_dark,
                    2 => grass,
                    _ if (x * 7 + y * 3) % 11 == 0 => dirt_dark,
                    _ => dirt,
                };
                image.set(x, y, color);
            }
        }
        image
    }

    #[rustfmt::skip]
    const DIGITS: [[u8; 15]; 10] = [
        [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1],
        [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1],
        [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1],
        [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1],
        [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1],
        [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1],
        [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1],
        [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0],
        [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1],
        [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1],
    ];

    /// 3x5 glyph with a one-pixel drop shadow.
    fn digit(d: u8) -> Image {
        let glyph = &DIGITS[(d % 10) as usize];
        let mut image = Image::new(4, 6);
        for pass in [true, false] {
            for row in 0..5 {
                for col in 0..3 {
                    if glyph[row * 3 + col] == 1 {
                        if pass {
                            image.set(col + 1, row + 1, SHADOW);
                        } else {
                            image.set(col, row, WHITE);
                        }
                    }
                }
            }
        }
        image
    }

    pub fn image(id: ImageId) -> Image {
        match id {
            ImageId::Player => player(),
            ImageId::PlayerIdle => player_idle(),
            ImageId::Bird => bird(),
            ImageId::Priest => priest(),
            ImageId::Mouse => mouse(),
            ImageId::Treat => treat(),
            ImageId::BackgroundDay => background_day(),
            ImageId::BackgroundNight => background_night(),
            ImageId::Base => base(),
            ImageId::Digit(d) => digit(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::obstacle::SHEET_FRAMES;
    use crate::game::player::{SHEET_COLUMNS, SHEET_ROWS};

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#87CEEB"), Some(Rgb(0x87, 0xce, 0xeb)));
        assert_eq!(Rgb::from_hex("87CEEB"), None);
        assert_eq!(Rgb::from_hex("#87CEE"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_parse_pixel_art() {
        let text = "o #ff0000\ne #000000\n---\n.oo.\noeeo\n";
        let image = parse_pixel_art(text).unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.get(0, 0), None);
        assert_eq!(image.get(1, 0), Some(Rgb(255, 0, 0)));
        assert_eq!(image.get(1, 1), Some(Rgb(0, 0, 0)));
    }

    #[test]
    fn test_parse_pixel_art_rejects_bad_input() {
        assert!(parse_pixel_art("o #ff0000\n---\noox\n").is_err());
        assert!(parse_pixel_art("o #ff0000\n---\noo\no\n").is_err());
        assert!(parse_pixel_art("o red\n---\noo\n").is_err());
        assert!(parse_pixel_art("o #ff0000\n---\n").is_err());
    }

    #[test]
    fn test_builtin_sheet_geometry() {
        let player = builtin::image(ImageId::Player);
        assert_eq!(player.width % SHEET_COLUMNS, 0);
        assert_eq!(player.height % SHEET_ROWS, 0);
        let idle = builtin::image(ImageId::PlayerIdle);
        assert_eq!((idle.width, idle.height), (player.width, player.height));

        for kind in [ObstacleKind::Bird, ObstacleKind::Priest, ObstacleKind::Mouse] {
            let sheet = builtin::image(ImageId::for_obstacle(kind));
            assert_eq!(sheet.width % SHEET_FRAMES, 0, "{}", kind.name());
        }
    }

    #[test]
    fn test_digits_differ() {
        let one = builtin::image(ImageId::Digit(1));
        let eight = builtin::image(ImageId::Digit(8));
        assert_ne!(one, eight);
    }

    #[test]
    fn test_store_starts_empty_and_publishes_once() {
        let store = AssetStore::new();
        assert_eq!(store.ready_count(), 0);
        assert!(!store.is_ready(ImageId::Base));

        assert!(store.publish(ImageId::Base, Image::new(1, 1)));
        assert!(!store.publish(ImageId::Base, Image::new(2, 2)));
        assert_eq!(store.get(ImageId::Base).map(|i| i.width), Some(1));
    }

    #[test]
    fn test_loader_publishes_builtin_assets() {
        let store = AssetStore::new();
        let loaded = spawn_loader(&store, AssetSource::Builtin).join().unwrap();
        assert_eq!(loaded, store.len());
        assert_eq!(store.ready_count(), store.len());
    }

    #[test]
    fn test_directory_loader_leaves_missing_files_unready() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("treat.txt"), "b #c88246\n---\nbb\nbb\n").unwrap();

        let store = AssetStore::new();
        let loaded = spawn_loader(&store, AssetSource::Directory(dir.path().to_path_buf()))
            .join()
            .unwrap();
        assert_eq!(loaded, 1);
        assert!(store.is_ready(ImageId::Treat));
        assert!(!store.is_ready(ImageId::Player));
    }
}

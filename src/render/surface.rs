//! Drawing surfaces in world units, and the half-block terminal canvas.
//!
//! One canvas pixel covers the same number of world units on each axis,
//! chosen so the world is at least `WORLD_HEIGHT` units tall. A
//! terminal cell holds two vertically stacked pixels drawn with `▀`: the
//! foreground colour is the upper pixel, the background the lower one.

use crate::assets::{Image, Rgb};
use crate::game::Rect;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as Area;
use ratatui::style::Color;
use ratatui::widgets::Widget;

/// Smallest world height the canvas maps onto.
pub const WORLD_HEIGHT: f64 = 500.0;

/// Finest scale used on large terminals.
pub const MIN_UNITS_PER_PIXEL: f64 = 8.0;

/// World units per pixel for a canvas `px_height` pixels tall.
pub fn units_per_pixel_for(px_height: usize) -> f64 {
    if px_height == 0 {
        return MIN_UNITS_PER_PIXEL;
    }
    (WORLD_HEIGHT / px_height as f64).max(MIN_UNITS_PER_PIXEL)
}

const CLEAR_COLOR: Rgb = Rgb(0, 0, 0);

/// A 2D target addressed in world units.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn fill_vertical_gradient(&mut self, rect: Rect, top: Rgb, bottom: Rgb);

    /// Draw the `src` region of `image` (image pixels) scaled into `dest`
    /// (world units) with nearest-neighbour sampling. `flip_x` mirrors the
    /// source horizontally.
    fn draw_image(&mut self, image: &Image, src: Rect, dest: Rect, flip_x: bool);
}

/// Pixel grid sized to a terminal area.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    cols: usize,
    px_height: usize,
    units_per_pixel: f64,
    pixels: Vec<Rgb>,
}

impl PixelCanvas {
    /// Canvas for `cols` x `rows` terminal cells, scaled so the whole jump
    /// fits on short terminals.
    pub fn new(cols: u16, rows: u16) -> Self {
        let scale = units_per_pixel_for(rows as usize * 2);
        Self::with_scale(cols, rows, scale)
    }

    /// Canvas with a fixed number of world units per pixel.
    pub fn with_scale(cols: u16, rows: u16, units_per_pixel: f64) -> Self {
        let cols = cols as usize;
        let px_height = rows as usize * 2;
        Self {
            cols,
            px_height,
            units_per_pixel,
            pixels: vec![CLEAR_COLOR; cols * px_height],
        }
    }

    /// Resize to a new terminal area and recompute the scale.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols as usize;
        self.px_height = rows as usize * 2;
        self.units_per_pixel = units_per_pixel_for(self.px_height);
        self.pixels.clear();
        self.pixels
            .resize(self.cols * self.px_height, CLEAR_COLOR);
    }

    pub fn units_per_pixel(&self) -> f64 {
        self.units_per_pixel
    }

    /// Size in pixels.
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.cols, self.px_height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        if x < self.cols && y < self.px_height {
            self.pixels[y * self.cols + x]
        } else {
            CLEAR_COLOR
        }
    }

    fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.px_height {
            self.pixels[y as usize * self.cols + x as usize] = color;
        }
    }

    /// Pixel span covered by a world rect, clipped to the canvas.
    fn span(&self, rect: Rect) -> (i64, i64, i64, i64) {
        let to_px = |v: f64| (v / self.units_per_pixel).round() as i64;
        let x0 = to_px(rect.x).max(0);
        let y0 = to_px(rect.y).max(0);
        let x1 = to_px(rect.right()).min(self.cols as i64);
        let y1 = to_px(rect.bottom()).min(self.px_height as i64);
        (x0, y0, x1, y1)
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> f64 {
        self.cols as f64 * self.units_per_pixel
    }

    fn height(&self) -> f64 {
        self.px_height as f64 * self.units_per_pixel
    }

    fn clear(&mut self) {
        self.pixels.fill(CLEAR_COLOR);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, color);
            }
        }
    }

    fn fill_vertical_gradient(&mut self, rect: Rect, top: Rgb, bottom: Rgb) {
        let (x0, y0, x1, y1) = self.span(rect);
        let span = (y1 - y0).max(1);
        for y in y0..y1 {
            let color = Rgb::lerp(top, bottom, ((y - y0) * 256 / span) as u16);
            for x in x0..x1 {
                self.set(x, y, color);
            }
        }
    }

    fn draw_image(&mut self, image: &Image, src: Rect, dest: Rect, flip_x: bool) {
        if src.width <= 0.0 || src.height <= 0.0 || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }

        // Unclipped destination in pixels; sampling is relative to it
        let to_px = |v: f64| (v / self.units_per_pixel).round() as i64;
        let (dx0, dy0) = (to_px(dest.x), to_px(dest.y));
        let (dx1, dy1) = (to_px(dest.right()), to_px(dest.bottom()));
        let (dw, dh) = ((dx1 - dx0).max(1), (dy1 - dy0).max(1));

        let (x0, y0, x1, y1) = self.span(dest);
        for py in y0..y1 {
            let v = ((py - dy0) as f64 + 0.5) / dh as f64;
            let sy = (src.y + (v * src.height).floor()).min(src.bottom() - 1.0);
            for px in x0..x1 {
                let mut u = ((px - dx0) as f64 + 0.5) / dw as f64;
                if flip_x {
                    u = 1.0 - u;
                }
                let sx = (src.x + (u * src.width).floor()).min(src.right() - 1.0);
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                if let Some(color) = image.get(sx as usize, sy as usize) {
                    self.set(px, py, color);
                }
            }
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

impl Widget for &PixelCanvas {
    fn render(self, area: Area, buf: &mut Buffer) {
        let rows = (self.px_height / 2).min(area.height as usize);
        let cols = self.cols.min(area.width as usize);
        for row in 0..rows {
            for col in 0..cols {
                let top = self.pixel(col, row * 2);
                let bottom = self.pixel(col, row * 2 + 1);
                buf.get_mut(area.x + col as u16, area.y + row as u16)
                    .set_char('▀')
                    .set_fg(to_color(top))
                    .set_bg(to_color(bottom));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(255, 0, 0);
    const BLUE: Rgb = Rgb(0, 0, 255);

    #[test]
    fn test_world_size() {
        let canvas = PixelCanvas::with_scale(125, 31, 8.0);
        assert_eq!(canvas.width(), 1000.0);
        assert_eq!(canvas.height(), 496.0);
        assert_eq!(canvas.pixel_size(), (125, 62));
    }

    #[test]
    fn test_short_canvas_stretches_to_world_height() {
        // 80x24 terminal: 78x20 field, 40 pixels tall
        let canvas = PixelCanvas::new(78, 20);
        assert_eq!(canvas.units_per_pixel(), 12.5);
        assert_eq!(canvas.height(), WORLD_HEIGHT);
        assert_eq!(canvas.width(), 975.0);
    }

    #[test]
    fn test_tall_canvas_keeps_finest_scale() {
        let mut canvas = PixelCanvas::new(100, 100);
        assert_eq!(canvas.units_per_pixel(), MIN_UNITS_PER_PIXEL);
        assert_eq!(canvas.height(), 1600.0);

        canvas.resize(78, 20);
        assert_eq!(canvas.units_per_pixel(), 12.5);
        assert_eq!(units_per_pixel_for(0), MIN_UNITS_PER_PIXEL);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = PixelCanvas::with_scale(4, 2, 8.0);
        canvas.fill_rect(Rect::new(-80.0, -8.0, 1000.0, 16.0), RED);
        assert_eq!(canvas.pixel(0, 0), RED);
        assert_eq!(canvas.pixel(3, 0), RED);
        assert_eq!(canvas.pixel(0, 1), CLEAR_COLOR);
    }

    #[test]
    fn test_gradient_runs_top_to_bottom() {
        let mut canvas = PixelCanvas::with_scale(1, 4, 8.0);
        canvas.fill_vertical_gradient(Rect::new(0.0, 0.0, 8.0, 64.0), RED, BLUE);
        assert_eq!(canvas.pixel(0, 0), RED);
        let last = canvas.pixel(0, 7);
        assert!(last.2 > last.0);
    }

    #[test]
    fn test_draw_image_crops_and_flips() {
        // Two-frame strip: left red, right blue
        let mut image = Image::new(2, 1);
        image.set(0, 0, RED);
        image.set(1, 0, BLUE);

        let mut canvas = PixelCanvas::with_scale(2, 1, 8.0);
        let dest = Rect::new(0.0, 0.0, 16.0, 16.0);
        canvas.draw_image(&image, Rect::new(1.0, 0.0, 1.0, 1.0), dest, false);
        assert_eq!(canvas.pixel(0, 0), BLUE);
        assert_eq!(canvas.pixel(1, 1), BLUE);

        canvas.clear();
        canvas.draw_image(&image, Rect::new(0.0, 0.0, 2.0, 1.0), dest, true);
        assert_eq!(canvas.pixel(0, 0), BLUE);
        assert_eq!(canvas.pixel(1, 0), RED);
    }

    #[test]
    fn test_transparent_pixels_keep_background() {
        let image = Image::new(1, 1);
        let mut canvas = PixelCanvas::with_scale(1, 1, 8.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 8.0, 16.0), RED);
        canvas.draw_image(&image, Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(0.0, 0.0, 8.0, 16.0), false);
        assert_eq!(canvas.pixel(0, 0), RED);
    }

    #[test]
    fn test_widget_stamps_half_blocks() {
        let mut canvas = PixelCanvas::with_scale(1, 1, 8.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), RED);
        canvas.fill_rect(Rect::new(0.0, 8.0, 8.0, 8.0), BLUE);

        let area = Area::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);
        let cell = buf.get(0, 0);
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }
}

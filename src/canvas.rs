//! RGBA8 frame-buffer surface, the one the desktop shell draws into.

use std::path::Path;

use rusttype::{point, Font, Scale};
use tracing::debug;

use crate::config::Color;
use crate::error::{Result, WheelError};
use crate::raster::{
    draw_antialiased_pixel, draw_thick_line_aa, fill_convex_polygon, fill_wedge, stroke_arc,
};
use crate::surface::{Surface, TextAlign, TextBaseline, TextStyle, Transform};

/// Loads a TrueType/OpenType font from disk for label rendering.
pub fn load_font(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path).map_err(|source| WheelError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    let font = Font::try_from_vec(data).ok_or_else(|| WheelError::InvalidFont {
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), "loaded label font");
    Ok(font)
}

/// Parses font data embedded in the binary, such as [`crate::config::BUNDLED_FONT`].
pub fn font_from_bytes(data: &'static [u8]) -> Result<Font<'static>> {
    Font::try_from_bytes(data).ok_or(WheelError::InvalidFontData { len: data.len() })
}

/// Advance width of a laid out string, kerning included.
fn text_width(font: &Font, text: &str, scale: Scale) -> f64 {
    let glyphs: Vec<_> = font.layout(text, scale, point(0.0, 0.0)).collect();
    match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => {
            (last.position().x - first.position().x + last.unpositioned().h_metrics().advance_width)
                as f64
        }
        _ => 0.0,
    }
}

/// Draws into a borrowed `width × height` RGBA8 frame.
///
/// Text needs a font; without one [`Surface::fill_text`] draws nothing and
/// [`Surface::measure_text`] reports zero width.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    transform: Transform,
    stack: Vec<Transform>,
    font: Option<&'a Font<'static>>,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            font: None,
        }
    }

    pub fn with_font(mut self, font: &'a Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    /// Color currently stored at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(self.frame[idx], self.frame[idx + 1], self.frame[idx + 2]))
    }

    fn device_points(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        points.iter().map(|&(x, y)| self.transform.apply(x, y)).collect()
    }
}

impl Surface for Canvas<'_> {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f64) {
        self.transform.rotate(angle);
    }

    fn fill_sector(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color) {
        let (x, y) = self.transform.apply(cx, cy);
        let turn = self.transform.angle;
        fill_wedge(self.frame, self.width, x, y, radius, start + turn, end + turn, color);
    }

    fn stroke_sector(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        width: f64,
        color: Color,
    ) {
        let (x, y) = self.transform.apply(cx, cy);
        let (start, end) = (start + self.transform.angle, end + self.transform.angle);
        for edge in [start, end] {
            let (ex, ey) = (x + edge.cos() * radius, y + edge.sin() * radius);
            draw_thick_line_aa(self.frame, self.width, x, y, ex, ey, width, color);
        }
        stroke_arc(self.frame, self.width, x, y, radius, start, end, width, color);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let (x, y) = self.transform.apply(cx, cy);
        fill_wedge(self.frame, self.width, x, y, radius, 0.0, std::f64::consts::TAU, color);
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, width: f64, color: Color) {
        let (x, y) = self.transform.apply(cx, cy);
        stroke_arc(self.frame, self.width, x, y, radius, 0.0, std::f64::consts::TAU, width, color);
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        let points = self.device_points(points);
        fill_convex_polygon(self.frame, self.width, &points, color);
    }

    fn stroke_polygon(&mut self, points: &[(f64, f64)], width: f64, color: Color) {
        let points = self.device_points(points);
        for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
            draw_thick_line_aa(self.frame, self.width, a.0, a.1, b.0, b.1, width, color);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let Some(font) = self.font else {
            return;
        };
        let scale = Scale::uniform(style.size);
        let width = text_width(font, text, scale);
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let v_metrics = font.v_metrics(scale);
        let baseline = match style.baseline {
            TextBaseline::Alphabetic => y,
            TextBaseline::Middle => y + (v_metrics.ascent + v_metrics.descent) as f64 / 2.0,
        };

        let transform = self.transform;
        let frame = &mut *self.frame;
        let frame_width = self.width;
        for glyph in font.layout(text, scale, point(0.0, 0.0)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                if v > 0.001 {
                    // Map the coverage sample's center, then splat it back onto the grid
                    let lx = left + (bb.min.x + gx as i32) as f64 + 0.5;
                    let ly = baseline + (bb.min.y + gy as i32) as f64 + 0.5;
                    let (sx, sy) = transform.apply(lx, ly);
                    draw_antialiased_pixel(frame, frame_width, sx - 0.5, sy - 0.5, style.color, v);
                }
            });
        }
    }

    fn measure_text(&self, text: &str, size: f32) -> f64 {
        self.font
            .map(|font| text_width(font, text, Scale::uniform(size)))
            .unwrap_or(0.0)
    }
}

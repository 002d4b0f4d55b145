//! The drawing-surface capability the wheel renderer paints through.

use crate::config::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// `y` is the baseline of the glyphs
    Alphabetic,
    /// `y` is the vertical middle of the em box
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub color: Color,
}

/// A 2D raster drawing surface.
///
/// Coordinates passed to the drawing calls are local coordinates, mapped to
/// the surface through the current translate/rotate transform. Angles are in
/// radians, 0 at 3 o'clock, increasing clockwise (y grows downwards).
pub trait Surface {
    /// Pixel width and height.
    fn size(&self) -> (usize, usize);

    /// Fills the whole surface, ignoring the transform.
    fn clear(&mut self, color: Color);

    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops the transform pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn rotate(&mut self, angle: f64);

    /// Fills the wedge between `start` and `end` from `(cx, cy)` out to `radius`.
    fn fill_sector(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color);

    /// Outlines a wedge: both radial edges plus the arc.
    fn stroke_sector(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        width: f64,
        color: Color,
    );

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, width: f64, color: Color);

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color);

    fn stroke_polygon(&mut self, points: &[(f64, f64)], width: f64, color: Color);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    /// Advance width of `text` at `size`, in pixels.
    fn measure_text(&self, text: &str, size: f32) -> f64;
}

/// Translation plus rotation, the only transforms the wheel needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub angle: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        tx: 0.0,
        ty: 0.0,
        angle: 0.0,
    };

    /// Translates in the current (already rotated) frame.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let (sin, cos) = self.angle.sin_cos();
        self.tx += dx * cos - dy * sin;
        self.ty += dx * sin + dy * cos;
    }

    pub fn rotate(&mut self, angle: f64) {
        self.angle += angle;
    }

    /// Maps a local point to surface coordinates.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let (sin, cos) = self.angle.sin_cos();
        (self.tx + x * cos - y * sin, self.ty + x * sin + y * cos)
    }
}

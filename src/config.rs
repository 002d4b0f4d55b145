//! Colors, palettes and the wheel's builder-style configuration.

// ============================================================================
// COLORS & PALETTE
// ============================================================================

use std::str::FromStr;
use std::time::Duration;

use bon::Builder;

use crate::error::{Result, WheelError};
use crate::geometry::POINTER_TOP;

/// Color representation for wheel elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = WheelError;

    /// Parses `#RRGGBB` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(WheelError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| WheelError::InvalidColor(s.to_string()))
        };
        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Sector colors, handed out cyclically by sector index.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(WheelError::EmptyPalette);
        }
        Ok(Self(colors))
    }

    /// Parses a comma separated list of `#RRGGBB` colors.
    pub fn parse(list: &str) -> Result<Self> {
        let colors = list
            .split(',')
            .filter(|c| !c.trim().is_empty())
            .map(Color::from_str)
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    pub fn color_for(&self, index: usize) -> Color {
        self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.to_vec())
    }
}

pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::new(0xff, 0xf2, 0xc6),
    Color::new(0xff, 0xf8, 0xde),
    Color::new(0xaa, 0xc4, 0xf5),
    Color::new(0x8c, 0xa9, 0xff),
    Color::new(0xff, 0xe5, 0xcc),
    Color::new(0xd4, 0xe4, 0xff),
    Color::new(0xff, 0xd9, 0xb3),
    Color::new(0xc0, 0xd9, 0xff),
];

// ============================================================================
// WHEEL CONFIGURATION
// ============================================================================

/// DejaVu Sans, used for labels unless another font is supplied.
pub const BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

#[derive(Debug, Clone, Builder)]
pub struct WheelConfig {
    // Window configuration
    #[builder(default = "Impromptu Speaking Wheel".to_string())]
    pub title: String,
    #[builder(default = 400)]
    pub canvas_size: u32,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Wheel geometry
    /// Gap between the canvas edge and the wheel rim, leaves room for the border stroke
    #[builder(default = 10.0)]
    pub rim_inset: f64,
    #[builder(default = 2.0)]
    pub sector_border_width: f64,

    // Labels
    /// Distance from the rim to the right edge of each label
    #[builder(default = 50.0)]
    pub label_margin: f64,
    /// Space kept free around the hub when wrapping labels
    #[builder(default = 30.0)]
    pub hub_clearance: f64,
    #[builder(default = 12.0)]
    pub label_font_size: f32,
    #[builder(default = 12.0)]
    pub label_line_height: f64,
    /// TrueType/OpenType data for labels and the hub caption
    #[builder(default = BUNDLED_FONT)]
    pub font_data: &'static [u8],

    // Hub
    #[builder(default = 30.0)]
    pub hub_radius: f64,
    #[builder(default = 3.0)]
    pub hub_border_width: f64,
    #[builder(default = "SPIN".to_string())]
    pub hub_label: String,
    #[builder(default = 20.0)]
    pub hub_font_size: f32,

    // Pointer
    /// Screen angle of the pointer; the selection is resolved at the same angle
    #[builder(default = POINTER_TOP)]
    pub pointer_angle: f64,
    #[builder(default = 25.0)]
    pub pointer_length: f64,
    #[builder(default = 15.0)]
    pub pointer_half_width: f64,
    #[builder(default = 2.0)]
    pub pointer_border_width: f64,

    // Colors
    #[builder(default)]
    pub palette: Palette,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    #[builder(default = Color::WHITE)]
    pub border_color: Color,
    #[builder(default = Color::new(0x33, 0x33, 0x33))]
    pub label_color: Color,
    #[builder(default = Color::new(0x8c, 0xa9, 0xff))]
    pub hub_color: Color,
    #[builder(default = Color::WHITE)]
    pub hub_label_color: Color,
    #[builder(default = Color::new(0xff, 0x6b, 0x6b))]
    pub pointer_color: Color,

    // Spin
    /// Whole turns every spin makes; raised to one turn when smaller
    #[builder(default = 5.0)]
    pub min_turns: f64,
    /// Random extra whole-turn budget on top of `min_turns`
    #[builder(default = 3.0)]
    pub extra_turns: f64,
    #[builder(default = Duration::from_millis(4000))]
    pub spin_duration: Duration,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

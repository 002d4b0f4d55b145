//! Paints a wheel onto any [`Surface`](crate::surface::Surface).

use tracing::trace;

use crate::config::WheelConfig;
use crate::geometry::sector_range;
use crate::layout::wrap_label;
use crate::surface::{Surface, TextAlign, TextBaseline, TextStyle};

/// Where the wheel sits on a surface of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl WheelLayout {
    pub fn new(width: usize, height: usize, config: &WheelConfig) -> Self {
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        let radius = (width.min(height) as f64 / 2.0 - config.rim_inset).max(0.0);
        Self { cx, cy, radius }
    }

    /// Right edge of every label, measured from the center along the bisector.
    pub fn label_anchor(&self, config: &WheelConfig) -> f64 {
        self.radius - config.label_margin
    }

    /// Width available to a label line between the hub and the rim.
    pub fn label_width(&self, config: &WheelConfig) -> f64 {
        self.label_anchor(config) - config.hub_clearance
    }

    /// Corners of the pointer triangle: apex on the rim, base toward the center.
    pub fn pointer(&self, config: &WheelConfig) -> [(f64, f64); 3] {
        let (sin, cos) = config.pointer_angle.sin_cos();
        let apex = (self.cx + cos * self.radius, self.cy + sin * self.radius);
        let base_r = self.radius - config.pointer_length;
        let base = (self.cx + cos * base_r, self.cy + sin * base_r);
        // perpendicular to the pointer direction
        let (px, py) = (-sin * config.pointer_half_width, cos * config.pointer_half_width);
        [apex, (base.0 - px, base.1 - py), (base.0 + px, base.1 + py)]
    }
}

/// Paints the whole wheel turned by `rotation` radians.
///
/// An empty item list only clears the surface. Same arguments, same pixels.
pub fn render<S: Surface + ?Sized>(surface: &mut S, items: &[String], rotation: f64, config: &WheelConfig) {
    surface.clear(config.background_color);
    if items.is_empty() {
        return;
    }

    let (width, height) = surface.size();
    let wheel = WheelLayout::new(width, height, config);
    let count = items.len();
    trace!(count, rotation, "rendering wheel");

    let label_style = TextStyle {
        size: config.label_font_size,
        align: TextAlign::Right,
        baseline: TextBaseline::Middle,
        color: config.label_color,
    };
    let anchor = wheel.label_anchor(config);
    let max_width = wheel.label_width(config);

    for (index, item) in items.iter().enumerate() {
        let (start, end) = sector_range(index, count);
        let (start, end) = (start + rotation, end + rotation);

        surface.fill_sector(
            wheel.cx,
            wheel.cy,
            wheel.radius,
            start,
            end,
            config.palette.color_for(index),
        );
        surface.stroke_sector(
            wheel.cx,
            wheel.cy,
            wheel.radius,
            start,
            end,
            config.sector_border_width,
            config.border_color,
        );

        let lines = wrap_label(item, max_width, |text| {
            surface.measure_text(text, config.label_font_size)
        });
        surface.save();
        surface.translate(wheel.cx, wheel.cy);
        surface.rotate((start + end) / 2.0);
        // Stack lines across the bisector, centred on it
        let first = -(lines.len() as f64 - 1.0) * config.label_line_height / 2.0;
        for (row, line) in lines.iter().enumerate() {
            let y = first + row as f64 * config.label_line_height;
            surface.fill_text(line, anchor, y, &label_style);
        }
        surface.restore();
    }

    render_hub(surface, &wheel, config);
    render_pointer(surface, &wheel, config);
}

fn render_hub<S: Surface + ?Sized>(surface: &mut S, wheel: &WheelLayout, config: &WheelConfig) {
    surface.fill_circle(wheel.cx, wheel.cy, config.hub_radius, config.hub_color);
    surface.stroke_circle(
        wheel.cx,
        wheel.cy,
        config.hub_radius,
        config.hub_border_width,
        config.border_color,
    );
    surface.fill_text(
        &config.hub_label,
        wheel.cx,
        wheel.cy,
        &TextStyle {
            size: config.hub_font_size,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            color: config.hub_label_color,
        },
    );
}

fn render_pointer<S: Surface + ?Sized>(surface: &mut S, wheel: &WheelLayout, config: &WheelConfig) {
    let triangle = wheel.pointer(config);
    surface.fill_polygon(&triangle, config.pointer_color);
    surface.stroke_polygon(&triangle, config.pointer_border_width, config.border_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::config::{Color, Palette};
    use crate::geometry::resolve_index_at;
    use crate::scene::{DrawCommand, Scene};
    use std::f64::consts::{PI, TAU};

    fn items(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_wheel_only_clears() {
        let mut scene = Scene::new(400, 400);
        render(&mut scene, &[], 1.0, &WheelConfig::default());
        assert_eq!(scene.commands(), &[DrawCommand::Clear(Color::WHITE)]);
    }

    #[test]
    fn draws_one_sector_per_item_with_cycled_colors() {
        let config = WheelConfig::default();
        let mut scene = Scene::new(400, 400);
        let labels: Vec<String> = (0..10).map(|i| format!("topic {i}")).collect();
        render(&mut scene, &labels, 0.25, &config);

        let fills: Vec<_> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillSector {
                    start, end, radius, color, ..
                } => Some((*start, *end, *radius, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 10);
        for (i, (start, end, radius, color)) in fills.iter().enumerate() {
            assert!((start - (0.25 + i as f64 * TAU / 10.0)).abs() < 1e-9);
            assert!((end - start - TAU / 10.0).abs() < 1e-9);
            assert_eq!(*radius, 190.0);
            assert_eq!(*color, config.palette.color_for(i));
        }
        assert_eq!(fills[8].3, fills[0].3);
    }

    #[test]
    fn hub_and_pointer_come_last() {
        let mut scene = Scene::new(400, 400);
        render(&mut scene, &items(&["A", "B"]), 0.0, &WheelConfig::default());
        let commands = scene.commands();
        let tail = &commands[commands.len() - 5..];
        assert!(matches!(tail[0], DrawCommand::FillCircle { radius, .. } if radius == 30.0));
        assert!(matches!(tail[1], DrawCommand::StrokeCircle { .. }));
        assert!(matches!(&tail[2], DrawCommand::Text { text, .. } if text == "SPIN"));
        assert!(matches!(tail[3], DrawCommand::FillPolygon { .. }));
        assert!(matches!(tail[4], DrawCommand::StrokePolygon { .. }));
    }

    #[test]
    fn labels_are_wrapped_right_aligned_and_centred_on_the_bisector() {
        let config = WheelConfig::default();
        let mut scene = Scene::new(400, 400);
        // 110 px wide at 7.2 px per char: 15 chars per line
        render(&mut scene, &items(&["The movie everyone must see and why"]), 0.0, &config);

        let texts: Vec<_> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, x, y, style } if style.align == TextAlign::Right => {
                    Some((text.clone(), *x, *y))
                }
                _ => None,
            })
            .collect();
        let lines: Vec<_> = texts.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(lines, vec!["The movie", "everyone must", "see and why"]);
        assert!(texts.iter().all(|t| t.1 == 140.0));
        assert_eq!(texts[0].2, -12.0);
        assert_eq!(texts[1].2, 0.0);
        assert_eq!(texts[2].2, 12.0);
    }

    #[test]
    fn label_frame_is_rotated_to_the_bisector() {
        let mut scene = Scene::new(400, 400);
        render(&mut scene, &items(&["A", "B", "C", "D"]), 1.0, &WheelConfig::default());
        let rotations: Vec<f64> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rotate(angle) => Some(*angle),
                _ => None,
            })
            .collect();
        assert_eq!(rotations.len(), 4);
        for (i, angle) in rotations.iter().enumerate() {
            assert!((angle - (1.0 + PI / 4.0 + i as f64 * PI / 2.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn pointer_points_down_from_the_top() {
        let config = WheelConfig::default();
        let wheel = WheelLayout::new(400, 400, &config);
        let [apex, left, right] = wheel.pointer(&config);
        assert!((apex.0 - 200.0).abs() < 1e-9 && (apex.1 - 10.0).abs() < 1e-9);
        assert!((left.1 - 35.0).abs() < 1e-9 && (right.1 - 35.0).abs() < 1e-9);
        assert!(((left.0 - right.0).abs() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn rendering_is_idempotent() {
        let labels = items(&["Love is blind", "My favorite class", "Should justice be blind?"]);
        let config = WheelConfig::default();
        let mut first = vec![0u8; 120 * 120 * 4];
        let mut second = vec![0u8; 120 * 120 * 4];
        render(&mut Canvas::new(&mut first, 120, 120), &labels, 2.5, &config);
        render(&mut Canvas::new(&mut second, 120, 120), &labels, 2.5, &config);
        assert_eq!(first, second);

        let mut scene = Scene::new(120, 120);
        render(&mut scene, &labels, 2.5, &config);
        let once = scene.commands().to_vec();
        render(&mut scene, &labels, 2.5, &config);
        assert_eq!(scene.commands(), once.as_slice());
    }

    #[test]
    fn scene_replay_matches_direct_rendering() {
        let labels = items(&["A", "B", "C"]);
        let config = WheelConfig::default();
        let mut direct = vec![0u8; 100 * 100 * 4];
        render(&mut Canvas::new(&mut direct, 100, 100), &labels, 0.7, &config);

        let mut scene = Scene::new(100, 100);
        render(&mut scene, &labels, 0.7, &config);
        let mut replayed = vec![0u8; 100 * 100 * 4];
        scene.render(&mut Canvas::new(&mut replayed, 100, 100));
        assert_eq!(direct, replayed);
    }

    #[test]
    fn color_under_the_pointer_is_the_resolved_sector() {
        let palette: Vec<Color> = (0..12).map(|i| Color::new(20 * i as u8, 255 - 20 * i as u8, 7)).collect();
        let config = WheelConfig::builder()
            .palette(Palette::new(palette).unwrap())
            .build();
        let size = 200;
        let wheel = WheelLayout::new(size, size, &config);
        // just inside the pointer's base, clear of the hub and labels' right edge
        let probe_r = wheel.radius - config.pointer_length - 6.0;
        let (sin, cos) = config.pointer_angle.sin_cos();
        let (px, py) = (wheel.cx + cos * probe_r, wheel.cy + sin * probe_r);

        for count in [1usize, 2, 3, 5, 8, 12] {
            let labels: Vec<String> = (0..count).map(|_| String::new()).collect();
            let width = TAU / count as f64;
            for step in 0..8 {
                // keep the probe away from sector borders
                let rotation = step as f64 * 0.83 + 11.0;
                let index = resolve_index_at(rotation, count, config.pointer_angle);
                let into = crate::geometry::normalize_angle(config.pointer_angle - rotation) - index as f64 * width;
                if into < 0.1 || width - into < 0.1 {
                    continue;
                }

                let mut frame = vec![0u8; size * size * 4];
                let mut canvas = Canvas::new(&mut frame, size, size);
                render(&mut canvas, &labels, rotation, &config);
                let seen = canvas.pixel(px as usize, py as usize).unwrap();
                assert_eq!(seen, config.palette.color_for(index), "count {count} rotation {rotation}");
            }
        }
    }
}

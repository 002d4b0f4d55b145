//! Retained-mode drawing: a surface that records commands for replay.

use crate::config::Color;
use crate::surface::{Surface, TextStyle};

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate(f64),
    FillSector {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        color: Color,
    },
    StrokeSector {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        width: f64,
        color: Color,
    },
    FillCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
    },
    StrokeCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        width: f64,
        color: Color,
    },
    FillPolygon {
        points: Vec<(f64, f64)>,
        color: Color,
    },
    StrokePolygon {
        points: Vec<(f64, f64)>,
        width: f64,
        color: Color,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
}

/// A surface that records what is drawn on it instead of rasterizing.
///
/// Text is measured as a monospace face whose advance is 0.6 em. A clear
/// discards everything recorded before it, so re-rendering a frame onto the
/// same scene does not grow it.
#[derive(Clone, Debug)]
pub struct Scene {
    width: usize,
    height: usize,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub const ADVANCE_EM: f64 = 0.6;

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Text calls in recording order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Re-issues every recorded call on `surface`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => surface.clear(*color),
                DrawCommand::Save => surface.save(),
                DrawCommand::Restore => surface.restore(),
                DrawCommand::Translate { dx, dy } => surface.translate(*dx, *dy),
                DrawCommand::Rotate(angle) => surface.rotate(*angle),
                DrawCommand::FillSector {
                    cx,
                    cy,
                    radius,
                    start,
                    end,
                    color,
                } => surface.fill_sector(*cx, *cy, *radius, *start, *end, *color),
                DrawCommand::StrokeSector {
                    cx,
                    cy,
                    radius,
                    start,
                    end,
                    width,
                    color,
                } => surface.stroke_sector(*cx, *cy, *radius, *start, *end, *width, *color),
                DrawCommand::FillCircle {
                    cx,
                    cy,
                    radius,
                    color,
                } => surface.fill_circle(*cx, *cy, *radius, *color),
                DrawCommand::StrokeCircle {
                    cx,
                    cy,
                    radius,
                    width,
                    color,
                } => surface.stroke_circle(*cx, *cy, *radius, *width, *color),
                DrawCommand::FillPolygon { points, color } => surface.fill_polygon(points, *color),
                DrawCommand::StrokePolygon {
                    points,
                    width,
                    color,
                } => surface.stroke_polygon(points, *width, *color),
                DrawCommand::Text { text, x, y, style } => surface.fill_text(text, *x, *y, style),
            }
        }
    }
}

impl Surface for Scene {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.add_command(DrawCommand::Clear(color));
    }

    fn save(&mut self) {
        self.add_command(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.add_command(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.add_command(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, angle: f64) {
        self.add_command(DrawCommand::Rotate(angle));
    }

    fn fill_sector(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color) {
        self.add_command(DrawCommand::FillSector {
            cx,
            cy,
            radius,
            start,
            end,
            color,
        });
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
        self.add_command(DrawCommand::StrokeSector {
            cx,
            cy,
            radius,
            start,
            end,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.add_command(DrawCommand::FillCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, width: f64, color: Color) {
        self.add_command(DrawCommand::StrokeCircle {
            cx,
            cy,
            radius,
            width,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        self.add_command(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[(f64, f64)], width: f64, color: Color) {
        self.add_command(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.add_command(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }

    fn measure_text(&self, text: &str, size: f32) -> f64 {
        text.chars().count() as f64 * size as f64 * Self::ADVANCE_EM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{TextAlign, TextBaseline};

    #[test]
    fn clear_drops_earlier_commands() {
        let mut scene = Scene::new(100, 100);
        scene.fill_circle(1.0, 2.0, 3.0, Color::WHITE);
        scene.clear(Color::WHITE);
        scene.rotate(1.0);
        assert_eq!(scene.commands(), &[DrawCommand::Clear(Color::WHITE), DrawCommand::Rotate(1.0)]);
    }

    #[test]
    fn monospace_metrics() {
        let scene = Scene::new(10, 10);
        assert!((scene.measure_text("abcd", 10.0) - 24.0).abs() < 1e-9);
        assert_eq!(scene.measure_text("", 10.0), 0.0);
    }

    #[test]
    fn replays_onto_another_scene() {
        let mut scene = Scene::new(50, 50);
        scene.clear(Color::WHITE);
        scene.save();
        scene.translate(25.0, 25.0);
        scene.fill_polygon(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], Color::new(1, 2, 3));
        scene.fill_text(
            "hello",
            0.0,
            0.0,
            &TextStyle {
                size: 12.0,
                align: TextAlign::Left,
                baseline: TextBaseline::Alphabetic,
                color: Color::WHITE,
            },
        );
        scene.restore();

        let mut copy = Scene::new(50, 50);
        scene.render(&mut copy);
        assert_eq!(copy.commands(), scene.commands());
        assert_eq!(copy.texts().collect::<Vec<_>>(), vec!["hello"]);
    }
}

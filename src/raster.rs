//! Anti-aliased primitives over a tightly packed RGBA8 frame buffer. All
//! coordinates are surface pixels; a pixel's center sits at (x + 0.5, y + 0.5).

use crate::config::Color;
use crate::geometry::angle_in_span;

/// Alpha-blends `color` over the pixel at `(x, y)`. Out of bounds writes are dropped.
pub fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Color, alpha: f32) {
    if width == 0 || x >= width || y >= frame.len() / (width * 4) {
        return;
    }
    let idx = (y * width + x) * 4;
    let a = alpha.clamp(0.0, 1.0);
    let src = [color.r as f32, color.g as f32, color.b as f32];
    for (channel, src) in frame[idx..idx + 3].iter_mut().zip(src) {
        *channel = (src * a + *channel as f32 * (1.0 - a)).round() as u8;
    }
    frame[idx + 3] = 0xff;
}

/// Integer pixel range covering `[min, max]`, clipped to `0..limit`.
fn span(min: f64, max: f64, limit: usize) -> std::ops::Range<usize> {
    let lo = min.floor().max(0.0) as usize;
    let hi = (max.ceil().max(0.0) as usize).min(limit);
    lo..hi.max(lo)
}

fn height_of(frame: &[u8], width: usize) -> usize {
    if width == 0 {
        0
    } else {
        frame.len() / (width * 4)
    }
}

/// Visits every pixel center inside the given box and blends the returned coverage.
fn shade<F>(frame: &mut [u8], width: usize, bounds: (f64, f64, f64, f64), color: Color, coverage: F)
where
    F: Fn(f64, f64) -> f64,
{
    let height = height_of(frame, width);
    let (min_x, min_y, max_x, max_y) = bounds;
    for y in span(min_y, max_y, height) {
        for x in span(min_x, max_x, width) {
            let aa = coverage(x as f64 + 0.5, y as f64 + 0.5);
            if aa > 0.01 {
                set_pixel(frame, width, x, y, color, aa as f32);
            }
        }
    }
}

/// Filled wedge, anti-aliased along the rim. A span of a full turn or more
/// yields a full disc.
pub fn fill_wedge(
    frame: &mut [u8],
    width: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    start: f64,
    end: f64,
    color: Color,
) {
    if radius <= 0.0 || end <= start {
        return;
    }
    let bounds = (cx - radius - 1.0, cy - radius - 1.0, cx + radius + 1.0, cy + radius + 1.0);
    shade(frame, width, bounds, color, |px, py| {
        let (dx, dy) = (px - cx, py - cy);
        let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
        if coverage == 0.0 || !angle_in_span(dy.atan2(dx), start, end) {
            return 0.0;
        }
        coverage
    });
}

/// Ring of `thickness` centred on `radius`, limited to the angular span
/// `[start, end)`.
pub fn stroke_arc(
    frame: &mut [u8],
    width: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    start: f64,
    end: f64,
    thickness: f64,
    color: Color,
) {
    if thickness <= 0.0 || end <= start {
        return;
    }
    let outer = radius + thickness / 2.0 + 1.0;
    let bounds = (cx - outer, cy - outer, cx + outer, cy + outer);
    shade(frame, width, bounds, color, |px, py| {
        let (dx, dy) = (px - cx, py - cy);
        let dist = (dx * dx + dy * dy).sqrt();
        let coverage = (thickness / 2.0 + 0.5 - (dist - radius).abs()).clamp(0.0, 1.0);
        if coverage == 0.0 || !angle_in_span(dy.atan2(dx), start, end) {
            return 0.0;
        }
        coverage
    });
}

pub fn draw_thick_line_aa(
    frame: &mut [u8],
    width: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    thickness: f64,
    color: Color,
) {
    let pad = thickness.ceil() + 1.0;
    let bounds = (x0.min(x1) - pad, y0.min(y1) - pad, x0.max(x1) + pad, y0.max(y1) + pad);
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    shade(frame, width, bounds, color, |px, py| {
        let t = if len_sq > 0.0 {
            (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let lx = x0 + t * dx;
        let ly = y0 + t * dy;
        let dist = ((lx - px).powi(2) + (ly - py).powi(2)).sqrt();
        (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0)
    });
}

/// Fills a convex polygon given in either winding order, anti-aliased on every edge.
pub fn fill_convex_polygon(frame: &mut [u8], width: usize, points: &[(f64, f64)], color: Color) {
    if points.len() < 3 {
        return;
    }
    let signed_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
        .sum();
    if signed_area == 0.0 {
        return;
    }
    let winding = signed_area.signum();

    let bounds = points.iter().fold(
        (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        |(min_x, min_y, max_x, max_y), &(x, y)| (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)),
    );
    let bounds = (bounds.0 - 1.0, bounds.1 - 1.0, bounds.2 + 1.0, bounds.3 + 1.0);

    shade(frame, width, bounds, color, |px, py| {
        // Smallest signed distance to any edge, positive inside
        let inside = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(a, b)| {
                let (ex, ey) = (b.0 - a.0, b.1 - a.1);
                let len = (ex * ex + ey * ey).sqrt();
                if len == 0.0 {
                    return f64::MAX;
                }
                winding * (ex * (py - a.1) - ey * (px - a.0)) / len
            })
            .fold(f64::MAX, f64::min);
        (inside + 0.5).clamp(0.0, 1.0)
    });
}

/// Blends a sub-pixel positioned sample over the four nearest pixels.
pub fn draw_antialiased_pixel(frame: &mut [u8], width: usize, x: f64, y: f64, color: Color, alpha: f32) {
    let height = height_of(frame, width);
    let x_floor = x.floor();
    let y_floor = y.floor();
    let x_frac = x - x_floor;
    let y_frac = y - y_floor;

    let samples = [
        (x_floor, y_floor, (1.0 - x_frac) * (1.0 - y_frac)),
        (x_floor + 1.0, y_floor, x_frac * (1.0 - y_frac)),
        (x_floor, y_floor + 1.0, (1.0 - x_frac) * y_frac),
        (x_floor + 1.0, y_floor + 1.0, x_frac * y_frac),
    ];

    for (px, py, weight) in samples {
        if px >= 0.0 && py >= 0.0 && (px as usize) < width && (py as usize) < height {
            let final_alpha = alpha * weight as f32;
            if final_alpha > 0.001 {
                set_pixel(frame, width, px as usize, py as usize, color, final_alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    const RED: Color = Color::new(0xff, 0, 0);

    fn blank(width: usize, height: usize) -> Vec<u8> {
        vec![0xff; width * height * 4]
    }

    fn rgb(frame: &[u8], width: usize, x: usize, y: usize) -> (u8, u8, u8) {
        let idx = (y * width + x) * 4;
        (frame[idx], frame[idx + 1], frame[idx + 2])
    }

    #[test]
    fn set_pixel_blends_and_clips() {
        let mut frame = blank(2, 2);
        set_pixel(&mut frame, 2, 0, 0, RED, 1.0);
        set_pixel(&mut frame, 2, 1, 0, Color::new(0, 0, 0), 0.5);
        set_pixel(&mut frame, 2, 5, 5, RED, 1.0);
        assert_eq!(rgb(&frame, 2, 0, 0), (0xff, 0, 0));
        assert_eq!(rgb(&frame, 2, 1, 0), (128, 128, 128));
        assert_eq!(rgb(&frame, 2, 0, 1), (0xff, 0xff, 0xff));
    }

    #[test]
    fn wedge_only_covers_its_span() {
        let mut frame = blank(40, 40);
        // lower-right quadrant on a y-down surface
        fill_wedge(&mut frame, 40, 20.0, 20.0, 15.0, 0.0, FRAC_PI_2, RED);
        assert_eq!(rgb(&frame, 40, 27, 27), (0xff, 0, 0));
        assert_eq!(rgb(&frame, 40, 12, 27), (0xff, 0xff, 0xff));
        assert_eq!(rgb(&frame, 40, 27, 12), (0xff, 0xff, 0xff));
        assert_eq!(rgb(&frame, 40, 38, 38), (0xff, 0xff, 0xff));
    }

    #[test]
    fn wedge_spanning_the_seam_wraps() {
        let mut frame = blank(40, 40);
        fill_wedge(&mut frame, 40, 20.0, 20.0, 15.0, TAU - 0.3, TAU + 0.3, RED);
        assert_eq!(rgb(&frame, 40, 30, 20), (0xff, 0, 0));
        assert_eq!(rgb(&frame, 40, 10, 20), (0xff, 0xff, 0xff));
    }

    #[test]
    fn full_turn_wedge_is_a_disc() {
        let mut frame = blank(30, 30);
        fill_wedge(&mut frame, 30, 15.0, 15.0, 10.0, 0.0, TAU, RED);
        for (x, y) in [(15, 6), (6, 15), (23, 15), (15, 23)] {
            assert_eq!(rgb(&frame, 30, x, y), (0xff, 0, 0));
        }
        assert_eq!(rgb(&frame, 30, 1, 1), (0xff, 0xff, 0xff));
    }

    #[test]
    fn arc_stroke_is_a_thin_ring() {
        let mut frame = blank(40, 40);
        stroke_arc(&mut frame, 40, 20.0, 20.0, 10.0, 0.0, TAU, 2.0, RED);
        assert_eq!(rgb(&frame, 40, 29, 19), (0xff, 0, 0));
        assert_eq!(rgb(&frame, 40, 20, 20), (0xff, 0xff, 0xff));
        assert_eq!(rgb(&frame, 40, 35, 20), (0xff, 0xff, 0xff));
    }

    #[test]
    fn triangle_fill_respects_edges_in_both_windings() {
        for points in [
            [(10.0, 2.0), (2.0, 18.0), (18.0, 18.0)],
            [(10.0, 2.0), (18.0, 18.0), (2.0, 18.0)],
        ] {
            let mut frame = blank(20, 20);
            fill_convex_polygon(&mut frame, 20, &points, RED);
            assert_eq!(rgb(&frame, 20, 10, 14), (0xff, 0, 0));
            assert_eq!(rgb(&frame, 20, 2, 3), (0xff, 0xff, 0xff));
            assert_eq!(rgb(&frame, 20, 17, 3), (0xff, 0xff, 0xff));
        }
    }

    #[test]
    fn degenerate_shapes_draw_nothing() {
        let mut frame = blank(10, 10);
        fill_convex_polygon(&mut frame, 10, &[(1.0, 1.0), (5.0, 5.0), (9.0, 9.0)], RED);
        fill_wedge(&mut frame, 10, 5.0, 5.0, 0.0, 0.0, PI, RED);
        fill_wedge(&mut frame, 10, 5.0, 5.0, 4.0, 1.0, 1.0, RED);
        assert!(frame.iter().all(|&b| b == 0xff));
    }

    #[test]
    fn line_covers_its_path() {
        let mut frame = blank(20, 20);
        draw_thick_line_aa(&mut frame, 20, 2.0, 10.5, 18.0, 10.5, 2.0, RED);
        assert_eq!(rgb(&frame, 20, 10, 10), (0xff, 0, 0));
        assert_eq!(rgb(&frame, 20, 10, 4), (0xff, 0xff, 0xff));
    }

    #[test]
    fn subpixel_sample_splits_between_neighbours() {
        let mut frame = blank(4, 4);
        draw_antialiased_pixel(&mut frame, 4, 1.0, 1.0, RED, 1.0);
        assert_eq!(rgb(&frame, 4, 1, 1), (0xff, 0, 0));
        assert_eq!(rgb(&frame, 4, 2, 2), (0xff, 0xff, 0xff));
        draw_antialiased_pixel(&mut frame, 4, -3.0, 10.0, RED, 1.0);
    }
}

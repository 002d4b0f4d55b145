//! Sector geometry and angle → sector resolution.
//!
//! Angles follow the raster convention used by every [`Surface`]: 0 points to
//! 3 o'clock and angles grow clockwise on a y-down surface. Sector `i` of a
//! wheel rotated by `rotation` covers the screen angles
//! `[rotation + i·w, rotation + (i + 1)·w)` with `w = 2π / count`.
//!
//! [`Surface`]: crate::surface::Surface

use std::f64::consts::{PI, TAU};

/// Angular width of one sector.
pub fn sector_width(count: usize) -> f64 {
    TAU / count as f64
}

/// Start and end angle of sector `index` in the wheel's own frame.
pub fn sector_range(index: usize, count: usize) -> (f64, f64) {
    let width = sector_width(count);
    let start = index as f64 * width;
    (start, start + width)
}

/// Maps any angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = ((angle % TAU) + TAU) % TAU;
    // (-tiny % TAU) + TAU rounds to exactly TAU
    if normalized >= TAU {
        0.0
    } else {
        normalized
    }
}

/// Index of the sector that sits on the wheel-frame reference angle 0 once the
/// wheel has been rotated by `final_angle`.
///
/// Rotating the wheel forward carries sector content past the reference, so
/// the angle under it is the negated rotation.
///
/// # Panics
///
/// Panics if `count` is zero; an empty wheel has no sector to resolve. Use
/// [`crate::spin::resolve_selection`] when the wheel may be empty.
pub fn resolve_index(final_angle: f64, count: usize) -> usize {
    let normalized = normalize_angle(-final_angle);
    (normalized / sector_width(count)).floor() as usize % count
}

/// Same rule as [`resolve_index`] for a pointer fixed at `pointer_angle`.
///
/// The renderer paints the pointer at this exact angle, so the two must always
/// be given the same value.
pub fn resolve_index_at(final_angle: f64, count: usize, pointer_angle: f64) -> usize {
    resolve_index(final_angle - pointer_angle, count)
}

/// Whether `angle` falls inside `[start, end)` modulo a full turn.
pub fn angle_in_span(angle: f64, start: f64, end: f64) -> bool {
    let span = end - start;
    if span >= TAU {
        return true;
    }
    normalize_angle(angle - start) < span
}

/// Pointer at 12 o'clock on a y-down surface.
pub const POINTER_TOP: f64 = -PI / 2.0;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    #[test]
    fn sectors_partition_a_full_turn() {
        for count in 1..=64 {
            let mut covered = 0.0;
            let mut expected_start = 0.0;
            for index in 0..count {
                let (start, end) = sector_range(index, count);
                assert!((start - expected_start).abs() < EPS, "gap before sector {index}/{count}");
                assert!(end > start);
                covered += end - start;
                expected_start = end;
            }
            assert!((covered - TAU).abs() < EPS, "count {count} covers {covered}");
            assert!((expected_start - TAU).abs() < EPS);
        }
    }

    #[test]
    fn normalize_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let angle = rng.random_range(-1.0e4..1.0e4);
            let n = normalize_angle(angle);
            assert!((0.0..TAU).contains(&n), "{angle} -> {n}");
        }
        assert_eq!(normalize_angle(-1e-18), 0.0);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < EPS);
    }

    #[test]
    fn resolve_at_zero_rotation_picks_first_sector() {
        assert_eq!(resolve_index(0.0, 4), 0);
        assert_eq!(resolve_index(0.0, 1), 0);
    }

    #[test]
    fn resolve_moves_backwards_through_sectors_as_wheel_turns() {
        // A quarter turn forward on a 4-sector wheel brings the last sector
        // under the reference.
        assert_eq!(resolve_index(PI / 2.0 + 0.1, 4), 2);
        assert_eq!(resolve_index(0.1, 4), 3);
        assert_eq!(resolve_index(-0.1, 4), 0);
    }

    #[test]
    fn resolve_ignores_whole_turns() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let count = rng.random_range(1..40);
            let angle = rng.random_range(0.0..TAU);
            let turns = rng.random_range(1..9) as f64;
            let a = resolve_index_at(angle, count, POINTER_TOP);
            let b = resolve_index_at(angle + turns * TAU, count, POINTER_TOP);
            // whole turns may only differ at a float boundary
            let (s, e) = sector_range(a, count);
            let off = normalize_angle(POINTER_TOP - angle);
            if (off - s).abs() > 1e-6 && (off - e).abs() > 1e-6 {
                assert_eq!(a, b, "count {count} angle {angle} turns {turns}");
            }
        }
    }

    #[test]
    fn resolved_sector_contains_the_pointer() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let count = rng.random_range(1..50);
            let rotation = rng.random_range(0.0..200.0);
            let pointer = rng.random_range(-PI..PI);
            let index = resolve_index_at(rotation, count, pointer);
            assert!(index < count);
            let (start, end) = sector_range(index, count);
            let into = normalize_angle(pointer - (start + rotation));
            let inside = into < (end - start) + 1e-6 || into > TAU - 1e-6;
            assert!(inside, "pointer {pointer} not in sector {index} of {count} at {rotation}");
        }
    }

    #[test]
    fn angle_span_handles_wraparound() {
        assert!(angle_in_span(0.1, TAU - 0.2, TAU + 0.3));
        assert!(angle_in_span(-0.1, TAU - 0.2, TAU + 0.3));
        assert!(!angle_in_span(0.4, TAU - 0.2, TAU + 0.3));
        assert!(angle_in_span(3.0, 0.0, TAU));
    }

    #[test]
    #[should_panic]
    fn resolving_an_empty_wheel_panics() {
        resolve_index(1.0, 0);
    }
}

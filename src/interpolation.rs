//! Waypoint Interpolation
//!
//! Turns straight and circular moves into dense point sequences. Density is
//! expressed in segments per unit of path length.

use std::f64::consts::TAU;

use serde::Serialize;

/// A point in the arm-centered Cartesian frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
}

impl Waypoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Waypoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of this point as seen from `center`, in radians
    fn angle_about(&self, center: Waypoint) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }
}

/// Rotation direction of an arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

/// Straight segment from `start` to `end`.
///
/// Always yields at least three points and never more than
/// `max_segments + 1`; the endpoints are copied verbatim.
pub fn line(start: Waypoint, end: Waypoint, density: f64, max_segments: usize) -> Vec<Waypoint> {
    let segments = segment_count(start.distance_to(end) * density, 2, max_segments);

    (0..=segments)
        .map(|i| {
            if i == 0 {
                start
            } else if i == segments {
                end
            } else {
                let t = i as f64 / segments as f64;
                Waypoint::new(
                    start.x + t * (end.x - start.x),
                    start.y + t * (end.y - start.y),
                )
            }
        })
        .collect()
}

/// Circular arc about `center`, beginning at `start`.
///
/// The radius is taken from `start` alone. `end` only contributes its angle,
/// so an inconsistent `end` is never reached exactly.
pub fn arc(
    start: Waypoint,
    end: Waypoint,
    center: Waypoint,
    direction: ArcDirection,
    density: f64,
    max_segments: usize,
) -> Vec<Waypoint> {
    let radius = start.distance_to(center);
    let start_angle = start.angle_about(center);
    let end_angle = end.angle_about(center);
    let sweep = sweep_angle(start_angle, end_angle, direction);

    let arc_length = (radius * sweep).abs();
    let segments = segment_count(arc_length * density, 4, max_segments);

    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let angle = start_angle + t * sweep;
            Waypoint::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Signed sweep that rotates monotonically in the requested direction
fn sweep_angle(start_angle: f64, end_angle: f64, direction: ArcDirection) -> f64 {
    let raw = end_angle - start_angle;
    match direction {
        ArcDirection::Clockwise if end_angle > start_angle => raw - TAU,
        ArcDirection::CounterClockwise if end_angle < start_angle => raw + TAU,
        _ => raw,
    }
}

fn segment_count(raw: f64, minimum: usize, maximum: usize) -> usize {
    let maximum = maximum.max(minimum);
    if raw.is_nan() || raw < minimum as f64 {
        return minimum;
    }
    if raw > maximum as f64 {
        log::warn!(
            "Move needs {:.0} segments, capping at {}",
            raw.floor(),
            maximum
        );
        return maximum;
    }
    raw.floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 10_000;

    #[test]
    fn test_line_endpoints_exact() {
        let start = Waypoint::new(0.1, 0.2);
        let end = Waypoint::new(0.3, 0.7);
        let points = line(start, end, 10.0, MAX);
        assert_eq!(points.first(), Some(&start));
        assert_eq!(points.last(), Some(&end));
    }

    #[test]
    fn test_line_segment_count() {
        let points = line(Waypoint::new(0.0, 0.0), Waypoint::new(2.0, 0.0), 5.0, MAX);
        assert_eq!(points.len(), 11);
        assert_eq!(points[5], Waypoint::new(1.0, 0.0));
    }

    #[test]
    fn test_zero_length_line() {
        let here = Waypoint::new(6.0, 6.0);
        let points = line(here, here, 5.0, MAX);
        assert_eq!(points, vec![here; 3]);
    }

    #[test]
    fn test_sweep_direction_correction() {
        // quarter turn from +X to +Y
        let ccw = sweep_angle(0.0, TAU / 4.0, ArcDirection::CounterClockwise);
        let cw = sweep_angle(0.0, TAU / 4.0, ArcDirection::Clockwise);
        assert!((ccw - TAU / 4.0).abs() < 1e-12);
        assert!((cw + 3.0 * TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_quarter_circle() {
        let points = arc(
            Waypoint::new(6.0, 0.0),
            Waypoint::new(0.0, 6.0),
            Waypoint::new(0.0, 0.0),
            ArcDirection::CounterClockwise,
            5.0,
            MAX,
        );
        // 6 * pi / 2 * 5 = 47.12
        assert_eq!(points.len(), 48);
        let last = points.last().unwrap();
        assert!(last.x.abs() < 1e-9);
        assert!((last.y - 6.0).abs() < 1e-9);
        for point in &points {
            assert!((point.distance_from_origin() - 6.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tiny_arc_has_minimum_segments() {
        let points = arc(
            Waypoint::new(1.0, 0.0),
            Waypoint::new(0.999, 0.01),
            Waypoint::new(0.0, 0.0),
            ArcDirection::CounterClockwise,
            1.0,
            MAX,
        );
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn test_coincident_endpoints_give_zero_sweep() {
        let start = Waypoint::new(2.0, 0.0);
        let points = arc(
            start,
            start,
            Waypoint::new(0.0, 0.0),
            ArcDirection::Clockwise,
            10.0,
            MAX,
        );
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.distance_to(start) < 1e-12));
    }

    #[test]
    fn test_far_line_is_capped() {
        let points = line(Waypoint::new(6.0, 6.0), Waypoint::new(1e30, 0.0), 5.0, 100);
        assert_eq!(points.len(), 101);
        assert_eq!(points.last(), Some(&Waypoint::new(1e30, 0.0)));
    }

    #[test]
    fn test_overflowing_density_is_capped() {
        let points = line(Waypoint::new(0.0, 0.0), Waypoint::new(1e308, 0.0), 1e10, 50);
        assert_eq!(points.len(), 51);
    }

    #[test]
    fn test_huge_arc_is_capped() {
        let points = arc(
            Waypoint::new(1e20, 0.0),
            Waypoint::new(0.0, 1e20),
            Waypoint::new(0.0, 0.0),
            ArcDirection::CounterClockwise,
            10.0,
            64,
        );
        assert_eq!(points.len(), 65);
    }

    #[test]
    fn test_segment_count_bounds() {
        assert_eq!(segment_count(f64::NAN, 2, 100), 2);
        assert_eq!(segment_count(f64::INFINITY, 2, 100), 100);
        assert_eq!(segment_count(-5.0, 2, 100), 2);
        assert_eq!(segment_count(7.9, 2, 100), 7);
        // a ceiling below the minimum still honors the minimum
        assert_eq!(segment_count(50.0, 4, 1), 4);
    }

    #[test]
    fn test_inconsistent_arc_end_stays_on_start_radius() {
        // end lies at radius 4 but the arc starts at radius 2
        let points = arc(
            Waypoint::new(2.0, 0.0),
            Waypoint::new(0.0, 4.0),
            Waypoint::new(0.0, 0.0),
            ArcDirection::CounterClockwise,
            10.0,
            MAX,
        );
        let last = points.last().unwrap();
        assert!(last.x.abs() < 1e-9);
        assert!((last.y - 2.0).abs() < 1e-9);
        assert!(points
            .iter()
            .all(|p| (p.distance_from_origin() - 2.0).abs() < 1e-9));
    }
}

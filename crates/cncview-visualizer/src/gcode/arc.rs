//! Arc interpolation (G2/G3)
//!
//! Converts a circular or helical move into straight sub-segments. The
//! number of sub-segments is proportional to the arc length and bounded by
//! [`ArcConfig`].

use super::state::Plane;
use cncview_core::Coordinate;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::trace;

/// Sweeps within this many radians of zero are treated as full circles
const ANGULAR_EPSILON: f64 = 5e-7;

/// Radii below this are degenerate
const MIN_RADIUS: f64 = 1e-6;

/// Arc subdivision settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcConfig {
    /// Longest chord, in millimeters, before another sub-segment is added
    pub max_segment_length: f64,
    /// Fewest sub-segments for any non-degenerate arc
    pub min_segments: u32,
    /// Most sub-segments for a single arc
    pub max_segments: u32,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            max_segment_length: 0.5,
            min_segments: 4,
            max_segments: 360,
        }
    }
}

impl ArcConfig {
    /// Sub-segment count for an arc sweeping `sweep` radians at `radius`
    pub fn segment_count(&self, sweep: f64, radius: f64) -> usize {
        let min = self.min_segments.max(1) as usize;
        let max = (self.max_segments as usize).max(min);
        let length = sweep.abs() * radius;
        let wanted = (length / self.max_segment_length).ceil();
        if !wanted.is_finite() {
            return max;
        }
        (wanted as usize).clamp(min, max)
    }

    /// Check the settings describe a usable subdivision
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_segment_length.is_finite() && self.max_segment_length > 0.0) {
            return Err(format!(
                "Arc segment length must be > 0, got {}",
                self.max_segment_length
            ));
        }
        if self.min_segments == 0 {
            return Err("Arc min_segments must be > 0".to_string());
        }
        if self.max_segments < self.min_segments {
            return Err(format!(
                "Arc max_segments ({}) must not be below min_segments ({})",
                self.max_segments, self.min_segments
            ));
        }
        Ok(())
    }
}

/// How the arc center was programmed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcCenter {
    /// I/J/K offsets from the start point, projected onto the active plane
    Offset(f64, f64),
    /// R form; a negative radius selects the arc longer than a half circle
    Radius(f64),
}

/// A circular move in one plane, optionally helical along the plane normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcMove {
    pub start: Coordinate,
    pub end: Coordinate,
    pub plane: Plane,
    pub clockwise: bool,
    pub center: ArcCenter,
}

fn project(point: Coordinate, plane: Plane) -> DVec2 {
    let (first, second, _) = plane.axes();
    DVec2::new(point.get(first), point.get(second))
}

/// Center of an R-form arc. An R too small to reach the end point is
/// stretched to a half circle.
fn center_from_radius(start: DVec2, end: DVec2, radius: f64, clockwise: bool) -> Option<DVec2> {
    let chord = end - start;
    let chord_length = chord.length();
    if chord_length < MIN_RADIUS || !radius.is_finite() || radius.abs() < MIN_RADIUS {
        return None;
    }

    let mut h_squared = 4.0 * radius * radius - chord.length_squared();
    if h_squared < 0.0 {
        trace!(
            "Arc radius {:.4} cannot span chord {:.4}, using half circle",
            radius,
            chord_length
        );
        h_squared = 0.0;
    }

    let mut h_x2_div_d = -h_squared.sqrt() / chord_length;
    if !clockwise {
        h_x2_div_d = -h_x2_div_d;
    }
    if radius < 0.0 {
        h_x2_div_d = -h_x2_div_d;
    }

    Some(
        start
            + DVec2::new(
                0.5 * (chord.x - chord.y * h_x2_div_d),
                0.5 * (chord.y + chord.x * h_x2_div_d),
            ),
    )
}

impl ArcMove {
    /// Points after `start` along the arc; the last one is exactly `end`.
    ///
    /// A degenerate arc (no usable center or radius) yields just `[end]`.
    pub fn interpolate(&self, config: &ArcConfig) -> Vec<Coordinate> {
        let (first, second, normal) = self.plane.axes();
        let p0 = project(self.start, self.plane);
        let p1 = project(self.end, self.plane);

        let center = match self.center {
            ArcCenter::Offset(a, b) => p0 + DVec2::new(a, b),
            ArcCenter::Radius(r) => match center_from_radius(p0, p1, r, self.clockwise) {
                Some(center) => center,
                None => return vec![self.end],
            },
        };

        let r0 = p0 - center;
        let r1 = p1 - center;
        let radius = r0.length();
        if !radius.is_finite() || radius < MIN_RADIUS {
            trace!("Degenerate arc radius {:.6}, emitting straight segment", radius);
            return vec![self.end];
        }

        let mut sweep = r0.perp_dot(r1).atan2(r0.dot(r1));
        if self.clockwise {
            if sweep >= -ANGULAR_EPSILON {
                sweep -= TAU;
            }
        } else if sweep <= ANGULAR_EPSILON {
            sweep += TAU;
        }

        let count = config.segment_count(sweep, radius);
        let start_angle = r0.y.atan2(r0.x);
        let start_normal = self.start.get(normal);
        let rise = self.end.get(normal) - start_normal;

        let mut points = Vec::with_capacity(count);
        for step in 1..count {
            let t = step as f64 / count as f64;
            let angle = start_angle + sweep * t;
            let on_plane = center + DVec2::new(angle.cos(), angle.sin()) * radius;

            let mut point = self.start;
            point.set(first, on_plane.x);
            point.set(second, on_plane.y);
            point.set(normal, start_normal + rise * t);
            points.push(point);
        }
        points.push(self.end);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(start: Coordinate, end: Coordinate, clockwise: bool, center: ArcCenter) -> ArcMove {
        ArcMove {
            start,
            end,
            plane: Plane::Xy,
            clockwise,
            center,
        }
    }

    #[test]
    fn test_segment_count_bounds() {
        let config = ArcConfig::default();
        assert_eq!(config.segment_count(0.001, 0.001), 4);
        assert_eq!(config.segment_count(TAU, 1000.0), 360);
        // quarter circle of radius 10 is ~15.7mm, so 32 chords of <= 0.5mm
        assert_eq!(config.segment_count(TAU / 4.0, 10.0), 32);
    }

    #[test]
    fn test_config_validation() {
        assert!(ArcConfig::default().validate().is_ok());
        let bad = ArcConfig {
            max_segment_length: 0.0,
            ..ArcConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = ArcConfig {
            min_segments: 10,
            max_segments: 5,
            ..ArcConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_quarter_circle_clockwise() {
        let points = arc(
            Coordinate::new(0.0, 10.0, 0.0),
            Coordinate::new(10.0, 0.0, 0.0),
            true,
            ArcCenter::Offset(0.0, -10.0),
        )
        .interpolate(&ArcConfig::default());

        assert_eq!(points.len(), 32);
        assert_eq!(*points.last().unwrap(), Coordinate::new(10.0, 0.0, 0.0));
        for p in &points {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 10.0).abs() < 1e-9);
            assert!(p.x >= -1e-9 && p.y >= -1e-9, "left the first quadrant: {p}");
        }
    }

    #[test]
    fn test_full_circle_when_start_equals_end() {
        let start = Coordinate::new(5.0, 0.0, 0.0);
        let points = arc(start, start, false, ArcCenter::Offset(-5.0, 0.0))
            .interpolate(&ArcConfig::default());
        // circumference ~31.4mm
        assert_eq!(points.len(), 63);
        let min_x = points.iter().map(|p| p.x).fold(f64::MAX, f64::min);
        assert!((min_x + 5.0).abs() < 0.01);
    }

    #[test]
    fn test_radius_form_picks_short_and_long_arcs() {
        let start = Coordinate::ORIGIN;
        let end = Coordinate::new(10.0, 0.0, 0.0);

        let short = arc(start, end, true, ArcCenter::Radius(5.0)).interpolate(&ArcConfig::default());
        let max_y = short.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert!((max_y - 5.0).abs() < 0.05, "clockwise half circle goes over the top");

        let long = arc(start, end, true, ArcCenter::Radius(-10.0)).interpolate(&ArcConfig::default());
        let short_small = arc(start, end, true, ArcCenter::Radius(10.0)).interpolate(&ArcConfig::default());
        assert!(long.len() > short_small.len());
        assert_eq!(*long.last().unwrap(), end);
    }

    #[test]
    fn test_helical_rise_is_linear() {
        let points = arc(
            Coordinate::new(10.0, 0.0, 0.0),
            Coordinate::new(-10.0, 0.0, -4.0),
            false,
            ArcCenter::Offset(-10.0, 0.0),
        )
        .interpolate(&ArcConfig::default());
        let mid = points[points.len() / 2 - 1];
        assert!((mid.z + 2.0).abs() < 0.2);
        assert_eq!(points.last().unwrap().z, -4.0);
    }

    #[test]
    fn test_degenerate_arcs_collapse_to_end_point() {
        let end = Coordinate::new(3.0, 0.0, 0.0);
        let zero_radius = arc(Coordinate::ORIGIN, end, true, ArcCenter::Offset(0.0, 0.0));
        assert_eq!(zero_radius.interpolate(&ArcConfig::default()), vec![end]);

        let same_point = arc(end, end, true, ArcCenter::Radius(5.0));
        assert_eq!(same_point.interpolate(&ArcConfig::default()), vec![end]);
    }

    #[test]
    fn test_zx_plane_arc_stays_in_plane() {
        let points = ArcMove {
            start: Coordinate::new(0.0, 7.0, 10.0),
            end: Coordinate::new(10.0, 7.0, 0.0),
            plane: Plane::Zx,
            clockwise: false,
            center: ArcCenter::Offset(-10.0, 0.0),
        }
        .interpolate(&ArcConfig::default());
        for p in &points {
            assert_eq!(p.y, 7.0);
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 10.0).abs() < 1e-9);
        }
    }
}

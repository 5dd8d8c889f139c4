//! Data models for positions and axes
//!
//! This module provides:
//! - Three-axis coordinates shared by machine space and scene space
//! - Axis identifiers used by the G-code interpreter and the mapper

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Linear machine axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis (left/right)
    X,
    /// Y axis (front/back)
    Y,
    /// Z axis (up/down)
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Zero-based index of the axis (X=0, Y=1, Z=2)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis name as used in error messages and logs
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A point in 3D space, in millimeters
///
/// The same type carries machine-space and scene-space positions; which
/// one a value holds is determined by where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Coordinate {
    /// The origin (0, 0, 0)
    pub const ORIGIN: Coordinate = Coordinate {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a coordinate from its components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Read one axis
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Write one axis
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Euclidean distance to another coordinate
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// True when every component is within `tolerance` of `other`
    pub fn approx_eq(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Components as an array in X, Y, Z order
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Coordinate {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Coordinate {
    type Output = Coordinate;

    fn mul(self, rhs: f64) -> Coordinate {
        Coordinate::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Coordinate {
    type Output = Coordinate;

    fn neg(self) -> Coordinate {
        Coordinate::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3} Z:{:.3}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_access() {
        let mut c = Coordinate::new(1.0, 2.0, 3.0);
        assert_eq!(c.get(Axis::Y), 2.0);
        c.set(Axis::Z, -4.0);
        assert_eq!(c, Coordinate::new(1.0, 2.0, -4.0));
        assert_eq!(Axis::ALL.map(Axis::index), [0, 1, 2]);
    }

    #[test]
    fn test_arithmetic() {
        let a = Coordinate::new(1.0, 2.0, 3.0);
        let b = Coordinate::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Coordinate::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Coordinate::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, Coordinate::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Coordinate::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_distance_and_display() {
        let a = Coordinate::ORIGIN;
        let b = Coordinate::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert!(a.approx_eq(&Coordinate::new(1e-12, 0.0, -1e-12), 1e-9));
        assert_eq!(b.to_string(), "X:3.000 Y:4.000 Z:0.000");
    }
}

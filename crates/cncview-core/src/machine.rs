//! Machine envelope and homing configuration
//!
//! Both values are supplied by the settings store and are read-only to the
//! toolpath pipeline.

use crate::data::Axis;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical work envelope of the machine, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineLimits {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
}

impl Default for MachineLimits {
    fn default() -> Self {
        Self {
            xmin: 0.0,
            xmax: 200.0,
            ymin: 0.0,
            ymax: 200.0,
            zmin: -100.0,
            zmax: 0.0,
        }
    }
}

impl MachineLimits {
    /// Create validated limits; every axis must satisfy `min <= max`
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64, zmin: f64, zmax: f64) -> Result<Self> {
        let limits = Self {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Limits spanning `[0, x] x [0, y] x [-z, 0]`, the usual envelope of a
    /// machine that reports Z as a negative depth below the top
    pub fn from_travel(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::new(0.0, x, 0.0, y, -z, 0.0)
    }

    /// Check that every axis is finite and not inverted
    pub fn validate(&self) -> Result<()> {
        for axis in Axis::ALL {
            let (min, max) = self.range(axis);
            if !min.is_finite() || !max.is_finite() || max < min {
                return Err(Error::InvalidLimits {
                    axis: axis.name(),
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// `(min, max)` for one axis
    pub fn range(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.xmin, self.xmax),
            Axis::Y => (self.ymin, self.ymax),
            Axis::Z => (self.zmin, self.zmax),
        }
    }

    /// Travel length (`max - min`) of one axis
    pub fn size(&self, axis: Axis) -> f64 {
        let (min, max) = self.range(axis);
        max - min
    }

    pub fn size_x(&self) -> f64 {
        self.size(Axis::X)
    }

    pub fn size_y(&self) -> f64 {
        self.size(Axis::Y)
    }

    pub fn size_z(&self) -> f64 {
        self.size(Axis::Z)
    }
}

/// Which machine corner is home (machine origin at maximum Z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HomingCorner {
    #[default]
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl HomingCorner {
    /// All corners, in declaration order
    pub const ALL: [HomingCorner; 4] = [
        HomingCorner::FrontLeft,
        HomingCorner::FrontRight,
        HomingCorner::BackLeft,
        HomingCorner::BackRight,
    ];

    /// Home is on the right side, so machine X runs toward the left
    pub fn reflects_x(self) -> bool {
        matches!(self, Self::FrontRight | Self::BackRight)
    }

    /// Home is at the back, so machine Y runs toward the front
    pub fn reflects_y(self) -> bool {
        matches!(self, Self::BackLeft | Self::BackRight)
    }

    /// Settings-file name of the corner
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrontLeft => "front-left",
            Self::FrontRight => "front-right",
            Self::BackLeft => "back-left",
            Self::BackRight => "back-right",
        }
    }
}

impl fmt::Display for HomingCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomingCorner {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|corner| corner.as_str() == normalized)
            .ok_or_else(|| Error::UnknownHomingCorner(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_are_valid() {
        let limits = MachineLimits::default();
        assert!(limits.validate().is_ok());
        assert_eq!(limits.size_x(), 200.0);
        assert_eq!(limits.size_z(), 100.0);
    }

    #[test]
    fn test_inverted_axis_rejected() {
        let err = MachineLimits::new(0.0, 100.0, 50.0, 10.0, -10.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidLimits { axis: "Y", .. }));

        let err = MachineLimits::new(0.0, f64::NAN, 0.0, 1.0, 0.0, 1.0).unwrap_err();
        assert!(err.is_limits_error());
    }

    #[test]
    fn test_degenerate_axis_allowed() {
        let limits = MachineLimits::new(0.0, 0.0, 0.0, 10.0, 0.0, 0.0).unwrap();
        assert_eq!(limits.size_x(), 0.0);
    }

    #[test]
    fn test_from_travel() {
        let limits = MachineLimits::from_travel(300.0, 400.0, 80.0).unwrap();
        assert_eq!(limits.range(Axis::Z), (-80.0, 0.0));
        assert_eq!(limits.size_y(), 400.0);
    }

    #[test]
    fn test_corner_parsing() {
        assert_eq!(
            "back_right".parse::<HomingCorner>().unwrap(),
            HomingCorner::BackRight
        );
        assert_eq!(
            "Front Left".parse::<HomingCorner>().unwrap(),
            HomingCorner::FrontLeft
        );
        assert!(matches!(
            "middle".parse::<HomingCorner>(),
            Err(Error::UnknownHomingCorner(_))
        ));
    }

    #[test]
    fn test_corner_serde_names() {
        let json = serde_json::to_string(&HomingCorner::FrontRight).unwrap();
        assert_eq!(json, "\"front-right\"");
        let corner: HomingCorner = serde_json::from_str("\"back-left\"").unwrap();
        assert_eq!(corner, HomingCorner::BackLeft);
    }

    #[test]
    fn test_corner_reflections() {
        assert!(!HomingCorner::FrontLeft.reflects_x());
        assert!(!HomingCorner::FrontLeft.reflects_y());
        assert!(HomingCorner::FrontRight.reflects_x());
        assert!(HomingCorner::BackLeft.reflects_y());
        assert!(HomingCorner::BackRight.reflects_x() && HomingCorner::BackRight.reflects_y());
    }
}

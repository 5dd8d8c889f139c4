//! Toolpath extents.

use cncview_core::Coordinate;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box accumulated while tessellating.
///
/// Starts empty (min above max) and becomes valid after the first update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min: Coordinate::new(f64::MAX, f64::MAX, f64::MAX),
            max: Coordinate::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    pub fn update(&mut self, point: Coordinate) {
        self.min.x = self.min.x.min(point.x);
        self.max.x = self.max.x.max(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.y = self.max.y.max(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            // Z might be single plane (min_z == max_z) which is valid
            && self.min.z <= self.max.z
    }

    /// Extent per axis, zero when empty
    pub fn size(&self) -> Coordinate {
        if !self.is_valid() {
            return Coordinate::ORIGIN;
        }
        self.max - self.min
    }

    pub fn center(&self) -> Option<Coordinate> {
        self.is_valid().then(|| (self.min + self.max) * 0.5)
    }

    /// Same box moved by `offset`
    pub fn translated(&self, offset: Coordinate) -> Bounds {
        if !self.is_valid() {
            return *self;
        }
        Bounds {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

//! Machine space to scene space mapping
//!
//! Scene space has its origin at the front-left-lowest corner of the work
//! envelope. Per axis the transform either passes the machine value through
//! or reflects it (`size - value`), depending on which corner is home. Z is
//! always homed at the top: machine Z counts down from 0, so
//! `scene_z = size_z + machine_z`.
//!
//! The transform never clamps. Positions outside the envelope (over-travel,
//! un-homed machines) map to scene positions outside `[0, size]`.

use crate::data::Coordinate;
use crate::machine::{HomingCorner, MachineLimits};

/// Per-axis transform selected by the homing corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisTransform {
    /// `scene = machine`
    PassThrough,
    /// `scene = size - machine`
    Reflect,
    /// `scene = size + machine`
    OffsetBySize,
}

impl AxisTransform {
    fn forward(self, value: f64, size: f64) -> f64 {
        match self {
            Self::PassThrough => value,
            Self::Reflect => size - value,
            Self::OffsetBySize => size + value,
        }
    }

    fn inverse(self, value: f64, size: f64) -> f64 {
        match self {
            Self::PassThrough => value,
            Self::Reflect => size - value,
            Self::OffsetBySize => value - size,
        }
    }
}

/// Transforms for X, Y and Z under the given homing corner
pub fn axis_transforms(corner: HomingCorner) -> [AxisTransform; 3] {
    let planar = |reflect: bool| {
        if reflect {
            AxisTransform::Reflect
        } else {
            AxisTransform::PassThrough
        }
    };
    [
        planar(corner.reflects_x()),
        planar(corner.reflects_y()),
        AxisTransform::OffsetBySize,
    ]
}

/// Convert a machine-space coordinate into scene space
pub fn machine_to_scene(
    coord: Coordinate,
    limits: &MachineLimits,
    corner: HomingCorner,
) -> Coordinate {
    let [tx, ty, tz] = axis_transforms(corner);
    Coordinate::new(
        tx.forward(coord.x, limits.size_x()),
        ty.forward(coord.y, limits.size_y()),
        tz.forward(coord.z, limits.size_z()),
    )
}

/// Convert a scene-space coordinate back into machine space
pub fn scene_to_machine(
    coord: Coordinate,
    limits: &MachineLimits,
    corner: HomingCorner,
) -> Coordinate {
    let [tx, ty, tz] = axis_transforms(corner);
    Coordinate::new(
        tx.inverse(coord.x, limits.size_x()),
        ty.inverse(coord.y, limits.size_y()),
        tz.inverse(coord.z, limits.size_z()),
    )
}

/// Limits and homing corner bundled for repeated mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    limits: MachineLimits,
    corner: HomingCorner,
}

impl CoordinateMapper {
    pub fn new(limits: MachineLimits, corner: HomingCorner) -> Self {
        Self { limits, corner }
    }

    pub fn limits(&self) -> &MachineLimits {
        &self.limits
    }

    pub fn corner(&self) -> HomingCorner {
        self.corner
    }

    /// Machine space to scene space
    pub fn to_scene(&self, coord: Coordinate) -> Coordinate {
        machine_to_scene(coord, &self.limits, self.corner)
    }

    /// Scene space to machine space
    pub fn to_machine(&self, coord: Coordinate) -> Coordinate {
        scene_to_machine(coord, &self.limits, self.corner)
    }

    /// Map a flat `[x, y, z, x, y, z, ...]` buffer into scene space.
    ///
    /// A trailing partial triple is copied through unchanged.
    pub fn map_positions(&self, positions: &[f32]) -> Vec<f32> {
        let mut out = Vec::with_capacity(positions.len());
        let mut chunks = positions.chunks_exact(3);
        for chunk in chunks.by_ref() {
            let scene = self.to_scene(Coordinate::new(
                chunk[0] as f64,
                chunk[1] as f64,
                chunk[2] as f64,
            ));
            out.extend_from_slice(&[scene.x as f32, scene.y as f32, scene.z as f32]);
        }
        out.extend_from_slice(chunks.remainder());
        out
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(MachineLimits::default(), HomingCorner::default())
    }
}

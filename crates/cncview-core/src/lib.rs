//! # CNCView Core
//!
//! Core types and utilities for CNCView.
//! Provides the machine envelope, homing configuration, unit handling and
//! the mapping from machine coordinates into the 3D scene.

pub mod data;
pub mod error;
pub mod machine;
pub mod mapping;
pub mod types;
pub mod units;

pub use data::{Axis, Coordinate};

pub use error::{Error, Result};

pub use machine::{HomingCorner, MachineLimits};

pub use mapping::{
    axis_transforms, machine_to_scene, scene_to_machine, AxisTransform, CoordinateMapper,
};

pub use units::{Units, MM_PER_INCH};

// Re-export type aliases for convenience
pub use types::{thread_safe_rw, ThreadSafeRw};

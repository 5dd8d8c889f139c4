//! Modal state of the virtual machine simulated during tessellation
//!
//! Modal groups persist from line to line until another word in the same
//! group replaces them. A fresh `MotionState` is created for every
//! tessellation pass, so independent programs never share state.

use cncview_core::{Axis, Coordinate, Units};
use serde::{Deserialize, Serialize};

/// Active plane for circular interpolation (G17/G18/G19)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Plane {
    /// G17
    #[default]
    Xy,
    /// G18
    Zx,
    /// G19
    Yz,
}

impl Plane {
    /// `(first, second, normal)` axes. Arc direction is judged looking down
    /// the normal axis from its positive end.
    pub fn axes(self) -> (Axis, Axis, Axis) {
        match self {
            Plane::Xy => (Axis::X, Axis::Y, Axis::Z),
            Plane::Zx => (Axis::Z, Axis::X, Axis::Y),
            Plane::Yz => (Axis::Y, Axis::Z, Axis::X),
        }
    }

    pub fn gcode(self) -> &'static str {
        match self {
            Plane::Xy => "G17",
            Plane::Zx => "G18",
            Plane::Yz => "G19",
        }
    }
}

/// Motion mode - Group 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionMode {
    /// G0
    #[default]
    Rapid,
    /// G1
    Linear,
    /// G2
    ClockwiseArc,
    /// G3
    CounterClockwiseArc,
    /// G80: bare axis words produce no motion
    Cancelled,
}

impl MotionMode {
    pub fn is_arc(self) -> bool {
        matches!(self, Self::ClockwiseArc | Self::CounterClockwiseArc)
    }
}

/// Distance mode - Group 3 (G90/G91)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMode {
    #[default]
    Absolute,
    Relative,
}

/// Axis values for one line, already converted to millimeters
pub type AxisWords = [Option<f64>; 3];

/// The simulated machine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionState {
    /// Current position in millimeters, G92 offset included
    pub position: Coordinate,
    pub plane: Plane,
    pub units: Units,
    pub motion: MotionMode,
    pub distance: DistanceMode,
    /// G92 offset added to every absolute program coordinate
    pub offset: Coordinate,
    /// Last F word, in program units per minute
    pub feed_rate: f64,
    /// Last S word
    pub spindle_speed: f64,
    /// Last T word
    pub tool: u32,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position as the program sees it, with the G92 offset removed
    pub fn program_position(&self) -> Coordinate {
        self.position - self.offset
    }

    /// Resolve the end point of a move from the axis words on a line.
    ///
    /// Absent axes keep their value under G90 and move by zero under G91.
    /// `machine_coordinates` (G53) bypasses the G92 offset.
    pub fn resolve_target(&self, words: &AxisWords, machine_coordinates: bool) -> Coordinate {
        let mut target = self.position;
        for axis in Axis::ALL {
            let Some(value) = words[axis.index()] else {
                continue;
            };
            let resolved = match self.distance {
                DistanceMode::Absolute if machine_coordinates => value,
                DistanceMode::Absolute => value + self.offset.get(axis),
                DistanceMode::Relative => self.position.get(axis) + value,
            };
            target.set(axis, resolved);
        }
        target
    }

    /// G92: make the current position read as the given program values
    pub fn set_offset(&mut self, words: &AxisWords) {
        for axis in Axis::ALL {
            if let Some(value) = words[axis.index()] {
                self.offset.set(axis, self.position.get(axis) - value);
            }
        }
    }

    /// G92.1: drop the offset
    pub fn clear_offset(&mut self) {
        self.offset = Coordinate::ORIGIN;
    }
}

//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm) and Imperial (inch) program units.
//! The render pipeline always works in millimeters; programs written under
//! G20 are scaled on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Program units (G20/G21)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimeters (G21)
    #[default]
    Millimeters,
    /// Inches (G20)
    Inches,
}

impl Units {
    /// Factor that converts a value in these units to millimeters
    pub fn mm_scale(self) -> f64 {
        match self {
            Self::Millimeters => 1.0,
            Self::Inches => MM_PER_INCH,
        }
    }

    /// Convert a value in these units to millimeters
    pub fn to_mm(self, value: f64) -> f64 {
        value * self.mm_scale()
    }

    /// The G-code word that selects these units
    pub fn gcode(self) -> &'static str {
        match self {
            Self::Millimeters => "G21",
            Self::Inches => "G20",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "mm"),
            Self::Inches => write!(f, "in"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeters" | "metric" | "g21" => Ok(Self::Millimeters),
            "in" | "inch" | "inches" | "imperial" | "g20" => Ok(Self::Inches),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

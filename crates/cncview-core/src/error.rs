//! Error handling for CNCView
//!
//! The toolpath pipeline itself is infallible: malformed G-code is recovered
//! locally and never surfaces as an error. The errors here cover the
//! externally supplied inputs the core validates on construction:
//! - Machine limits (an axis whose max is below its min, or a bound that is not finite)
//! - Homing corner names coming from settings files
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for CNCView core
#[derive(Error, Debug)]
pub enum Error {
    /// Machine limits are inverted or not finite on one axis
    #[error("Invalid limits on {axis} axis: min {min} and max {max} must be finite with min <= max")]
    InvalidLimits {
        /// Axis name ("X", "Y" or "Z").
        axis: &'static str,
        /// The configured minimum.
        min: f64,
        /// The configured maximum.
        max: f64,
    },

    /// Homing corner name could not be parsed
    #[error("Unknown homing corner: {0}")]
    UnknownHomingCorner(String),
}

impl Error {
    /// Check if this is a machine limits error
    pub fn is_limits_error(&self) -> bool {
        matches!(self, Error::InvalidLimits { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

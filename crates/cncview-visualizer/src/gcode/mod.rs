//! G-code interpretation
//!
//! This module provides:
//! - Word lexing with comment stripping
//! - Modal state tracking (motion, plane, units, distance mode, G92 offset)
//! - Arc interpolation
//! - The tessellator producing segments and progress frames

pub mod arc;
pub mod state;
pub mod tessellator;
pub mod words;

pub use arc::{ArcCenter, ArcConfig, ArcMove};
pub use state::{AxisWords, DistanceMode, MotionMode, MotionState, Plane};
pub use tessellator::{
    tessellate, Frame, MoveType, Segment, Tessellation, TessellationStats, Tessellator,
};
pub use words::{is_blank, parse_words, strip_comments, Word};

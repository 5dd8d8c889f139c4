//! Render-side half of the pipeline
//!
//! This module provides:
//! - Geometry building (segments to flat position/color buffers)
//! - Progress recoloring of executed lines
//! - The assembled `Toolpath` and its versioned cache
//! - Toolpath bounds

pub mod geometry;
pub mod progress;
pub mod toolpath;
pub mod toolpath_cache;
pub mod viewport;

pub use geometry::{build_buffers, ColorPalette, GeometryBuilder, RenderBuffers, Rgb};
pub use progress::processed_vertices;
pub use toolpath::{process_gcode, Toolpath, ToolpathOptions};
pub use toolpath_cache::{CacheUpdate, SharedToolpathCache, ToolpathCache};
pub use viewport::Bounds;

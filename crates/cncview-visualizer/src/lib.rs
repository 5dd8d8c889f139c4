//! # CNCView Visualizer
//!
//! G-code toolpath tessellation, render buffer construction and progress
//! recoloring for CNCView.

pub mod gcode;
pub mod visualizer;

pub use gcode::{
    tessellate, ArcConfig, Frame, MotionState, MoveType, Segment, Tessellation,
    TessellationStats, Tessellator,
};

pub use visualizer::{
    build_buffers, process_gcode, processed_vertices, Bounds, CacheUpdate, ColorPalette,
    GeometryBuilder, RenderBuffers, Rgb, SharedToolpathCache, Toolpath, ToolpathCache,
    ToolpathOptions,
};

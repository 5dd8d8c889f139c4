//! # CNCView
//!
//! G-code toolpath visualization core for web CNC controller front-ends:
//! - Lenient G-code tessellation into line segments, arcs included
//! - Machine space to scene space mapping for any homing corner
//! - Flat position/color buffers ready for GPU upload
//! - Progress recoloring driven by a "lines processed" counter
//!
//! ## Architecture
//!
//! CNCView is organized as a workspace with multiple crates:
//!
//! 1. **cncview-core** - Coordinates, machine limits, homing corner, mapping
//! 2. **cncview-visualizer** - Tessellator, geometry builder, progress, cache
//! 3. **cncview-settings** - Configuration files and validation
//! 4. **cncview** - Logging setup and the `cncview` preview binary

pub mod preview;

pub use cncview_core::{
    machine_to_scene, scene_to_machine, Coordinate, CoordinateMapper, Error, HomingCorner,
    MachineLimits, Result, Units,
};

pub use cncview_visualizer::{
    build_buffers, process_gcode, tessellate, ArcConfig, Bounds, CacheUpdate, ColorPalette,
    Frame, MoveType, RenderBuffers, Segment, SharedToolpathCache, Tessellation,
    TessellationStats, Toolpath, ToolpathCache, ToolpathOptions,
};

pub use cncview_settings::{Config, MachineSettings, SettingsError, VisualizerSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

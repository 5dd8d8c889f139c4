//! Headless preview: process one file and report what a renderer would get

use anyhow::Context;
use clap::Parser;
use cncview_core::{Coordinate, Units};
use cncview_settings::Config;
use cncview_visualizer::gcode::Plane;
use cncview_visualizer::{process_gcode, Bounds, TessellationStats};
use std::path::PathBuf;
use tracing::{debug, info};

/// Command line of the `cncview` binary
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "cncview")]
#[command(about = "Tessellate a G-code program and report what a renderer would draw")]
#[command(version)]
pub struct PreviewArgs {
    /// G-code program to preview
    pub gcode: PathBuf,

    /// Lines already executed by the machine; clamped to the program length
    #[arg(default_value_t = 0, allow_negative_numbers = true)]
    pub processed_lines: i64,

    /// Settings file (JSON or TOML); the platform default is used when absent
    #[arg(short, long, help = "Path to a cncview config file")]
    pub config: Option<PathBuf>,
}

/// What the preview found
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSummary {
    pub stats: TessellationStats,
    pub vertices: usize,
    pub processed_vertices: usize,
    pub bounds: Bounds,
    pub final_machine: Coordinate,
    pub final_scene: Coordinate,
    pub final_units: Units,
    pub final_plane: Plane,
}

impl PreviewSummary {
    pub fn log(&self) {
        info!(
            "{} lines, {} segments (rapid={}, feed={}, arc={})",
            self.stats.lines,
            self.stats.segments(),
            self.stats.rapid_segments,
            self.stats.feed_segments,
            self.stats.arc_segments
        );
        if self.stats.malformed_words > 0 || self.stats.unsupported_codes > 0 {
            info!(
                "Skipped {} malformed words and {} unsupported codes",
                self.stats.malformed_words, self.stats.unsupported_codes
            );
        }
        if self.bounds.is_valid() {
            info!("Bounds: {} .. {}", self.bounds.min, self.bounds.max);
        }
        info!(
            "Travel: {:.1} mm rapid, {:.1} mm cutting",
            self.stats.rapid_distance, self.stats.cutting_distance
        );
        info!(
            "Final position: machine {} / scene {}",
            self.final_machine, self.final_scene
        );
        info!(
            "Final modes: {} {}",
            self.final_units.gcode(),
            self.final_plane.gcode()
        );
        info!(
            "Processed vertices: {} of {}",
            self.processed_vertices, self.vertices
        );
    }
}

fn load_config(args: &PreviewArgs) -> anyhow::Result<Config> {
    if let Some(path) = &args.config {
        return Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    match Config::default_path() {
        Ok(path) => Config::load_or_default(&path)
            .with_context(|| format!("loading config {}", path.display())),
        Err(err) => {
            debug!("{}, using default config", err);
            Ok(Config::default())
        }
    }
}

/// Load config and program, build the toolpath and apply progress
pub fn run(args: &PreviewArgs) -> anyhow::Result<PreviewSummary> {
    let config = load_config(args)?;
    let text = std::fs::read_to_string(&args.gcode)
        .with_context(|| format!("reading {}", args.gcode.display()))?;

    let mut toolpath = process_gcode(&text, &config.toolpath_options());
    toolpath.apply_progress(args.processed_lines);

    let final_machine = toolpath.final_position();
    let modes = toolpath.final_state();
    Ok(PreviewSummary {
        stats: *toolpath.stats(),
        vertices: toolpath.buffers().vertex_count(),
        processed_vertices: toolpath.buffers().painted_vertices(),
        bounds: toolpath.bounds(),
        final_machine,
        final_scene: config.mapper().to_scene(final_machine),
        final_units: modes.units,
        final_plane: modes.plane,
    })
}

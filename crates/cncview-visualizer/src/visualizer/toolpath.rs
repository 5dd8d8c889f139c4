//! Toolpath pipeline
//!
//! `process_gcode` runs text through the tessellator and the geometry
//! builder and packages the result. A [`Toolpath`] is rebuilt wholesale when
//! the text changes; the offset and the processed-line count can change
//! without re-tessellating.

use super::geometry::{ColorPalette, GeometryBuilder, RenderBuffers};
use super::viewport::Bounds;
use crate::gcode::{
    ArcConfig, Frame, MotionState, Segment, Tessellation, TessellationStats, Tessellator,
};
use cncview_core::{Coordinate, CoordinateMapper};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Knobs that change the geometry a program produces
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathOptions {
    pub palette: ColorPalette,
    pub arcs: ArcConfig,
}

/// A tessellated program ready for rendering.
///
/// Segments, frames and positions are shared between clones. Each clone
/// owns its own color buffer, so a render thread can take a clone and drive
/// progress on it without affecting anyone else.
#[derive(Debug, Clone)]
pub struct Toolpath {
    segments: Arc<[Segment]>,
    frames: Arc<[Frame]>,
    /// Buffers at zero offset
    base: RenderBuffers,
    buffers: RenderBuffers,
    stats: TessellationStats,
    bounds: Bounds,
    final_state: MotionState,
    offset: Coordinate,
    processed_lines: i64,
}

impl Default for Toolpath {
    fn default() -> Self {
        Self::from_tessellation(Tessellation::default(), &ToolpathOptions::default())
    }
}

impl Toolpath {
    pub fn from_tessellation(tessellation: Tessellation, options: &ToolpathOptions) -> Self {
        let buffers = GeometryBuilder::new(options.palette).build(&tessellation.segments);
        Self {
            segments: Arc::from(tessellation.segments),
            frames: Arc::from(tessellation.frames),
            base: buffers.clone(),
            buffers,
            stats: tessellation.stats,
            bounds: tessellation.bounds,
            final_state: tessellation.final_state,
            offset: Coordinate::ORIGIN,
            processed_lines: 0,
        }
    }

    /// Segments in machine space, without the offset
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Buffers with the current offset and progress applied
    pub fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    pub fn stats(&self) -> &TessellationStats {
        &self.stats
    }

    /// Extents of the drawn path, offset included
    pub fn bounds(&self) -> Bounds {
        self.bounds.translated(self.offset)
    }

    /// Where the program leaves the tool, offset included
    pub fn final_position(&self) -> Coordinate {
        self.final_state.position + self.offset
    }

    /// Modal state after the last line, in machine space without the offset
    pub fn final_state(&self) -> &MotionState {
        &self.final_state
    }

    pub fn offset(&self) -> Coordinate {
        self.offset
    }

    pub fn processed_lines(&self) -> i64 {
        self.processed_lines
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Move the whole path. Offsets do not accumulate: each call positions
    /// the path relative to its untranslated geometry. Progress is kept.
    pub fn set_offset(&mut self, offset: Coordinate) {
        if offset == self.offset {
            return;
        }
        debug!("Applying toolpath offset {}", offset);
        self.buffers = if offset == Coordinate::ORIGIN {
            self.base.clone()
        } else {
            self.base.apply_offset(offset)
        };
        self.offset = offset;
        self.buffers.apply_progress(&self.frames, self.processed_lines);
    }

    /// Builder form of [`Toolpath::set_offset`]
    pub fn with_offset(mut self, offset: Coordinate) -> Self {
        self.set_offset(offset);
        self
    }

    /// Recolor for the given number of executed lines
    pub fn apply_progress(&mut self, processed_lines: i64) {
        self.buffers.apply_progress(&self.frames, processed_lines);
        self.processed_lines = processed_lines;
    }

    /// Current buffers mapped into scene space
    pub fn scene_buffers(&self, mapper: &CoordinateMapper) -> RenderBuffers {
        self.buffers.to_scene(mapper)
    }
}

/// Tessellate `text` and build its render buffers
pub fn process_gcode(text: &str, options: &ToolpathOptions) -> Toolpath {
    let tessellation = Tessellator::new(options.arcs).tessellate(text);
    let toolpath = Toolpath::from_tessellation(tessellation, options);
    debug!(
        "Processed toolpath: {} frames, {} vertices",
        toolpath.frames.len(),
        toolpath.buffers.vertex_count()
    );
    toolpath
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: &str = "G0 X0 Y0\nG1 X10\nG1 Y10\n";

    #[test]
    fn test_process_gcode() {
        let toolpath = process_gcode(PROGRAM, &ToolpathOptions::default());
        assert_eq!(toolpath.segments().len(), 3);
        assert_eq!(toolpath.frames().len(), 3);
        assert_eq!(toolpath.buffers().vertex_count(), 6);
        assert_eq!(toolpath.final_position(), Coordinate::new(10.0, 10.0, 0.0));
        assert_eq!(toolpath.bounds().max, Coordinate::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn test_final_state_keeps_modal_groups() {
        let toolpath = process_gcode("G20 G18\nG1 X1 F10\n", &ToolpathOptions::default());
        let state = toolpath.final_state();
        assert_eq!(state.units.gcode(), "G20");
        assert_eq!(state.plane.gcode(), "G18");
        assert_eq!(state.position.x, 25.4);
        assert_eq!(toolpath.final_position(), state.position);
    }

    #[test]
    fn test_offset_is_relative_to_untranslated_geometry() {
        let mut toolpath = process_gcode(PROGRAM, &ToolpathOptions::default());
        toolpath.set_offset(Coordinate::new(5.0, 0.0, 0.0));
        toolpath.set_offset(Coordinate::new(5.0, 1.0, 0.0));
        assert_eq!(toolpath.buffers().positions()[0..3], [5.0, 1.0, 0.0]);
        assert_eq!(toolpath.final_position(), Coordinate::new(15.0, 11.0, 0.0));
        assert_eq!(toolpath.segments()[0].from, Coordinate::ORIGIN);

        toolpath.set_offset(Coordinate::ORIGIN);
        assert_eq!(toolpath.buffers().positions()[0..3], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_progress_survives_offset_change() {
        let mut toolpath = process_gcode(PROGRAM, &ToolpathOptions::default());
        toolpath.apply_progress(2);
        let before = toolpath.buffers().colors().to_vec();
        toolpath.set_offset(Coordinate::new(1.0, 1.0, 1.0));
        assert_eq!(toolpath.buffers().colors(), &before[..]);
        assert_eq!(toolpath.buffers().painted_vertices(), 4);
    }

    #[test]
    fn test_clones_have_independent_colors() {
        let shared = process_gcode(PROGRAM, &ToolpathOptions::default());
        let mut mine = shared.clone();
        mine.apply_progress(3);
        assert_eq!(shared.buffers().colors(), shared.buffers().original_colors());
        assert_ne!(mine.buffers().colors(), shared.buffers().colors());
        assert_eq!(mine.buffers().positions(), shared.buffers().positions());
    }
}

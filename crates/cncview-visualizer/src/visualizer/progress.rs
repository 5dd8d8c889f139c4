//! Progress recoloring
//!
//! Executed lines are painted in the processed color as a prefix of the
//! vertex buffer. The buffers remember how many vertices are currently
//! painted, so each update only touches the vertices between the old and
//! the new prefix end. Vertices past the prefix always hold their original
//! color, which makes the result identical to resetting from the original
//! colors and repainting from scratch.

use super::geometry::RenderBuffers;
use crate::gcode::Frame;
use tracing::trace;

/// Number of vertices covered by the first `processed_lines` frames.
///
/// `processed_lines` is clamped to `[0, frames.len()]`.
pub fn processed_vertices(frames: &[Frame], processed_lines: i64, vertex_count: usize) -> usize {
    let lines = processed_lines.clamp(0, frames.len() as i64) as usize;
    let end = if lines == 0 {
        0
    } else {
        frames
            .get(lines)
            .map_or(vertex_count, |next| next.vertex_index)
    };
    end.min(vertex_count)
}

impl RenderBuffers {
    /// Recolor so that exactly the vertices of the first `processed_lines`
    /// frames carry the processed color. Any count is accepted, including
    /// negative values and values past the end, and updates need not be
    /// monotonic.
    pub fn apply_progress(&mut self, frames: &[Frame], processed_lines: i64) {
        let target = processed_vertices(frames, processed_lines, self.vertex_count());
        let painted = self.painted_vertices;

        if target > painted {
            let color = self.processed_color;
            for vertex in self.colors[painted * 3..target * 3].chunks_exact_mut(3) {
                vertex.copy_from_slice(&color);
            }
        } else if target < painted {
            self.colors[target * 3..painted * 3]
                .copy_from_slice(&self.original_colors[target * 3..painted * 3]);
        }

        if target != painted {
            trace!(
                "Progress: {} lines processed, painted vertices {} -> {}",
                processed_lines,
                painted,
                target
            );
        }
        self.painted_vertices = target;
    }

    /// Restore every vertex to its original color
    pub fn reset_progress(&mut self) {
        let painted = self.painted_vertices;
        self.colors[..painted * 3].copy_from_slice(&self.original_colors[..painted * 3]);
        self.painted_vertices = 0;
    }

    /// Vertices currently painted in the processed color
    pub fn painted_vertices(&self) -> usize {
        self.painted_vertices
    }
}

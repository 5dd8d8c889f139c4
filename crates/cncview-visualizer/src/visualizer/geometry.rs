//! Flat vertex and color buffers for line rendering
//!
//! Every segment becomes two consecutive vertices. Positions are immutable
//! once built and shared between clones; colors belong to whoever holds the
//! `RenderBuffers` value and are the only thing progress updates touch.

use crate::gcode::{MoveType, Segment};
use cncview_core::{Coordinate, CoordinateMapper};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// RGB triple, each channel in `[0, 1]`
pub type Rgb = [f32; 3];

/// Colors for each move type and for executed path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    pub rapid: Rgb,
    pub feed: Rgb,
    pub arc: Rgb,
    pub processed: Rgb,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            rapid: [0.5, 0.5, 0.5],
            feed: [0.35, 0.7, 1.0],
            arc: [0.3, 0.9, 0.4],
            processed: [1.0, 0.0, 0.0],
        }
    }
}

impl ColorPalette {
    pub fn color_for(&self, move_type: MoveType) -> Rgb {
        match move_type {
            MoveType::Rapid => self.rapid,
            MoveType::Feed => self.feed,
            MoveType::Arc => self.arc,
        }
    }

    /// Every channel must be a finite value in `[0, 1]`
    pub fn validate(&self) -> Result<(), String> {
        let entries = [
            ("rapid", self.rapid),
            ("feed", self.feed),
            ("arc", self.arc),
            ("processed", self.processed),
        ];
        for (name, color) in entries {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(format!(
                    "Palette color '{}' has a channel outside [0, 1]: {:?}",
                    name, color
                ));
            }
        }
        Ok(())
    }
}

/// Position and color buffers for a tessellated program
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffers {
    pub(crate) positions: Arc<[f32]>,
    pub(crate) original_colors: Arc<[f32]>,
    pub(crate) colors: Vec<f32>,
    pub(crate) processed_color: Rgb,
    /// Vertices currently painted in `processed_color`, always a prefix
    pub(crate) painted_vertices: usize,
}

impl Default for RenderBuffers {
    fn default() -> Self {
        Self {
            positions: Arc::from(Vec::new()),
            original_colors: Arc::from(Vec::new()),
            colors: Vec::new(),
            processed_color: ColorPalette::default().processed,
            painted_vertices: 0,
        }
    }
}

impl RenderBuffers {
    /// Flat `[x, y, z, ...]` positions, 3 floats per vertex
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat `[r, g, b, ...]` colors, 3 floats per vertex
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Colors as built, before any progress was applied
    pub fn original_colors(&self) -> &[f32] {
        &self.original_colors
    }

    pub fn processed_color(&self) -> Rgb {
        self.processed_color
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn segment_count(&self) -> usize {
        self.vertex_count() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions as raw bytes for GPU upload
    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as raw bytes for GPU upload
    pub fn colors_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Position of one vertex
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.positions
            .get(index * 3..index * 3 + 3)
            .map(Vec3::from_slice)
    }

    /// A copy with every position moved by `offset`. Colors and progress
    /// carry over; `self` is left untouched for later re-offsetting.
    pub fn apply_offset(&self, offset: Coordinate) -> RenderBuffers {
        let delta = Vec3::new(offset.x as f32, offset.y as f32, offset.z as f32);
        let positions: Vec<f32> = self
            .positions
            .chunks_exact(3)
            .flat_map(|chunk| (Vec3::from_slice(chunk) + delta).to_array())
            .collect();
        self.with_positions(positions)
    }

    /// A copy with positions mapped from machine space into scene space
    pub fn to_scene(&self, mapper: &CoordinateMapper) -> RenderBuffers {
        self.with_positions(mapper.map_positions(&self.positions))
    }

    fn with_positions(&self, positions: Vec<f32>) -> RenderBuffers {
        RenderBuffers {
            positions: Arc::from(positions),
            original_colors: Arc::clone(&self.original_colors),
            colors: self.colors.clone(),
            processed_color: self.processed_color,
            painted_vertices: self.painted_vertices,
        }
    }
}

/// Turns segments into [`RenderBuffers`]
#[derive(Debug, Clone, Default)]
pub struct GeometryBuilder {
    palette: ColorPalette,
}

impl GeometryBuilder {
    pub fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Two vertices per segment, in segment order
    pub fn build(&self, segments: &[Segment]) -> RenderBuffers {
        let floats = segments.len() * 6;
        let mut positions = Vec::with_capacity(floats);
        let mut colors = Vec::with_capacity(floats);

        for segment in segments {
            let color = self.palette.color_for(segment.move_type);
            for point in [segment.from, segment.to] {
                positions.extend_from_slice(&[point.x as f32, point.y as f32, point.z as f32]);
                colors.extend_from_slice(&color);
            }
        }

        debug!(
            "Built render buffers: {} segments, {} vertices",
            segments.len(),
            positions.len() / 3
        );

        RenderBuffers {
            positions: Arc::from(positions),
            original_colors: Arc::from(colors.clone()),
            colors,
            processed_color: self.palette.processed,
            painted_vertices: 0,
        }
    }
}

/// Build buffers with the default palette
pub fn build_buffers(segments: &[Segment]) -> RenderBuffers {
    GeometryBuilder::default().build(segments)
}

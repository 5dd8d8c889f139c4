//! G-code tessellator
//!
//! Walks a program line by line through a [`MotionState`] and emits the
//! straight segments a line renderer needs, plus one [`Frame`] per
//! executable line mapping "lines executed" to "vertices drawn".
//!
//! Nothing here fails. Malformed numbers drop just their word, unknown
//! codes drop nothing but their own meaning, and every non-blank line still
//! takes a frame slot so progress indices stay aligned with what the
//! machine is sent.

use super::arc::{ArcCenter, ArcConfig, ArcMove};
use super::state::{AxisWords, DistanceMode, MotionMode, MotionState, Plane};
use super::words::{is_blank, parse_words, strip_comments, Word};
use crate::visualizer::viewport::Bounds;
use cncview_core::{Axis, Coordinate, Units};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How a segment was produced, used to pick its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    /// G0
    Rapid,
    /// G1
    Feed,
    /// G2/G3, one entry per sub-segment
    Arc,
}

/// A straight piece of toolpath in machine space (millimeters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Coordinate,
    pub to: Coordinate,
    pub move_type: MoveType,
    /// Zero-based index of the source line that produced the segment
    pub source_line_index: usize,
}

impl Segment {
    pub fn length(&self) -> f64 {
        self.from.distance_to(&self.to)
    }
}

/// Progress index entry: executing this line starts at `vertex_index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Zero-based index of the line in the original text, blank lines included
    pub source_line_index: usize,
    /// Number of vertices emitted before this line
    pub vertex_index: usize,
}

/// Counters gathered while tessellating
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TessellationStats {
    /// Executable lines, equal to the number of frames
    pub lines: usize,
    /// Lines empty after comment stripping
    pub blank_lines: usize,
    pub rapid_segments: usize,
    pub feed_segments: usize,
    pub arc_segments: usize,
    /// Words whose numeric value could not be parsed
    pub malformed_words: usize,
    /// G codes with no meaning to the tessellator
    pub unsupported_codes: usize,
    /// Total rapid travel in millimeters
    pub rapid_distance: f64,
    /// Total feed and arc travel in millimeters
    pub cutting_distance: f64,
}

impl TessellationStats {
    pub fn segments(&self) -> usize {
        self.rapid_segments + self.feed_segments + self.arc_segments
    }
}

/// Result of one tessellation pass
#[derive(Debug, Clone, Default)]
pub struct Tessellation {
    pub segments: Vec<Segment>,
    pub frames: Vec<Frame>,
    pub stats: TessellationStats,
    /// Machine-space bounds of every emitted vertex
    pub bounds: Bounds,
    /// Modal state after the last line
    pub final_state: MotionState,
}

impl Tessellation {
    pub fn vertex_count(&self) -> usize {
        self.segments.len() * 2
    }
}

/// Words of one line, sorted into what the interpreter needs
#[derive(Debug, Default)]
struct LineWords {
    /// Raw X/Y/Z values in program units
    axes: [Option<f64>; 3],
    /// Raw I/J/K values in program units
    offsets: [Option<f64>; 3],
    radius: Option<f64>,
    motion: Option<MotionMode>,
    /// G4/G10/G28/G30/G92 take axis words for themselves
    consumes_axes: bool,
    set_offset: bool,
    machine_coordinates: bool,
}

impl LineWords {
    fn has_axes(&self) -> bool {
        self.axes.iter().any(Option::is_some)
    }

    fn has_arc_center(&self) -> bool {
        self.radius.is_some() || self.offsets.iter().any(Option::is_some)
    }
}

/// Sequential interpreter over one program
#[derive(Debug, Clone)]
pub struct Tessellator {
    config: ArcConfig,
    state: MotionState,
    output: Tessellation,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new(ArcConfig::default())
    }
}

impl Tessellator {
    pub fn new(config: ArcConfig) -> Self {
        Self {
            config,
            state: MotionState::new(),
            output: Tessellation::default(),
        }
    }

    /// Current modal state
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Tessellate a whole program
    pub fn tessellate(mut self, text: &str) -> Tessellation {
        debug!("Tessellating G-code, input size: {} bytes", text.len());

        for (line_index, line) in text.lines().enumerate() {
            self.feed_line(line_index, line);
        }

        let output = self.finish();
        debug!(
            "Tessellated {} lines into {} segments (rapid={}, feed={}, arc={}), {} malformed words, {} unsupported codes",
            output.stats.lines,
            output.segments.len(),
            output.stats.rapid_segments,
            output.stats.feed_segments,
            output.stats.arc_segments,
            output.stats.malformed_words,
            output.stats.unsupported_codes
        );
        output
    }

    /// Interpret one source line. `line_index` is its position in the
    /// original text.
    pub fn feed_line(&mut self, line_index: usize, line: &str) {
        let stripped = strip_comments(line);
        if is_blank(&stripped) {
            self.output.stats.blank_lines += 1;
            return;
        }

        self.output.frames.push(Frame {
            source_line_index: line_index,
            vertex_index: self.output.vertex_count(),
        });
        self.output.stats.lines += 1;

        let words = parse_words(&stripped);
        let line_words = self.classify(line_index, &words);
        self.execute(line_index, line_words);
    }

    /// Hand back everything emitted so far
    pub fn finish(mut self) -> Tessellation {
        self.output.final_state = self.state;
        self.output
    }

    /// Sort words and apply the modal changes they carry
    fn classify(&mut self, line_index: usize, words: &[Word]) -> LineWords {
        let mut line = LineWords::default();

        for word in words {
            let Some(value) = word.value else {
                self.output.stats.malformed_words += 1;
                trace!(
                    "Line {}: skipping malformed '{}' word",
                    line_index,
                    word.letter
                );
                continue;
            };

            match word.letter {
                'G' => self.apply_g_code(line_index, word, &mut line),
                'X' => line.axes[Axis::X.index()] = Some(value),
                'Y' => line.axes[Axis::Y.index()] = Some(value),
                'Z' => line.axes[Axis::Z.index()] = Some(value),
                'I' => line.offsets[Axis::X.index()] = Some(value),
                'J' => line.offsets[Axis::Y.index()] = Some(value),
                'K' => line.offsets[Axis::Z.index()] = Some(value),
                'R' => line.radius = Some(value),
                'F' => self.state.feed_rate = value,
                'S' => self.state.spindle_speed = value,
                'T' if value >= 0.0 => self.state.tool = value as u32,
                _ => {}
            }
        }

        line
    }

    fn apply_g_code(&mut self, line_index: usize, word: &Word, line: &mut LineWords) {
        let Some(code) = word.code() else {
            return;
        };
        match code {
            0 => line.motion = Some(MotionMode::Rapid),
            10 => line.motion = Some(MotionMode::Linear),
            20 => line.motion = Some(MotionMode::ClockwiseArc),
            30 => line.motion = Some(MotionMode::CounterClockwiseArc),
            800 => line.motion = Some(MotionMode::Cancelled),
            170 => self.state.plane = Plane::Xy,
            180 => self.state.plane = Plane::Zx,
            190 => self.state.plane = Plane::Yz,
            200 => self.state.units = Units::Inches,
            210 => self.state.units = Units::Millimeters,
            900 => self.state.distance = DistanceMode::Absolute,
            910 => self.state.distance = DistanceMode::Relative,
            920 => {
                line.consumes_axes = true;
                line.set_offset = true;
            }
            921 | 922 => self.state.clear_offset(),
            530 => line.machine_coordinates = true,
            40 | 100 | 280 | 281 | 300 | 301 => line.consumes_axes = true,
            // Recognized modal codes with no effect on geometry: work
            // offsets, compensation, path control, feed modes
            400..=420 | 430 | 490 | 540..=590 | 610 | 640 | 930 | 940 | 950 => {}
            _ => {
                self.output.stats.unsupported_codes += 1;
                trace!(
                    "Line {}: ignoring unsupported G{}",
                    line_index,
                    code as f64 / 10.0
                );
            }
        }
    }

    fn to_mm(&self, raw: [Option<f64>; 3]) -> AxisWords {
        let units = self.state.units;
        raw.map(|v| v.map(|v| units.to_mm(v)))
    }

    fn execute(&mut self, line_index: usize, line: LineWords) {
        let axes = self.to_mm(line.axes);

        if line.set_offset {
            self.state.set_offset(&axes);
        }
        if let Some(motion) = line.motion {
            self.state.motion = motion;
        }
        if line.consumes_axes {
            return;
        }

        let motion = self.state.motion;
        match motion {
            MotionMode::Cancelled => {}
            MotionMode::Rapid | MotionMode::Linear => {
                if !line.has_axes() {
                    return;
                }
                let target = self.state.resolve_target(&axes, line.machine_coordinates);
                let move_type = if motion == MotionMode::Rapid {
                    MoveType::Rapid
                } else {
                    MoveType::Feed
                };
                self.emit(self.state.position, target, move_type, line_index);
                self.state.position = target;
            }
            MotionMode::ClockwiseArc | MotionMode::CounterClockwiseArc => {
                if !line.has_axes() && !line.has_arc_center() {
                    return;
                }
                let target = self.state.resolve_target(&axes, line.machine_coordinates);
                let center = self.arc_center(&line);
                let arc = ArcMove {
                    start: self.state.position,
                    end: target,
                    plane: self.state.plane,
                    clockwise: motion == MotionMode::ClockwiseArc,
                    center,
                };

                let mut from = self.state.position;
                for point in arc.interpolate(&self.config) {
                    self.emit(from, point, MoveType::Arc, line_index);
                    from = point;
                }
                self.state.position = target;
            }
        }
    }

    fn arc_center(&self, line: &LineWords) -> ArcCenter {
        let units = self.state.units;
        if let Some(radius) = line.radius {
            if !line.offsets.iter().any(Option::is_some) {
                return ArcCenter::Radius(units.to_mm(radius));
            }
        }
        let (first, second, _) = self.state.plane.axes();
        let offset = |axis: Axis| units.to_mm(line.offsets[axis.index()].unwrap_or(0.0));
        ArcCenter::Offset(offset(first), offset(second))
    }

    fn emit(&mut self, from: Coordinate, to: Coordinate, move_type: MoveType, line_index: usize) {
        let segment = Segment {
            from,
            to,
            move_type,
            source_line_index: line_index,
        };

        let stats = &mut self.output.stats;
        match move_type {
            MoveType::Rapid => {
                stats.rapid_segments += 1;
                stats.rapid_distance += segment.length();
            }
            MoveType::Feed => {
                stats.feed_segments += 1;
                stats.cutting_distance += segment.length();
            }
            MoveType::Arc => {
                stats.arc_segments += 1;
                stats.cutting_distance += segment.length();
            }
        }

        self.output.bounds.update(from);
        self.output.bounds.update(to);
        self.output.segments.push(segment);
    }
}

/// Tessellate a program with the default arc resolution
pub fn tessellate(text: &str) -> Tessellation {
    Tessellator::default().tessellate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_program() {
        let result = tessellate("");
        assert!(result.segments.is_empty());
        assert!(result.frames.is_empty());

        let result = tessellate("   \n\t\n; just comments\n(and more)\n");
        assert!(result.frames.is_empty());
        assert_eq!(result.stats.blank_lines, 4);
    }

    #[test]
    fn test_frame_records_vertex_offset_before_line() {
        let result = tessellate("G0 X1\nG1 X2\nM3 S1000\nG1 X3");
        let offsets: Vec<usize> = result.frames.iter().map(|f| f.vertex_index).collect();
        assert_eq!(offsets, vec![0, 2, 4, 4]);
        assert_eq!(result.vertex_count(), 6);
    }

    #[test]
    fn test_modal_changes_apply_before_axis_words_on_same_line() {
        let result = tessellate("G91 G20 G1 X1");
        assert_eq!(result.segments[0].to, Coordinate::new(25.4, 0.0, 0.0));
    }

    #[test]
    fn test_g80_cancels_motion() {
        let result = tessellate("G1 X1\nG80\nX5");
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.final_state.position.x, 1.0);
    }

    #[test]
    fn test_axis_consumers_do_not_move() {
        let result = tessellate("G1 X10\nG28 X0 Y0\nG4 P1\nG10 L20 P1 X0");
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.frames.len(), 4);
    }

    #[test]
    fn test_feed_spindle_and_tool_are_tracked() {
        let result = tessellate("T2 M6\nM3 S12000\nG1 X1 F250");
        assert_eq!(result.final_state.tool, 2);
        assert_eq!(result.final_state.spindle_speed, 12000.0);
        assert_eq!(result.final_state.feed_rate, 250.0);
    }

    #[test]
    fn test_unsupported_codes_are_counted() {
        let result = tessellate("G38.2 Z-10\nG1 X1");
        assert_eq!(result.stats.unsupported_codes, 1);
        assert_eq!(result.frames.len(), 2);
    }
}

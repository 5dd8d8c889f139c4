//! Progress recoloring against real tessellated programs

use cncview_visualizer::{build_buffers, process_gcode, tessellate, ColorPalette, ToolpathOptions};

const PROGRAM: &str = "G21\nG0 X0 Y0 Z5\nG1 Z-1 F300\nG1 X20\nG2 X20 Y20 I0 J10\nM5\nG0 Z5\n";

fn is_processed(colors: &[f32], vertex: usize, processed: [f32; 3]) -> bool {
    colors[vertex * 3..vertex * 3 + 3] == processed
}

#[test]
fn test_full_progress_paints_every_vertex() {
    let result = tessellate(PROGRAM);
    let mut buffers = build_buffers(&result.segments);
    let processed = buffers.processed_color();

    buffers.apply_progress(&result.frames, result.frames.len() as i64);
    assert!((0..buffers.vertex_count()).all(|v| is_processed(buffers.colors(), v, processed)));
}

#[test]
fn test_zero_progress_paints_nothing() {
    let result = tessellate(PROGRAM);
    let mut buffers = build_buffers(&result.segments);
    buffers.apply_progress(&result.frames, 0);
    assert_eq!(buffers.colors(), buffers.original_colors());
}

#[test]
fn test_progress_then_reset_restores_original_colors() {
    let result = tessellate(PROGRAM);
    let mut buffers = build_buffers(&result.segments);
    buffers.apply_progress(&result.frames, 4);
    assert_ne!(buffers.colors(), buffers.original_colors());
    buffers.apply_progress(&result.frames, 0);
    assert_eq!(buffers.colors(), buffers.original_colors());
}

#[test]
fn test_repeated_progress_is_idempotent() {
    let result = tessellate(PROGRAM);
    let mut buffers = build_buffers(&result.segments);
    buffers.apply_progress(&result.frames, 3);
    let first = buffers.colors().to_vec();
    buffers.apply_progress(&result.frames, 3);
    assert_eq!(buffers.colors(), &first[..]);
}

#[test]
fn test_out_of_range_counts_clamp() {
    let result = tessellate(PROGRAM);
    let mut low = build_buffers(&result.segments);
    let mut high = low.clone();

    low.apply_progress(&result.frames, -100);
    assert_eq!(low.colors(), low.original_colors());

    high.apply_progress(&result.frames, 1_000_000);
    let mut full = build_buffers(&result.segments);
    full.apply_progress(&result.frames, result.frames.len() as i64);
    assert_eq!(high.colors(), full.colors());
}

#[test]
fn test_any_update_order_matches_fresh_recolor() {
    let result = tessellate(PROGRAM);
    let frames = &result.frames;
    let mut driven = build_buffers(&result.segments);

    for count in [5, 2, 7, 7, 0, 3, 6, 1, -1, 4] {
        driven.apply_progress(frames, count);

        let mut fresh = build_buffers(&result.segments);
        fresh.apply_progress(frames, count);
        assert_eq!(driven.colors(), fresh.colors(), "after {count} lines");
    }
}

#[test]
fn test_painted_range_follows_frames() {
    let result = tessellate(PROGRAM);
    let mut buffers = build_buffers(&result.segments);
    let processed = buffers.processed_color();

    for lines in 0..=result.frames.len() {
        buffers.apply_progress(&result.frames, lines as i64);
        let boundary = if lines == 0 {
            0
        } else if lines < result.frames.len() {
            result.frames[lines].vertex_index
        } else {
            buffers.vertex_count()
        };
        for vertex in 0..buffers.vertex_count() {
            assert_eq!(
                is_processed(buffers.colors(), vertex, processed),
                vertex < boundary,
                "lines={lines} vertex={vertex}"
            );
        }
    }
}

#[test]
fn test_toolpath_uses_configured_processed_color() {
    let options = ToolpathOptions {
        palette: ColorPalette {
            processed: [0.0, 0.0, 1.0],
            ..ColorPalette::default()
        },
        ..ToolpathOptions::default()
    };
    let mut toolpath = process_gcode(PROGRAM, &options);
    toolpath.apply_progress(i64::MAX);
    assert!(toolpath
        .buffers()
        .colors()
        .chunks(3)
        .all(|c| c == [0.0, 0.0, 1.0]));
    assert_eq!(toolpath.processed_lines(), i64::MAX);
}

mod properties {
    use super::PROGRAM;
    use cncview_visualizer::{build_buffers, tessellate};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn incremental_recolor_matches_fresh(counts in prop::collection::vec(-5i64..20, 1..40)) {
            let result = tessellate(PROGRAM);
            let mut driven = build_buffers(&result.segments);

            for count in counts {
                driven.apply_progress(&result.frames, count);
                let mut fresh = build_buffers(&result.segments);
                fresh.apply_progress(&result.frames, count);
                prop_assert_eq!(driven.colors(), fresh.colors());
            }
        }
    }
}

//! Cell segmentation and feature extraction regression test
//!
//! Cells tile each line exactly with no gaps or overlaps, and the last
//! cell never leaves the line. Features of every cell are checked against
//! a direct count.

use inkline_core::Box;
use inkline_recog::{CellSize, RecogError, extract_features, segment_cells};
use inkline_test::{RegParams, synthetic_binary};

#[test]
fn cellseg_reg() {
    let mut rp = RegParams::new("cellseg");

    // --- Baseline band ---
    let line = Box::new_unchecked(0, 10, 200, 8);
    let cells = segment_cells(&line, CellSize::default()).expect("cells");
    rp.compare_values(20.0, cells.len() as f64, 0.0);
    let all_clipped = cells.iter().all(|c| c.w == 10 && c.h == 8);
    rp.compare_values(1.0, if all_clipped { 1.0 } else { 0.0 }, 0.0);

    let band = synthetic_binary(200, 40, &[line]).expect("band");
    for cell in &cells {
        let f = extract_features(&band, cell).expect("features");
        rp.compare_values(1.25, f.aspect_ratio, 0.0);
        rp.compare_values(80.0, f.ink_count as f64, 0.0);
    }

    // --- Tiling for many widths and cell sizes ---
    for (cw, ch) in [(1, 1), (3, 5), (10, 20), (16, 4), (64, 64)] {
        for w in [1, 2, 9, 10, 11, 63, 64, 65, 199] {
            let line = Box::new_unchecked(7, 3, w, 12);
            let cells = segment_cells(&line, CellSize::new(cw, ch)).expect("cells");
            let mut x = line.x;
            let mut tiles = true;
            for c in &cells {
                tiles &= c.x == x && c.w > 0 && c.y == line.y && line.contains_box(c);
                tiles &= c.h == line.h.min(ch as i32);
                x = c.right();
            }
            tiles &= x == line.right();
            rp.compare_values(1.0, if tiles { 1.0 } else { 0.0 }, 0.0);
            rp.compare_values(
                (w as u32).div_ceil(cw) as f64,
                cells.len() as f64,
                0.0,
            );
        }
    }

    // --- Ink counts on a checkerboard ---
    let mut squares = Vec::new();
    for y in 0..6 {
        for x in 0..10 {
            if (x + y) % 2 == 0 {
                squares.push(Box::new_unchecked(x * 5, y * 5, 5, 5));
            }
        }
    }
    let board = synthetic_binary(50, 30, &squares).expect("board");
    let line = Box::new_unchecked(0, 0, 50, 30);
    let cells = segment_cells(&line, CellSize::new(10, 10)).expect("cells");
    let total: u64 = cells
        .iter()
        .map(|c| extract_features(&board, c).expect("features").ink_count)
        .sum();
    // Cells are 10 rows tall, so only rows 0..10 are visited
    rp.compare_values(250.0, total as f64, 0.0);

    // --- Invalid geometry is an error, not a skip ---
    let bad = extract_features(&band, &Box::new_unchecked(0, 0, 10, 0));
    rp.compare_values(
        1.0,
        if matches!(bad, Err(RecogError::InvalidGeometry { .. })) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    assert!(rp.cleanup(), "cellseg regression test failed");
}

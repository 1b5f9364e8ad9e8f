// File: crates/diagram-core/src/grid.rs
// Summary: Tick row layout helpers.

use crate::types::{AXIS_PADDING, ROW_COUNT};

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Vertical positions of the `ROW_COUNT + 1` tick rows, baseline first.
/// Row `i` sits at `height - 50 - i * (height - 50) / 5`.
pub fn tick_rows(height: f64) -> Vec<f64> {
    linspace(height - AXIS_PADDING, 0.0, ROW_COUNT + 1)
}

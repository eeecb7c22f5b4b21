//! Whole-frame rasterisation, parallel over scanlines.

use rayon::prelude::*;

use crate::params::ParameterSet;
use crate::ramp::{ColorRamp, RampLut, Rgb};
use crate::shade::{lightness, Viewport};

/// A grid of output samples, each standing for `scale_x × scale_y` device
/// pixels of the shaded viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Grid {
    pub fn new(cols: usize, rows: usize, scale_x: f32, scale_y: f32) -> Self {
        Self {
            cols,
            rows,
            scale_x,
            scale_y,
        }
    }

    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.cols as f32 * self.scale_x, self.rows as f32 * self.scale_y)
    }

    /// Device-pixel centre of sample `(col, row)`.
    pub fn sample_point(&self, col: usize, row: usize) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.scale_x,
            (row as f32 + 0.5) * self.scale_y,
        )
    }
}

/// Fills `out` (row-major, `grid.len()` long) with composited lightness.
/// A length mismatch leaves `out` untouched.
pub fn render_lightness(grid: Grid, time: f32, p: &ParameterSet, out: &mut [f32]) {
    if grid.is_empty() || out.len() != grid.len() {
        return;
    }
    let viewport = grid.viewport();
    out.par_chunks_mut(grid.cols)
        .enumerate()
        .for_each(|(row, line)| {
            for (col, px) in line.iter_mut().enumerate() {
                let (x, y) = grid.sample_point(col, row);
                *px = lightness(x, y, viewport, time, p);
            }
        });
}

/// Fills `out` with final colors, mapping lightness through a 256-texel
/// copy of `ramp`. A length mismatch leaves `out` untouched.
pub fn render_frame(grid: Grid, time: f32, p: &ParameterSet, ramp: &ColorRamp, out: &mut [Rgb]) {
    if grid.is_empty() || out.len() != grid.len() {
        return;
    }
    let lut = RampLut::new(ramp);
    let viewport = grid.viewport();
    out.par_chunks_mut(grid.cols)
        .enumerate()
        .for_each(|(row, line)| {
            for (col, px) in line.iter_mut().enumerate() {
                let (x, y) = grid.sample_point(col, row);
                *px = lut.sample(lightness(x, y, viewport, time, p));
            }
        });
}

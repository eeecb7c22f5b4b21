use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info};
use wavegradient::{config::Settings, render_frame, render_lightness, ColorRamp, Grid, Rgb};

/// What a headless run measured.
#[derive(Clone, Debug)]
pub(crate) struct Summary {
    pub(crate) frames: u32,
    pub(crate) grid: Grid,
    pub(crate) elapsed: Duration,
    pub(crate) mean_lightness: f32,
    pub(crate) min_lightness: f32,
    pub(crate) max_lightness: f32,
    pub(crate) center: Rgb,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_frame = if self.frames == 0 {
            0.0
        } else {
            self.elapsed.as_secs_f64() * 1000.0 / self.frames as f64
        };
        write!(
            f,
            "frames={} grid={}x{} total={:.1}ms per_frame={:.2}ms lightness=[{:.3}, {:.3}] mean={:.3} center={}",
            self.frames,
            self.grid.cols,
            self.grid.rows,
            self.elapsed.as_secs_f64() * 1000.0,
            per_frame,
            self.min_lightness,
            self.max_lightness,
            self.mean_lightness,
            self.center
        )
    }
}

/// Time of frame `frame` in a run starting at `start_time`. Computed
/// directly rather than accumulated so long runs do not drift.
fn frame_time(start_time: f32, step: f32, frame: u32) -> f32 {
    start_time + step * frame as f32
}

/// Renders `frames` frames 1/fps apart from `start_time`, then gathers
/// lightness statistics and the centre colour of the last one. With no
/// frames requested, the statistics describe `start_time`.
pub(crate) fn run(
    settings: &Settings,
    ramp: &ColorRamp,
    cols: usize,
    rows: usize,
    frames: u32,
    start_time: f32,
) -> Summary {
    let grid = Grid::new(cols, rows * 2, settings.cell_width, settings.cell_height * 0.5);
    let step = 1.0 / settings.fps_cap.max(1) as f32;
    let mut pixels = vec![Rgb::default(); grid.len()];

    info!(cols = grid.cols, rows = grid.rows, frames, "headless render");
    let started = Instant::now();
    for frame in 0..frames {
        let time = frame_time(start_time, step, frame);
        render_frame(grid, time, &settings.params, ramp, &mut pixels);
        debug!(frame, time, "rendered");
    }
    let elapsed = started.elapsed();

    let last = frame_time(start_time, step, frames.saturating_sub(1));
    if frames == 0 {
        render_frame(grid, last, &settings.params, ramp, &mut pixels);
    }
    let mut light = vec![0.0f32; grid.len()];
    render_lightness(grid, last, &settings.params, &mut light);
    let (min, max, sum) = light
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY, 0.0f64), |(lo, hi, s), &l| {
            (lo.min(l), hi.max(l), s + l as f64)
        });
    let mean = if light.is_empty() {
        0.0
    } else {
        (sum / light.len() as f64) as f32
    };
    let center = if grid.is_empty() {
        Rgb::default()
    } else {
        pixels[(grid.rows / 2) * grid.cols + grid.cols / 2]
    };

    Summary {
        frames,
        grid,
        elapsed,
        mean_lightness: mean,
        min_lightness: if light.is_empty() { 0.0 } else { min },
        max_lightness: if light.is_empty() { 0.0 } else { max },
        center,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_covers_the_grid() {
        let s = Settings::default();
        let ramp = s.color_ramp().expect("ramp");
        let summary = run(&s, &ramp, 40, 12, 3, 0.0);
        assert_eq!(summary.frames, 3);
        assert_eq!((summary.grid.cols, summary.grid.rows), (40, 24));
        assert!(summary.min_lightness <= summary.mean_lightness);
        assert!(summary.mean_lightness <= summary.max_lightness);
        assert!(summary.min_lightness.is_finite() && summary.max_lightness.is_finite());
        assert!(summary.to_string().starts_with("frames=3 grid=40x24"));
    }

    fn centre_of(grid: Grid, time: f32, s: &Settings, ramp: &ColorRamp) -> Rgb {
        let mut px = vec![Rgb::default(); grid.len()];
        render_frame(grid, time, &s.params, ramp, &mut px);
        px[(grid.rows / 2) * grid.cols + grid.cols / 2]
    }

    #[test]
    fn stats_and_centre_come_from_the_last_frame() {
        let s = Settings::default();
        let ramp = s.color_ramp().expect("ramp");
        let summary = run(&s, &ramp, 30, 10, 5, 1.0);
        let last = frame_time(1.0, 1.0 / s.fps_cap as f32, 4);
        assert_eq!(summary.center, centre_of(summary.grid, last, &s, &ramp));

        let mut light = vec![0.0f32; summary.grid.len()];
        render_lightness(summary.grid, last, &s.params, &mut light);
        let lo = light.iter().copied().fold(f32::INFINITY, f32::min);
        assert_eq!(summary.min_lightness, lo);
    }

    #[test]
    fn zero_frames_describe_the_start_time() {
        let s = Settings::default();
        let ramp = s.color_ramp().expect("ramp");
        let summary = run(&s, &ramp, 30, 10, 0, 2.5);
        assert_eq!(summary.center, centre_of(summary.grid, 2.5, &s, &ramp));
        assert_ne!(summary.center, Rgb::default());
    }

    #[test]
    fn frame_times_do_not_accumulate() {
        let step = 1.0 / 30.0;
        assert_eq!(frame_time(7.0, step, 0), 7.0);
        assert_eq!(frame_time(7.0, step, 90_000), 7.0 + step * 90_000.0);
    }

    #[test]
    fn empty_grid_is_fine() {
        let s = Settings::default();
        let ramp = s.color_ramp().expect("ramp");
        let summary = run(&s, &ramp, 0, 0, 2, 0.0);
        assert_eq!(summary.mean_lightness, 0.0);
        assert_eq!(summary.center, Rgb::default());
    }
}

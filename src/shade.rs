//! Per-pixel compositor: background, two soft-edged waves, color lookup.
//!
//! Everything here is a pure function of `(pixel, viewport, time, params)`;
//! pixels can be evaluated in any order and on any thread.

use crate::field::{background_noise, calc_blur, wave_y_noise};
use crate::math::{clamp01, ease_in, lerp, smooth};
use crate::params::{ParameterSet, Wave, BACKGROUND_OFFSET, WAVE_1, WAVE_2};
use crate::ramp::{ColorRamp, Rgb};

/// Where viewport centre lands on the noise x axis.
pub const LOGICAL_ORIGIN_X: f32 = 900.0;

pub const EDGE_TAPS: usize = 7;
/// Lower bound on the normalised edge width, keeps `dist / width` finite.
pub const EDGE_FLOOR: f32 = 0.008;
/// Edge width in pixels at full softness and `blur_amount == 1`.
pub const EDGE_SCALE_PX: f32 = 345.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Resize-stable horizontal coordinate: the viewport centre always maps to
/// the same noise column, so resizing reveals or hides content at the
/// sides instead of rescaling the pattern.
#[inline]
pub fn logical_x(px: f32, viewport_width: f32) -> f32 {
    LOGICAL_ORIGIN_X + px - viewport_width * 0.5
}

/// Edge width in pixels for one tap of the coverage integral.
#[inline]
pub fn edge_width(blur_fac: f32, exponent: f32, p: &ParameterSet) -> f32 {
    // blur_fac is already in [0, 1], so powf never sees a negative base.
    let v = smooth(ease_in(blur_fac.powf(exponent))).max(EDGE_FLOOR);
    v * EDGE_SCALE_PX * p.blur_amount
}

/// Wave coverage at signed distance `dist` (positive above the boundary).
///
/// Mean of [`EDGE_TAPS`] smoothstep edges whose widths sweep the exponent
/// range `[blur_sharpness_min, blur_sharpness_max]`, so the edge carries
/// a gradient of sharpness rather than a single falloff.
pub fn wave_alpha(dist: f32, blur_fac: f32, p: &ParameterSet) -> f32 {
    let blur_fac = clamp01(blur_fac);
    let mut sum = 0.0;
    for i in 0..EDGE_TAPS {
        let t = i as f32 / EDGE_TAPS as f32;
        let exponent = lerp(p.blur_sharpness_min, p.blur_sharpness_max, t);
        let width = edge_width(blur_fac, exponent, p);
        sum += smooth(clamp01(0.5 + dist / width));
    }
    sum / EDGE_TAPS as f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSample {
    /// Boundary height in pixels at this column.
    pub boundary: f32,
    pub blur: f32,
    pub alpha: f32,
    /// The wave's own fill lightness.
    pub lightness: f32,
}

pub fn sample_wave(
    wave: &Wave,
    lx: f32,
    py: f32,
    viewport: Viewport,
    time: f32,
    p: &ParameterSet,
) -> WaveSample {
    let amplitude = wave.amplitude(p) * viewport.height;
    let rest = wave.baseline * viewport.height;
    let boundary = rest + wave_y_noise(lx, time, wave.offset, p) * amplitude;
    let blur = calc_blur(lx, py, time, wave.offset, p);
    WaveSample {
        boundary,
        blur,
        alpha: wave_alpha(boundary - py, blur, p),
        lightness: background_noise(lx, py, time, wave.offset, p),
    }
}

/// Back-to-front blend: background, then wave 2, then wave 1 on top.
#[inline]
pub fn composite(background: f32, wave2: &WaveSample, wave1: &WaveSample) -> f32 {
    let l = lerp(background, wave2.lightness, wave2.alpha);
    lerp(l, wave1.lightness, wave1.alpha)
}

/// Every intermediate of one pixel's evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    pub background: f32,
    pub wave1: WaveSample,
    pub wave2: WaveSample,
    /// Composited lightness, not yet clamped.
    pub lightness: f32,
}

pub fn shade(px: f32, py: f32, viewport: Viewport, time: f32, p: &ParameterSet) -> Shading {
    let lx = logical_x(px, viewport.width);
    let background = background_noise(lx, py, time, BACKGROUND_OFFSET, p);
    let wave2 = sample_wave(&WAVE_2, lx, py, viewport, time, p);
    let wave1 = sample_wave(&WAVE_1, lx, py, viewport, time, p);
    Shading {
        background,
        wave1,
        wave2,
        lightness: composite(background, &wave2, &wave1),
    }
}

pub fn lightness(px: f32, py: f32, viewport: Viewport, time: f32, p: &ParameterSet) -> f32 {
    shade(px, py, viewport, time, p).lightness
}

/// Lightness clamped to `[0, 1]` and mapped through the ramp.
pub fn calc_color(lightness: f32, ramp: &ColorRamp) -> Rgb {
    ramp.sample(clamp01(lightness))
}

/// Final color of one pixel.
pub fn evaluate(
    px: f32,
    py: f32,
    viewport: Viewport,
    time: f32,
    p: &ParameterSet,
    ramp: &ColorRamp,
) -> Rgb {
    calc_color(lightness(px, py, viewport, time, p), ramp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> (Viewport, ParameterSet, ColorRamp) {
        (
            Viewport::new(800.0, 600.0),
            ParameterSet::default(),
            ColorRamp::preset("scenario").expect("preset"),
        )
    }

    #[test]
    fn logical_x_centres_on_origin() {
        assert_eq!(logical_x(400.0, 800.0), LOGICAL_ORIGIN_X);
        assert_eq!(logical_x(0.0, 1200.0), LOGICAL_ORIGIN_X - 600.0);
    }

    #[test]
    fn edge_width_respects_floor() {
        let p = ParameterSet::default();
        let w = edge_width(0.0, 1.0, &p);
        assert!((w - EDGE_FLOOR * EDGE_SCALE_PX).abs() < 1e-4);
        let full = edge_width(1.0, 1.0, &p);
        assert!((full - EDGE_SCALE_PX).abs() < 1e-3);
    }

    #[test]
    fn edge_width_scales_with_blur_amount() {
        let p = ParameterSet {
            blur_amount: 2.0,
            ..ParameterSet::default()
        };
        let q = ParameterSet::default();
        let a = edge_width(0.6, 1.0, &p);
        let b = edge_width(0.6, 1.0, &q);
        assert!((a - 2.0 * b).abs() < 1e-3);
    }

    #[test]
    fn alpha_is_half_on_the_boundary() {
        let p = ParameterSet::default();
        for blur in [0.0, 0.3, 0.7, 1.0] {
            assert!((wave_alpha(0.0, blur, &p) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn alpha_saturates_far_from_boundary() {
        let p = ParameterSet::default();
        assert_eq!(wave_alpha(1000.0, 1.0, &p), 1.0);
        assert_eq!(wave_alpha(-1000.0, 1.0, &p), 0.0);
    }

    #[test]
    fn alpha_is_monotonic_in_distance() {
        let p = ParameterSet::default();
        let mut prev = -1.0;
        for d in -200..=200 {
            let a = wave_alpha(d as f32, 0.55, &p);
            assert!((0.0..=1.0).contains(&a));
            assert!(a >= prev);
            prev = a;
        }
    }

    #[test]
    fn softer_blur_widens_the_edge() {
        let p = ParameterSet::default();
        assert!(wave_alpha(20.0, 0.9, &p) < wave_alpha(20.0, 0.2, &p));
    }

    #[test]
    fn zero_blur_amount_stays_in_range() {
        let p = ParameterSet {
            blur_amount: 0.0,
            ..ParameterSet::default()
        };
        assert_eq!(wave_alpha(5.0, 0.5, &p), 1.0);
        assert_eq!(wave_alpha(-5.0, 0.5, &p), 0.0);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let (vp, p, ramp) = scenario();
        for (x, y) in [(0.0, 0.0), (123.0, 456.0), (799.0, 599.0)] {
            assert_eq!(evaluate(x, y, vp, 2.5, &p, &ramp), evaluate(x, y, vp, 2.5, &p, &ramp));
            let a = shade(x, y, vp, 2.5, &p).lightness;
            let b = shade(x, y, vp, 2.5, &p).lightness;
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn waves_do_not_reach_the_bottom_edge_at_rest() {
        let (vp, p, _) = scenario();
        for i in 0..16 {
            let s = shade(i as f32 * 50.0, 590.0, vp, 0.0, &p);
            assert!(s.wave1.alpha < 0.05, "wave1 alpha {} at x={}", s.wave1.alpha, i * 50);
            assert!(s.wave2.alpha < 0.05, "wave2 alpha {} at x={}", s.wave2.alpha, i * 50);
            assert!((s.lightness - s.background).abs() < 0.05);
        }
    }

    #[test]
    fn wave1_paints_on_top() {
        let (vp, p, _) = scenario();
        for i in 0..8 {
            let s = shade(i as f32 * 100.0, 10.0, vp, 0.0, &p);
            assert_eq!(s.wave1.alpha, 1.0);
            assert_eq!(s.wave2.alpha, 1.0);
            assert!((s.lightness - s.wave1.lightness).abs() < 1e-6);
        }
    }

    #[test]
    fn composite_order() {
        let w = |lightness, alpha| WaveSample {
            boundary: 0.0,
            blur: 0.0,
            alpha,
            lightness,
        };
        assert_eq!(composite(0.2, &w(0.5, 1.0), &w(0.9, 1.0)), 0.9);
        assert_eq!(composite(0.2, &w(0.5, 1.0), &w(0.9, 0.0)), 0.5);
        assert_eq!(composite(0.2, &w(0.5, 0.0), &w(0.9, 0.0)), 0.2);
        assert!((composite(0.0, &w(1.0, 0.5), &w(0.0, 0.5)) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn wave_lightness_uses_its_own_offset() {
        let (vp, p, _) = scenario();
        let s = shade(250.0, 100.0, vp, 0.0, &p);
        assert_ne!(s.wave1.lightness, s.background);
        assert_ne!(s.wave1.lightness, s.wave2.lightness);
    }

    #[test]
    fn boundaries_sit_near_baselines() {
        let (vp, p, _) = scenario();
        for i in 0..16 {
            let s = shade(i as f32 * 50.0, 300.0, vp, 0.0, &p);
            let amp1 = p.wave_amp_x * vp.height * 3.0;
            let amp2 = p.wave_amp_y * vp.height * 3.0;
            assert!((s.wave1.boundary - 0.45 * vp.height).abs() <= amp1);
            assert!((s.wave2.boundary - 0.9 * vp.height).abs() <= amp2);
        }
    }

    #[test]
    fn resize_keeps_logical_columns() {
        let (_, p, _) = scenario();
        let narrow = Viewport::new(800.0, 600.0);
        let wide = Viewport::new(1200.0, 600.0);
        for y in [50.0, 300.0, 580.0] {
            let a = shade(400.0, y, narrow, 1.0, &p);
            let b = shade(600.0, y, wide, 1.0, &p);
            assert_eq!(a.background, b.background);
            assert_eq!(a.lightness, b.lightness);
        }
    }

    #[test]
    fn vertical_scanline_is_continuous() {
        let (vp, p, _) = scenario();
        for x in [100.0, 400.0, 700.0] {
            let mut prev = lightness(x, 0.0, vp, 0.0, &p);
            for y in 1..600 {
                let l = lightness(x, y as f32, vp, 0.0, &p);
                assert!((l - prev).abs() < 0.25 / p.blur_amount, "step at ({x}, {y})");
                prev = l;
            }
        }
    }

    #[test]
    fn horizontal_scanline_is_continuous() {
        let (vp, p, _) = scenario();
        // Rows around both baselines (0.45 and 0.9 of 600).
        for y in [250.0, 270.0, 290.0, 520.0, 540.0] {
            for t in [0.0, 3.0, 17.0, 120.0] {
                let mut prev = lightness(0.0, y, vp, t, &p);
                for x in 1..800 {
                    let l = lightness(x as f32, y, vp, t, &p);
                    assert!(
                        (l - prev).abs() < 0.25 / p.blur_amount,
                        "step {} at ({x}, {y}), t = {t}",
                        (l - prev).abs()
                    );
                    prev = l;
                }
            }
        }
    }

    #[test]
    fn narrow_edges_stay_continuous_across_a_boundary() {
        let (vp, base, _) = scenario();
        let p = ParameterSet {
            blur_amount: 0.25,
            ..base
        };
        for x in [100.0, 400.0, 700.0] {
            let mut prev = lightness(x, 200.0, vp, 3.0, &p);
            for y in 201..340 {
                let l = lightness(x, y as f32, vp, 3.0, &p);
                assert!((l - prev).abs() < 0.25 / p.blur_amount, "step at ({x}, {y})");
                prev = l;
            }
        }
    }

    #[test]
    fn small_positive_horizontal_frequency_stays_finite() {
        let (vp, base, _) = scenario();
        let p = ParameterSet {
            wave_freq_x: 1e-3,
            ..base
        };
        for (x, y) in [(0.0, 0.0), (400.0, 270.0), (799.0, 599.0)] {
            assert!(lightness(x, y, vp, 5.0, &p).is_finite());
        }
    }

    #[test]
    fn calc_color_clamps() {
        let (_, _, ramp) = scenario();
        assert_eq!(calc_color(-3.0, &ramp), Rgb::new(255, 0, 0));
        assert_eq!(calc_color(7.0, &ramp), Rgb::new(0, 0, 255));
    }
}

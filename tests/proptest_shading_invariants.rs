//! Property-based invariant tests for the shading pipeline.
//!
//! 1. Noise primitives stay within [-1, 1]
//! 2. Blur factor stays within [0, 1] for any parameter mix
//! 3. Wave coverage stays within [0, 1] and never falls as depth grows
//! 4. Evaluation is deterministic
//! 5. Resizing the viewport never moves content relative to its centre
//! 6. Color lookup clamps out-of-range lightness

use proptest::prelude::*;
use wavegradient::field::calc_blur;
use wavegradient::noise::{noise2, noise3};
use wavegradient::shade::{calc_color, wave_alpha};
use wavegradient::{evaluate, lightness, ColorRamp, ParameterSet, Viewport};

// ── Strategies ──────────────────────────────────────────────────────────────

fn params() -> impl Strategy<Value = ParameterSet> {
    (
        0.0f32..3.0,
        0.5f32..10.0,
        0.5f32..10.0,
        0.0f32..0.3,
        0.0f32..0.3,
        0.05f32..4.0,
        0.3f32..1.0,
        1.0f32..2.5,
        0.2f32..4.0,
    )
        .prop_map(
            |(speed, fx, fy, ax, ay, blur_amount, smin, smax, noise_scale)| ParameterSet {
                speed,
                wave_freq_x: fx,
                wave_freq_y: fy,
                wave_amp_x: ax,
                wave_amp_y: ay,
                blur_amount,
                blur_sharpness_min: smin,
                blur_sharpness_max: smax,
                noise_scale,
                ..ParameterSet::default()
            },
        )
}

fn ramp() -> ColorRamp {
    ColorRamp::preset("scenario").expect("preset")
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn noise_is_bounded(x in -1.0e3f32..1.0e3, y in -1.0e3f32..1.0e3, z in -1.0e3f32..1.0e3) {
        let n2 = noise2(x, y);
        let n3 = noise3(x, y, z);
        prop_assert!((-1.0..=1.0).contains(&n2), "noise2({x}, {y}) = {n2}");
        prop_assert!((-1.0..=1.0).contains(&n3), "noise3({x}, {y}, {z}) = {n3}");
    }

    #[test]
    fn blur_factor_in_unit_range(
        lx in -1.0e4f32..1.0e4,
        y in 0.0f32..4000.0,
        time in 0.0f32..1000.0,
        offset in -6000.0f32..6000.0,
        p in params(),
    ) {
        let b = calc_blur(lx, y, time, offset, &p);
        prop_assert!((0.0..=1.0).contains(&b), "blur {b}");
    }

    #[test]
    fn wave_alpha_bounded_and_monotone(
        dist in -2000.0f32..2000.0,
        step in 0.0f32..200.0,
        blur in 0.0f32..1.0,
        p in params(),
    ) {
        let a = wave_alpha(dist, blur, &p);
        let deeper = wave_alpha(dist + step, blur, &p);
        prop_assert!((-1e-6..=1.0 + 1e-6).contains(&a), "alpha {a}");
        prop_assert!(deeper + 1e-6 >= a, "alpha fell from {a} to {deeper}");
    }

    #[test]
    fn evaluation_is_deterministic(
        px in 0.0f32..1920.0,
        py in 0.0f32..1080.0,
        time in 0.0f32..600.0,
        p in params(),
    ) {
        let vp = Viewport::new(1920.0, 1080.0);
        let r = ramp();
        prop_assert_eq!(evaluate(px, py, vp, time, &p, &r), evaluate(px, py, vp, time, &p, &r));
    }

    #[test]
    fn resize_keeps_content_anchored_to_centre(
        px in 0u32..2000,
        py in 0u32..800,
        half_w in 1u32..1000,
        grow in 0u32..500,
        time in 0.0f32..100.0,
    ) {
        let p = ParameterSet::default();
        let narrow = Viewport::new((2 * half_w) as f32, 800.0);
        let wide = Viewport::new((2 * (half_w + grow)) as f32, 800.0);
        let a = lightness(px as f32, py as f32, narrow, time, &p);
        let b = lightness((px + grow) as f32, py as f32, wide, time, &p);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn color_lookup_clamps(l in -10.0f32..10.0) {
        let r = ramp();
        prop_assert_eq!(calc_color(l, &r), calc_color(l.clamp(0.0, 1.0), &r));
    }
}

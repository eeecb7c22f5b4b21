//! Scalar fields sampled by the compositor.
//!
//! All fields take the logical horizontal coordinate (see
//! [`crate::shade::logical_x`]), raw pixel `y`, and time in seconds.

use crate::math::{clamp01, lerp, unsigned};
use crate::noise::{noise2, noise3};
use crate::params::ParameterSet;

const BG_SCALE: f32 = 0.0004;
const BG_VERTICAL_STRETCH: f32 = 3.7;
const BG_TIME_RATE: f32 = 0.08;
const BG_FLOW_PX: f32 = 40.0;

/// (frequency, weight, flow multiplier) per background octave.
const BG_OCTAVES: [(f32, f32, f32); 3] = [(1.5, 0.30, 1.1), (0.9, 0.25, -0.6), (0.6, 0.20, 0.8)];
const BG_OCTAVE_SHIFT: f32 = 19.19;

const WAVE_SCALE: f32 = 0.0003;
const WAVE_TIME_RATE: f32 = 0.12;
const WAVE_FLOW_PX: f32 = 30.0;

/// (frequency, weight) per wave-y octave. Weights intentionally sum to 3.
const WAVE_OCTAVES: [(f32, f32); 4] = [(1.30, 0.85), (1.00, 1.15), (0.70, 0.60), (0.40, 0.40)];
const WAVE_OCTAVE_SHIFT: f32 = 31.7;

const BLUR_SCALE: f32 = 0.0006;
const BLUR_FLOW_PX: f32 = 25.0;
const BLUR_PULSE_RATE: f32 = 0.35;
const BLUR_BIAS_LOW: f32 = -0.17;
const BLUR_BIAS_HIGH: f32 = -0.04;

/// Domain-warped three-octave lightness texture centred near 0.5.
///
/// Each octave drifts horizontally at its own rate and direction; that
/// per-octave variance is what makes the layers appear to swirl.
pub fn background_noise(lx: f32, y: f32, time: f32, offset: f32, p: &ParameterSet) -> f32 {
    let sx = BG_SCALE * p.noise_scale * p.wave_freq_x;
    let ratio = p.wave_freq_y / p.wave_freq_x;
    let sy = sx * BG_VERTICAL_STRETCH * p.noise_vertical_stretch * ratio;
    let z = time * p.speed * p.noise_swirl_speed * BG_TIME_RATE + offset;
    let flow = time * p.speed * p.noise_flow_speed * BG_FLOW_PX;

    let mut sum = 0.5;
    for (k, &(freq, weight, drift)) in BG_OCTAVES.iter().enumerate() {
        let x = (lx + flow * drift) * sx * freq;
        sum += weight * noise3(x, y * sy * freq, z + k as f32 * BG_OCTAVE_SHIFT);
    }
    sum
}

/// Unnormalised vertical displacement of a wave boundary at `lx`.
///
/// Multiply by the wave's amplitude in pixels. Unlike the background, all
/// octaves share one flow rate, and time runs at raw `speed`.
pub fn wave_y_noise(lx: f32, time: f32, offset: f32, p: &ParameterSet) -> f32 {
    let base = WAVE_SCALE * p.wave_freq_x * p.noise_scale;
    let flow = time * p.speed * p.noise_flow_speed * WAVE_FLOW_PX;
    let t = time * p.speed * WAVE_TIME_RATE + offset;

    WAVE_OCTAVES
        .iter()
        .enumerate()
        .map(|(k, &(freq, weight))| {
            weight * noise2((lx + flow) * base * freq, t + k as f32 * WAVE_OCTAVE_SHIFT)
        })
        .sum()
}

/// Slow global oscillation in `[-0.17, -0.04]`, identical for every pixel.
pub fn calc_blur_bias(time: f32, p: &ParameterSet) -> f32 {
    let phase = (time * p.speed * p.blur_pulsing_speed * BLUR_PULSE_RATE).sin();
    lerp(BLUR_BIAS_LOW, BLUR_BIAS_HIGH, unsigned(phase))
}

/// Per-pixel edge softness in `[0, 1]`.
pub fn calc_blur(lx: f32, y: f32, time: f32, offset: f32, p: &ParameterSet) -> f32 {
    let base = BLUR_SCALE * p.wave_freq_x * p.blur_noise_scale;
    let flow = time * p.speed * p.blur_noise_speed * BLUR_FLOW_PX;

    let wide = 0.6 * base;
    let fine = 1.3 * base;
    let n = calc_blur_bias(time, p)
        + 0.5 * noise2((lx + flow) * wide, y * wide + offset)
        + 0.4 * noise2((lx - flow * 0.8) * fine, y * fine + offset);
    clamp01(unsigned(n))
}

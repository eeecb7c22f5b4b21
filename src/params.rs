use serde::{Deserialize, Serialize};

/// The scalar knobs the shading model reads every frame.
///
/// Values are used as given: the model never clamps them, so callers that
/// expose these to users are expected to keep them in sensible ranges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterSet {
    /// Global animation rate; multiplies every time-driven term.
    pub speed: f32,
    /// Horizontal noise frequency. Must be non-zero: the background's
    /// vertical scale divides by it, and zero turns every pixel NaN.
    pub wave_freq_x: f32,
    pub wave_freq_y: f32,
    /// Wave 1 amplitude as a fraction of viewport height.
    pub wave_amp_x: f32,
    /// Wave 2 amplitude as a fraction of viewport height.
    pub wave_amp_y: f32,

    pub noise_scale: f32,
    pub noise_vertical_stretch: f32,
    pub noise_swirl_speed: f32,
    pub noise_flow_speed: f32,

    /// Edge softness multiplier (pixel scale of the wave edges). Must be
    /// positive: at zero a pixel exactly on a boundary divides 0 by 0.
    pub blur_amount: f32,
    pub blur_sharpness_min: f32,
    pub blur_sharpness_max: f32,
    pub blur_noise_scale: f32,
    pub blur_noise_speed: f32,
    pub blur_pulsing_speed: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            speed: 1.0,
            wave_freq_x: 5.0,
            wave_freq_y: 3.0,
            wave_amp_x: 0.05,
            wave_amp_y: 0.05,
            noise_scale: 1.0,
            noise_vertical_stretch: 1.0,
            noise_swirl_speed: 1.0,
            noise_flow_speed: 1.0,
            blur_amount: 1.0,
            blur_sharpness_min: 0.9,
            blur_sharpness_max: 1.2,
            blur_noise_scale: 1.0,
            blur_noise_speed: 1.0,
            blur_pulsing_speed: 1.0,
        }
    }
}

/// Which amplitude knob drives a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmpKnob {
    X,
    Y,
}

/// Fixed description of one wave band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    /// Resting boundary height as a fraction of viewport height.
    pub baseline: f32,
    /// Seed fed into every noise field this wave samples.
    pub offset: f32,
    pub amp: AmpKnob,
}

impl Wave {
    /// Amplitude as a fraction of viewport height.
    pub fn amplitude(&self, p: &ParameterSet) -> f32 {
        match self.amp {
            AmpKnob::X => p.wave_amp_x,
            AmpKnob::Y => p.wave_amp_y,
        }
    }
}

/// Upper wave, painted last.
pub const WAVE_1: Wave = Wave {
    baseline: 0.45,
    offset: 112.5 * 48.75,
    amp: AmpKnob::X,
};

pub const WAVE_2: Wave = Wave {
    baseline: 0.9,
    offset: -87.3 * 61.25,
    amp: AmpKnob::Y,
};

pub const BACKGROUND_OFFSET: f32 = -192.4;

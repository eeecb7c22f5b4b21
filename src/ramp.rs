//! Color ramp: ordered `(position, color)` stops over `[0, 1]`.

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::math::clamp01;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let f = |a: u8, b: u8| -> u8 {
            ((a as f32) + (b as f32 - a as f32) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    /// Parses `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        ensure!(hex.len() == 6 && hex.is_ascii(), "expected #rrggbb, got {s:?}");
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("bad hex color {s:?}"))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(position: f32, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Validated ramp. Always has at least two stops, the first at 0 and the
/// last at 1, with strictly increasing positions.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

pub const PRESET_NAMES: [&str; 5] = ["scenario", "sunset", "ocean", "aurora", "mono"];

impl ColorRamp {
    /// Builds a ramp from user stops, padding missing end stops with copies
    /// of the nearest color.
    pub fn new(mut stops: Vec<ColorStop>) -> Result<Self> {
        ensure!(!stops.is_empty(), "color ramp needs at least one stop");
        for s in &stops {
            ensure!(
                s.position.is_finite() && (0.0..=1.0).contains(&s.position),
                "stop position {} is outside [0, 1]",
                s.position
            );
        }
        for pair in stops.windows(2) {
            if pair[1].position <= pair[0].position {
                bail!(
                    "stop positions must be strictly increasing ({} then {})",
                    pair[0].position,
                    pair[1].position
                );
            }
        }

        let first = stops[0];
        if first.position > 0.0 {
            stops.insert(0, ColorStop::new(0.0, first.color));
        }
        let last = stops[stops.len() - 1];
        if last.position < 1.0 {
            stops.push(ColorStop::new(1.0, last.color));
        }
        Ok(Self { stops })
    }

    pub fn preset(name: &str) -> Option<Self> {
        let hex = |s: &str| s.parse::<Rgb>().ok();
        let table: &[(f32, &str)] = match name {
            "scenario" => &[(0.0, "#ff0000"), (0.5, "#ffff00"), (1.0, "#0000ff")],
            "sunset" => &[
                (0.0, "#2b1055"),
                (0.35, "#d53369"),
                (0.7, "#f8a055"),
                (1.0, "#fbe7a1"),
            ],
            "ocean" => &[
                (0.0, "#031b34"),
                (0.4, "#0a5e8c"),
                (0.75, "#2ec4b6"),
                (1.0, "#d8f3dc"),
            ],
            "aurora" => &[
                (0.0, "#081018"),
                (0.3, "#1ed278"),
                (0.65, "#a0aaff"),
                (1.0, "#dc78ff"),
            ],
            "mono" => &[(0.0, "#000000"), (1.0, "#ffffff")],
            _ => return None,
        };
        let stops = table
            .iter()
            .map(|&(pos, c)| hex(c).map(|color| ColorStop::new(pos, color)))
            .collect::<Option<Vec<_>>>()?;
        Self::new(stops).ok()
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Piecewise-linear color at `t`; `t` is clamped to `[0, 1]`.
    pub fn sample(&self, t: f32) -> Rgb {
        let t = clamp01(t);
        let hi = self
            .stops
            .partition_point(|s| s.position < t)
            .clamp(1, self.stops.len() - 1);
        let a = self.stops[hi - 1];
        let b = self.stops[hi];
        a.color.lerp(b.color, (t - a.position) / (b.position - a.position))
    }
}

pub const LUT_SIZE: usize = 256;

/// The ramp resampled into evenly spaced texels, read back with linear
/// filtering.
#[derive(Clone, Debug)]
pub struct RampLut {
    texels: [Rgb; LUT_SIZE],
}

impl RampLut {
    pub fn new(ramp: &ColorRamp) -> Self {
        let mut texels = [Rgb::default(); LUT_SIZE];
        for (i, texel) in texels.iter_mut().enumerate() {
            *texel = ramp.sample(i as f32 / (LUT_SIZE - 1) as f32);
        }
        Self { texels }
    }

    pub fn sample(&self, t: f32) -> Rgb {
        let x = clamp01(t) * (LUT_SIZE - 1) as f32;
        let i = (x.floor() as usize).min(LUT_SIZE - 2);
        self.texels[i].lerp(self.texels[i + 1], x - i as f32)
    }
}

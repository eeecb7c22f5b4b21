//! Animated wave gradient.
//!
//! A pure per-pixel shading model: coherent noise drives a slowly swirling
//! background and two horizontal wave bands whose edges soften and sharpen
//! over time. The composited lightness is mapped through a color ramp.
//!
//! ```no_run
//! use wavegradient::{evaluate, ColorRamp, ParameterSet, Viewport};
//!
//! let ramp = ColorRamp::preset("sunset").unwrap();
//! let params = ParameterSet::default();
//! let rgb = evaluate(120.0, 80.0, Viewport::new(800.0, 600.0), 1.5, &params, &ramp);
//! println!("{rgb}");
//! ```

pub mod config;
pub mod field;
pub mod math;
pub mod noise;
pub mod params;
pub mod ramp;
pub mod raster;
pub mod shade;

pub use params::ParameterSet;
pub use ramp::{ColorRamp, ColorStop, Rgb};
pub use raster::{render_frame, render_lightness, Grid};
pub use shade::{evaluate, lightness, shade, Shading, Viewport};

//! Scalar helpers shared by the field functions.

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Hermite polynomial `3t² - 2t³`. Callers clamp `t` first.
#[inline]
pub fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Quadratic ease-in.
#[inline]
pub fn ease_in(t: f32) -> f32 {
    t * t
}

/// Maps nominal noise range [-1, 1] onto [0, 1] without clamping.
#[inline]
pub fn unsigned(n: f32) -> f32 {
    (n + 1.0) * 0.5
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
///
/// Zero slope at both ends keeps the field's derivative continuous across
/// cell boundaries.
#[inline]
pub fn blend(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Derivative of [`blend`]: `30t^4 - 60t^3 + 30t^2`.
#[inline]
pub fn blend_derivative(t: f64) -> f64 {
    30.0 * t * t * (t * (t - 2.0) + 1.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

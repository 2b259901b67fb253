/// Smallest window length used as a divisor.
pub const WINDOW_EPSILON: f64 = 1e-9;

/// Clamp `v` into `[0, 1]`. NaN maps to `0`.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Linear interpolation from `a` to `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map top-level progress `p` into the local progress of the window `[start, end]`.
///
/// Returns `0` at or before `start`, `1` at or after `end`, and is monotonic
/// nondecreasing in `p`. A window with `end <= start` is an instantaneous step that is
/// always complete.
pub fn phase_progress(p: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return 1.0;
    }
    clamp01((p - start) / (end - start).max(WINDOW_EPSILON))
}

pub(crate) fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

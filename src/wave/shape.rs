use std::f64::consts::TAU;

/// Time term of the wave: a sine over one `duration_ms` cycle, blended toward its cube.
///
/// `k = 0` gives `sin(T)` exactly; as `k → 1` the curve lingers at the extrema and crosses
/// zero faster. The result stays continuous and in `[-1, 1]` for `k` in `[0, 1]`; `k` is
/// clamped into that range.
pub fn shaped_signed_sine(elapsed_ms: f64, duration_ms: f64, k: f64) -> f64 {
    if !elapsed_ms.is_finite() || !duration_ms.is_finite() || duration_ms <= 0.0 {
        return 0.0;
    }
    let t = elapsed_ms.rem_euclid(duration_ms) / duration_ms * TAU;
    let s = t.sin();
    let k = if k.is_finite() { k.clamp(0.0, 1.0) } else { 0.0 };
    (1.0 - k) * s + k * s * s * s
}

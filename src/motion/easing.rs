/// Symmetric cubic ease, the default curve for every bar tween.
///
/// Input outside `[0, 1]` is clamped so samplers can pass raw normalized
/// progress without pre-checking.
#[must_use]
pub fn cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Linear interpolation between `start` and `end` at eased progress `t`.
///
/// The weighted form lands exactly on `start` at 0 and `end` at 1, so a
/// settled animation reproduces its targets bit for bit.
#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    (1.0 - t) * start + t * end
}

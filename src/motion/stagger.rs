/// Base of the logarithmic stagger curve.
pub const STAGGER_LOG_BASE: f64 = 1.5;

/// Milliseconds added per unit on the logarithmic curve.
pub const STAGGER_STEP_MS: f64 = 100.0;

/// Per-bar start delay: `base + log1.5(index + 1) * 100`.
///
/// The first bar starts exactly at `base_ms` and the gap between
/// consecutive bars shrinks as the index grows, so long sequences ripple
/// quickly toward the tail instead of stretching linearly.
#[must_use]
pub fn stagger_delay_ms(base_ms: f64, index: usize) -> f64 {
    base_ms + ((index as f64) + 1.0).ln() / STAGGER_LOG_BASE.ln() * STAGGER_STEP_MS
}

#[cfg(test)]
mod tests {
    use super::stagger_delay_ms;

    #[test]
    fn first_bar_starts_at_the_base() {
        assert_eq!(stagger_delay_ms(0.0, 0), 0.0);
        assert_eq!(stagger_delay_ms(375.0, 0), 375.0);
    }

    #[test]
    fn delays_grow_with_shrinking_gaps() {
        let delays: Vec<f64> = (0..6).map(|i| stagger_delay_ms(0.0, i)).collect();
        for pair in delays.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        let first_gap = delays[1] - delays[0];
        let last_gap = delays[5] - delays[4];
        assert!(last_gap < first_gap);
    }

    #[test]
    fn second_bar_lands_one_log_step_out() {
        // log1.5(2) * 100 = 170.95...
        let delay = stagger_delay_ms(0.0, 1);
        assert!((delay - 170.951_129_135_145_45).abs() <= 1e-9);
    }
}

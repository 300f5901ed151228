//! Opt-in tracing setup for hosts embedding the engine.
//!
//! Nothing in the crate installs a subscriber on its own; events are emitted
//! unconditionally and go nowhere until the host wires one up.
//! `init_default_tracing` is the batteries-included option for examples and
//! quick experiments.

/// Installs a compact `tracing` subscriber filtered by `INTEREST_RS_LOG`
/// (falling back to `RUST_LOG`, then `info`).
///
/// Returns `true` when this call installed the global subscriber, `false`
/// when the `telemetry` feature is off or the host already set one.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env("INTEREST_RS_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

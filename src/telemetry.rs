//! Telemetry helpers for hosts embedding `chart3d`.
//!
//! Tracing setup stays explicit and opt-in. Row-level warnings, color-mapping
//! downgrades and per-pass counts are all emitted as `tracing` events, so a
//! host either calls one of the helpers below or wires its own subscriber.

/// Initializes a stderr `tracing` subscriber with an `info` default filter.
///
/// See [`init_tracing_with_filter`].
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Initializes a stderr `tracing` subscriber when the `telemetry` feature is enabled.
///
/// `RUST_LOG` wins over `default_filter` when set. Output goes to stderr so
/// tools printing plans on stdout stay machine-readable.
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host.
#[must_use]
pub fn init_tracing_with_filter(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

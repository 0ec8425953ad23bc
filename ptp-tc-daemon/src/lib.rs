pub mod config;
pub mod transport;

/// Installs a `tracing-subscriber` formatting layer at the given filter
/// level. Every `port_state_transition`/`port_fault` event the core emits
/// (see `ptp_core::observability`) flows through whatever subscriber is
/// installed here; the core itself never assumes one is present.
pub fn setup_logging(level: tracing::Level) {
    tracing_subscriber::fmt().with_max_level(level).with_target(true).init();
}

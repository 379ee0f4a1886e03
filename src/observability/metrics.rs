//! Metrics collection and exposition.
//!
//! # Metrics
//! - `docuspotlight_navigations_total` (counter): navigations by outcome
//!   (`rendered`, `redirected`, `resolved`, `superseded`, `load_failed`,
//!   `not_found`, `redirect_cycle`)
//! - `docuspotlight_redirect_hops_total` (counter): redirect hops followed
//! - `docuspotlight_navigation_duration_seconds` (histogram): guard + load latency
//!
//! # Design Decisions
//! - Without an installed recorder the macros are no-ops, so library code
//!   records unconditionally
//! - Prometheus exposition is served by the shell server when enabled

use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder as the global metrics recorder.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record one finished navigation.
pub fn record_navigation(outcome: &'static str, hops: usize, start: Instant) {
    metrics::counter!("docuspotlight_navigations_total", "outcome" => outcome).increment(1);
    if hops > 0 {
        metrics::counter!("docuspotlight_redirect_hops_total").increment(hops as u64);
    }
    metrics::histogram!("docuspotlight_navigation_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

//! Logging and metrics.

use metrics::counter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vortex_core::VortexError;

use crate::resolver::ResolutionOutcome;

/// Counter of completed resolutions, labelled by `outcome`.
pub const RESOLUTIONS_TOTAL: &str = "vortex_resolutions_total";

/// Counter of absorbed resolution errors, labelled by `kind`.
pub const RESOLUTION_ERRORS_TOTAL: &str = "vortex_resolution_errors_total";

/// Installs the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

pub(crate) fn record_outcome(outcome: ResolutionOutcome) {
    counter!(RESOLUTIONS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

pub(crate) fn record_error(error: &VortexError) {
    counter!(RESOLUTION_ERRORS_TOTAL, "kind" => error.kind()).increment(1);
}

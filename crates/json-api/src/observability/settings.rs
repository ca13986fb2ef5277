//! Slow request threshold read by the request logging middleware.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use crate::config::observability::ObservabilityConfig;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);

pub(super) fn apply(config: &ObservabilityConfig) {
    SLOW_REQUEST_THRESHOLD_MS.store(config.slow_request_threshold_ms, Ordering::Relaxed);
}

/// `None` when slow request warnings are switched off with a zero threshold.
pub(super) fn slow_request_threshold() -> Option<Duration> {
    match SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed) {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    }
}

/// The threshold a request that took `elapsed` went past, if any.
pub(super) fn exceeded_threshold(
    elapsed: Duration,
    threshold: Option<Duration>,
) -> Option<Duration> {
    threshold.filter(|threshold| elapsed > *threshold)
}

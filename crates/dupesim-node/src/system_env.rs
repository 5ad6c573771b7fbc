//! Wall-clock environment for the binary.
//!
//! Interleaving in a live run comes from two sources: the per-path batch
//! shuffle and the per-cycle coin flip choosing which path starts first.
//! `SystemEnv` feeds both from OS entropy so no two runs interleave alike,
//! and paces paths with real Tokio timers.

use std::time::{Duration, Instant};

use dupesim_core::Environment;

/// Unseeded environment: OS entropy, system clock, Tokio sleeps.
///
/// Runs are not reproducible. Use a seeded environment when an interleaving
/// has to be replayed.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        if let Err(e) = getrandom::fill(buffer) {
            // Degrades to identity shuffles and a fixed start order, which
            // still satisfies exactly-once delivery.
            tracing::warn!(error = %e, "entropy unavailable, interleaving is no longer random");
            buffer.fill(0);
        }
    }
}

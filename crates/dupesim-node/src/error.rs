//! Simulation error types.

use dupesim_core::{ConfigError, DedupError, PathId, SequenceError};
use thiserror::Error;

/// Errors that abort a generation cycle.
///
/// None of these are recoverable inside the simulation: a failed cycle means
/// a contract was broken, not that the network misbehaved. The seen set is
/// only touched inside the engine's critical section, so it stays consistent
/// whichever error ends the cycle.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The dedup engine refused a frame.
    #[error("dedup error: {0}")]
    Dedup(#[from] DedupError),

    /// The sequence counter could not produce a batch.
    #[error("sequence error: {0}")]
    Sequence(#[from] SequenceError),

    /// The configuration cannot be run.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A path emulator task panicked or was cancelled.
    #[error("path {path} task failed: {reason}")]
    PathTask {
        /// Path whose task failed.
        path: PathId,
        /// Join error description.
        reason: String,
    },
}

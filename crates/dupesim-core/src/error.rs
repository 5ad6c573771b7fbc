//! Core error types.

use thiserror::Error;

/// Errors from the duplicate-discard engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DedupError {
    /// A previous holder of the seen-set lock panicked mid-update.
    ///
    /// The seen set is only mutated after the membership check succeeds, so
    /// it is never left half-written, but the engine refuses further work
    /// because the panic means a contract was already broken.
    #[error("seen-set lock poisoned while receiving frame {seqnr} on path {path}")]
    LockPoisoned {
        /// Sequence number being received when poisoning was observed.
        seqnr: u64,
        /// Path the frame arrived on.
        path: crate::PathId,
    },
}

/// Errors from sequence number generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    /// The counter cannot advance without wrapping.
    #[error("sequence space exhausted: next={next}, requested {requested} more")]
    Exhausted {
        /// Next sequence number that would have been assigned.
        next: u64,
        /// Batch size that did not fit.
        requested: usize,
    },
}

/// Invalid simulation configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A cycle must carry at least one frame.
    #[error("batch size must be at least 1")]
    EmptyBatch,

    /// A cycle would generate more frames than one batch may hold.
    #[error("batch size {size} exceeds maximum {max}")]
    BatchTooLarge {
        /// Requested batch size.
        size: usize,
        /// Largest accepted batch size.
        max: usize,
    },
}

/// Unrecognised path label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown path {input:?}, expected \"A\" or \"B\"")]
pub struct PathParseError {
    /// The rejected label.
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathId;

    #[test]
    fn error_display() {
        insta::assert_snapshot!(
            DedupError::LockPoisoned { seqnr: 7, path: PathId::B }.to_string(),
            @"seen-set lock poisoned while receiving frame 7 on path B"
        );
        insta::assert_snapshot!(
            SequenceError::Exhausted { next: 5, requested: 3 }.to_string(),
            @"sequence space exhausted: next=5, requested 3 more"
        );
        insta::assert_snapshot!(ConfigError::EmptyBatch.to_string(), @"batch size must be at least 1");
        insta::assert_snapshot!(
            ConfigError::BatchTooLarge { size: 70_000, max: 65_536 }.to_string(),
            @"batch size 70000 exceeds maximum 65536"
        );
    }

    #[test]
    fn path_parse_error_quotes_input() {
        let err = PathParseError { input: "C".to_string() };
        assert_eq!(err.to_string(), r#"unknown path "C", expected "A" or "B""#);
    }
}

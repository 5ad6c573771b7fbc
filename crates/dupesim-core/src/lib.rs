//! Receive-side duplicate discard for dual-path redundant links.
//!
//! A single stream of sequence-numbered frames is sent over two independent
//! paths (PRP-style LAN A / LAN B). Each path reorders and delays frames on
//! its own; the receiver must deliver every distinct frame exactly once.
//!
//! This crate holds the runtime-free pieces:
//!
//! ```text
//! dupesim-core
//!   ├─ Environment      (time + randomness seam)
//!   ├─ SequenceSource   (gap-free batches of sequence numbers)
//!   ├─ DedupEngine      (atomic check-and-insert over the seen set)
//!   ├─ DedupStats       (per-path receive counters)
//!   └─ SimConfig        (batch size and pacing)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod dedup;
pub mod env;
pub mod error;
pub mod path;
pub mod sequence;
pub mod stats;

pub use config::{MAX_BATCH_SIZE, SimConfig};
pub use dedup::{Decision, DedupEngine};
pub use env::{EnvRng, Environment};
pub use error::{ConfigError, DedupError, PathParseError, SequenceError};
pub use path::PathId;
pub use sequence::{Batch, SeqNr, SequenceSource};
pub use stats::{DedupStats, PathStats};

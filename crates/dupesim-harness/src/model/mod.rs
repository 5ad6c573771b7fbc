//! Reference model for model-based testing.
//!
//! The model is a single-threaded receiver over a `BTreeSet` that is
//! obviously correct. It serves as the oracle against which the locked
//! `DedupEngine` is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Deterministic: Same inputs produce same outputs

mod operation;
mod receiver;

pub use operation::{ModelPath, ModelSeqNr, Operation};
pub use receiver::ModelReceiver;

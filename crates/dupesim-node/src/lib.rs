//! Dual-path redundant link simulation.
//!
//! This crate drives the dedup engine the way a PRP receiver would see
//! traffic: every frame arrives twice, once per LAN, in independently
//! shuffled order.
//!
//! ## Architecture
//!
//! ```text
//! dupesim-node
//!   ├─ SystemEnv       (production Environment impl)
//!   ├─ Orchestrator    (generation loop, random path start order)
//!   ├─ PathEmulator    (one per LAN: shuffle, pace, receive)
//!   ├─ StopSignal      (cooperative shutdown between cycles)
//!   └─ DedupEngine     (shared seen set, from dupesim-core)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod orchestrator;
mod path_emulator;
mod stop;
mod system_env;

pub use error::NodeError;
pub use orchestrator::{CycleReport, Orchestrator};
pub use path_emulator::{PathEmulator, PathReport};
pub use stop::{StopHandle, StopSignal, stop_signal};
pub use system_env::SystemEnv;

//! Deterministic simulation harness for dupesim testing.
//!
//! A seeded [`SimEnv`] plus Turmoil's virtual clock make a multi-cycle run
//! reproducible: the same seed yields the same shuffles, the same path start
//! order and therefore the same delivered/dropped split.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference receiver for model-based
//! testing. Operations are applied to both the model and the real engine,
//! and their decisions and final seen sets are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod scenario;
pub mod sim_env;

pub use model::{ModelPath, ModelReceiver, ModelSeqNr, Operation};
pub use scenario::{CycleTrace, Oracle, Scenario, ScenarioError, ScenarioWorld};
pub use sim_env::SimEnv;

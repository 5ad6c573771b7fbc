//! Scenario runner.
//!
//! Runs the real orchestrator inside a Turmoil simulation with a seeded
//! [`SimEnv`], then hands the resulting world to oracle functions. Virtual
//! time makes multi-second pacing free, and the seed makes every run
//! replayable.
//!
//! ```rust,ignore
//! let world = Scenario::new()
//!     .with_seed(7)
//!     .with_cycles(10)
//!     .oracle(Box::new(|world| {
//!         if world.stats().total_dropped() == 30 { Ok(()) } else { Err("drops".into()) }
//!     }))
//!     .run()?;
//! ```

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use dupesim_core::{DedupEngine, DedupStats, Environment, PathId, SeqNr, SimConfig};
use dupesim_node::{CycleReport, Orchestrator};

use crate::sim_env::SimEnv;

/// Oracle run against the final world. Returns a description on violation.
pub type Oracle = Box<dyn Fn(&ScenarioWorld) -> Result<(), String>>;

/// Errors from running a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The simulation itself failed (a cycle errored or time ran out).
    #[error("simulation failed: {0}")]
    Simulation(String),

    /// The simulation finished without producing a world.
    #[error("simulation produced no world")]
    NoWorld,

    /// An oracle rejected the final state.
    #[error("oracle violated: {0}")]
    OracleViolated(String),
}

/// What happened in one cycle, in comparable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTrace {
    /// Path started first.
    pub first: PathId,
    /// Send order per path, indexed by [`PathId::index`].
    pub sent: [Vec<SeqNr>; 2],
    /// Frames each path delivered first.
    pub delivered: [Vec<SeqNr>; 2],
}

/// Final state of a scenario run.
pub struct ScenarioWorld {
    engine: Arc<DedupEngine<SimEnv>>,
    reports: Vec<CycleReport>,
    config: SimConfig,
    seed: u64,
}

impl ScenarioWorld {
    /// The engine both paths fed.
    pub fn engine(&self) -> &DedupEngine<SimEnv> {
        &self.engine
    }

    /// Per-cycle reports in order.
    pub fn reports(&self) -> &[CycleReport] {
        &self.reports
    }

    /// Seed the run used.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sorted seen set.
    pub fn seen(&self) -> Vec<SeqNr> {
        self.engine.seen()
    }

    /// Per-path counters.
    pub fn stats(&self) -> DedupStats {
        self.engine.stats()
    }

    /// Comparable history of the run.
    pub fn trace(&self) -> Vec<CycleTrace> {
        self.reports
            .iter()
            .map(|report| CycleTrace {
                first: report.first,
                sent: PathId::ALL.map(|path| report.path(path).sent.clone()),
                delivered: PathId::ALL.map(|path| report.path(path).delivered.clone()),
            })
            .collect()
    }
}

/// Builder for a bounded multi-cycle simulation.
pub struct Scenario {
    seed: u64,
    config: SimConfig,
    oracles: Vec<Oracle>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    /// Five cycles of three frames with short virtual pacing.
    pub fn new() -> Self {
        Self {
            seed: 0,
            config: SimConfig {
                batch_size: 3,
                inter_frame_delay: Duration::from_millis(10),
                inter_cycle_delay: Duration::from_millis(50),
                max_cycles: Some(5),
            },
            oracles: Vec::new(),
        }
    }

    /// Seed for shuffles and start order.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Frames per cycle.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Number of cycles to run.
    #[must_use]
    pub fn with_cycles(mut self, cycles: u64) -> Self {
        self.config.max_cycles = Some(cycles);
        self
    }

    /// Per-frame and per-cycle pauses.
    #[must_use]
    pub fn with_pacing(mut self, frame: Duration, cycle: Duration) -> Self {
        self.config.inter_frame_delay = frame;
        self.config.inter_cycle_delay = cycle;
        self
    }

    /// Add an oracle checked after the run.
    #[must_use]
    pub fn oracle(mut self, oracle: Oracle) -> Self {
        self.oracles.push(oracle);
        self
    }

    /// Run the scenario and check every oracle, exactly-once first.
    pub fn run(self) -> Result<ScenarioWorld, ScenarioError> {
        let Self { seed, config, oracles } = self;
        let cycles = config.max_cycles.unwrap_or(1);

        let mut sim = turmoil::Builder::new()
            .simulation_duration(Duration::from_secs(3600))
            .rng_seed(seed)
            .build();

        let slot: Arc<Mutex<Option<ScenarioWorld>>> = Arc::new(Mutex::new(None));
        let client_slot = Arc::clone(&slot);
        let client_config = config.clone();

        sim.client("receiver", async move {
            let env = SimEnv::with_seed(seed);
            let engine = Arc::new(DedupEngine::new(env.clone()));
            let mut orchestrator =
                Orchestrator::new(client_config.clone(), Arc::clone(&engine), env.clone())?;

            let mut reports = Vec::new();
            for _ in 0..cycles {
                reports.push(orchestrator.run_cycle().await?);
                env.sleep(client_config.inter_cycle_delay).await;
            }

            *client_slot.lock().unwrap_or_else(PoisonError::into_inner) =
                Some(ScenarioWorld { engine, reports, config: client_config, seed });
            Ok(())
        });

        sim.run().map_err(|e| ScenarioError::Simulation(e.to_string()))?;

        let world = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        let world = world.ok_or(ScenarioError::NoWorld)?;

        exactly_once(&world).map_err(ScenarioError::OracleViolated)?;
        for oracle in &oracles {
            oracle(&world).map_err(ScenarioError::OracleViolated)?;
        }

        Ok(world)
    }
}

/// Oracle: every generated frame delivered once and dropped once.
fn exactly_once(world: &ScenarioWorld) -> Result<(), String> {
    let generated = world.reports.len() as u64 * world.config.batch_size as u64;
    let expected: Vec<SeqNr> = (0..generated).collect();

    if world.seen() != expected {
        return Err(format!("seen set {:?} != 0..{generated}", world.seen()));
    }

    let stats = world.stats();
    if stats.total_delivered() != generated || stats.total_dropped() != generated {
        return Err(format!(
            "expected {generated} delivered and dropped, got {} and {}",
            stats.total_delivered(),
            stats.total_dropped()
        ));
    }

    for report in &world.reports {
        for &seqnr in report.batch.as_slice() {
            let winners =
                PathId::ALL.iter().filter(|p| report.path(**p).delivered.contains(&seqnr)).count();
            if winners != 1 {
                let cycle = report.cycle;
                return Err(format!("cycle {cycle}: frame {seqnr} delivered {winners} times"));
            }
        }
    }

    Ok(())
}

//! Generation loop.
//!
//! Each cycle draws a batch, hands a private copy to each path emulator,
//! starts both on the multi-thread runtime in a random order, and waits for
//! both before the next batch. The start order is re-drawn every cycle so
//! neither path systematically reaches the engine first.

use std::sync::Arc;

use dupesim_core::{Batch, DedupEngine, Environment, PathId, SequenceSource, SimConfig};
use tokio::task::JoinHandle;

use crate::{
    error::NodeError,
    path_emulator::{PathEmulator, PathReport},
    stop::StopSignal,
};

/// Result of one generation cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Zero-based cycle number.
    pub cycle: u64,
    /// Batch sent on both paths.
    pub batch: Batch,
    /// Path that was started first.
    pub first: PathId,
    reports: [PathReport; 2],
}

impl CycleReport {
    /// Report for one path.
    pub fn path(&self, path: PathId) -> &PathReport {
        &self.reports[path.index()]
    }

    /// Frames delivered in this cycle across both paths.
    pub fn delivered(&self) -> usize {
        self.reports.iter().map(|r| r.delivered.len()).sum()
    }

    /// Frames dropped in this cycle across both paths.
    pub fn dropped(&self) -> usize {
        self.reports.iter().map(|r| r.dropped.len()).sum()
    }
}

/// Drives generation cycles against a shared [`DedupEngine`].
pub struct Orchestrator<E>
where
    E: Environment,
{
    config: SimConfig,
    source: SequenceSource,
    engine: Arc<DedupEngine<E>>,
    env: E,
    cycles: u64,
}

impl<E> Orchestrator<E>
where
    E: Environment,
{
    /// Validate `config` and build a loop starting at sequence number 0.
    pub fn new(config: SimConfig, engine: Arc<DedupEngine<E>>, env: E) -> Result<Self, NodeError> {
        config.validate()?;
        Ok(Self { config, source: SequenceSource::new(), engine, env, cycles: 0 })
    }

    /// The shared receive engine.
    pub fn engine(&self) -> &Arc<DedupEngine<E>> {
        &self.engine
    }

    /// Cycles completed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one cycle: generate, send on both paths, wait for both.
    ///
    /// If either path fails the other is still awaited before the error is
    /// returned, so no frames from this cycle are in flight afterwards.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, NodeError> {
        let batch = self.source.next_batch(self.config.batch_size)?;
        let first = if self.env.coin_flip() { PathId::A } else { PathId::B };
        let second = first.other();

        tracing::debug!(
            cycle = self.cycles,
            first = %first,
            batch = ?batch.as_slice(),
            "cycle start"
        );

        let first_task = self.spawn_path(first, &batch);
        let second_task = self.spawn_path(second, &batch);
        let (first_result, second_result) = tokio::join!(first_task, second_task);

        let first_report = Self::joined(first, first_result)?;
        let second_report = Self::joined(second, second_result)?;
        let reports = match first {
            PathId::A => [first_report, second_report],
            PathId::B => [second_report, first_report],
        };

        let report = CycleReport { cycle: self.cycles, batch, first, reports };
        self.cycles += 1;

        tracing::info!(
            cycle = report.cycle,
            first = %first,
            delivered = report.delivered(),
            dropped = report.dropped(),
            "cycle complete"
        );

        Ok(report)
    }

    /// Run cycles until `stop` fires or `max_cycles` is reached.
    ///
    /// Returns the number of cycles completed. With no limit and a signal
    /// that never fires this runs forever.
    pub async fn run(&mut self, mut stop: StopSignal) -> Result<u64, NodeError> {
        while !self.limit_reached() && !stop.is_stopped() {
            self.run_cycle().await?;
            if self.limit_reached() {
                break;
            }

            tokio::select! {
                () = self.env.sleep(self.config.inter_cycle_delay) => {},
                () = stop.stopped() => break,
            }
        }

        tracing::info!(
            cycles = self.cycles,
            seen = self.engine.len(),
            next_seqnr = self.source.peek(),
            "generation loop stopped"
        );
        Ok(self.cycles)
    }

    fn limit_reached(&self) -> bool {
        self.config.max_cycles.is_some_and(|max| self.cycles >= max)
    }

    fn spawn_path(
        &self,
        path: PathId,
        batch: &Batch,
    ) -> JoinHandle<Result<PathReport, NodeError>> {
        let emulator = PathEmulator::new(
            path,
            Arc::clone(&self.engine),
            self.env.clone(),
            self.config.inter_frame_delay,
        );
        let frames = batch.to_vec();

        tokio::spawn(async move { emulator.run(frames).await })
    }

    fn joined(
        path: PathId,
        result: Result<Result<PathReport, NodeError>, tokio::task::JoinError>,
    ) -> Result<PathReport, NodeError> {
        result.map_err(|e| NodeError::PathTask { path, reason: e.to_string() })?
    }
}

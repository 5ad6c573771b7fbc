//! Path emulation.
//!
//! A [`PathEmulator`] stands in for one LAN. It takes its own copy of a
//! batch, permutes it to mimic out-of-order delivery, and feeds every frame
//! to the shared [`DedupEngine`] with a fixed pause between frames so the two
//! paths interleave.

use std::{sync::Arc, time::Duration};

use dupesim_core::{Decision, DedupEngine, EnvRng, Environment, PathId, SeqNr};
use rand::seq::SliceRandom;

use crate::error::NodeError;

/// Outcome of one path's pass over a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReport {
    /// Path that sent the frames.
    pub path: PathId,
    /// Frames in the order they were sent.
    pub sent: Vec<SeqNr>,
    /// Frames this path delivered first.
    pub delivered: Vec<SeqNr>,
    /// Frames the other path (or an earlier copy) had already delivered.
    pub dropped: Vec<SeqNr>,
}

impl PathReport {
    fn new(path: PathId) -> Self {
        Self { path, sent: Vec::new(), delivered: Vec::new(), dropped: Vec::new() }
    }

    fn record(&mut self, seqnr: SeqNr, decision: Decision) {
        self.sent.push(seqnr);
        match decision {
            Decision::Delivered => self.delivered.push(seqnr),
            Decision::Dropped => self.dropped.push(seqnr),
        }
    }
}

/// One redundant path feeding the receiver.
pub struct PathEmulator<E>
where
    E: Environment,
{
    path: PathId,
    engine: Arc<DedupEngine<E>>,
    env: E,
    frame_delay: Duration,
}

impl<E> PathEmulator<E>
where
    E: Environment,
{
    /// Emulator for `path` delivering into `engine`.
    pub fn new(path: PathId, engine: Arc<DedupEngine<E>>, env: E, frame_delay: Duration) -> Self {
        Self { path, engine, env, frame_delay }
    }

    /// Shuffle `frames` and send them.
    pub async fn run(&self, mut frames: Vec<SeqNr>) -> Result<PathReport, NodeError> {
        frames.shuffle(&mut EnvRng(&self.env));
        tracing::trace!(path = %self.path, order = ?frames, "path order");
        self.transmit(&frames).await
    }

    /// Send `order` exactly as given, pausing after every frame.
    ///
    /// A receive failure stops the path immediately.
    pub async fn transmit(&self, order: &[SeqNr]) -> Result<PathReport, NodeError> {
        let mut report = PathReport::new(self.path);

        for &seqnr in order {
            let decision = self.engine.receive(seqnr, self.path)?;
            report.record(seqnr, decision);
            self.env.sleep(self.frame_delay).await;
        }

        Ok(report)
    }
}

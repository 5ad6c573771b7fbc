//! Duplicate discard.
//!
//! Both redundant paths feed the same [`DedupEngine`]. For every arrival the
//! engine answers one question: is this the first copy of this sequence
//! number? The membership check and the insert happen under one lock, so two
//! paths racing on the same number can never both see it as new.
//!
//! # Invariants
//!
//! - Exactly once: of all arrivals carrying a given sequence number, exactly
//!   one is [`Decision::Delivered`]
//! - No false drops: the first arrival of an unseen number is always
//!   delivered, whichever path carries it
//! - Path blindness: the path never influences the decision, so a repeat on
//!   the same path is dropped just like a cross-path copy
//!
//! The seen set grows for the life of the engine. Bounding it needs a
//! sliding window keyed by maximum path skew, which this engine does not
//! implement.

use std::{
    collections::HashSet,
    fmt,
    sync::{Mutex, PoisonError},
};

use crate::{
    env::Environment,
    error::DedupError,
    path::PathId,
    sequence::SeqNr,
    stats::DedupStats,
};

/// Outcome of receiving one frame copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// First copy: hand it to the application.
    Delivered,
    /// Redundant copy: discard it.
    Dropped,
}

impl Decision {
    /// True for [`Decision::Delivered`].
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => f.write_str("delivered"),
            Self::Dropped => f.write_str("dropped"),
        }
    }
}

/// State guarded by the engine lock.
#[derive(Debug, Default)]
struct SeenState {
    seen: HashSet<SeqNr>,
    stats: DedupStats,
}

/// Receive-side duplicate discard shared by both path emulators.
///
/// Share it behind an `Arc`; every method takes `&self`.
pub struct DedupEngine<E>
where
    E: Environment,
{
    state: Mutex<SeenState>,
    env: E,
}

impl<E> DedupEngine<E>
where
    E: Environment,
{
    /// Engine with an empty seen set.
    pub fn new(env: E) -> Self {
        Self { state: Mutex::new(SeenState::default()), env }
    }

    /// Classify one arriving copy of `seqnr` and record it.
    ///
    /// Check, insert and counter update form a single critical section. The
    /// guard is released on every exit path, including unwinding.
    pub fn receive(&self, seqnr: SeqNr, path: PathId) -> Result<Decision, DedupError> {
        let decision = {
            let mut state =
                self.state.lock().map_err(|_| DedupError::LockPoisoned { seqnr, path })?;
            // Stamped under the lock so `last_arrival` never moves backwards.
            let now = self.env.now();

            // `insert` is the check: false means the number was already there.
            let decision =
                if state.seen.insert(seqnr) { Decision::Delivered } else { Decision::Dropped };
            state.stats.record(path, decision.is_delivered(), now);
            decision
        };

        match decision {
            Decision::Dropped => {
                tracing::info!(seqnr, path = %path, outcome = %decision, "duplicate discarded");
            },
            Decision::Delivered => {
                tracing::debug!(seqnr, path = %path, outcome = %decision, "frame delivered");
            },
        }

        Ok(decision)
    }

    /// Whether `seqnr` has been delivered.
    pub fn contains(&self, seqnr: SeqNr) -> bool {
        self.read(|state| state.seen.contains(&seqnr))
    }

    /// Number of distinct sequence numbers delivered.
    pub fn len(&self) -> usize {
        self.read(|state| state.seen.len())
    }

    /// True if nothing has been delivered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted snapshot of the seen set.
    pub fn seen(&self) -> Vec<SeqNr> {
        let mut seen: Vec<_> = self.read(|state| state.seen.iter().copied().collect());
        seen.sort_unstable();
        seen
    }

    /// Snapshot of per-path counters.
    pub fn stats(&self) -> DedupStats {
        self.read(|state| state.stats)
    }

    // Readers never mutate, so a poisoned lock still holds a consistent view.
    fn read<T>(&self, f: impl FnOnce(&SeenState) -> T) -> T {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }
}

impl<E> fmt::Debug for DedupEngine<E>
where
    E: Environment,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DedupEngine").field("seen", &self.len()).finish_non_exhaustive()
    }
}

//! Model receiver - the reference implementation.

use std::collections::BTreeSet;

use dupesim_core::{Decision, PathId, SeqNr};

use super::operation::Operation;

/// Single-threaded duplicate discard with no locking.
#[derive(Debug, Clone, Default)]
pub struct ModelReceiver {
    seen: BTreeSet<SeqNr>,
    delivered: u64,
    dropped: u64,
}

impl ModelReceiver {
    /// Empty receiver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one arrival.
    pub fn receive(&mut self, seqnr: SeqNr, _path: PathId) -> Decision {
        if self.seen.insert(seqnr) {
            self.delivered += 1;
            Decision::Delivered
        } else {
            self.dropped += 1;
            Decision::Dropped
        }
    }

    /// Apply an operation, returning one decision per arrival.
    pub fn apply(&mut self, op: &Operation) -> Vec<Decision> {
        op.arrivals().into_iter().map(|(seqnr, path)| self.receive(seqnr, path)).collect()
    }

    /// Delivered sequence numbers, ascending.
    pub fn seen(&self) -> Vec<SeqNr> {
        self.seen.iter().copied().collect()
    }

    /// Number of delivered arrivals.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Number of dropped arrivals.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelPath;

    #[test]
    fn model_basic_operations() {
        let mut model = ModelReceiver::new();

        let decisions = model.apply(&Operation::ReceivePair { seqnr: 1, first: ModelPath::A });
        assert_eq!(decisions, vec![Decision::Delivered, Decision::Dropped]);

        let decisions = model.apply(&Operation::Receive { seqnr: 1, path: ModelPath::B });
        assert_eq!(decisions, vec![Decision::Dropped]);

        let decisions = model.apply(&Operation::Receive { seqnr: 2, path: ModelPath::B });
        assert_eq!(decisions, vec![Decision::Delivered]);

        assert_eq!(model.seen(), vec![1, 2]);
        assert_eq!(model.delivered(), 2);
        assert_eq!(model.dropped(), 2);
    }
}

//! Sequence number generation.
//!
//! The sender side of the link stamps every frame with the next number from
//! a single counter. Numbers are strictly increasing and gap-free starting
//! at 0, which is what lets the receiver treat a repeated number as a
//! redundant copy.

use crate::error::SequenceError;

/// Sequence number carried by every frame.
pub type SeqNr = u64;

/// Consecutive sequence numbers produced by one generation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch(Vec<SeqNr>);

impl Batch {
    /// Sequence numbers in assignment order.
    pub fn as_slice(&self) -> &[SeqNr] {
        &self.0
    }

    /// Number of frames in the batch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the batch carries no frames.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Private copy for one path. Shuffling it never affects the other path.
    pub fn to_vec(&self) -> Vec<SeqNr> {
        self.0.clone()
    }
}

/// Monotonic sequence counter.
///
/// Owned by the orchestrator and called sequentially, so it needs no lock.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    next: SeqNr,
}

impl SequenceSource {
    /// Counter starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequence number that will be assigned.
    pub fn peek(&self) -> SeqNr {
        self.next
    }

    /// Returns `[next, next + n)` and advances the counter by `n`.
    ///
    /// Fails without advancing if the range would overflow `u64`; wrapping
    /// would hand out numbers the receiver has already seen.
    pub fn next_batch(&mut self, n: usize) -> Result<Batch, SequenceError> {
        let exhausted = SequenceError::Exhausted { next: self.next, requested: n };
        let end = SeqNr::try_from(n)
            .ok()
            .and_then(|count| self.next.checked_add(count))
            .ok_or(exhausted)?;

        let batch = Batch((self.next..end).collect());
        self.next = end;
        Ok(batch)
    }
}

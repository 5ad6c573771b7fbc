//! Operations for model-based testing.
//!
//! Operations are generated by proptest (or decoded from raw bytes) and
//! applied to both the model and the real engine.

use arbitrary::{Arbitrary, Unstructured};
use dupesim_core::{PathId, SeqNr};

/// Sequence number space for tests (u8 keeps collisions frequent).
pub type ModelSeqNr = u8;

/// Path label that can be generated arbitrarily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum ModelPath {
    /// LAN A
    A,
    /// LAN B
    B,
}

impl From<ModelPath> for PathId {
    fn from(path: ModelPath) -> Self {
        match path {
            ModelPath::A => Self::A,
            ModelPath::B => Self::B,
        }
    }
}

/// Receive-side events.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// One copy of a frame arrives.
    Receive {
        /// Sequence number carried by the copy.
        seqnr: ModelSeqNr,
        /// Path it arrived on.
        path: ModelPath,
    },

    /// Both redundant copies of a frame arrive back to back.
    ReceivePair {
        /// Sequence number carried by both copies.
        seqnr: ModelSeqNr,
        /// Path whose copy lands first.
        first: ModelPath,
    },
}

impl Operation {
    /// The individual `(seqnr, path)` arrivals this operation expands to.
    pub fn arrivals(&self) -> Vec<(SeqNr, PathId)> {
        match *self {
            Self::Receive { seqnr, path } => vec![(SeqNr::from(seqnr), path.into())],
            Self::ReceivePair { seqnr, first } => {
                let first = PathId::from(first);
                vec![(SeqNr::from(seqnr), first), (SeqNr::from(seqnr), first.other())]
            },
        }
    }

    /// Decode an operation sequence from raw bytes.
    ///
    /// Any byte string decodes to some (possibly empty) sequence, which makes
    /// recorded failures easy to replay.
    pub fn sequence_from_bytes(bytes: &[u8]) -> Vec<Self> {
        Vec::<Self>::arbitrary_take_rest(Unstructured::new(bytes)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_expands_to_both_paths() {
        let op = Operation::ReceivePair { seqnr: 4, first: ModelPath::B };
        assert_eq!(op.arrivals(), vec![(4, PathId::B), (4, PathId::A)]);
    }

    #[test]
    fn decoding_is_deterministic() {
        // A leading zero byte ends the sequence immediately, so start at 1.
        let bytes: Vec<u8> = (1..=255).collect();
        let first = Operation::sequence_from_bytes(&bytes);
        let second = Operation::sequence_from_bytes(&bytes);

        assert!(first.len() >= 10, "decoded only {} operations", first.len());

        let flatten =
            |ops: &[Operation]| ops.iter().flat_map(Operation::arrivals).collect::<Vec<_>>();
        assert_eq!(flatten(&first), flatten(&second));
    }

    #[test]
    fn empty_bytes_decode_to_nothing() {
        assert!(Operation::sequence_from_bytes(&[]).is_empty());
    }

    #[test]
    fn leading_zero_decodes_to_nothing() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert!(Operation::sequence_from_bytes(&bytes).is_empty());
    }
}

//! Per-path receive statistics.
//!
//! Counters live under the same lock as the seen set, so a snapshot always
//! satisfies `received == delivered + dropped` for each path and the total
//! delivered count equals the seen-set size.

use std::time::Instant;

use crate::PathId;

/// Receive counters for a single path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStats {
    /// Frames that arrived on this path.
    pub received: u64,
    /// Arrivals that were the first copy of their sequence number.
    pub delivered: u64,
    /// Arrivals discarded as duplicates.
    pub dropped: u64,
    /// When the last frame arrived on this path.
    pub last_arrival: Option<Instant>,
}

/// Snapshot of both paths' counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    paths: [PathStats; 2],
}

impl DedupStats {
    /// Counters for one path.
    pub fn path(&self, path: PathId) -> &PathStats {
        &self.paths[path.index()]
    }

    pub(crate) fn record(&mut self, path: PathId, delivered: bool, at: Instant) {
        let stats = &mut self.paths[path.index()];
        stats.received += 1;
        if delivered {
            stats.delivered += 1;
        } else {
            stats.dropped += 1;
        }
        stats.last_arrival = Some(at);
    }

    /// Frames received across both paths.
    pub fn total_received(&self) -> u64 {
        self.paths.iter().map(|p| p.received).sum()
    }

    /// Distinct frames delivered.
    pub fn total_delivered(&self) -> u64 {
        self.paths.iter().map(|p| p.delivered).sum()
    }

    /// Duplicates discarded across both paths.
    pub fn total_dropped(&self) -> u64 {
        self.paths.iter().map(|p| p.dropped).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splits_by_outcome() {
        let now = Instant::now();
        let mut stats = DedupStats::default();

        stats.record(PathId::A, true, now);
        stats.record(PathId::B, false, now);
        stats.record(PathId::B, true, now);

        assert_eq!(stats.path(PathId::A).delivered, 1);
        assert_eq!(stats.path(PathId::B).received, 2);
        assert_eq!(stats.path(PathId::B).dropped, 1);
        assert_eq!(stats.total_received(), 3);
        assert_eq!(stats.total_delivered(), 2);
        assert_eq!(stats.total_dropped(), 1);
    }

    #[test]
    fn last_arrival_tracks_latest() {
        let earlier = Instant::now();
        let later = earlier + std::time::Duration::from_millis(5);
        let mut stats = DedupStats::default();

        assert_eq!(stats.path(PathId::A).last_arrival, None);
        stats.record(PathId::A, true, earlier);
        stats.record(PathId::A, false, later);

        assert_eq!(stats.path(PathId::A).last_arrival, Some(later));
        assert_eq!(stats.path(PathId::B).last_arrival, None);
    }
}

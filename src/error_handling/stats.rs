//! Processing statistics tracking.
//!
//! Counts skipped tokens and degraded lookups during a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{DegradedType, SkipType};

/// Per-run counters for skipped tokens and degraded lookups.
///
/// Every enum variant is initialized to zero on creation, so lookups never
/// miss.
pub struct ProcessingStats {
    skips: HashMap<SkipType, AtomicUsize>,
    degraded: HashMap<DegradedType, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        let mut skips = HashMap::new();
        for skip in SkipType::iter() {
            skips.insert(skip, AtomicUsize::new(0));
        }

        let mut degraded = HashMap::new();
        for kind in DegradedType::iter() {
            degraded.insert(kind, AtomicUsize::new(0));
        }

        ProcessingStats { skips, degraded }
    }

    /// Increment a skip counter.
    pub fn increment_skip(&self, skip: SkipType) {
        if let Some(counter) = self.skips.get(&skip) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment skip counter for {:?} which is not in the map",
                skip
            );
        }
    }

    /// Increment a degraded-lookup counter.
    pub fn increment_degraded(&self, kind: DegradedType) {
        if let Some(counter) = self.degraded.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment degraded counter for {:?} which is not in the map",
                kind
            );
        }
    }

    /// Get the count for a skip reason.
    pub fn get_skip_count(&self, skip: SkipType) -> usize {
        self.skips
            .get(&skip)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for a degraded lookup kind.
    pub fn get_degraded_count(&self, kind: DegradedType) -> usize {
        self.degraded
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of skipped tokens.
    pub fn total_skipped(&self) -> usize {
        SkipType::iter().map(|s| self.get_skip_count(s)).sum()
    }

    /// Total number of degraded lookups.
    pub fn total_degraded(&self) -> usize {
        DegradedType::iter()
            .map(|d| self.get_degraded_count(d))
            .sum()
    }
}

//! Highlight candidates and the selected highlight set.

use crate::signal::SignalKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scored time window proposed for inclusion in the highlight set.
///
/// The window always lies inside a single main-content scene. `signals`
/// holds the per-signal values at the window's peak sample; the map is
/// ordered so serialized output is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightCandidate {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Composite score at the window's peak, in [0, 1]
    pub score: f64,
    /// Contributing signal values at the peak sample
    pub signals: BTreeMap<SignalKind, f64>,
    /// Index of the scene containing the window
    pub scene_index: usize,
}

impl HighlightCandidate {
    /// Duration of the window in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &HighlightCandidate) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest gap between two non-overlapping windows, in seconds.
    ///
    /// Returns 0 for overlapping windows.
    pub fn gap_to(&self, other: &HighlightCandidate) -> f64 {
        if self.overlaps(other) {
            0.0
        } else if self.end <= other.start {
            other.start - self.end
        } else {
            self.start - other.end
        }
    }
}

/// The final, non-overlapping, budget-respecting selection.
///
/// Clips are ordered by start time. `total_duration` is the sum of the
/// selected clip durations and never exceeds the configured budget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighlightSet {
    /// Selected clips, time-ordered
    pub clips: Vec<HighlightCandidate>,
    /// Total selected duration in seconds
    pub total_duration: f64,
}

impl HighlightSet {
    /// Build a set from time-ordered clips.
    pub fn new(clips: Vec<HighlightCandidate>) -> Self {
        let total_duration = clips.iter().map(|c| c.duration()).sum();
        Self {
            clips,
            total_duration,
        }
    }

    /// Number of selected clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// True when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

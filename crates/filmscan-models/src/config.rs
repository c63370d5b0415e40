//! Configuration for the analysis pipeline.
//!
//! One immutable `AnalysisConfig` is built before the run and passed by
//! reference to every stage. Stages never mutate it and no configuration
//! is read from ambient state.

use crate::signal::SignalKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // === Sampling ===
    /// Frames per second to sample for analysis (default: 1.0)
    pub sample_fps: f64,

    /// Cap on the analyzed span in seconds; non-positive means whole video
    /// (default: 600.0). This is also the only cancellation mechanism: the
    /// pipeline never decodes past it.
    pub duration_limit: f64,

    // === Scene segmentation ===
    /// Chi-squared histogram distance above which a scene boundary is
    /// declared (default: 0.5). Higher = fewer cuts.
    pub scene_threshold: f64,

    /// Minimum scene duration in seconds; boundaries closer than this to
    /// the open scene's start are merged into it (default: 2.0)
    pub min_scene_length: f64,

    // === Content classification ===
    /// How many scenes at each edge of the file are intro/outro candidates
    /// (default: 2)
    pub boundary_scene_count: usize,

    /// Chi-squared distance below which two non-adjacent scenes count as
    /// repeated content, i.e. an advertisement insert (default: 0.05)
    pub repetition_similarity: f64,

    // === Signals and scoring ===
    /// Per-signal fusion weights; missing entries default to 1.0. Weights
    /// are renormalized over the signals actually available at runtime.
    pub signal_weights: BTreeMap<SignalKind, f64>,

    /// Composite score a sample must exceed to seed a highlight window
    /// (default: 0.35)
    pub min_interest: f64,

    /// Skin-coverage fraction that maps to a presence value of 1.0
    /// (default: 0.25)
    pub presence_cap: f64,

    // === Highlight selection ===
    /// Target total highlight duration in seconds (default: 60.0)
    pub highlight_budget: f64,

    /// Minimum length of a single clip in seconds (default: 3.0)
    pub min_clip_length: f64,

    /// Maximum length of a single clip in seconds (default: 30.0)
    pub max_clip_length: f64,

    /// Minimum gap between two selected clips in seconds (default: 2.0)
    pub min_gap: f64,

    /// Hard cap on the number of selected clips (default: 10)
    pub max_highlights: usize,

    // === Execution ===
    /// Worker threads for per-scene signal extraction (default: 4)
    pub worker_count: usize,

    /// BCP 47 language tag threaded through for downstream text
    /// generators; the analysis itself never reads it (default: "en")
    pub language: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            // Sampling - 1 fps is enough for scene boundaries and scoring
            sample_fps: 1.0,
            duration_limit: 600.0,

            // Segmentation
            scene_threshold: 0.5,
            min_scene_length: 2.0,

            // Classification
            boundary_scene_count: 2,
            repetition_similarity: 0.05,

            // Signals - equal weights unless overridden
            signal_weights: BTreeMap::new(),
            min_interest: 0.35,
            presence_cap: 0.25,

            // Selection
            highlight_budget: 60.0,
            min_clip_length: 3.0,
            max_clip_length: 30.0,
            min_gap: 2.0,
            max_highlights: 10,

            // Execution
            worker_count: 4,
            language: "en".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Fast configuration for quick previews: sparser sampling, shorter
    /// analyzed span.
    pub fn fast() -> Self {
        Self {
            sample_fps: 0.5,
            duration_limit: 300.0,
            ..Default::default()
        }
    }

    /// Thorough configuration for full-length features: denser sampling,
    /// no span cap, more sensitive boundary detection.
    pub fn thorough() -> Self {
        Self {
            sample_fps: 2.0,
            duration_limit: 0.0,
            scene_threshold: 0.4,
            ..Default::default()
        }
    }

    /// Fusion weight for a signal; signals without an explicit entry get
    /// 1.0. A weight of exactly 0.0 disables the signal.
    pub fn weight_for(&self, kind: SignalKind) -> f64 {
        self.signal_weights.get(&kind).copied().unwrap_or(1.0)
    }

    /// Interval between consecutive frame samples, in seconds.
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_fps
    }

    /// Validate the configuration before a run.
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_fps <= 0.0 {
            return Err("sample_fps must be positive".to_string());
        }
        if self.scene_threshold <= 0.0 {
            return Err("scene_threshold must be positive".to_string());
        }
        if self.min_scene_length < 0.0 {
            return Err("min_scene_length must not be negative".to_string());
        }
        if self.min_clip_length <= 0.0 || self.max_clip_length < self.min_clip_length {
            return Err("clip length bounds must satisfy 0 < min <= max".to_string());
        }
        if self.highlight_budget < 0.0 {
            return Err("highlight_budget must not be negative".to_string());
        }
        if self.min_gap < 0.0 {
            return Err("min_gap must not be negative".to_string());
        }
        if self.worker_count == 0 {
            return Err("worker_count must be at least 1".to_string());
        }
        if let Some((kind, weight)) = self
            .signal_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(format!("weight for {kind} must be finite and non-negative, got {weight}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
        assert!(AnalysisConfig::fast().validate().is_ok());
        assert!(AnalysisConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_weight_defaults_to_one() {
        let mut config = AnalysisConfig::default();
        assert!((config.weight_for(SignalKind::Motion) - 1.0).abs() < f64::EPSILON);

        config.signal_weights.insert(SignalKind::Motion, 2.5);
        assert!((config.weight_for(SignalKind::Motion) - 2.5).abs() < f64::EPSILON);
        assert!((config.weight_for(SignalKind::Color) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_rejects_bad_bounds() {
        let mut config = AnalysisConfig::default();
        config.max_clip_length = 1.0; // below min_clip_length
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.sample_fps = 0.0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.signal_weights.insert(SignalKind::Color, -1.0);
        assert!(config.validate().is_err());
    }
}

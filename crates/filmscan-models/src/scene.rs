//! Scene records produced by the segmenter and labeled by the classifier.

use serde::{Deserialize, Serialize};

/// Content classification of a scene.
///
/// The label set is closed: every scene receives exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    /// Opening titles / credits at the head of the file
    Intro,
    /// Closing credits at the tail of the file
    Outro,
    /// Inserted advertisement or repeated bumper segment
    Advertisement,
    /// Narrative content — the only kind considered for highlights
    #[default]
    MainContent,
}

impl ContentKind {
    /// Returns the label as the string used in the analysis report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Outro => "outro",
            Self::Advertisement => "advertisement",
            Self::MainContent => "main-content",
        }
    }

    /// Returns true for narrative content.
    pub fn is_main(&self) -> bool {
        matches!(self, Self::MainContent)
    }
}

/// Aggregate feature summary of a scene, accumulated during segmentation.
///
/// All values are normalized: brightness and motion are in [0, 1], the
/// histogram is L1-normalized.
#[derive(Debug, Clone, Default)]
pub struct SceneSummary {
    /// Number of frame samples that fell into the scene
    pub sample_count: usize,
    /// Mean luma over the scene's samples
    pub mean_brightness: f64,
    /// Mean frame-to-frame motion magnitude
    pub mean_motion: f64,
    /// Variance of the motion magnitude
    pub motion_variance: f64,
    /// Mean color histogram over the scene's samples
    pub mean_histogram: Vec<f32>,
}

/// A contiguous time range treated as visually continuous.
///
/// The ordered scene list exactly partitions `[0, analyzed_duration)`:
/// ascending start times, no gaps, no overlaps. `kind` is assigned exactly
/// once by the content classifier; everything else is set by the segmenter.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Zero-based position in the scene list
    pub index: usize,
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
    /// Content classification
    pub kind: ContentKind,
    /// Extracted feature summary
    pub summary: SceneSummary,
}

impl Scene {
    /// Duration of the scene in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether a timestamp falls inside the scene's half-open range.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

//! The externally visible analysis report.
//!
//! This is the sole contract with downstream consumers (subtitle
//! extraction, screenplay/narration generation, clip export). The JSON
//! shape is fixed:
//!
//! ```json
//! {
//!   "video_info": {"duration": 0.0, "resolution": "WxH", "fps": 0.0},
//!   "scenes": [{"start": 0.0, "end": 0.0, "type": "main-content"}],
//!   "highlights": [{"start": 0.0, "end": 0.0, "score": 0.0, "signals": {}}],
//!   "warnings": []
//! }
//! ```

use crate::highlight::HighlightSet;
use crate::scene::{ContentKind, Scene};
use crate::signal::SignalKind;
use crate::video::VideoInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Condensed video descriptor as it appears in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummary {
    /// Duration in seconds
    pub duration: f64,
    /// Resolution rendered as "WxH"
    pub resolution: String,
    /// Frame rate
    pub fps: f64,
}

impl From<&VideoInfo> for VideoSummary {
    fn from(info: &VideoInfo) -> Self {
        Self {
            duration: info.duration,
            resolution: info.resolution(),
            fps: info.fps,
        }
    }
}

/// One scene as it appears in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
    /// Content classification
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

impl From<&Scene> for SceneRecord {
    fn from(scene: &Scene) -> Self {
        Self {
            start: scene.start,
            end: scene.end,
            kind: scene.kind,
        }
    }
}

/// One selected highlight as it appears in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightRecord {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Composite score in [0, 1]
    pub score: f64,
    /// Contributing signal values at the window's peak
    pub signals: BTreeMap<SignalKind, f64>,
}

/// Soft-degradation markers attached to the report instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// The highlight budget could not be fully met; a best-effort shorter
    /// set was returned.
    InsufficientHighlights {
        /// Requested budget in seconds
        requested_secs: f64,
        /// Actually selected duration in seconds
        selected_secs: f64,
    },
    /// A configured signal extractor could not run; its weight was
    /// excluded and the remaining weights renormalized.
    ExtractorUnavailable {
        /// The affected signal
        signal: SignalKind,
    },
}

/// Aggregate result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Source video descriptor
    pub video_info: VideoSummary,
    /// The full scene partition, time-ordered
    pub scenes: Vec<SceneRecord>,
    /// Selected highlights, time-ordered
    pub highlights: Vec<HighlightRecord>,
    /// Soft-degradation markers raised during the run
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisReport {
    /// Assemble a report from the pipeline's stage outputs.
    pub fn assemble(
        info: &VideoInfo,
        scenes: &[Scene],
        highlights: &HighlightSet,
        warnings: Vec<AnalysisWarning>,
    ) -> Self {
        Self {
            video_info: VideoSummary::from(info),
            scenes: scenes.iter().map(SceneRecord::from).collect(),
            highlights: highlights
                .clips
                .iter()
                .map(|clip| HighlightRecord {
                    start: clip.start,
                    end: clip.end,
                    score: clip.score,
                    signals: clip.signals.clone(),
                })
                .collect(),
            warnings,
        }
    }

    /// Serialize to the canonical JSON form.
    ///
    /// The output is deterministic for identical inputs: all maps are
    /// ordered and no timestamps or random identifiers are embedded.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

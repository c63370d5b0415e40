//! Shared data models for the Filmscan analysis pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Video descriptors and scene records
//! - Normalized signal samples used for highlight scoring
//! - Highlight candidates and the final highlight set
//! - The externally visible analysis report
//! - The immutable analysis configuration

pub mod config;
pub mod highlight;
pub mod report;
pub mod scene;
pub mod signal;
pub mod video;

// Re-export common types
pub use config::AnalysisConfig;
pub use highlight::{HighlightCandidate, HighlightSet};
pub use report::{AnalysisReport, AnalysisWarning, HighlightRecord, SceneRecord, VideoSummary};
pub use scene::{ContentKind, Scene, SceneSummary};
pub use signal::{SignalKind, SignalSample};
pub use video::VideoInfo;

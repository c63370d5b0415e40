//! Scene segmentation, content classification, and highlight selection.
//!
//! The pipeline runs strictly forward:
//!
//! frame sampling → scene segmentation → content classification →
//! signal extraction (main content only) → score fusion → budgeted
//! selection → [`filmscan_models::AnalysisReport`].
//!
//! Segmentation is sequential by design (each boundary decision depends on
//! the previous reference frame); signal extraction fans out over a worker
//! pool and is merged back in timestamp order.

pub mod classify;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod segmenter;
pub mod selector;
pub mod signals;

pub use classify::{ClassifyRule, ContentClassifier};
pub use error::{AnalysisError, AnalysisResult};
pub use pipeline::{analyze_video, run_analysis, Pipeline};
pub use scorer::HighlightScorer;
pub use segmenter::SceneSegmenter;
pub use signals::{default_extractors, SignalExtractor};

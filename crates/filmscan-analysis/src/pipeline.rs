//! Pipeline orchestration: sampling through report assembly.
//!
//! This stage owns no algorithmic logic. It validates the configuration,
//! drives the stages in order, and assembles the report. The configuration
//! is threaded explicitly into every stage call; nothing reads ambient
//! state.

use std::path::Path;

use filmscan_media::{collect_features, probe_video, FfmpegFrameSource, FrameSource};
use filmscan_models::{AnalysisConfig, AnalysisReport};
use tracing::info;

use crate::classify::ContentClassifier;
use crate::error::{AnalysisError, AnalysisResult};
use crate::scorer::HighlightScorer;
use crate::segmenter::SceneSegmenter;
use crate::selector::select;
use crate::signals::{default_extractors, extract_all, SignalExtractor};

/// The assembled analysis pipeline.
///
/// Holds the configuration plus the replaceable stages (classifier rule
/// chain, extractor set). `run` may be called repeatedly over different
/// sources; the pipeline itself is immutable during a run.
pub struct Pipeline {
    config: AnalysisConfig,
    classifier: ContentClassifier,
    extractors: Vec<Box<dyn SignalExtractor>>,
}

impl Pipeline {
    /// Pipeline with the standard classifier chain and extractor set.
    pub fn new(config: AnalysisConfig) -> Self {
        let extractors = default_extractors(&config);
        Self {
            config,
            classifier: ContentClassifier::new(),
            extractors,
        }
    }

    /// Replace the classifier rule chain.
    pub fn with_classifier(mut self, classifier: ContentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the extractor set. An empty set is legal and yields an
    /// empty highlight set.
    pub fn with_extractors(mut self, extractors: Vec<Box<dyn SignalExtractor>>) -> Self {
        self.extractors = extractors;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis over a frame source.
    pub fn run(&self, source: &mut dyn FrameSource) -> AnalysisResult<AnalysisReport> {
        self.config
            .validate()
            .map_err(AnalysisError::InvalidConfig)?;

        let info = source.info().clone();
        info!(
            duration = info.duration,
            resolution = %info.resolution(),
            sample_fps = self.config.sample_fps,
            "Starting analysis"
        );

        let features = collect_features(source, self.config.duration_limit)?;
        let analyzed_end = info.analyzed_duration(self.config.duration_limit);

        let mut scenes = SceneSegmenter::new(&self.config).segment(&features, analyzed_end)?;
        self.classifier.apply(&mut scenes, &self.config);

        let (series, mut warnings) =
            extract_all(&scenes, &features, &self.extractors, &self.config)?;
        let candidates = HighlightScorer::new(&self.config).score(&series, &scenes);
        let (highlights, selection_warnings) = select(candidates, &self.config);
        warnings.extend(selection_warnings);

        info!(
            scenes = scenes.len(),
            highlights = highlights.len(),
            warnings = warnings.len(),
            "Analysis complete"
        );
        Ok(AnalysisReport::assemble(&info, &scenes, &highlights, warnings))
    }
}

/// One-shot analysis over an already-open frame source.
pub fn run_analysis(
    source: &mut dyn FrameSource,
    config: AnalysisConfig,
) -> AnalysisResult<AnalysisReport> {
    Pipeline::new(config).run(source)
}

/// Probe and analyze a video file.
///
/// Probing is async; decoding and analysis run on a blocking worker since
/// they are CPU- and pipe-bound.
pub async fn analyze_video(
    path: impl AsRef<Path>,
    config: AnalysisConfig,
) -> AnalysisResult<AnalysisReport> {
    let path = path.as_ref().to_path_buf();
    let info = probe_video(&path).await?;

    let pipeline = Pipeline::new(config);
    let mut source = FfmpegFrameSource::open(
        &path,
        info,
        pipeline.config.sample_fps,
        pipeline.config.duration_limit,
    )?;

    tokio::task::spawn_blocking(move || pipeline.run(&mut source))
        .await
        .map_err(|e| AnalysisError::WorkerPool(e.to_string()))?
}

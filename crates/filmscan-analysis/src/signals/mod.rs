//! Signal extraction over main-content scenes.
//!
//! Each extractor is a pure function from a scene's feature samples to a
//! normalized [0, 1] time series. Extraction fans out over a bounded
//! worker pool (scene x extractor tasks are independent and read-only)
//! and the per-signal series are merged back in timestamp order, so the
//! output never depends on worker completion order.

mod color;
mod motion;
mod presence;

pub use color::ColorExtractor;
pub use motion::MotionExtractor;
pub use presence::PresenceExtractor;

use std::collections::BTreeMap;

use filmscan_media::FrameFeatures;
use filmscan_models::{AnalysisConfig, AnalysisWarning, Scene, SignalKind, SignalSample};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{AnalysisError, AnalysisResult};

/// A single feature extractor producing one named signal.
///
/// Extractors are independently replaceable: dropping one removes its
/// contribution from fusion and nothing else.
pub trait SignalExtractor: Send + Sync {
    /// Which signal this extractor produces.
    fn kind(&self) -> SignalKind;

    /// Whether the extractor can run in this environment. Unavailable
    /// extractors are skipped with a warning rather than failing the run.
    fn available(&self) -> bool {
        true
    }

    /// Produce the signal series for one scene's samples.
    ///
    /// `samples` covers exactly the scene's time range, in ascending
    /// order. Values must be in [0, 1].
    fn extract(&self, scene: &Scene, samples: &[FrameFeatures]) -> Vec<SignalSample>;
}

/// The standard extractor set: motion, color, presence.
pub fn default_extractors(config: &AnalysisConfig) -> Vec<Box<dyn SignalExtractor>> {
    vec![
        Box::new(MotionExtractor),
        Box::new(ColorExtractor),
        Box::new(PresenceExtractor::new(config)),
    ]
}

/// Run every usable extractor over every main-content scene.
///
/// Returns one timestamp-ordered series per signal plus warnings for
/// extractors that were skipped. Signals with a configured weight of
/// exactly 0.0 are disabled silently; unavailable extractors warn.
pub fn extract_all(
    scenes: &[Scene],
    features: &[FrameFeatures],
    extractors: &[Box<dyn SignalExtractor>],
    config: &AnalysisConfig,
) -> AnalysisResult<(BTreeMap<SignalKind, Vec<SignalSample>>, Vec<AnalysisWarning>)> {
    let mut warnings = Vec::new();
    let mut active: Vec<&dyn SignalExtractor> = Vec::new();

    for extractor in extractors {
        if !extractor.available() {
            warn!(signal = %extractor.kind(), "Extractor unavailable, excluding from fusion");
            warnings.push(AnalysisWarning::ExtractorUnavailable {
                signal: extractor.kind(),
            });
            continue;
        }
        if config.weight_for(extractor.kind()) == 0.0 {
            debug!(signal = %extractor.kind(), "Extractor disabled by zero weight");
            continue;
        }
        active.push(extractor.as_ref());
    }

    let mut tasks: Vec<(&Scene, &[FrameFeatures], &dyn SignalExtractor)> = Vec::new();
    for scene in scenes.iter().filter(|s| s.kind.is_main()) {
        let slice = scene_samples(scene, features);
        for extractor in &active {
            tasks.push((scene, slice, *extractor));
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .build()
        .map_err(|e| AnalysisError::WorkerPool(e.to_string()))?;

    let results: Vec<(SignalKind, Vec<SignalSample>)> = pool.install(|| {
        tasks
            .par_iter()
            .map(|(scene, slice, extractor)| (extractor.kind(), extractor.extract(scene, slice)))
            .collect()
    });

    // Merge and re-sort: completion order is not timestamp order.
    let mut series: BTreeMap<SignalKind, Vec<SignalSample>> = BTreeMap::new();
    for (kind, samples) in results {
        series.entry(kind).or_default().extend(samples);
    }
    for samples in series.values_mut() {
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    info!(
        signals = series.len(),
        samples = series.values().map(Vec::len).sum::<usize>(),
        "Signal extraction complete"
    );
    Ok((series, warnings))
}

/// The contiguous feature slice covering a scene's half-open range.
fn scene_samples<'a>(scene: &Scene, features: &'a [FrameFeatures]) -> &'a [FrameFeatures] {
    let lo = features.partition_point(|f| f.time < scene.start);
    let hi = features.partition_point(|f| f.time < scene.end);
    &features[lo..hi]
}

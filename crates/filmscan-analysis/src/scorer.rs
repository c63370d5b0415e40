//! Composite scoring: per-signal series fused into highlight candidates.
//!
//! Fusion is a weighted sum renormalized over the signals actually
//! present, so disabling an extractor rescales the remaining weights
//! instead of deflating every score. Candidate windows come from maximal
//! runs of the composite above the minimum-interest threshold, one window
//! per run, expanded to the minimum clip length and capped at the maximum.

use std::collections::BTreeMap;

use filmscan_models::{AnalysisConfig, HighlightCandidate, Scene, SignalKind, SignalSample};
use tracing::{debug, info};

/// One fused sample of the composite score series.
#[derive(Debug, Clone)]
struct CompositePoint {
    time: f64,
    value: f64,
    signals: BTreeMap<SignalKind, f64>,
}

/// Fuses signal series and proposes highlight candidates.
pub struct HighlightScorer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> HighlightScorer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Produce scored candidate windows from the per-signal series.
    ///
    /// `scenes` is the full labeled partition; candidates never cross a
    /// scene boundary. Candidates come back in start-time order.
    pub fn score(
        &self,
        series: &BTreeMap<SignalKind, Vec<SignalSample>>,
        scenes: &[Scene],
    ) -> Vec<HighlightCandidate> {
        let points = self.fuse(series);
        let candidates = self.candidates(&points, scenes);
        info!(
            samples = points.len(),
            candidates = candidates.len(),
            "Scoring complete"
        );
        candidates
    }

    /// Weighted fusion, renormalized over the signals present in `series`.
    fn fuse(&self, series: &BTreeMap<SignalKind, Vec<SignalSample>>) -> Vec<CompositePoint> {
        let weights: BTreeMap<SignalKind, f64> = series
            .keys()
            .map(|kind| (*kind, self.config.weight_for(*kind)))
            .filter(|(_, w)| *w > 0.0)
            .collect();
        let total_weight: f64 = weights.values().sum();
        if total_weight <= 0.0 {
            return Vec::new();
        }

        // Key timestamps in integer milliseconds so float noise can't
        // split one sample into two map entries.
        let mut merged: BTreeMap<i64, BTreeMap<SignalKind, f64>> = BTreeMap::new();
        for (kind, samples) in series {
            if !weights.contains_key(kind) {
                continue;
            }
            for sample in samples {
                let key = (sample.time * 1000.0).round() as i64;
                merged.entry(key).or_default().insert(*kind, sample.value);
            }
        }

        merged
            .into_iter()
            .map(|(key, signals)| {
                let value = signals
                    .iter()
                    .map(|(kind, v)| weights[kind] * v)
                    .sum::<f64>()
                    / total_weight;
                CompositePoint {
                    time: key as f64 / 1000.0,
                    value,
                    signals,
                }
            })
            .collect()
    }

    /// One candidate per maximal above-threshold run within a scene.
    fn candidates(
        &self,
        points: &[CompositePoint],
        scenes: &[Scene],
    ) -> Vec<HighlightCandidate> {
        let mut out = Vec::new();
        let mut run: Vec<&CompositePoint> = Vec::new();
        let mut run_scene: Option<&Scene> = None;

        for point in points {
            let scene = scenes
                .iter()
                .find(|s| s.contains(point.time))
                .filter(|s| s.kind.is_main());

            let continues = point.value > self.config.min_interest
                && scene.is_some()
                && match (run_scene, scene) {
                    (Some(a), Some(b)) => a.index == b.index,
                    _ => run.is_empty(),
                };

            if continues {
                if run.is_empty() {
                    run_scene = scene;
                }
                run.push(point);
                continue;
            }

            if let Some(owner) = run_scene.take() {
                out.push(self.build_window(&run, owner));
                run.clear();
            }
            // The current point may itself start a new run.
            if point.value > self.config.min_interest {
                if let Some(owner) = scene {
                    run_scene = Some(owner);
                    run.push(point);
                }
            }
        }
        if let Some(owner) = run_scene {
            if !run.is_empty() {
                out.push(self.build_window(&run, owner));
            }
        }

        out
    }

    /// Turn a run of above-threshold points into a candidate window.
    fn build_window(&self, run: &[&CompositePoint], scene: &Scene) -> HighlightCandidate {
        let interval = self.config.sample_interval();
        let peak = run
            .iter()
            .max_by(|a, b| a.value.total_cmp(&b.value))
            .unwrap_or(&run[0]);

        let mut start = run[0].time.max(scene.start);
        let mut end = (run[run.len() - 1].time + interval).min(scene.end);

        // Grow short windows to the minimum clip length, staying inside
        // the scene; shrink long ones around the peak to the maximum.
        if end - start < self.config.min_clip_length {
            let center = (start + end) / 2.0;
            let half = self.config.min_clip_length / 2.0;
            start = center - half;
            end = center + half;
        } else if end - start > self.config.max_clip_length {
            let center = peak.time + interval / 2.0;
            let half = self.config.max_clip_length / 2.0;
            start = center - half;
            end = center + half;
        }
        if start < scene.start {
            end += scene.start - start;
            start = scene.start;
        }
        if end > scene.end {
            start -= end - scene.end;
            end = scene.end;
            start = start.max(scene.start);
        }

        debug!(
            start,
            end,
            score = peak.value,
            scene = scene.index,
            "Candidate window"
        );
        HighlightCandidate {
            start,
            end,
            score: peak.value,
            signals: peak.signals.clone(),
            scene_index: scene.index,
        }
    }
}

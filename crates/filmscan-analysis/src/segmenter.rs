//! Scene segmentation by color histogram discontinuity.
//!
//! A single forward pass over the frame features compares each sample's
//! hue x saturation histogram against the previous sample's using the
//! chi-squared distance. A distance above `scene_threshold` closes the
//! open scene at the boundary sample's timestamp, so the scene list always
//! partitions `[0, analyzed_end)` exactly: ascending, gapless,
//! non-overlapping, half-open.

use filmscan_media::FrameFeatures;
use filmscan_models::{AnalysisConfig, Scene, SceneSummary};
use tracing::{debug, info};

use crate::error::{AnalysisError, AnalysisResult};

/// Segments sampled frames into visually continuous scenes.
pub struct SceneSegmenter<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> SceneSegmenter<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Split the sample stream into scenes covering `[start, analyzed_end)`.
    ///
    /// `analyzed_end` is the end of the analyzed span in seconds and
    /// becomes the exclusive end of the final scene. An empty sample
    /// stream is fatal: there is nothing to report on.
    pub fn segment(
        &self,
        features: &[FrameFeatures],
        analyzed_end: f64,
    ) -> AnalysisResult<Vec<Scene>> {
        if features.is_empty() {
            return Err(AnalysisError::NoScenesDetected);
        }

        // Indices of samples that open a scene. The first sample always does.
        let mut boundaries = vec![0usize];

        for i in 1..features.len() {
            let distance =
                chi_squared_distance(&features[i - 1].histogram, &features[i].histogram);
            if distance <= self.config.scene_threshold {
                continue;
            }

            let open_start = features[*boundaries.last().unwrap_or(&0)].time;
            if features[i].time - open_start < self.config.min_scene_length {
                // Too close to the open scene's start; merge the cut away.
                debug!(
                    time = features[i].time,
                    distance, "Suppressing boundary inside minimum scene length"
                );
                continue;
            }

            debug!(time = features[i].time, distance, "Scene boundary");
            boundaries.push(i);
        }

        let end = if analyzed_end > features[features.len() - 1].time {
            analyzed_end
        } else {
            // Untrusted container duration; extend one sample past the last.
            features[features.len() - 1].time + self.config.sample_interval()
        };

        let mut scenes = Vec::with_capacity(boundaries.len());
        for (index, window) in boundaries.windows(2).enumerate() {
            scenes.push(build_scene(
                index,
                features[window[0]].time,
                features[window[1]].time,
                &features[window[0]..window[1]],
            ));
        }
        let last_start = *boundaries.last().unwrap_or(&0);
        scenes.push(build_scene(
            boundaries.len() - 1,
            features[last_start].time,
            end,
            &features[last_start..],
        ));

        info!(
            scenes = scenes.len(),
            analyzed_end = end,
            "Segmentation complete"
        );
        Ok(scenes)
    }
}

/// Accumulate a scene record over its sample slice.
///
/// Motion statistics skip the scene's first sample: its motion value
/// measures the cut that opened the scene, not activity within it.
fn build_scene(index: usize, start: f64, end: f64, samples: &[FrameFeatures]) -> Scene {
    let count = samples.len();
    let mean_brightness = samples.iter().map(|f| f.mean_luma).sum::<f64>() / count.max(1) as f64;

    let motions: Vec<f64> = samples.iter().skip(1).map(|f| f.motion).collect();
    let (mean_motion, motion_variance) = if motions.is_empty() {
        (0.0, 0.0)
    } else {
        let mean = motions.iter().sum::<f64>() / motions.len() as f64;
        let variance =
            motions.iter().map(|m| (m - mean).powi(2)).sum::<f64>() / motions.len() as f64;
        (mean, variance)
    };

    let mut mean_histogram = vec![0.0f32; samples.first().map_or(0, |f| f.histogram.len())];
    for sample in samples {
        for (acc, val) in mean_histogram.iter_mut().zip(sample.histogram.iter()) {
            *acc += val;
        }
    }
    for val in &mut mean_histogram {
        *val /= count.max(1) as f32;
    }

    Scene {
        index,
        start,
        end,
        kind: Default::default(),
        summary: SceneSummary {
            sample_count: count,
            mean_brightness,
            mean_motion,
            motion_variance,
            mean_histogram,
        },
    }
}

/// Chi-squared distance between two L1-normalized histograms.
///
/// Symmetric form, normalized to [0, 1]: identical histograms score 0,
/// fully disjoint ones score 1.
pub fn chi_squared_distance(a: &[f32], b: &[f32]) -> f64 {
    const EPS: f64 = 1e-10;

    if a.len() != b.len() || a.is_empty() {
        return 1.0;
    }

    let mut sum = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        let denom = x + y;
        if denom > EPS {
            sum += (x - y).powi(2) / denom;
        }
    }
    (sum / 2.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmscan_media::FrameSample;

    fn features_for(frames: &[FrameSample]) -> Vec<FrameFeatures> {
        let mut out: Vec<FrameFeatures> = Vec::new();
        for frame in frames {
            let prev = out.last();
            out.push(FrameFeatures::from_frame(frame, prev));
        }
        out
    }

    fn solid_run(start: f64, count: usize, rgb: [u8; 3]) -> Vec<FrameSample> {
        (0..count)
            .map(|i| FrameSample::solid(start + i as f64, 32, 18, rgb))
            .collect()
    }

    #[test]
    fn test_chi_squared_extremes() {
        let a = vec![1.0f32, 0.0, 0.0];
        let b = vec![0.0f32, 1.0, 0.0];
        assert!(chi_squared_distance(&a, &a) < 1e-9);
        assert!((chi_squared_distance(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_color_video_splits_at_cut() {
        let mut frames = solid_run(0.0, 5, [0, 0, 255]);
        frames.extend(solid_run(5.0, 5, [255, 0, 0]));
        let features = features_for(&frames);

        let config = AnalysisConfig::default();
        let scenes = SceneSegmenter::new(&config).segment(&features, 10.0).unwrap();

        assert_eq!(scenes.len(), 2);
        assert!((scenes[0].start - 0.0).abs() < 1e-9);
        assert!((scenes[0].end - 5.0).abs() < 1e-9);
        assert!((scenes[1].start - 5.0).abs() < 1e-9);
        assert!((scenes[1].end - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_video_is_one_scene() {
        let features = features_for(&solid_run(0.0, 8, [40, 90, 200]));
        let config = AnalysisConfig::default();
        let scenes = SceneSegmenter::new(&config).segment(&features, 8.0).unwrap();

        assert_eq!(scenes.len(), 1);
        assert!((scenes[0].start - 0.0).abs() < 1e-9);
        assert!((scenes[0].end - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_scene_length_merges_rapid_cuts() {
        // Color flips every second; only cuts at least min_scene_length
        // after the open scene's start survive.
        let mut frames = Vec::new();
        for i in 0..8 {
            let rgb = if i % 2 == 0 { [0, 0, 255] } else { [255, 0, 0] };
            frames.push(FrameSample::solid(i as f64, 32, 18, rgb));
        }
        let features = features_for(&frames);

        let mut config = AnalysisConfig::default();
        config.min_scene_length = 3.0;
        let scenes = SceneSegmenter::new(&config).segment(&features, 8.0).unwrap();

        // Every scene but the trailing remainder honors the minimum.
        for scene in &scenes[..scenes.len() - 1] {
            assert!(
                scene.duration() >= config.min_scene_length - 1e-9,
                "scene {} is {}s, below the minimum",
                scene.index,
                scene.duration()
            );
        }
    }

    #[test]
    fn test_partition_is_exact() {
        let mut frames = solid_run(0.0, 4, [0, 0, 255]);
        frames.extend(solid_run(4.0, 3, [0, 255, 0]));
        frames.extend(solid_run(7.0, 5, [255, 0, 0]));
        let features = features_for(&frames);

        let config = AnalysisConfig::default();
        let scenes = SceneSegmenter::new(&config).segment(&features, 12.0).unwrap();

        assert!((scenes[0].start - 0.0).abs() < 1e-9);
        for pair in scenes.windows(2) {
            assert!(
                (pair[0].end - pair[1].start).abs() < 1e-9,
                "gap between scenes {} and {}",
                pair[0].index,
                pair[1].index
            );
        }
        assert!((scenes.last().unwrap().end - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let config = AnalysisConfig::default();
        let err = SceneSegmenter::new(&config).segment(&[], 0.0).unwrap_err();
        assert!(matches!(err, AnalysisError::NoScenesDetected));
    }

    #[test]
    fn test_untrusted_duration_extends_past_last_sample() {
        let features = features_for(&solid_run(0.0, 5, [10, 10, 10]));
        let config = AnalysisConfig::default();
        // Container claims a shorter duration than the samples cover.
        let scenes = SceneSegmenter::new(&config).segment(&features, 2.0).unwrap();
        assert!(scenes.last().unwrap().end > 4.0);
    }

    #[test]
    fn test_motion_stats_skip_cut_sample() {
        let mut frames = solid_run(0.0, 5, [0, 0, 0]);
        frames.extend(solid_run(5.0, 5, [255, 255, 255]));
        let features = features_for(&frames);

        let config = AnalysisConfig::default();
        let scenes = SceneSegmenter::new(&config).segment(&features, 10.0).unwrap();

        assert_eq!(scenes.len(), 2);
        // Both scenes are static; the cut itself must not leak into the
        // second scene's motion statistics.
        assert!(scenes[1].summary.mean_motion < 0.01);
    }
}

//! Color signal: saturation and short-window histogram variation.

use filmscan_media::FrameFeatures;
use filmscan_models::{Scene, SignalKind, SignalSample};

use super::SignalExtractor;
use crate::segmenter::chi_squared_distance;

/// Half-width of the sliding window, in samples.
const WINDOW_RADIUS: usize = 1;

/// Scores color richness: how saturated a sample is and how much the
/// palette shifts within a short sliding window around it.
///
/// Both terms are in [0, 1] and blended equally. A vivid but static scene
/// scores on saturation alone; a rapidly recoloring one scores on
/// variation even when desaturated.
pub struct ColorExtractor;

impl SignalExtractor for ColorExtractor {
    fn kind(&self) -> SignalKind {
        SignalKind::Color
    }

    fn extract(&self, _scene: &Scene, samples: &[FrameFeatures]) -> Vec<SignalSample> {
        samples
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let lo = i.saturating_sub(WINDOW_RADIUS);
                let hi = (i + WINDOW_RADIUS + 1).min(samples.len());
                let window = &samples[lo..hi];

                let variation = window
                    .windows(2)
                    .map(|pair| chi_squared_distance(&pair[0].histogram, &pair[1].histogram))
                    .fold(0.0f64, f64::max);

                let value = 0.5 * feature.mean_saturation + 0.5 * variation;
                SignalSample::new(feature.time, SignalKind::Color, value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmscan_media::FrameSample;
    use filmscan_models::{ContentKind, SceneSummary};

    fn scene() -> Scene {
        Scene {
            index: 0,
            start: 0.0,
            end: 10.0,
            kind: ContentKind::MainContent,
            summary: SceneSummary::default(),
        }
    }

    fn features_for(frames: &[FrameSample]) -> Vec<FrameFeatures> {
        let mut out: Vec<FrameFeatures> = Vec::new();
        for frame in frames {
            let prev = out.last();
            out.push(FrameFeatures::from_frame(frame, prev));
        }
        out
    }

    #[test]
    fn test_gray_static_scene_scores_low() {
        let frames: Vec<FrameSample> = (0..5)
            .map(|i| FrameSample::solid(i as f64, 32, 18, [120, 120, 120]))
            .collect();
        let series = ColorExtractor.extract(&scene(), &features_for(&frames));
        assert!(series.iter().all(|s| s.value < 0.05));
    }

    #[test]
    fn test_saturated_scene_scores_on_saturation() {
        let frames: Vec<FrameSample> = (0..5)
            .map(|i| FrameSample::solid(i as f64, 32, 18, [255, 0, 0]))
            .collect();
        let series = ColorExtractor.extract(&scene(), &features_for(&frames));
        assert!(series.iter().all(|s| s.value > 0.4));
    }

    #[test]
    fn test_recoloring_scene_scores_on_variation() {
        let palette = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0]];
        let frames: Vec<FrameSample> = (0..8)
            .map(|i| FrameSample::solid(i as f64, 32, 18, palette[i % palette.len()]))
            .collect();
        let series = ColorExtractor.extract(&scene(), &features_for(&frames));
        assert!(series.iter().all(|s| s.value > 0.8));
    }
}

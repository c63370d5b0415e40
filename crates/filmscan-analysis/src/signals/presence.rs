//! Presence signal: person coverage within the frame.

use filmscan_media::FrameFeatures;
use filmscan_models::{AnalysisConfig, Scene, SignalKind, SignalSample};

use super::SignalExtractor;

/// Scores person presence from skin-tone coverage.
///
/// Coverage is normalized by a configurable cap: a frame where skin-tone
/// pixels cover `presence_cap` of the area (or more) scores 1.0. This is
/// a detector-free proxy; swapping in a real face or person detector only
/// means replacing this one extractor.
pub struct PresenceExtractor {
    cap: f64,
}

impl PresenceExtractor {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            cap: config.presence_cap.max(f64::EPSILON),
        }
    }
}

impl Default for PresenceExtractor {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl SignalExtractor for PresenceExtractor {
    fn kind(&self) -> SignalKind {
        SignalKind::Presence
    }

    fn extract(&self, _scene: &Scene, samples: &[FrameFeatures]) -> Vec<SignalSample> {
        samples
            .iter()
            .map(|feature| {
                let value = feature.skin_coverage / self.cap;
                SignalSample::new(feature.time, SignalKind::Presence, value)
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

    #[test]
    fn test_skin_frame_saturates() {
        let frame = FrameSample::solid(0.0, 32, 18, [224, 172, 105]);
        let features = vec![FrameFeatures::from_frame(&frame, None)];
        let series = PresenceExtractor::default().extract(&scene(), &features);
        assert!((series[0].value - 1.0).abs() < 1e-9, "full coverage caps at 1");
    }

    #[test]
    fn test_empty_frame_scores_zero() {
        let frame = FrameSample::solid(0.0, 32, 18, [60, 110, 220]);
        let features = vec![FrameFeatures::from_frame(&frame, None)];
        let series = PresenceExtractor::default().extract(&scene(), &features);
        assert!(series[0].value < 0.01);
    }
}

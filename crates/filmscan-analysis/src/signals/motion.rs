//! Motion signal: frame-to-frame pixel change.

use filmscan_media::FrameFeatures;
use filmscan_models::{Scene, SignalKind, SignalSample};

use super::SignalExtractor;

/// Emits the per-sample frame-difference magnitude.
///
/// The raw grid difference is heavily skewed toward small values for
/// ordinary footage, so it is compressed with a square root to spread the
/// useful range; a hard cut still saturates at 1.0. The scene's first
/// sample always scores 0: its difference measures the cut that opened
/// the scene, not activity inside it.
pub struct MotionExtractor;

impl SignalExtractor for MotionExtractor {
    fn kind(&self) -> SignalKind {
        SignalKind::Motion
    }

    fn extract(&self, _scene: &Scene, samples: &[FrameFeatures]) -> Vec<SignalSample> {
        samples
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let value = if i == 0 { 0.0 } else { feature.motion.sqrt() };
                SignalSample::new(feature.time, SignalKind::Motion, value)
            })
            .collect()
    }
}

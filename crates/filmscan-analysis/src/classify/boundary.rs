//! Intro/outro detection at the edges of the file.

use filmscan_models::{AnalysisConfig, ContentKind, Scene};

use super::ClassifyRule;

/// Motion variance below which a scene counts as visually static. Title
/// cards and credit rolls have near-constant frame-to-frame change.
const STATIC_MOTION_VARIANCE: f64 = 0.002;

/// Mean luma below which a scene counts as dark (credits on black).
const DARK_BRIGHTNESS: f64 = 0.08;

/// Labels static or dark scenes near the file edges as intro/outro.
///
/// Only the first and last `boundary_scene_count` scenes are candidates;
/// a candidate is claimed when its motion variance is low or it is mostly
/// dark. Everything else falls through.
pub struct BoundaryRule;

impl BoundaryRule {
    fn looks_like_credits(scene: &Scene) -> bool {
        scene.summary.motion_variance <= STATIC_MOTION_VARIANCE
            || scene.summary.mean_brightness <= DARK_BRIGHTNESS
    }
}

impl ClassifyRule for BoundaryRule {
    fn name(&self) -> &'static str {
        "boundary"
    }

    fn classify(
        &self,
        scene: &Scene,
        scenes: &[Scene],
        config: &AnalysisConfig,
    ) -> Option<ContentKind> {
        let count = config.boundary_scene_count;
        if count == 0 || !Self::looks_like_credits(scene) {
            return None;
        }

        // Leading candidates take precedence when the ranges overlap in a
        // short file.
        if scene.index < count {
            return Some(ContentKind::Intro);
        }
        if scene.index >= scenes.len().saturating_sub(count) {
            return Some(ContentKind::Outro);
        }
        None
    }
}

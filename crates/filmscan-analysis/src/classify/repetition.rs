//! Advertisement detection via repeated-segment matching.

use filmscan_models::{AnalysisConfig, ContentKind, Scene};

use super::ClassifyRule;
use crate::segmenter::chi_squared_distance;

/// Labels scenes that closely match a non-adjacent scene as advertisement.
///
/// Inserted segments (ad breaks, channel bumpers) recur with near-identical
/// color signatures at separated points in the timeline. Adjacent scenes
/// are excluded: consecutive similar scenes are just continuous footage
/// the segmenter happened to split. Every occurrence of a repeated segment
/// is claimed, not only the later one.
pub struct RepetitionRule;

impl ClassifyRule for RepetitionRule {
    fn name(&self) -> &'static str {
        "repetition"
    }

    fn classify(
        &self,
        scene: &Scene,
        scenes: &[Scene],
        config: &AnalysisConfig,
    ) -> Option<ContentKind> {
        for other in scenes {
            if other.index.abs_diff(scene.index) < 2 {
                continue;
            }
            let distance = chi_squared_distance(
                &scene.summary.mean_histogram,
                &other.summary.mean_histogram,
            );
            if distance < config.repetition_similarity {
                return Some(ContentKind::Advertisement);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmscan_models::SceneSummary;

    fn scene(index: usize, histogram: Vec<f32>) -> Scene {
        Scene {
            index,
            start: index as f64 * 10.0,
            end: (index + 1) as f64 * 10.0,
            kind: ContentKind::default(),
            summary: SceneSummary {
                sample_count: 10,
                mean_brightness: 0.5,
                mean_motion: 0.1,
                motion_variance: 0.01,
                mean_histogram: histogram,
            },
        }
    }

    fn hist(hot_bin: usize) -> Vec<f32> {
        let mut h = vec![0.0f32; 8];
        h[hot_bin] = 1.0;
        h
    }

    #[test]
    fn test_repeated_nonadjacent_scene_is_advertisement() {
        // Bumper at indices 0 and 2 with distinct content between.
        let scenes = vec![scene(0, hist(3)), scene(1, hist(0)), scene(2, hist(3))];
        let config = AnalysisConfig::default();
        assert_eq!(
            RepetitionRule.classify(&scenes[0], &scenes, &config),
            Some(ContentKind::Advertisement)
        );
        assert_eq!(
            RepetitionRule.classify(&scenes[2], &scenes, &config),
            Some(ContentKind::Advertisement)
        );
        assert_eq!(RepetitionRule.classify(&scenes[1], &scenes, &config), None);
    }

    #[test]
    fn test_adjacent_similarity_falls_through() {
        let scenes = vec![scene(0, hist(3)), scene(1, hist(3))];
        let config = AnalysisConfig::default();
        assert_eq!(RepetitionRule.classify(&scenes[0], &scenes, &config), None);
    }

    #[test]
    fn test_distinct_scenes_fall_through() {
        let scenes = vec![scene(0, hist(0)), scene(1, hist(2)), scene(2, hist(5))];
        let config = AnalysisConfig::default();
        for s in &scenes {
            assert_eq!(RepetitionRule.classify(s, &scenes, &config), None);
        }
    }

    #[test]
    fn test_empty_summaries_never_match() {
        let scenes = vec![
            scene(0, Vec::new()),
            scene(1, Vec::new()),
            scene(2, Vec::new()),
        ];
        let config = AnalysisConfig::default();
        for s in &scenes {
            assert_eq!(RepetitionRule.classify(s, &scenes, &config), None);
        }
    }
}

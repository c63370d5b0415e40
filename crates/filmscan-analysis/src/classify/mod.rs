//! Content classification: labeling scenes as intro, outro, advertisement,
//! or main content.
//!
//! Classification is an ordered chain of independent rules. Each rule sees
//! one scene plus the full scene list and either claims a label or passes.
//! The first claim wins; a scene no rule claims is main content. New
//! heuristics are appended to the chain without touching existing ones.

mod boundary;
mod repetition;

pub use boundary::BoundaryRule;
pub use repetition::RepetitionRule;

use filmscan_models::{AnalysisConfig, ContentKind, Scene};
use tracing::{debug, info};

/// A single classification heuristic.
///
/// Rules are pure predicates over scene summaries. They must not assume
/// any particular label on other scenes since labels are assigned only
/// after the whole chain has run.
pub trait ClassifyRule: Send + Sync {
    /// Rule name for logging.
    fn name(&self) -> &'static str;

    /// Label the scene, or `None` to fall through to the next rule.
    fn classify(
        &self,
        scene: &Scene,
        scenes: &[Scene],
        config: &AnalysisConfig,
    ) -> Option<ContentKind>;
}

/// Ordered rule chain over segmented scenes.
pub struct ContentClassifier {
    rules: Vec<Box<dyn ClassifyRule>>,
}

impl Default for ContentClassifier {
    /// The standard chain: boundary (intro/outro) first, then repetition
    /// (advertisement).
    fn default() -> Self {
        Self {
            rules: vec![Box::new(BoundaryRule), Box::new(RepetitionRule)],
        }
    }
}

impl ContentClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a classifier with a custom rule chain.
    pub fn with_rules(rules: Vec<Box<dyn ClassifyRule>>) -> Self {
        Self { rules }
    }

    /// Assign exactly one label to every scene.
    pub fn apply(&self, scenes: &mut [Scene], config: &AnalysisConfig) {
        // Decide all labels against the unlabeled list first so rule
        // outcomes don't depend on scene order within the pass.
        let labels: Vec<ContentKind> = scenes
            .iter()
            .map(|scene| {
                for rule in &self.rules {
                    if let Some(kind) = rule.classify(scene, scenes, config) {
                        debug!(scene = scene.index, rule = rule.name(), label = kind.as_str(), "Rule matched");
                        return kind;
                    }
                }
                ContentKind::MainContent
            })
            .collect();

        for (scene, label) in scenes.iter_mut().zip(labels) {
            scene.kind = label;
        }

        let main = scenes.iter().filter(|s| s.kind.is_main()).count();
        info!(
            scenes = scenes.len(),
            main_content = main,
            "Classification complete"
        );
    }
}

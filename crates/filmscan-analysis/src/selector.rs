//! Budgeted greedy highlight selection.

use filmscan_models::{AnalysisConfig, AnalysisWarning, HighlightCandidate, HighlightSet};
use tracing::{debug, info, warn};

/// Slack for budget and gap comparisons; keeps exact-fit selections from
/// failing on float noise.
const EPSILON: f64 = 1e-6;

/// Greedily pick a non-overlapping, budget-respecting highlight set.
///
/// Candidates are taken in descending score order (earlier start wins
/// ties, so identical inputs always select identically). A candidate is
/// accepted when it fits the remaining budget, keeps `min_gap` clear of
/// every accepted clip, and the clip cap is not yet reached. A candidate
/// that does not fit is skipped, not terminal: a later, shorter one may
/// still fit. An underfilled budget is a soft shortfall reported as a
/// warning, never an error.
pub fn select(
    candidates: Vec<HighlightCandidate>,
    config: &AnalysisConfig,
) -> (HighlightSet, Vec<AnalysisWarning>) {
    let mut ranked = candidates;
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.start.total_cmp(&b.start))
    });

    let mut selected: Vec<HighlightCandidate> = Vec::new();
    let mut total = 0.0f64;

    for candidate in ranked {
        if selected.len() >= config.max_highlights {
            break;
        }
        if total + candidate.duration() > config.highlight_budget + EPSILON {
            debug!(
                start = candidate.start,
                duration = candidate.duration(),
                remaining = config.highlight_budget - total,
                "Candidate over budget, skipping"
            );
            continue;
        }
        let conflict = selected.iter().any(|accepted| {
            candidate.overlaps(accepted) || candidate.gap_to(accepted) < config.min_gap - EPSILON
        });
        if conflict {
            debug!(start = candidate.start, "Candidate conflicts with selection, skipping");
            continue;
        }

        total += candidate.duration();
        selected.push(candidate);
    }

    selected.sort_by(|a, b| a.start.total_cmp(&b.start));
    let set = HighlightSet::new(selected);

    let mut warnings = Vec::new();
    let shortfall = config.highlight_budget - set.total_duration;
    if config.highlight_budget > 0.0 && shortfall > config.sample_interval() {
        warn!(
            requested = config.highlight_budget,
            selected = set.total_duration,
            "Highlight budget underfilled"
        );
        warnings.push(AnalysisWarning::InsufficientHighlights {
            requested_secs: config.highlight_budget,
            selected_secs: set.total_duration,
        });
    }

    info!(
        clips = set.len(),
        total_duration = set.total_duration,
        "Selection complete"
    );
    (set, warnings)
}

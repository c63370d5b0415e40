//! Normalized per-timestamp signals used for highlight scoring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The signals that can contribute to the composite highlight score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// Frame-to-frame motion magnitude
    Motion,
    /// Color variance / saturation activity
    Color,
    /// Person-presence estimate
    Presence,
}

impl SignalKind {
    /// All known signal kinds, in canonical order.
    pub const ALL: [SignalKind; 3] = [Self::Motion, Self::Color, Self::Presence];

    /// Returns the signal name as used in configuration and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Color => "color",
            Self::Presence => "presence",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sample of one signal.
///
/// Produced by a signal extractor, consumed only by the highlight scorer.
/// `value` is always normalized to [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalSample {
    /// Timestamp in seconds
    pub time: f64,
    /// Which signal this sample belongs to
    pub kind: SignalKind,
    /// Normalized signal value in [0, 1]
    pub value: f64,
}

impl SignalSample {
    /// Create a sample, clamping the value into [0, 1].
    pub fn new(time: f64, kind: SignalKind, value: f64) -> Self {
        Self {
            time,
            kind,
            value: value.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        for kind in SignalKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_sample_clamps_value() {
        assert!((SignalSample::new(0.0, SignalKind::Motion, 1.7).value - 1.0).abs() < f64::EPSILON);
        assert!(SignalSample::new(0.0, SignalKind::Color, -0.2).value.abs() < f64::EPSILON);
    }
}

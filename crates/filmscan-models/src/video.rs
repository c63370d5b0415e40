//! Video descriptors.

use serde::{Deserialize, Serialize};

/// Video file information.
///
/// Created once when analysis starts (typically from an FFprobe run) and
/// treated as read-only for the rest of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate (fps)
    pub fps: f64,
    /// Video codec
    pub codec: String,
    /// File size in bytes
    pub size: u64,
    /// Bitrate in bits/second
    pub bitrate: u64,
}

impl VideoInfo {
    /// Resolution rendered as "WxH" (e.g. "1920x1080").
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// The span that will actually be analyzed given a duration limit.
    ///
    /// A non-positive limit means "no limit".
    pub fn analyzed_duration(&self, duration_limit: f64) -> f64 {
        if duration_limit > 0.0 {
            self.duration.min(duration_limit)
        } else {
            self.duration
        }
    }
}

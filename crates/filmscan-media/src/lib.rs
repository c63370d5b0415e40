//! FFmpeg CLI wrapper for video probing and frame sampling.
//!
//! This crate provides:
//! - Async FFprobe probing into [`filmscan_models::VideoInfo`]
//! - A forward-only [`FrameSource`] abstraction over decoded frames
//! - A bounded-memory FFmpeg rawvideo source (one frame in flight)
//! - Compact per-frame features so pixel buffers never outlive a sample

pub mod error;
pub mod frame;
pub mod probe;
pub mod sampler;

pub use error::{MediaError, MediaResult};
pub use frame::{FrameFeatures, FrameSample, HIST_BINS};
pub use probe::probe_video;
pub use sampler::{collect_features, FfmpegFrameSource, FrameSource, MemoryFrameSource};

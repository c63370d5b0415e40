//! Frame sources: forward-only, duration-limited frame sampling.
//!
//! The FFmpeg source decodes via one long-lived process emitting rawvideo
//! RGB24 at the analysis sample rate. Frames are read one at a time from
//! the pipe (one frame of decode-ahead), so memory stays proportional to a
//! single downscaled frame regardless of video length. There is no seeking
//! and no backward movement.

use std::io::Read;
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::JoinHandle;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};
use crate::frame::{FrameFeatures, FrameSample};
use filmscan_models::VideoInfo;

/// Width frames are downscaled to for analysis.
const ANALYSIS_WIDTH: u32 = 320;

/// A forward-only, finite source of frame samples.
///
/// Implementations must yield samples with strictly increasing timestamps
/// and never revisit a frame.
pub trait FrameSource: Send {
    /// Descriptor of the underlying video.
    fn info(&self) -> &VideoInfo;

    /// The next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> MediaResult<Option<FrameSample>>;
}

/// Frame source backed by an FFmpeg rawvideo pipe.
#[derive(Debug)]
pub struct FfmpegFrameSource {
    info: VideoInfo,
    child: Child,
    stdout: ChildStdout,
    stderr_drain: Option<JoinHandle<String>>,
    frame_width: u32,
    frame_height: u32,
    sample_fps: f64,
    duration_limit: f64,
    frames_read: u64,
    finished: bool,
}

impl FfmpegFrameSource {
    /// Spawn the decode process for `path`.
    ///
    /// `sample_fps` controls the sampling stride; `duration_limit` caps
    /// the decoded span (non-positive means whole video).
    pub fn open(
        path: impl AsRef<Path>,
        info: VideoInfo,
        sample_fps: f64,
        duration_limit: f64,
    ) -> MediaResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }
        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        if info.width == 0 || info.height == 0 {
            return Err(MediaError::InvalidVideo(
                "video stream has zero resolution".to_string(),
            ));
        }

        let frame_width = ANALYSIS_WIDTH.min(info.width);
        // Keep the aspect ratio; rawvideo needs even dimensions.
        let frame_height = ((info.height * frame_width) / info.width).max(2) & !1;

        let mut command = Command::new("ffmpeg");
        command.args(["-v", "error", "-nostdin", "-i"]).arg(path);
        if duration_limit > 0.0 {
            command.args(["-t", &format!("{duration_limit:.3}")]);
        }
        command
            .args([
                "-vf",
                &format!("fps={sample_fps},scale={frame_width}:{frame_height}"),
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgb24",
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(path = %path.display(), sample_fps, frame_width, frame_height, "Spawning FFmpeg decoder");

        let mut child = command.spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| MediaError::decode_failed("FFmpeg stdout unavailable", None))?;

        // Drain stderr on a helper thread so a chatty decoder can't block
        // on a full pipe.
        let stderr_drain = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                buf
            })
        });

        Ok(Self {
            info,
            child,
            stdout,
            stderr_drain,
            frame_width,
            frame_height,
            sample_fps,
            duration_limit,
            frames_read: 0,
            finished: false,
        })
    }

    fn frame_size(&self) -> usize {
        (self.frame_width * self.frame_height * 3) as usize
    }

    fn collect_stderr(&mut self) -> Option<String> {
        self.stderr_drain
            .take()
            .and_then(|handle| handle.join().ok())
            .filter(|s| !s.is_empty())
    }

    /// Handle end of stream: a decoder that failed before producing a
    /// single frame means the source is unreadable.
    fn finish(&mut self) -> MediaResult<Option<FrameSample>> {
        self.finished = true;
        let status = self.child.wait()?;
        if !status.success() || self.frames_read == 0 {
            let stderr = self.collect_stderr();
            if self.frames_read == 0 {
                return Err(MediaError::decode_failed(
                    "no frames could be decoded from source",
                    stderr,
                ));
            }
            if !status.success() {
                return Err(MediaError::decode_failed(
                    format!("decoder exited with {status} after {} frames", self.frames_read),
                    stderr,
                ));
            }
        }
        debug!(frames = self.frames_read, "Decoder finished");
        Ok(None)
    }
}

impl FrameSource for FfmpegFrameSource {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn next_frame(&mut self) -> MediaResult<Option<FrameSample>> {
        if self.finished {
            return Ok(None);
        }

        let time = self.frames_read as f64 / self.sample_fps;
        if self.duration_limit > 0.0 && time >= self.duration_limit {
            // Past the cap: stop decoding entirely.
            self.finished = true;
            let _ = self.child.kill();
            let _ = self.child.wait();
            return Ok(None);
        }

        let mut rgb = vec![0u8; self.frame_size()];
        match self.stdout.read_exact(&mut rgb) {
            Ok(()) => {
                self.frames_read += 1;
                Ok(Some(FrameSample {
                    time,
                    width: self.frame_width,
                    height: self.frame_height,
                    rgb,
                    audio_level: None,
                }))
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => self.finish(),
            Err(e) => {
                self.finished = true;
                Err(e.into())
            }
        }
    }
}

impl Drop for FfmpegFrameSource {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// In-memory frame source for pre-decoded or synthetic frames.
pub struct MemoryFrameSource {
    info: VideoInfo,
    frames: std::vec::IntoIter<FrameSample>,
}

impl MemoryFrameSource {
    /// Build a source over pre-ordered frames.
    pub fn new(info: VideoInfo, frames: Vec<FrameSample>) -> Self {
        Self {
            info,
            frames: frames.into_iter(),
        }
    }
}

impl FrameSource for MemoryFrameSource {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn next_frame(&mut self) -> MediaResult<Option<FrameSample>> {
        Ok(self.frames.next())
    }
}

/// Drain a source into per-sample features.
///
/// Each frame's pixels are reduced to a [`FrameFeatures`] record and
/// dropped immediately. `duration_limit` (non-positive = unlimited) stops
/// consumption without decoding further.
pub fn collect_features(
    source: &mut dyn FrameSource,
    duration_limit: f64,
) -> MediaResult<Vec<FrameFeatures>> {
    let mut features: Vec<FrameFeatures> = Vec::new();

    while let Some(frame) = source.next_frame()? {
        if duration_limit > 0.0 && frame.time >= duration_limit {
            break;
        }
        if let Some(last) = features.last() {
            if frame.time <= last.time {
                warn!(
                    time = frame.time,
                    last = last.time,
                    "Dropping out-of-order frame sample"
                );
                continue;
            }
        }
        let prev = features.last();
        features.push(FrameFeatures::from_frame(&frame, prev));
    }

    debug!(samples = features.len(), "Collected frame features");
    Ok(features)
}

//! Frame samples and the compact per-frame features derived from them.
//!
//! Decoded pixel buffers are ephemeral: each [`FrameSample`] is consumed
//! into a [`FrameFeatures`] record and dropped, so memory stays
//! proportional to one frame plus a few hundred bytes per sample no matter
//! how long the video is.

/// Histogram bins per HSV channel (hue x saturation grid).
pub const HIST_BINS: usize = 16;

/// Width of the downscaled luma grid used for frame differencing.
const MOTION_GRID_WIDTH: u32 = 64;

/// One decoded frame at a sample timestamp.
///
/// Owned by whichever stage currently processes it; never retained past
/// feature extraction.
#[derive(Debug, Clone)]
pub struct FrameSample {
    /// Timestamp in seconds
    pub time: f64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Raw RGB24 pixel data, `width * height * 3` bytes
    pub rgb: Vec<u8>,
    /// Mean audio level around the sample, if the source provides one
    pub audio_level: Option<f64>,
}

impl FrameSample {
    /// Create a frame filled with a single color. Handy for synthetic
    /// sources and tests.
    pub fn solid(time: f64, width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgb);
        }
        Self {
            time,
            width,
            height,
            rgb: data,
            audio_level: None,
        }
    }
}

/// Compact per-sample summary retained for the whole run.
///
/// Everything later stages read comes from here; the pixels themselves are
/// gone by the time segmentation runs.
#[derive(Debug, Clone)]
pub struct FrameFeatures {
    /// Timestamp in seconds
    pub time: f64,
    /// L1-normalized hue x saturation histogram, `HIST_BINS * HIST_BINS`
    pub histogram: Vec<f32>,
    /// Mean luma in [0, 1]
    pub mean_luma: f64,
    /// Mean saturation in [0, 1]
    pub mean_saturation: f64,
    /// Fraction of pixels in the skin-tone range, in [0, 1]
    pub skin_coverage: f64,
    /// Frame-diff motion magnitude vs the previous sample, in [0, 1].
    /// Zero for the first sample.
    pub motion: f64,
    /// Audio level carried over from the sample, if any
    pub audio_level: Option<f64>,
    /// Downscaled luma grid kept for differencing against the next sample
    luma_grid: Vec<u8>,
}

impl FrameFeatures {
    /// Extract features from a frame, differencing against the previous
    /// sample's features when available.
    pub fn from_frame(frame: &FrameSample, prev: Option<&FrameFeatures>) -> Self {
        let pixel_count = (frame.width * frame.height) as usize;
        let mut histogram = vec![0.0f32; HIST_BINS * HIST_BINS];
        let mut luma_sum = 0.0f64;
        let mut sat_sum = 0.0f64;
        let mut skin_pixels = 0usize;

        for i in 0..pixel_count {
            let r = frame.rgb[i * 3] as f64 / 255.0;
            let g = frame.rgb[i * 3 + 1] as f64 / 255.0;
            let b = frame.rgb[i * 3 + 2] as f64 / 255.0;

            let (h, s, v) = rgb_to_hsv(r, g, b);

            let h_bin = ((h / 360.0) * HIST_BINS as f64).min(HIST_BINS as f64 - 1.0) as usize;
            let s_bin = (s * HIST_BINS as f64).min(HIST_BINS as f64 - 1.0) as usize;
            histogram[h_bin * HIST_BINS + s_bin] += 1.0;

            luma_sum += 0.299 * r + 0.587 * g + 0.114 * b;
            sat_sum += s;
            if is_skin_tone(h, s, v) {
                skin_pixels += 1;
            }
        }

        if pixel_count > 0 {
            let total = pixel_count as f32;
            for val in &mut histogram {
                *val /= total;
            }
        }

        let luma_grid = downscale_luma(frame);
        let motion = match prev {
            Some(prev) => grid_difference(&prev.luma_grid, &luma_grid),
            None => 0.0,
        };

        let denom = pixel_count.max(1) as f64;
        Self {
            time: frame.time,
            histogram,
            mean_luma: luma_sum / denom,
            mean_saturation: sat_sum / denom,
            skin_coverage: skin_pixels as f64 / denom,
            motion,
            audio_level: frame.audio_level,
            luma_grid,
        }
    }
}

/// Convert RGB to HSV color space.
///
/// # Arguments
/// * `r`, `g`, `b` - RGB values in [0, 1]
///
/// # Returns
/// (H, S, V) where H is in [0, 360), S and V are in [0, 1]
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, s, v)
}

/// Skin-tone test in HSV space.
///
/// A deliberately coarse range: warm hues with moderate saturation and
/// enough brightness. Good enough as a person-presence proxy; a real
/// detector can replace the presence extractor without touching this.
fn is_skin_tone(h: f64, s: f64, v: f64) -> bool {
    (0.0..=50.0).contains(&h) && (0.15..=0.75).contains(&s) && v >= 0.30
}

/// Downscale the frame to a small luma grid for cheap frame differencing.
fn downscale_luma(frame: &FrameSample) -> Vec<u8> {
    if frame.width == 0 || frame.height == 0 {
        return Vec::new();
    }

    let grid_w = MOTION_GRID_WIDTH.min(frame.width);
    let grid_h = ((frame.height * grid_w) / frame.width).max(1);
    let mut grid = Vec::with_capacity((grid_w * grid_h) as usize);

    for gy in 0..grid_h {
        for gx in 0..grid_w {
            // Nearest-neighbor sample at the cell center.
            let x = (gx * frame.width + frame.width / 2) / grid_w;
            let y = (gy * frame.height + frame.height / 2) / grid_h;
            let idx = ((y.min(frame.height - 1) * frame.width + x.min(frame.width - 1)) * 3)
                as usize;
            let r = frame.rgb[idx] as f64;
            let g = frame.rgb[idx + 1] as f64;
            let b = frame.rgb[idx + 2] as f64;
            grid.push((0.299 * r + 0.587 * g + 0.114 * b) as u8);
        }
    }

    grid
}

/// Mean absolute difference between two luma grids, normalized to [0, 1].
///
/// Mismatched grid sizes (source resolution changed mid-stream) count as
/// full motion.
fn grid_difference(prev: &[u8], curr: &[u8]) -> f64 {
    if prev.len() != curr.len() || prev.is_empty() {
        return 1.0;
    }

    let sum: u64 = prev
        .iter()
        .zip(curr.iter())
        .map(|(a, b)| (*a as i32 - *b as i32).unsigned_abs() as u64)
        .sum();

    sum as f64 / (prev.len() as f64 * 255.0)
}

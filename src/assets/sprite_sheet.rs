use std::path::Path;

use crate::assets::decode::{PreparedImage, decode_frames};
use crate::foundation::error::{WavewalkError, WavewalkResult};

/// Ordered animation frames for one sprite pose (`walk` or `shoot`).
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    frames: Vec<PreparedImage>,
}

impl SpriteSheet {
    #[tracing::instrument]
    pub fn load(path: &Path) -> WavewalkResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            WavewalkError::asset(format!("read sprite sheet '{}': {e}", path.display()))
        })?;
        let frames = decode_frames(&bytes).map_err(|e| {
            WavewalkError::asset(format!("decode sprite sheet '{}': {e:#}", path.display()))
        })?;
        tracing::debug!(frames = frames.len(), "sprite sheet loaded");
        Self::from_frames(frames)
    }

    pub fn from_frames(frames: Vec<PreparedImage>) -> WavewalkResult<Self> {
        if frames.is_empty() {
            return Err(WavewalkError::validation(
                "sprite sheet needs at least one frame",
            ));
        }
        Ok(Self { frames })
    }

    /// Solid silhouette used when a sheet cannot be loaded.
    pub fn placeholder(width: u32, height: u32, rgb: [u8; 3]) -> WavewalkResult<Self> {
        let w = width.max(1);
        let h = height.max(1);
        let (cx, cy) = (f64::from(w) / 2.0, f64::from(h) / 2.0);
        let (rx, ry) = (f64::from(w) * 0.3, f64::from(h) * 0.45);

        let mut rgba = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                let dx = (f64::from(x) + 0.5 - cx) / rx;
                let dy = (f64::from(y) + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
                } else {
                    rgba.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }
        Self::from_frames(vec![PreparedImage::from_rgba8_straight(w, h, rgba)?])
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame shown `elapsed_ms` into a cycle that plays every frame once per `cycle_ms`.
    pub fn frame_at(&self, elapsed_ms: f64, cycle_ms: f64) -> &PreparedImage {
        self.frame_in_span(elapsed_ms, 0, u32::MAX, cycle_ms)
    }

    /// Like [`Self::frame_at`] but cycling only frames `first..=last` (clamped to the sheet).
    pub fn frame_in_span(&self, elapsed_ms: f64, first: u32, last: u32, cycle_ms: f64) -> &PreparedImage {
        let n = self.frames.len();
        let last = (last as usize).min(n - 1);
        let first = (first as usize).min(last);
        let count = last - first + 1;
        if count == 1 || cycle_ms.is_nan() || cycle_ms <= 0.0 || !elapsed_ms.is_finite() {
            return &self.frames[first];
        }
        let per_frame = cycle_ms / count as f64;
        let step = (elapsed_ms.max(0.0) / per_frame).floor() as u64 % count as u64;
        &self.frames[first + step as usize]
    }
}

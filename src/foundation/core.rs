use crate::foundation::error::{WavewalkError, WavewalkResult};

pub use kurbo::{Point, Rect};

/// Absolute 0-based frame index in render timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> WavewalkResult<Self> {
        if den == 0 {
            return Err(WavewalkError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(WavewalkError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in milliseconds.
    pub fn frame_duration_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }

    /// Host timestamp of `frame` when frame 0 is presented at `origin_ms`.
    pub fn frame_time_ms(self, origin_ms: f64, frame: FrameIndex) -> f64 {
        origin_ms + (frame.0 as f64) * self.frame_duration_ms()
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Displayed size of a canvas in CSS pixels, plus the device pixel ratio it is shown at.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Displayed width in CSS pixels.
    pub css_width: f64,
    /// Displayed height in CSS pixels.
    pub css_height: f64,
    /// Device pixel ratio; values below 1 (or non-finite) are treated as 1.
    #[serde(default = "one")]
    pub dpr: f64,
}

fn one() -> f64 {
    1.0
}

impl CanvasSize {
    pub fn new(css_width: f64, css_height: f64, dpr: f64) -> Self {
        Self {
            css_width,
            css_height,
            dpr,
        }
    }

    /// Effective device pixel ratio, never below 1.
    pub fn effective_dpr(self) -> f64 {
        if self.dpr.is_finite() {
            self.dpr.max(1.0)
        } else {
            1.0
        }
    }

    /// Backing store size in device pixels, at least 1x1.
    pub fn backing(self) -> (u32, u32) {
        let dpr = self.effective_dpr();
        let scale = |css: f64| -> u32 {
            let v = (css.max(0.0) * dpr).round();
            if v >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                (v as u32).max(1)
            }
        };
        (scale(self.css_width), scale(self.css_height))
    }

    /// The same canvas expressed as a viewport in CSS pixels.
    pub fn viewport(self) -> Viewport {
        Viewport {
            width: self.css_width.max(0.0),
            height: self.css_height.max(0.0),
        }
    }
}

/// Visible page area in CSS pixels, used by sprite choreography.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque color from straight RGB bytes.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

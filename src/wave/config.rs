use serde::{Deserialize, Serialize};

use crate::foundation::color::ColorDef;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{WavewalkError, WavewalkResult};

/// Phase offset of the column pass, keeping the two passes of a bidirectional wave apart.
pub const V_PHASE_SHIFT: f64 = 1.7;
/// Phase offset of a secondary harmonic.
pub const SECONDARY_PHASE: f64 = 1.3;

pub const MIN_DURATION_MS: f64 = 16.0;

/// One spatial sine component: `amplitude · sin(2π · c / wavelength + phase)`.
///
/// `amplitude` and `wavelength` are CSS pixels; both are scaled by the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub amplitude: f64,
    pub wavelength: f64,
    #[serde(default)]
    pub phase: f64,
}

impl Harmonic {
    pub fn new(amplitude: f64, wavelength: f64, phase: f64) -> Self {
        Self {
            amplitude,
            wavelength,
            phase,
        }
    }
}

/// Displacement along one axis: a primary harmonic plus an optional secondary one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisWave {
    pub primary: Harmonic,
    #[serde(default)]
    pub secondary: Option<Harmonic>,
}

impl AxisWave {
    pub fn single(amplitude: f64, wavelength: f64, phase: f64) -> Self {
        Self {
            primary: Harmonic::new(amplitude, wavelength, phase),
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, amplitude: f64, wavelength: f64) -> Self {
        self.secondary = Some(Harmonic::new(amplitude, wavelength, SECONDARY_PHASE));
        self
    }

    /// An axis only paints when some harmonic has a non-zero amplitude.
    pub fn is_active(&self) -> bool {
        self.primary.amplitude != 0.0 || self.secondary.is_some_and(|h| h.amplitude != 0.0)
    }

    fn validate(&self, axis: &str) -> WavewalkResult<()> {
        for h in std::iter::once(&self.primary).chain(self.secondary.as_ref()) {
            if !h.wavelength.is_finite() || h.wavelength <= 0.0 {
                return Err(WavewalkError::validation(format!(
                    "{axis} wavelength must be finite and > 0"
                )));
            }
            if !h.amplitude.is_finite() || !h.phase.is_finite() {
                return Err(WavewalkError::validation(format!(
                    "{axis} amplitude and phase must be finite"
                )));
            }
        }
        Ok(())
    }
}

/// Named starting points matching the three historical backgrounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WavePreset {
    /// Rows slide horizontally; two harmonics, soft zero crossings.
    Horizontal,
    /// Columns slide vertically; two harmonics, fine strips.
    Vertical,
    /// Rows and columns both displaced, phase-shifted against each other.
    Bidirectional,
}

/// How the row and column passes combine when both axes are active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisCompose {
    /// The column pass repaints every column over the row pass, so only column displacement
    /// is visible.
    #[default]
    Overlay,
    /// The column pass displaces the output of the row pass; both axes stay visible.
    Chained,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Horizontal displacement of row strips.
    #[serde(default)]
    pub rows: Option<AxisWave>,
    /// Vertical displacement of column strips.
    #[serde(default)]
    pub cols: Option<AxisWave>,
    /// Milliseconds per full time cycle.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Strip thickness in CSS pixels.
    #[serde(default = "default_strip")]
    pub strip: f64,
    /// 0 = pure sine, 1 = cubic-shaped sine.
    #[serde(default)]
    pub shape_k: f64,
    #[serde(default = "default_background")]
    pub background: ColorDef,
    #[serde(default)]
    pub compose: AxisCompose,
    /// Scale strips and amplitudes by the device pixel ratio rounded down to a whole number.
    #[serde(default)]
    pub integer_dpr: bool,
}

fn default_duration_ms() -> f64 {
    11_000.0
}

fn default_strip() -> f64 {
    2.0
}

pub(crate) fn default_background() -> ColorDef {
    ColorDef::rgba(8.0 / 255.0, 3.0 / 255.0, 26.0 / 255.0, 1.0)
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self::preset(WavePreset::Bidirectional)
    }
}

impl WaveConfig {
    pub fn preset(preset: WavePreset) -> Self {
        match preset {
            WavePreset::Horizontal => Self {
                rows: Some(AxisWave::single(40.0, 360.0, 0.0).with_secondary(20.0, 140.0)),
                cols: None,
                duration_ms: 20_000.0,
                strip: 2.0,
                shape_k: 0.35,
                background: default_background(),
                compose: AxisCompose::Overlay,
                integer_dpr: true,
            },
            WavePreset::Vertical => Self {
                rows: None,
                cols: Some(AxisWave::single(40.0, 200.0, 0.0).with_secondary(10.0, 30.0)),
                duration_ms: 20_000.0,
                strip: 1.0,
                shape_k: 0.2,
                background: default_background(),
                compose: AxisCompose::Overlay,
                integer_dpr: true,
            },
            WavePreset::Bidirectional => Self {
                rows: Some(AxisWave::single(50.0, 120.0, 0.0)),
                cols: Some(AxisWave::single(30.0, 180.0, V_PHASE_SHIFT)),
                duration_ms: default_duration_ms(),
                strip: default_strip(),
                shape_k: 0.0,
                background: default_background(),
                compose: AxisCompose::Overlay,
                integer_dpr: false,
            },
        }
    }

    /// Device pixel ratio the wave geometry is scaled by on `canvas`.
    pub fn wave_dpr(&self, canvas: CanvasSize) -> f64 {
        let dpr = canvas.effective_dpr();
        if self.integer_dpr { dpr.floor() } else { dpr }
    }

    pub fn validate(&self) -> WavewalkResult<()> {
        if let Some(rows) = &self.rows {
            rows.validate("rows")?;
        }
        if let Some(cols) = &self.cols {
            cols.validate("cols")?;
        }
        if !self.duration_ms.is_finite() || self.duration_ms < MIN_DURATION_MS {
            return Err(WavewalkError::validation(format!(
                "duration_ms must be >= {MIN_DURATION_MS}"
            )));
        }
        if !self.strip.is_finite() || self.strip < 1.0 {
            return Err(WavewalkError::validation("strip must be >= 1"));
        }
        if !self.shape_k.is_finite() {
            return Err(WavewalkError::validation("shape_k must be finite"));
        }
        Ok(())
    }

    /// Tuning slot `0` or `1`.
    ///
    /// With both axes configured the slots are the row and column primaries; with a single
    /// axis they are that axis's primary and secondary harmonic (created on demand).
    pub(crate) fn slot_mut(&mut self, slot: usize) -> Option<&mut Harmonic> {
        match (&mut self.rows, &mut self.cols) {
            (Some(r), Some(c)) => Some(if slot == 0 {
                &mut r.primary
            } else {
                &mut c.primary
            }),
            (Some(a), None) | (None, Some(a)) => {
                if slot == 0 {
                    Some(&mut a.primary)
                } else {
                    let wavelength = a.primary.wavelength;
                    Some(
                        a.secondary
                            .get_or_insert_with(|| Harmonic::new(0.0, wavelength, SECONDARY_PHASE)),
                    )
                }
            }
            (None, None) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wave/config.rs"]
mod tests;

use std::f64::consts::TAU;

use crate::wave::config::{AxisWave, Harmonic, WaveConfig};

/// Smallest strip in device pixels.
pub const MIN_STRIP_PX: u32 = 2;

/// Inputs a [`PhaseTable`] depends on. Amplitude, duration and shape are not part of it:
/// they are applied per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseKey {
    width: u32,
    height: u32,
    dpr: f64,
    strip: f64,
    rows: Option<AxisKey>,
    cols: Option<AxisKey>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct AxisKey {
    primary: (f64, f64),
    secondary: Option<(f64, f64)>,
}

impl AxisKey {
    fn of(axis: &AxisWave) -> Self {
        Self {
            primary: (axis.primary.wavelength, axis.primary.phase),
            secondary: axis.secondary.map(|h| (h.wavelength, h.phase)),
        }
    }
}

impl PhaseKey {
    pub fn new(width: u32, height: u32, dpr: f64, config: &WaveConfig) -> Self {
        Self {
            width,
            height,
            dpr,
            strip: config.strip,
            rows: config.rows.as_ref().map(AxisKey::of),
            cols: config.cols.as_ref().map(AxisKey::of),
        }
    }
}

/// Precomputed per-strip sines.
///
/// `rows[i]` belongs to the horizontal band `[i·strip_px, (i+1)·strip_px)`, `cols[j]` to the
/// vertical band at the same spacing. Tables for an unconfigured axis (or harmonic) are empty;
/// configured ones have exactly `ceil(dimension / strip_px)` entries.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTable {
    pub strip_px: u32,
    pub rows: Vec<f64>,
    pub rows_secondary: Vec<f64>,
    pub cols: Vec<f64>,
    pub cols_secondary: Vec<f64>,
}

impl PhaseTable {
    /// Pure function of its inputs: canvas backing size, device pixel ratio, and config.
    pub fn build(width: u32, height: u32, dpr: f64, config: &WaveConfig) -> Self {
        let strip_px = strip_px(config.strip, dpr);
        let row_count = height.div_ceil(strip_px) as usize;
        let col_count = width.div_ceil(strip_px) as usize;

        let (rows, rows_secondary) = axis_tables(config.rows.as_ref(), row_count, strip_px, dpr);
        let (cols, cols_secondary) = axis_tables(config.cols.as_ref(), col_count, strip_px, dpr);

        Self {
            strip_px,
            rows,
            rows_secondary,
            cols,
            cols_secondary,
        }
    }
}

/// `max(2, floor(strip · dpr))`.
pub fn strip_px(strip: f64, dpr: f64) -> u32 {
    let v = (strip * dpr).floor();
    if v.is_finite() && v > f64::from(MIN_STRIP_PX) {
        v.min(f64::from(u32::MAX)) as u32
    } else {
        MIN_STRIP_PX
    }
}

fn axis_tables(
    axis: Option<&AxisWave>,
    count: usize,
    strip_px: u32,
    dpr: f64,
) -> (Vec<f64>, Vec<f64>) {
    let Some(axis) = axis else {
        return (Vec::new(), Vec::new());
    };
    let primary = harmonic_table(&axis.primary, count, strip_px, dpr);
    let secondary = axis
        .secondary
        .as_ref()
        .map(|h| harmonic_table(h, count, strip_px, dpr))
        .unwrap_or_default();
    (primary, secondary)
}

fn harmonic_table(h: &Harmonic, count: usize, strip_px: u32, dpr: f64) -> Vec<f64> {
    let denom = (h.wavelength * dpr).floor().max(1.0);
    let strip = f64::from(strip_px);
    (0..count)
        .map(|i| {
            let center = i as f64 * strip + strip * 0.5;
            (center / denom * TAU + h.phase).sin()
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/wave/phase.rs"]
mod tests;

//! Per-canvas wave background animator.
//!
//! Each renderer owns its configuration, tile, phase table and backing frame. The host calls
//! [`WaveRenderer::render`] once per display frame with a monotonic timestamp; there is no
//! shared state between renderers.

use std::path::Path;

use crate::assets::tile::Tile;
use crate::foundation::core::{CanvasSize, Rgba8Premul};
use crate::foundation::error::{WavewalkError, WavewalkResult};
use crate::render::composite::over;
use crate::render::frame::FrameRGBA;
use crate::wave::config::{AxisCompose, AxisWave, WaveConfig};
use crate::wave::phase::{PhaseKey, PhaseTable};
use crate::wave::shape::shaped_signed_sine;
use crate::wave::tuning::WaveTuning;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveState {
    Uninitialized,
    LoadingTile,
    Animating,
    /// The tile failed to load; the renderer never draws.
    Inert,
}

pub struct WaveRenderer {
    config: WaveConfig,
    canvas: CanvasSize,
    state: WaveState,
    running: bool,
    tile: Option<Tile>,
    start_ms: f64,
    table: Option<(PhaseKey, PhaseTable)>,
    rebuilds: u64,
    row_offsets: Vec<i64>,
    col_offsets: Vec<i64>,
    frame: FrameRGBA,
}

impl WaveRenderer {
    pub fn new(config: WaveConfig, canvas: CanvasSize) -> WavewalkResult<Self> {
        config.validate()?;
        let (w, h) = canvas.backing();
        let bg = config.background.to_rgba8_premul();
        Ok(Self {
            config,
            canvas,
            state: WaveState::Uninitialized,
            running: false,
            tile: None,
            start_ms: 0.0,
            table: None,
            rebuilds: 0,
            row_offsets: Vec::new(),
            col_offsets: Vec::new(),
            frame: FrameRGBA::new(w, h, bg),
        })
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn is_running(&self) -> bool {
        self.running && self.state == WaveState::Animating
    }

    /// Number of phase-table builds so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn phase_table(&self) -> Option<&PhaseTable> {
        self.table.as_ref().map(|(_, t)| t)
    }

    pub fn background(&self) -> Rgba8Premul {
        self.config.background.to_rgba8_premul()
    }

    /// Load the tile from disk and start animating at `now_ms`.
    ///
    /// A failure is logged and leaves the renderer inert for good; the error is returned so
    /// callers can report it, but nothing else on the page depends on it.
    #[tracing::instrument(skip(self))]
    pub fn load_tile(&mut self, path: &Path, now_ms: f64) -> WavewalkResult<()> {
        if self.state == WaveState::Inert {
            return Err(WavewalkError::asset("wave renderer is inert after a failed load"));
        }
        self.state = WaveState::LoadingTile;
        match Tile::load(path) {
            Ok(tile) => {
                self.attach_tile(tile, now_ms);
                Ok(())
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "wave tile failed to load");
                self.state = WaveState::Inert;
                Err(err)
            }
        }
    }

    /// Install an already decoded tile and start animating at `now_ms`.
    pub fn attach_tile(&mut self, tile: Tile, now_ms: f64) {
        if self.state == WaveState::Inert {
            return;
        }
        self.tile = Some(tile);
        self.start(now_ms);
    }

    fn start(&mut self, now_ms: f64) {
        self.resize(self.canvas);
        self.start_ms = now_ms;
        self.running = true;
        self.state = WaveState::Animating;
        tracing::debug!(
            width = self.frame.width,
            height = self.frame.height,
            "wave animating"
        );
    }

    /// Stop scheduling frames; `render` returns `None` until resumed.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        if self.state == WaveState::Animating {
            self.running = true;
        }
    }

    /// Recompute the backing size from the displayed size and rebuild the phase table when
    /// it changed.
    pub fn resize(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
        let (w, h) = canvas.backing();
        self.frame.resize(w, h);
        self.ensure_table();
    }

    pub fn tuning(&mut self) -> WaveTuning<'_> {
        WaveTuning::new(&mut self.config)
    }

    fn ensure_table(&mut self) {
        let (w, h) = (self.frame.width, self.frame.height);
        let dpr = self.config.wave_dpr(self.canvas);
        let key = PhaseKey::new(w, h, dpr, &self.config);
        if self.table.as_ref().is_some_and(|(k, _)| *k == key) {
            return;
        }
        let table = PhaseTable::build(w, h, dpr, &self.config);
        self.rebuilds += 1;
        tracing::debug!(
            strip_px = table.strip_px,
            rows = table.rows.len(),
            cols = table.cols.len(),
            "phase table rebuilt"
        );
        self.table = Some((key, table));
    }

    /// Paint the frame for host time `now_ms`.
    pub fn render(&mut self, now_ms: f64) -> Option<&FrameRGBA> {
        if !self.is_running() {
            return None;
        }
        self.ensure_table();
        let (Some(tile), Some((_, table))) = (self.tile.as_ref(), self.table.as_ref()) else {
            return None;
        };

        let dpr = self.config.wave_dpr(self.canvas);
        let s = shaped_signed_sine(
            now_ms - self.start_ms,
            self.config.duration_ms,
            self.config.shape_k,
        );

        let rows_on = fill_offsets(
            &mut self.row_offsets,
            self.config.rows.as_ref(),
            &table.rows,
            &table.rows_secondary,
            dpr * s,
        );
        let cols_on = fill_offsets(
            &mut self.col_offsets,
            self.config.cols.as_ref(),
            &table.cols,
            &table.cols_secondary,
            dpr * s,
        );

        // An overlaid column pass covers every pixel, hiding the row pass entirely.
        let rows_visible = rows_on && !(cols_on && self.config.compose == AxisCompose::Overlay);

        let bg = self.config.background.to_rgba8_premul().to_array();
        paint(
            &mut self.frame,
            tile,
            table.strip_px,
            rows_visible.then_some(self.row_offsets.as_slice()),
            cols_on.then_some(self.col_offsets.as_slice()),
            bg,
        );
        Some(&self.frame)
    }

    /// Last painted frame.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }
}

/// Per-strip integer displacement for this frame; returns whether the axis paints.
fn fill_offsets(
    out: &mut Vec<i64>,
    axis: Option<&AxisWave>,
    primary: &[f64],
    secondary: &[f64],
    scale: f64,
) -> bool {
    out.clear();
    let Some(axis) = axis.filter(|a| a.is_active()) else {
        return false;
    };
    let amp2 = axis.secondary.map_or(0.0, |h| h.amplitude);
    out.extend(primary.iter().enumerate().map(|(i, p)| {
        let sec = secondary.get(i).copied().unwrap_or(0.0);
        ((p * axis.primary.amplitude + sec * amp2) * scale).round() as i64
    }));
    true
}

/// Samples the tile through the row offsets, then the column offsets on top of them. With
/// only one axis given this is that axis's pass alone.
fn paint(
    frame: &mut FrameRGBA,
    tile: &Tile,
    strip_px: u32,
    rows: Option<&[i64]>,
    cols: Option<&[i64]>,
    bg: [u8; 4],
) {
    let strip = i64::from(strip_px);
    let width = frame.width;
    for y in 0..frame.height {
        for x in 0..width {
            let oy = cols.map_or(0, |c| c[(x / strip_px) as usize]);
            let sy = i64::from(y) - oy;
            let ox = rows.map_or(0, |r| {
                let band = sy.div_euclid(strip).clamp(0, r.len() as i64 - 1);
                r[band as usize]
            });
            let sx = i64::from(x) - ox;

            let texel = tile.sample(sx, sy);
            let out = if texel[3] == 255 {
                texel
            } else {
                over(bg, texel, 1.0)
            };
            frame.set_pixel(x, y, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wave/renderer.rs"]
mod tests;

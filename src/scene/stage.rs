//! A prepared canvas: wave background with the walking sprites composited on top.
//!
//! The stage owns every per-canvas resource and is driven entirely by host timestamps, so a
//! range render replays the same choreography for the same definition.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::assets::sprite_sheet::SpriteSheet;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{CanvasSize, Fps, FrameIndex, Rgba8Premul};
use crate::foundation::error::WavewalkResult;
use crate::render::composite::{draw_image, fill_rect_over};
use crate::render::frame::FrameRGBA;
use crate::runtime::frame_loop::FrameLoop;
use crate::scene::model::StageDef;
use crate::sprite::choreographer::Choreographer;
use crate::sprite::config::{ChoreoConfig, SpriteDef};
use crate::sprite::walker::{Direction, SpriteState};
use crate::wave::renderer::{WaveRenderer, WaveState};
use crate::wave::tuning::WaveTuning;

const FLASH_OPACITY: f32 = 0.8;

const PLACEHOLDER_COLORS: [[u8; 3]; 4] = [
    [0xF2, 0xC1, 0x4E],
    [0x6E, 0xC6, 0xFF],
    [0xE8, 0x6A, 0x92],
    [0x9B, 0xE5, 0x64],
];

/// Walk and pose animations of one roster entry.
#[derive(Debug)]
struct SpritePoses {
    walk: SpriteSheet,
    shoot: SpriteSheet,
}

pub struct Stage {
    canvas: CanvasSize,
    fps: Fps,
    wave: WaveRenderer,
    choreo: Choreographer,
    poses: Vec<SpritePoses>,
    frame_loop: FrameLoop,
    frame: FrameRGBA,
}

impl Stage {
    /// Load assets and boot the stage at host time 0.
    ///
    /// Asset failures never abort preparation: a bad tile leaves a solid background and a
    /// missing sprite sheet is replaced by a silhouette.
    #[tracing::instrument(skip(def, assets_root), fields(seed = def.seed))]
    pub fn prepare(def: &StageDef, assets_root: impl AsRef<Path>) -> WavewalkResult<Self> {
        def.validate()?;
        let root = assets_root.as_ref();

        let mut wave = WaveRenderer::new(def.wave.to_config(), def.canvas)?;
        match &def.tile {
            // Failure is already logged and leaves the renderer inert.
            Some(tile) => {
                let _ = wave.load_tile(&resolve_asset(root, tile), 0.0);
            }
            None => tracing::warn!("no wave tile configured, background stays solid"),
        }

        let choreo = Choreographer::new(def.roster.clone(), def.sprites.clone(), def.seed)?;
        let poses = def
            .roster
            .iter()
            .enumerate()
            .map(|(i, sd)| load_poses(root, sd, &def.sprites, i))
            .collect::<WavewalkResult<Vec<_>>>()?;

        let (w, h) = def.canvas.backing();
        let mut stage = Self {
            canvas: def.canvas,
            fps: def.fps,
            frame: FrameRGBA::new(w, h, wave.background()),
            wave,
            choreo,
            poses,
            frame_loop: FrameLoop::from_config(&def.sprites, def.reduced_motion),
        };
        if stage.frame_loop.boot(0.0) {
            stage.choreo.start(0.0, stage.canvas.viewport());
        }
        tracing::debug!(
            width = w,
            height = h,
            wave = ?stage.wave.state(),
            sprites = stage.poses.len(),
            "stage prepared"
        );
        Ok(stage)
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn wave(&self) -> &WaveRenderer {
        &self.wave
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreo
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    /// Last rendered frame.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    pub fn tuning(&mut self) -> WaveTuning<'_> {
        self.wave.tuning()
    }

    /// Start (or resume) both animators.
    pub fn start(&mut self, now_ms: f64) {
        self.frame_loop.start(now_ms);
        if !self.choreo.is_started() {
            self.choreo.start(now_ms, self.canvas.viewport());
        }
        self.wave.resume();
    }

    /// Halt frame scheduling and drop every pending flash.
    pub fn stop(&mut self) {
        self.frame_loop.stop();
        self.choreo.suspend();
        self.wave.pause();
    }

    pub fn visibility_changed(&mut self, hidden: bool, now_ms: f64) {
        if self.frame_loop.visibility_changed(hidden, now_ms) {
            self.choreo.suspend();
            self.wave.pause();
        } else if !hidden && self.frame_loop.is_running() {
            self.wave.resume();
        }
    }

    pub fn resize(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
        self.wave.resize(canvas);
    }

    /// Advance choreography to `now_ms` and paint one frame.
    pub fn render_frame(&mut self, now_ms: f64) -> &FrameRGBA {
        let viewport = self.canvas.viewport();
        if let Some(dt) = self.frame_loop.tick(now_ms) {
            self.choreo.update(dt, now_ms, viewport);
        }

        let painted = self.wave.render(now_ms).is_some();
        if painted || self.wave.state() == WaveState::Animating {
            self.frame.clone_from(self.wave.frame());
        } else {
            let (w, h) = self.canvas.backing();
            self.frame.resize(w, h);
            self.frame.clear(self.wave.background());
        }

        self.draw_sprite(now_ms);
        &self.frame
    }

    /// Render `frames` at the stage fps (frame 0 at host time 0) into `sink`.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_range(&mut self, frames: Range<u64>, sink: &mut dyn FrameSink) -> WavewalkResult<()> {
        let (width, height) = self.canvas.backing();
        sink.begin(SinkConfig {
            width,
            height,
            fps: self.fps,
        })?;
        for i in frames {
            let idx = FrameIndex(i);
            let now_ms = self.fps.frame_time_ms(0.0, idx);
            let frame = self.render_frame(now_ms);
            sink.push_frame(idx, frame)?;
        }
        sink.end()
    }

    fn draw_sprite(&mut self, now_ms: f64) {
        let Some(sprite) = self.choreo.active() else {
            return;
        };
        let Some(poses) = self.poses.get(self.choreo.active_index()) else {
            return;
        };
        let def = sprite.def();
        let (sheet, span) = match sprite.state() {
            SpriteState::Walking => (&poses.walk, def.frames.walk),
            SpriteState::Posing => (&poses.shoot, def.frames.shoot),
        };
        let img = sheet.frame_in_span(
            now_ms - sprite.state_since_ms(),
            span.start,
            span.end,
            span.dur_ms,
        );

        let dst = sprite
            .bounds(self.canvas.viewport())
            .scale_from_origin(self.canvas.effective_dpr());
        draw_image(&mut self.frame, img, dst, sprite.direction() == Direction::Left);
        if sprite.is_flash_on() {
            fill_rect_over(
                &mut self.frame,
                dst,
                Rgba8Premul::opaque(255, 255, 255),
                FLASH_OPACITY,
            );
        }
    }
}

/// Site-absolute asset paths (`/assets/...`) are taken relative to `root`.
fn resolve_asset(root: &Path, path: &str) -> PathBuf {
    root.join(path.trim_start_matches('/'))
}

fn load_poses(
    root: &Path,
    def: &SpriteDef,
    cfg: &ChoreoConfig,
    index: usize,
) -> WavewalkResult<SpritePoses> {
    let color = PLACEHOLDER_COLORS[index % PLACEHOLDER_COLORS.len()];
    let load = |asset: String| -> WavewalkResult<SpriteSheet> {
        let path = resolve_asset(root, &asset);
        match SpriteSheet::load(&path) {
            Ok(sheet) => Ok(sheet),
            Err(err) => {
                tracing::warn!(
                    sprite = %def.name,
                    path = %path.display(),
                    error = %err,
                    "sprite sheet unavailable, using placeholder"
                );
                SpriteSheet::placeholder(def.width as u32, def.height as u32, color)
            }
        }
    };
    Ok(SpritePoses {
        walk: load(def.walk_asset(cfg))?,
        shoot: load(def.shoot_asset(cfg))?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;

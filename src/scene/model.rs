use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{CanvasSize, Fps};
use crate::foundation::error::{WavewalkError, WavewalkResult};
use crate::sprite::config::{ChoreoConfig, SpriteDef, default_roster};
use crate::wave::config::{WaveConfig, WavePreset};

/// Wave background: either a named preset or a full configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WaveSpec {
    Preset(WavePreset),
    Config(WaveConfig),
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self::Preset(WavePreset::Bidirectional)
    }
}

impl WaveSpec {
    pub fn to_config(&self) -> WaveConfig {
        match self {
            Self::Preset(p) => WaveConfig::preset(*p),
            Self::Config(c) => c.clone(),
        }
    }
}

/// Everything needed to prepare a [`crate::scene::stage::Stage`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageDef {
    pub canvas: CanvasSize,
    #[serde(default)]
    pub fps: Fps,
    /// Seed for every randomized choreography choice.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub wave: WaveSpec,
    /// Tile image, relative to the assets root. The file name must end in `_<side>.<ext>`.
    #[serde(default)]
    pub tile: Option<String>,
    #[serde(default)]
    pub sprites: ChoreoConfig,
    #[serde(default = "default_roster")]
    pub roster: Vec<SpriteDef>,
    /// Host preference; disables the sprite loop autostart.
    #[serde(default)]
    pub reduced_motion: bool,
}

impl StageDef {
    /// A stage with default wave, sprites and roster on the given canvas.
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            fps: Fps::default(),
            seed: 0,
            wave: WaveSpec::default(),
            tile: None,
            sprites: ChoreoConfig::default(),
            roster: default_roster(),
            reduced_motion: false,
        }
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> WavewalkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WavewalkError::validation(format!("parse stage JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> WavewalkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WavewalkError::validation(format!("open stage JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> WavewalkResult<()> {
        let c = self.canvas;
        if !(c.css_width.is_finite() && c.css_height.is_finite())
            || c.css_width <= 0.0
            || c.css_height <= 0.0
        {
            return Err(WavewalkError::validation("canvas size must be positive"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        self.wave.to_config().validate()?;
        self.sprites.validate()?;
        if self.roster.is_empty() {
            return Err(WavewalkError::validation("sprite roster must be non-empty"));
        }
        for def in &self.roster {
            def.validate()?;
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::foundation::error::{WavewalkError, WavewalkResult};

/// Choreography tunables shared by every sprite in the roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreoConfig {
    /// Directory prefix for sprite sheets (`<base_path><root>_walk.gif`).
    pub base_path: String,
    /// Off-screen distance (CSS px) a sprite spawns and exits at.
    pub respawn_margin: f64,
    /// Largest per-frame step in seconds.
    pub max_dt: f64,
    pub autostart: bool,
    /// Stop the loop while the page is hidden.
    pub pause_hidden: bool,
    /// Walking speed range, CSS px per second.
    pub walk_speed: [f64; 2],
    pub walk_bob_amp: [f64; 2],
    /// Bob cycles per second.
    pub walk_bob_rate: [f64; 2],
    /// Pose spots per traversal.
    pub shoot_spots: usize,
    /// Fraction of the viewport width kept free of pose spots on each side.
    pub shoot_spot_margin: f64,
    pub flash_ms: f64,
    /// Delay from the start of a pose to the flash.
    pub flash_delay_ms: f64,
    /// Distance kept from the top and bottom edges when picking a walking height.
    pub spawn_edge: f64,
}

impl Default for ChoreoConfig {
    fn default() -> Self {
        Self {
            base_path: "/assets/images/walkers/".to_owned(),
            respawn_margin: 500.0,
            max_dt: 0.05,
            autostart: true,
            pause_hidden: true,
            walk_speed: [60.0, 140.0],
            walk_bob_amp: [2.0, 4.0],
            walk_bob_rate: [0.6, 1.2],
            shoot_spots: 2,
            shoot_spot_margin: 0.25,
            flash_ms: 240.0,
            flash_delay_ms: 400.0,
            spawn_edge: 20.0,
        }
    }
}

impl ChoreoConfig {
    pub fn validate(&self) -> WavewalkResult<()> {
        check_range("walk_speed", self.walk_speed)?;
        check_range("walk_bob_amp", self.walk_bob_amp)?;
        check_range("walk_bob_rate", self.walk_bob_rate)?;
        for (name, v) in [
            ("respawn_margin", self.respawn_margin),
            ("flash_ms", self.flash_ms),
            ("flash_delay_ms", self.flash_delay_ms),
            ("spawn_edge", self.spawn_edge),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(WavewalkError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            return Err(WavewalkError::validation("max_dt must be > 0"));
        }
        if !(0.0..=0.5).contains(&self.shoot_spot_margin) {
            return Err(WavewalkError::validation(
                "shoot_spot_margin must be within [0, 0.5]",
            ));
        }
        Ok(())
    }
}

fn check_range(name: &str, r: [f64; 2]) -> WavewalkResult<()> {
    if !r[0].is_finite() || !r[1].is_finite() || r[0] < 0.0 || r[0] > r[1] {
        return Err(WavewalkError::validation(format!(
            "{name} must be a finite range [lo, hi] with 0 <= lo <= hi"
        )));
    }
    Ok(())
}

/// Frame span and cycle time of one animated pose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSpan {
    pub start: u32,
    pub end: u32,
    pub dur_ms: f64,
}

impl FrameSpan {
    pub fn new(start: u32, end: u32, dur_ms: f64) -> Self {
        Self { start, end, dur_ms }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrames {
    pub walk: FrameSpan,
    pub shoot: FrameSpan,
}

/// One roster entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteDef {
    pub name: String,
    /// Asset file stem; defaults to `name`.
    #[serde(default)]
    pub root: Option<String>,
    pub width: f64,
    pub height: f64,
    pub frames: SpriteFrames,
    /// Overrides [`ChoreoConfig::walk_speed`].
    #[serde(default)]
    pub walk_speed: Option<[f64; 2]>,
    /// Overrides [`ChoreoConfig::flash_delay_ms`].
    #[serde(default)]
    pub flash_delay_ms: Option<f64>,
}

impl SpriteDef {
    pub fn root(&self) -> &str {
        self.root.as_deref().unwrap_or(&self.name)
    }

    pub fn walk_asset(&self, cfg: &ChoreoConfig) -> String {
        format!("{}{}_walk.gif", cfg.base_path, self.root())
    }

    pub fn shoot_asset(&self, cfg: &ChoreoConfig) -> String {
        format!("{}{}_shoot.gif", cfg.base_path, self.root())
    }

    pub fn validate(&self) -> WavewalkResult<()> {
        if self.name.trim().is_empty() {
            return Err(WavewalkError::validation("sprite name must be non-empty"));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(WavewalkError::validation(format!(
                "sprite '{}' needs a positive frame size",
                self.name
            )));
        }
        for span in [self.frames.walk, self.frames.shoot] {
            if !span.dur_ms.is_finite() || span.dur_ms <= 0.0 || span.start > span.end {
                return Err(WavewalkError::validation(format!(
                    "sprite '{}' has an invalid frame span",
                    self.name
                )));
            }
        }
        if let Some(speed) = self.walk_speed {
            check_range("walk_speed", speed)?;
        }
        if self.flash_delay_ms.is_some_and(|d| !d.is_finite() || d < 0.0) {
            return Err(WavewalkError::validation(format!(
                "sprite '{}' flash_delay_ms must be >= 0",
                self.name
            )));
        }
        Ok(())
    }
}

/// The two photographers that walk across the site.
pub fn default_roster() -> Vec<SpriteDef> {
    vec![
        SpriteDef {
            name: "barl".to_owned(),
            root: None,
            width: 128.0,
            height: 128.0,
            frames: SpriteFrames {
                walk: FrameSpan::new(0, 15, 1000.0),
                shoot: FrameSpan::new(0, 4, 1000.0),
            },
            walk_speed: Some([80.0, 90.0]),
            flash_delay_ms: None,
        },
        SpriteDef {
            name: "charl".to_owned(),
            root: None,
            width: 128.0,
            height: 128.0,
            frames: SpriteFrames {
                walk: FrameSpan::new(0, 15, 800.0),
                shoot: FrameSpan::new(0, 4, 500.0),
            },
            walk_speed: None,
            flash_delay_ms: None,
        },
    ]
}

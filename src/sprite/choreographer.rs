//! Round-robin hand-off between roster sprites.
//!
//! Exactly one sprite is on stage at a time. When it leaves the viewport the next roster entry
//! enters from the opposite side, so consecutive traversals always alternate direction
//! whatever the roster size.

use crate::foundation::core::Viewport;
use crate::foundation::error::{WavewalkError, WavewalkResult};
use crate::foundation::math::Rng64;
use crate::sprite::config::{ChoreoConfig, SpriteDef};
use crate::sprite::walker::{Direction, Sprite, UpdateOutcome};

#[derive(Debug)]
pub struct Choreographer {
    config: ChoreoConfig,
    sprites: Vec<Sprite>,
    index: usize,
    started: bool,
    traversals: u64,
    rng: Rng64,
}

impl Choreographer {
    pub fn new(roster: Vec<SpriteDef>, config: ChoreoConfig, seed: u64) -> WavewalkResult<Self> {
        if roster.is_empty() {
            return Err(WavewalkError::validation("sprite roster must be non-empty"));
        }
        config.validate()?;
        for def in &roster {
            def.validate()?;
        }
        Ok(Self {
            config,
            sprites: roster.into_iter().map(Sprite::new).collect(),
            index: 0,
            started: false,
            traversals: 0,
            rng: Rng64::new(seed),
        })
    }

    /// Activate the first roster entry walking right. Calling it again restarts from index 0.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self, now_ms: f64, viewport: Viewport) {
        for s in &mut self.sprites {
            s.deactivate();
        }
        self.index = 0;
        self.traversals = 0;
        self.started = true;
        self.activate_current(now_ms, viewport);
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Advance the active sprite by `dt` seconds and hand off on traversal end.
    pub fn update(&mut self, dt: f64, now_ms: f64, viewport: Viewport) -> UpdateOutcome {
        if !self.started {
            return UpdateOutcome::default();
        }
        let Some(sprite) = self.sprites.get_mut(self.index) else {
            return UpdateOutcome::default();
        };
        let outcome = sprite.update(dt, now_ms, viewport, &self.config, &mut self.rng);
        if outcome.traversal_ended {
            self.traversals += 1;
            self.index = (self.index + 1) % self.sprites.len();
            self.activate_current(now_ms, viewport);
        }
        outcome
    }

    /// Drop every pending flash without moving anything. Used when the frame loop stops.
    pub fn suspend(&mut self) {
        for s in &mut self.sprites {
            s.cancel_effects();
        }
    }

    pub fn active(&self) -> Option<&Sprite> {
        self.sprites.get(self.index).filter(|s| s.is_active())
    }

    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn active_count(&self) -> usize {
        self.sprites.iter().filter(|s| s.is_active()).count()
    }

    /// Completed traversals since `start`.
    pub fn traversals(&self) -> u64 {
        self.traversals
    }

    pub fn config(&self) -> &ChoreoConfig {
        &self.config
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    fn activate_current(&mut self, now_ms: f64, viewport: Viewport) {
        let dir = Direction::for_traversal(self.traversals);
        if let Some(sprite) = self.sprites.get_mut(self.index) {
            sprite.activate(dir, now_ms, viewport, &self.config, &mut self.rng);
            tracing::debug!(sprite = %sprite.def().name, ?dir, x = sprite.x(), "sprite enters");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/choreographer.rs"]
mod tests;

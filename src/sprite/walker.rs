//! One walking character.
//!
//! A sprite is created once and re-spawned for every traversal. While walking it moves at a
//! constant speed with a sinusoidal bob; at each pose spot it freezes, switches to the pose
//! animation and fires a delayed camera flash.

use std::f64::consts::TAU;

use crate::foundation::core::{Point, Rect, Viewport};
use crate::foundation::math::Rng64;
use crate::sprite::config::{ChoreoConfig, SpriteDef};
use crate::sprite::timers::TimerQueue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Left to right.
    Right,
    /// Right to left.
    Left,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    /// Direction of the `n`-th traversal (0-based): even traversals walk right, odd ones left.
    pub fn for_traversal(n: u64) -> Self {
        if n % 2 == 0 { Self::Right } else { Self::Left }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteState {
    Walking,
    Posing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteEvent {
    FlashOn,
    FlashOff,
}

/// Result of one `update` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The sprite left the viewport and was deactivated.
    pub traversal_ended: bool,
}

#[derive(Debug)]
pub struct Sprite {
    def: SpriteDef,
    active: bool,
    state: SpriteState,
    state_since_ms: f64,
    dir: Direction,
    x: f64,
    y_base: f64,
    speed: f64,
    bob_amp: f64,
    bob_rate: f64,
    bob_phase: f64,
    pose_spots: Vec<f64>,
    pose_end_ms: f64,
    flash_on: bool,
    timers: TimerQueue<SpriteEvent>,
}

impl Sprite {
    pub fn new(def: SpriteDef) -> Self {
        Self {
            def,
            active: false,
            state: SpriteState::Walking,
            state_since_ms: 0.0,
            dir: Direction::Right,
            x: 0.0,
            y_base: 0.0,
            speed: 0.0,
            bob_amp: 0.0,
            bob_rate: 0.0,
            bob_phase: 0.0,
            pose_spots: Vec::new(),
            pose_end_ms: 0.0,
            flash_on: false,
            timers: TimerQueue::new(),
        }
    }

    pub fn def(&self) -> &SpriteDef {
        &self.def
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> SpriteState {
        self.state
    }

    /// Host time the current state was entered.
    pub fn state_since_ms(&self) -> f64 {
        self.state_since_ms
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_flash_on(&self) -> bool {
        self.flash_on
    }

    /// Remaining pose spots, ascending.
    pub fn pose_spots(&self) -> &[f64] {
        &self.pose_spots
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Place the sprite off-screen on the entry side and make it visible.
    pub fn activate(
        &mut self,
        dir: Direction,
        now_ms: f64,
        viewport: Viewport,
        cfg: &ChoreoConfig,
        rng: &mut Rng64,
    ) {
        self.dir = dir;
        self.speed = self.walk_speed(cfg, rng);
        self.spawn(now_ms, viewport, cfg, rng);
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.cancel_effects();
    }

    /// Cancel pending flash events and turn the flash off.
    pub fn cancel_effects(&mut self) {
        self.timers.clear();
        self.flash_on = false;
    }

    /// Reset position, bob, pose spots and pending effects for a new traversal.
    pub fn spawn(&mut self, now_ms: f64, viewport: Viewport, cfg: &ChoreoConfig, rng: &mut Rng64) {
        let (w, h) = (self.def.width, self.def.height);
        self.y_base = rng.range(cfg.spawn_edge, viewport.height - h - cfg.spawn_edge);
        self.x = match self.dir {
            Direction::Right => -cfg.respawn_margin - w,
            Direction::Left => viewport.width + cfg.respawn_margin + w,
        };

        self.bob_amp = rng.range_pair(cfg.walk_bob_amp);
        self.bob_rate = rng.range_pair(cfg.walk_bob_rate);
        self.bob_phase = rng.range(0.0, TAU);
        self.state = SpriteState::Walking;
        self.state_since_ms = now_ms;

        let left = viewport.width * cfg.shoot_spot_margin;
        let right = viewport.width * (1.0 - cfg.shoot_spot_margin);
        self.pose_spots = (0..cfg.shoot_spots).map(|_| rng.range(left, right)).collect();
        self.pose_spots.sort_by(f64::total_cmp);

        self.pose_end_ms = 0.0;
        self.timers.clear();
        self.flash_on = false;
    }

    pub fn set_state(&mut self, state: SpriteState, now_ms: f64, cfg: &ChoreoConfig, rng: &mut Rng64) {
        self.state = state;
        self.state_since_ms = now_ms;
        self.timers.clear();

        match state {
            SpriteState::Posing => {
                self.speed = 0.0;
                self.pose_end_ms = now_ms + self.def.frames.shoot.dur_ms;
                let delay = self.def.flash_delay_ms.unwrap_or(cfg.flash_delay_ms);
                self.timers.schedule(now_ms + delay, SpriteEvent::FlashOn);
            }
            SpriteState::Walking => {
                self.speed = self.walk_speed(cfg, rng);
                self.flash_on = false;
            }
        }
    }

    /// Fire due flash events. A flash turned on schedules its own turn-off.
    pub fn pump_timers(&mut self, now_ms: f64, cfg: &ChoreoConfig) {
        while let Some((at_ms, event)) = self.timers.pop_due(now_ms) {
            match event {
                SpriteEvent::FlashOn => {
                    self.flash_on = true;
                    self.timers.schedule(at_ms + cfg.flash_ms, SpriteEvent::FlashOff);
                }
                SpriteEvent::FlashOff => self.flash_on = false,
            }
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn update(
        &mut self,
        dt: f64,
        now_ms: f64,
        viewport: Viewport,
        cfg: &ChoreoConfig,
        rng: &mut Rng64,
    ) -> UpdateOutcome {
        if !self.active {
            return UpdateOutcome::default();
        }
        self.pump_timers(now_ms, cfg);

        if self.state == SpriteState::Posing {
            if now_ms < self.pose_end_ms {
                return UpdateOutcome::default();
            }
            self.set_state(SpriteState::Walking, now_ms, cfg, rng);
        }

        self.x += self.speed * dt;
        self.bob_phase += dt * TAU * self.bob_rate;

        if let Some(spot) = self.leading_spot()
            && self.reached(spot)
        {
            self.set_state(SpriteState::Posing, now_ms, cfg, rng);
            match self.dir {
                Direction::Right => {
                    self.pose_spots.remove(0);
                }
                Direction::Left => {
                    self.pose_spots.pop();
                }
            }
        }

        let exited = match self.dir {
            Direction::Right => self.x > viewport.width + cfg.respawn_margin,
            Direction::Left => self.x < -cfg.respawn_margin,
        };
        if exited {
            self.deactivate();
            return UpdateOutcome {
                traversal_ended: true,
            };
        }
        UpdateOutcome::default()
    }

    /// Top-left corner on screen, in whole CSS pixels.
    pub fn display_position(&self, viewport: Viewport) -> Point {
        let max_y = viewport.height - self.def.height;
        let y = (self.y_base + self.bob_amp * self.bob_phase.sin())
            .min(max_y)
            .max(0.0);
        Point::new(self.x.trunc(), y.trunc())
    }

    pub fn bounds(&self, viewport: Viewport) -> Rect {
        let p = self.display_position(viewport);
        Rect::new(p.x, p.y, p.x + self.def.width, p.y + self.def.height)
    }

    fn leading_spot(&self) -> Option<f64> {
        match self.dir {
            Direction::Right => self.pose_spots.first().copied(),
            Direction::Left => self.pose_spots.last().copied(),
        }
    }

    fn reached(&self, spot: f64) -> bool {
        match self.dir {
            Direction::Right => self.x >= spot,
            Direction::Left => self.x <= spot,
        }
    }

    fn walk_speed(&self, cfg: &ChoreoConfig, rng: &mut Rng64) -> f64 {
        let range = self.def.walk_speed.unwrap_or(cfg.walk_speed);
        rng.range_pair(range) * self.dir.sign()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/walker.rs"]
mod tests;

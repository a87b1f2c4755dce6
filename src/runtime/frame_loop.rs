//! Per-frame driver: running flag, clamped frame delta and visibility pausing.

use crate::sprite::config::ChoreoConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameLoop {
    running: bool,
    last_ms: Option<f64>,
    max_dt: f64,
    autostart: bool,
    pause_hidden: bool,
    reduced_motion: bool,
}

impl FrameLoop {
    pub fn new(max_dt: f64, autostart: bool, pause_hidden: bool, reduced_motion: bool) -> Self {
        Self {
            running: false,
            last_ms: None,
            max_dt,
            autostart,
            pause_hidden,
            reduced_motion,
        }
    }

    pub fn from_config(cfg: &ChoreoConfig, reduced_motion: bool) -> Self {
        Self::new(cfg.max_dt, cfg.autostart, cfg.pause_hidden, reduced_motion)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start on page load unless autostart is off or the user prefers reduced motion.
    /// Returns whether the loop is now running.
    pub fn boot(&mut self, now_ms: f64) -> bool {
        if self.reduced_motion {
            tracing::debug!("reduced motion preferred, not starting");
            return false;
        }
        if self.autostart {
            self.start(now_ms);
        }
        self.running
    }

    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_ms = Some(now_ms);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_ms = None;
    }

    /// Elapsed seconds since the previous tick, clamped to `max_dt`, or `None` once stopped.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        let dt = match self.last_ms {
            Some(prev) => ((now_ms - prev) / 1000.0).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        Some(dt)
    }

    /// Returns `true` when the call stopped a running loop.
    pub fn visibility_changed(&mut self, hidden: bool, now_ms: f64) -> bool {
        if !self.pause_hidden {
            return false;
        }
        if hidden {
            let was_running = self.running;
            self.stop();
            was_running
        } else {
            if !self.reduced_motion {
                self.start(now_ms);
            }
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/frame_loop.rs"]
mod tests;

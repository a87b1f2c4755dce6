use crate::foundation::error::{WavewalkError, WavewalkResult};
use crate::wave::config::{MIN_DURATION_MS, WaveConfig};

/// Live tuning surface for one wave renderer.
///
/// Every setter takes effect on the next rendered frame. Wavelength and strip changes alter
/// the phase-table inputs, so the renderer rebuilds its table on that frame; the other
/// parameters are applied per frame without a rebuild.
pub struct WaveTuning<'a> {
    config: &'a mut WaveConfig,
}

impl<'a> WaveTuning<'a> {
    pub(crate) fn new(config: &'a mut WaveConfig) -> Self {
        Self { config }
    }

    pub fn set_amp(&mut self, v: f64) {
        self.set_amplitude(0, v);
    }

    pub fn set_amp2(&mut self, v: f64) {
        self.set_amplitude(1, v);
    }

    pub fn set_wavelength(&mut self, v: f64) {
        self.set_wavelength_slot(0, v);
    }

    pub fn set_wavelength2(&mut self, v: f64) {
        self.set_wavelength_slot(1, v);
    }

    pub fn set_duration(&mut self, v: f64) {
        if v.is_finite() {
            self.config.duration_ms = v.max(MIN_DURATION_MS);
        }
    }

    pub fn set_strip(&mut self, v: f64) {
        if v.is_finite() {
            self.config.strip = v.max(1.0);
        }
    }

    pub fn set_shape_k(&mut self, v: f64) {
        if v.is_finite() {
            self.config.shape_k = v.clamp(0.0, 1.0);
        }
    }

    /// Apply a setter by name (`amp`, `amp2`, `wavelength`, `wavelength2`, `duration`,
    /// `strip`, `shape_k`).
    pub fn apply(&mut self, name: &str, v: f64) -> WavewalkResult<()> {
        match name {
            "amp" => self.set_amp(v),
            "amp2" => self.set_amp2(v),
            "wavelength" => self.set_wavelength(v),
            "wavelength2" => self.set_wavelength2(v),
            "duration" => self.set_duration(v),
            "strip" => self.set_strip(v),
            "shape_k" | "shapeK" => self.set_shape_k(v),
            other => {
                return Err(WavewalkError::validation(format!(
                    "unknown wave parameter '{other}'"
                )));
            }
        }
        Ok(())
    }

    /// Parse and apply a `name=value` pair.
    pub fn apply_pair(&mut self, pair: &str) -> WavewalkResult<()> {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| WavewalkError::validation(format!("expected name=value, got '{pair}'")))?;
        let v: f64 = value.trim().parse().map_err(|_| {
            WavewalkError::validation(format!("invalid number for '{}': '{value}'", name.trim()))
        })?;
        self.apply(name.trim(), v)
    }

    fn set_amplitude(&mut self, slot: usize, v: f64) {
        if !v.is_finite() {
            return;
        }
        match self.config.slot_mut(slot) {
            Some(h) => h.amplitude = v,
            None => tracing::warn!(slot, "wave has no axis to tune"),
        }
    }

    fn set_wavelength_slot(&mut self, slot: usize, v: f64) {
        if !v.is_finite() || v <= 0.0 {
            tracing::warn!(value = v, "ignoring non-positive wavelength");
            return;
        }
        match self.config.slot_mut(slot) {
            Some(h) => h.wavelength = v,
            None => tracing::warn!(slot, "wave has no axis to tune"),
        }
    }
}

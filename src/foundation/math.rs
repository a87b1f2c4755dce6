/// Deterministic SplitMix64 generator.
///
/// Every randomized choice in choreography (speeds, bob parameters, spawn height, pose spots)
/// draws from one of these, so a render is reproducible from its seed.
#[derive(Clone, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[lo, hi)`; returns `lo` when the range is empty or inverted.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let u = self.next_f64_01();
        if hi <= lo {
            return lo;
        }
        lo + u * (hi - lo)
    }

    pub fn range_pair(&mut self, bounds: [f64; 2]) -> f64 {
        self.range(bounds[0], bounds[1])
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Euclidean modulo for texel wrapping; `m` must be > 0.
pub(crate) fn wrap_i64(v: i64, m: u32) -> u32 {
    v.rem_euclid(i64::from(m)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

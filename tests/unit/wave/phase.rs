use super::*;
use crate::wave::config::{V_PHASE_SHIFT, WavePreset};

#[test]
fn counts_match_ceil_of_dimension_over_strip() {
    for preset in [
        WavePreset::Horizontal,
        WavePreset::Vertical,
        WavePreset::Bidirectional,
    ] {
        for strip in [1.0, 2.0, 3.0, 7.5] {
            for dpr in [1.0, 1.5, 2.0, 3.0] {
                for (w, h) in [(1, 1), (10, 7), (640, 480), (1921, 1079)] {
                    let mut cfg = WaveConfig::preset(preset);
                    cfg.strip = strip;
                    let t = PhaseTable::build(w, h, dpr, &cfg);
                    let sp = strip_px(strip, dpr);
                    assert_eq!(t.strip_px, sp);
                    if cfg.rows.is_some() {
                        assert_eq!(t.rows.len(), (h as usize).div_ceil(sp as usize));
                    }
                    if cfg.cols.is_some() {
                        assert_eq!(t.cols.len(), (w as usize).div_ceil(sp as usize));
                    }
                }
            }
        }
    }
}

#[test]
fn strip_never_below_two_device_pixels() {
    assert_eq!(strip_px(1.0, 1.0), 2);
    assert_eq!(strip_px(2.0, 1.0), 2);
    assert_eq!(strip_px(2.0, 1.75), 3);
    assert_eq!(strip_px(3.0, 2.0), 6);
    assert_eq!(strip_px(f64::NAN, 1.0), 2);
}

#[test]
fn entries_are_sines_of_strip_centers() {
    let cfg = WaveConfig::preset(WavePreset::Bidirectional);
    let t = PhaseTable::build(100, 100, 1.0, &cfg);
    // Row 3 center is y = 7; wavelength 120.
    let expected_row = (7.0 / 120.0 * TAU).sin();
    assert!((t.rows[3] - expected_row).abs() < 1e-12);
    // Column 0 center is x = 1; wavelength 180, shifted.
    let expected_col = (1.0 / 180.0 * TAU + V_PHASE_SHIFT).sin();
    assert!((t.cols[0] - expected_col).abs() < 1e-12);
    assert!(t.rows_secondary.is_empty());
}

#[test]
fn wavelength_scales_with_dpr() {
    let cfg = WaveConfig::preset(WavePreset::Bidirectional);
    let t = PhaseTable::build(10, 10, 2.0, &cfg);
    // strip_px = 4, row 0 center = 2, denom = 240.
    assert!((t.rows[0] - (2.0 / 240.0 * TAU).sin()).abs() < 1e-12);
}

#[test]
fn build_is_deterministic() {
    let cfg = WaveConfig::preset(WavePreset::Horizontal);
    assert_eq!(
        PhaseTable::build(320, 200, 1.25, &cfg),
        PhaseTable::build(320, 200, 1.25, &cfg)
    );
}

#[test]
fn unconfigured_axis_has_empty_tables() {
    let cfg = WaveConfig::preset(WavePreset::Horizontal);
    let t = PhaseTable::build(50, 50, 1.0, &cfg);
    assert!(t.cols.is_empty());
    assert!(t.cols_secondary.is_empty());
    assert_eq!(t.rows_secondary.len(), t.rows.len());
}

#[test]
fn key_ignores_per_frame_parameters() {
    let cfg = WaveConfig::default();
    let base = PhaseKey::new(10, 10, 1.0, &cfg);

    let mut tuned = cfg.clone();
    tuned.rows.as_mut().unwrap().primary.amplitude = 99.0;
    tuned.duration_ms = 500.0;
    tuned.shape_k = 0.9;
    assert_eq!(PhaseKey::new(10, 10, 1.0, &tuned), base);

    let mut rewaved = cfg.clone();
    rewaved.rows.as_mut().unwrap().primary.wavelength = 10.0;
    assert_ne!(PhaseKey::new(10, 10, 1.0, &rewaved), base);

    let mut restripped = cfg;
    restripped.strip = 4.0;
    assert_ne!(PhaseKey::new(10, 10, 1.0, &restripped), base);
    assert_ne!(PhaseKey::new(10, 10, 2.0, &WaveConfig::default()), base);
}

use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frame_duration_ms() - 1000.0 / 30.0).abs() < 1e-9);
    assert!((fps.frame_time_ms(100.0, FrameIndex(3)) - 200.0).abs() < 1e-9);
}

#[test]
fn backing_size_rounds_and_scales_by_dpr() {
    assert_eq!(CanvasSize::new(100.0, 50.0, 2.0).backing(), (200, 100));
    assert_eq!(CanvasSize::new(100.4, 50.6, 1.0).backing(), (100, 51));
    assert_eq!(CanvasSize::new(10.0, 10.0, 1.5).backing(), (15, 15));
}

#[test]
fn backing_size_is_never_empty_and_dpr_floor_is_one() {
    assert_eq!(CanvasSize::new(0.0, 0.0, 1.0).backing(), (1, 1));
    assert_eq!(CanvasSize::new(10.0, 10.0, 0.5).backing(), (10, 10));
    assert_eq!(CanvasSize::new(10.0, 10.0, f64::NAN).effective_dpr(), 1.0);
}

#[test]
fn premultiply_rounds_to_nearest() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c, Rgba8Premul { r: 128, g: 64, b: 0, a: 128 });
    assert_eq!(Rgba8Premul::opaque(1, 2, 3).to_array(), [1, 2, 3, 255]);
}

use super::*;

fn looped() -> FrameLoop {
    FrameLoop::from_config(&ChoreoConfig::default(), false)
}

#[test]
fn boot_respects_reduced_motion_and_autostart() {
    let mut l = looped();
    assert!(l.boot(0.0));

    let mut l = FrameLoop::from_config(&ChoreoConfig::default(), true);
    assert!(!l.boot(0.0));
    assert_eq!(l.tick(16.0), None);

    let cfg = ChoreoConfig {
        autostart: false,
        ..ChoreoConfig::default()
    };
    let mut l = FrameLoop::from_config(&cfg, false);
    assert!(!l.boot(0.0));
    l.start(0.0);
    assert!(l.is_running());
}

#[test]
fn tick_reports_seconds_and_clamps_stalls() {
    let mut l = looped();
    l.boot(1000.0);
    assert_eq!(l.tick(1016.0), Some(0.016));
    assert_eq!(l.tick(6016.0), Some(0.05));
    // Clock going backwards never yields a negative step.
    assert_eq!(l.tick(6000.0), Some(0.0));
}

#[test]
fn start_is_idempotent() {
    let mut l = looped();
    l.start(0.0);
    l.start(40.0);
    assert_eq!(l.tick(48.0), Some(0.048));
}

#[test]
fn stop_halts_ticks() {
    let mut l = looped();
    l.boot(0.0);
    l.stop();
    assert!(!l.is_running());
    assert_eq!(l.tick(16.0), None);
}

#[test]
fn hidden_page_pauses_and_resume_does_not_replay_missed_time() {
    let mut l = looped();
    l.boot(0.0);
    assert!(l.visibility_changed(true, 100.0));
    assert_eq!(l.tick(200.0), None);
    assert!(!l.visibility_changed(false, 60_000.0));
    assert_eq!(l.tick(60_010.0), Some(0.01));
}

#[test]
fn visibility_is_ignored_without_pause_hidden() {
    let cfg = ChoreoConfig {
        pause_hidden: false,
        ..ChoreoConfig::default()
    };
    let mut l = FrameLoop::from_config(&cfg, false);
    l.boot(0.0);
    assert!(!l.visibility_changed(true, 10.0));
    assert!(l.is_running());
}

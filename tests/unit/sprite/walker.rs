use super::*;
use crate::sprite::config::default_roster;

const VP: Viewport = Viewport {
    width: 1000.0,
    height: 600.0,
};

fn fixture(dir: Direction) -> (Sprite, ChoreoConfig, Rng64) {
    let cfg = ChoreoConfig::default();
    let mut rng = Rng64::new(42);
    let mut s = Sprite::new(default_roster().remove(0));
    s.activate(dir, 0.0, VP, &cfg, &mut rng);
    (s, cfg, rng)
}

#[test]
fn activate_places_sprite_off_screen_on_entry_side() {
    let (s, cfg, _) = fixture(Direction::Right);
    assert!(s.is_active());
    assert_eq!(s.state(), SpriteState::Walking);
    assert_eq!(s.x(), -cfg.respawn_margin - 128.0);
    assert!((80.0..90.0).contains(&s.speed()));

    let (s, cfg, _) = fixture(Direction::Left);
    assert_eq!(s.x(), VP.width + cfg.respawn_margin + 128.0);
    assert!((-90.0..=-80.0).contains(&s.speed()));
}

#[test]
fn pose_spots_are_sorted_inside_the_central_band() {
    for seed in 0..50 {
        let cfg = ChoreoConfig {
            shoot_spots: 4,
            ..ChoreoConfig::default()
        };
        let mut rng = Rng64::new(seed);
        let mut s = Sprite::new(default_roster().remove(1));
        s.activate(Direction::Right, 0.0, VP, &cfg, &mut rng);
        let spots = s.pose_spots();
        assert_eq!(spots.len(), 4);
        assert!(spots.windows(2).all(|w| w[0] < w[1]));
        assert!(spots.iter().all(|&x| (250.0..750.0).contains(&x)));
    }
}

#[test]
fn walking_advances_by_speed_times_dt() {
    let (mut s, cfg, mut rng) = fixture(Direction::Right);
    let (x0, v) = (s.x(), s.speed());
    let out = s.update(0.016, 16.0, VP, &cfg, &mut rng);
    assert!(!out.traversal_ended);
    assert!((s.x() - (x0 + v * 0.016)).abs() < 1e-9);
}

#[test]
fn reaching_a_spot_poses_and_consumes_it_once() {
    let (mut s, cfg, mut rng) = fixture(Direction::Right);
    s.pose_spots = vec![300.0, 700.0];
    s.x = 299.0;

    s.update(0.05, 100.0, VP, &cfg, &mut rng);
    assert_eq!(s.state(), SpriteState::Posing);
    assert_eq!(s.speed(), 0.0);
    assert_eq!(s.pose_spots(), &[700.0]);

    // Frozen until the pose deadline (1000 ms for this sprite).
    let x = s.x();
    s.update(0.05, 600.0, VP, &cfg, &mut rng);
    assert_eq!(s.x(), x);
    assert_eq!(s.state(), SpriteState::Posing);

    s.update(0.05, 1100.0, VP, &cfg, &mut rng);
    assert_eq!(s.state(), SpriteState::Walking);
    assert!(s.speed() > 0.0);
    assert!(s.x() > x);
    assert_eq!(s.pose_spots(), &[700.0]);
}

#[test]
fn leftward_walk_consumes_from_the_back() {
    let (mut s, cfg, mut rng) = fixture(Direction::Left);
    s.pose_spots = vec![300.0, 700.0];
    s.x = 701.0;
    s.update(0.05, 0.0, VP, &cfg, &mut rng);
    assert_eq!(s.state(), SpriteState::Posing);
    assert_eq!(s.pose_spots(), &[300.0]);
}

#[test]
fn flash_turns_on_after_delay_and_off_after_flash_ms() {
    let (mut s, cfg, mut rng) = fixture(Direction::Right);
    s.pose_spots = vec![0.0];
    s.x = 0.0;
    s.update(0.0, 1000.0, VP, &cfg, &mut rng);
    assert_eq!(s.state(), SpriteState::Posing);
    assert!(!s.is_flash_on());

    s.pump_timers(1399.0, &cfg);
    assert!(!s.is_flash_on());
    s.pump_timers(1400.0, &cfg);
    assert!(s.is_flash_on());
    s.pump_timers(1639.0, &cfg);
    assert!(s.is_flash_on());
    s.pump_timers(1640.0, &cfg);
    assert!(!s.is_flash_on());
    assert_eq!(s.pending_timers(), 0);
}

#[test]
fn late_pump_runs_the_whole_flash() {
    let (mut s, cfg, mut rng) = fixture(Direction::Right);
    s.set_state(SpriteState::Posing, 0.0, &cfg, &mut rng);
    s.pump_timers(10_000.0, &cfg);
    assert!(!s.is_flash_on());
    assert_eq!(s.pending_timers(), 0);
}

#[test]
fn per_sprite_flash_delay_overrides_global() {
    let cfg = ChoreoConfig::default();
    let mut rng = Rng64::new(1);
    let mut def = default_roster().remove(0);
    def.flash_delay_ms = Some(120.0);
    let mut s = Sprite::new(def);
    s.activate(Direction::Right, 0.0, VP, &cfg, &mut rng);
    s.set_state(SpriteState::Posing, 0.0, &cfg, &mut rng);
    s.pump_timers(120.0, &cfg);
    assert!(s.is_flash_on());
}

#[test]
fn deactivation_cancels_pending_flash() {
    let (mut s, cfg, mut rng) = fixture(Direction::Right);
    s.set_state(SpriteState::Posing, 0.0, &cfg, &mut rng);
    assert_eq!(s.pending_timers(), 1);

    s.deactivate();
    assert_eq!(s.pending_timers(), 0);
    s.pump_timers(5_000.0, &cfg);
    assert!(!s.is_flash_on());
    assert!(!s.is_active());
}

#[test]
fn respawn_cancels_pending_flash() {
    let (mut s, cfg, mut rng) = fixture(Direction::Right);
    s.set_state(SpriteState::Posing, 0.0, &cfg, &mut rng);
    s.pump_timers(400.0, &cfg);
    assert!(s.is_flash_on());

    s.activate(Direction::Left, 450.0, VP, &cfg, &mut rng);
    assert!(!s.is_flash_on());
    assert_eq!(s.pending_timers(), 0);
    assert_eq!(s.state(), SpriteState::Walking);
}

#[test]
fn leaving_the_viewport_ends_the_traversal() {
    let (mut s, cfg, mut rng) = fixture(Direction::Right);
    s.pose_spots.clear();
    s.x = VP.width + cfg.respawn_margin - 0.5;
    let out = s.update(0.05, 0.0, VP, &cfg, &mut rng);
    assert!(out.traversal_ended);
    assert!(!s.is_active());

    // Inactive sprites ignore updates.
    let out = s.update(0.05, 0.0, VP, &cfg, &mut rng);
    assert!(!out.traversal_ended);
}

#[test]
fn display_position_is_clamped_to_viewport() {
    let (mut s, _, _) = fixture(Direction::Right);
    s.y_base = 10_000.0;
    assert_eq!(s.display_position(VP).y, VP.height - 128.0);
    s.y_base = -50.0;
    assert_eq!(s.display_position(VP).y, 0.0);

    let tiny = Viewport::new(100.0, 50.0);
    assert_eq!(s.display_position(tiny).y, 0.0);
    assert_eq!(s.bounds(tiny).height(), 128.0);
}

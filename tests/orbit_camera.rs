use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use strider::controller::orbit::PITCH_MARGIN;
use strider::controller::{OrbitConfig, OrbitState};

#[test]
fn pose_matches_reference_geometry() {
    let config = OrbitConfig { radius: 10.0, target_offset: 3.0, ..Default::default() };
    let state = OrbitState { yaw: 0.0, pitch: 0.0 };
    let (eye, target) = state.camera_pose(&config, Vec3::ZERO);
    assert!((eye - Vec3::new(0.0, 3.0, 10.0)).length() < 1e-5, "eye={eye:?}");
    assert!((target - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-6, "target={target:?}");
}

#[test]
fn pose_is_a_pure_function() {
    let config = OrbitConfig::default();
    let state = OrbitState { yaw: 1.3, pitch: -0.4 };
    let avatar = Vec3::new(5.0, 1.0, -2.0);
    assert_eq!(state.camera_pose(&config, avatar), state.camera_pose(&config, avatar));
}

#[test]
fn eye_stays_at_orbit_radius() {
    let config = OrbitConfig { radius: 8.0, target_offset: 2.0, ..Default::default() };
    for (yaw, pitch) in [(0.0f32, 0.0f32), (1.0, 0.5), (-2.5, -1.2), (6.9, 1.4)] {
        let state = OrbitState { yaw, pitch: pitch.clamp(-FRAC_PI_2 + PITCH_MARGIN, FRAC_PI_2 - PITCH_MARGIN) };
        let (eye, target) = state.camera_pose(&config, Vec3::new(3.0, 0.5, -1.0));
        let dist = (eye - target).length();
        assert!((dist - config.radius).abs() < 1e-4, "yaw={yaw} pitch={pitch} dist={dist}");
    }
}

#[test]
fn pitch_never_reaches_the_poles() {
    let config = OrbitConfig { sensitivity: 0.05, ..Default::default() };
    let mut state = OrbitState::default();
    // A hostile delta sequence: large swings in both directions.
    for (dx, dy) in [(0.0, 1e6), (3.0, -1e6), (-7.0, 4e4), (0.0, -123456.0), (2.0, 99999.0)] {
        state.apply_look(&config, dx, dy);
        assert!(state.pitch < FRAC_PI_2, "pitch hit +pi/2");
        assert!(state.pitch > -FRAC_PI_2, "pitch hit -pi/2");
        assert!(state.pitch.abs() <= FRAC_PI_2 - PITCH_MARGIN + 1e-6);
    }
}

#[test]
fn dragging_right_decreases_yaw() {
    let config = OrbitConfig::default();
    let mut state = OrbitState::default();
    state.apply_look(&config, 100.0, 0.0);
    assert!(state.yaw < 0.0);
}

#[test]
fn yaw_is_unbounded() {
    let config = OrbitConfig { sensitivity: 1.0, ..Default::default() };
    let mut state = OrbitState::default();
    state.apply_look(&config, -100.0, 0.0);
    // No wrapping is applied; the trig in camera_pose handles it.
    assert!((state.yaw - 100.0).abs() < 1e-3);
}

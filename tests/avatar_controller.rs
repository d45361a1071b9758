use glam::Vec3;
use strider::controller::avatar::{move_direction, AvatarConfig, AvatarController};
use strider::controller::MoveIntents;

fn controller() -> AvatarController {
    AvatarController::new(AvatarConfig::default())
}

#[test]
fn forward_at_yaw_zero_moves_along_z() {
    let c = controller();
    let intents = MoveIntents { forward: true, ..Default::default() };
    let vel = c.next_velocity(intents, 0.0, 1.0, Vec3::ZERO);
    assert!(vel.x.abs() < 1e-6, "x={}", vel.x);
    assert!((vel.z - c.config.move_speed).abs() < 1e-5, "z={}", vel.z);
}

#[test]
fn opposing_axis_components_cancel() {
    let intents = MoveIntents {
        forward: true,
        backward: true,
        strafe_left: true,
        ..Default::default()
    };
    let dir = move_direction(intents, 1.2);
    // Forward/back cancel; only the strafe axis remains.
    assert!((dir.length() - 1.0).abs() < 1e-6);
    let (_, right) = strider::controller::avatar::movement_basis(1.2);
    assert!((dir + right).length() < 1e-6, "expected -right, got {dir:?}");
}

#[test]
fn diagonal_speed_equals_single_axis_speed() {
    let c = controller();
    let diagonal = MoveIntents { forward: true, strafe_right: true, ..Default::default() };
    let vel = c.next_velocity(diagonal, 0.4, 1.0, Vec3::ZERO);
    let horizontal = (vel.x * vel.x + vel.z * vel.z).sqrt();
    assert!(
        (horizontal - c.config.move_speed).abs() < 1e-4,
        "diagonal speed {horizontal} != {}",
        c.config.move_speed
    );
}

#[test]
fn no_keys_zeroes_horizontal_velocity() {
    let c = controller();
    // Pre-existing momentum must be overwritten, not preserved.
    let vel = c.next_velocity(MoveIntents::default(), 0.0, 1.0, Vec3::new(7.0, -3.0, 2.0));
    assert_eq!(vel.x, 0.0);
    assert_eq!(vel.z, 0.0);
    assert_eq!(vel.y, -3.0);
}

#[test]
fn jump_fires_only_near_rest_height() {
    let c = controller();
    let jumping = MoveIntents { jump: true, ..Default::default() };

    let grounded = c.next_velocity(jumping, 0.0, c.config.rest_height + 0.05, Vec3::ZERO);
    assert!((grounded.y - c.config.jump_speed).abs() < 1e-6);

    let airborne = c.next_velocity(jumping, 0.0, c.config.rest_height + 2.0, Vec3::new(0.0, -1.5, 0.0));
    assert!((airborne.y + 1.5).abs() < 1e-6, "vertical velocity must pass through untouched");
}

#[test]
fn jump_without_key_leaves_vertical_untouched() {
    let c = controller();
    let vel = c.next_velocity(MoveIntents::default(), 0.0, c.config.rest_height, Vec3::new(0.0, 4.0, 0.0));
    assert_eq!(vel.y, 4.0);
}

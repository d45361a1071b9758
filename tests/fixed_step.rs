use glam::Vec3;
use strider::controller::avatar::{AvatarConfig, AvatarController};
use strider::controller::{MoveIntents, PhysicsWorld};

const HALF_EXTENTS: Vec3 = Vec3::new(0.5, 1.0, 0.5);
const FIXED_DT: f32 = 1.0 / 60.0;

fn world_with_avatar(spawn: Vec3) -> (PhysicsWorld, rapier3d::prelude::RigidBodyHandle) {
    let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0), FIXED_DT, 10);
    world.spawn_ground();
    let avatar = world.spawn_avatar(spawn, HALF_EXTENTS, 70.0);
    (world, avatar)
}

#[test]
fn first_frame_zero_budget_is_a_no_op() {
    let (mut world, avatar) = world_with_avatar(Vec3::new(0.0, 5.0, 0.0));
    let before = world.position(avatar).unwrap();
    let steps = world.advance(0.0);
    let after = world.position(avatar).unwrap();
    assert_eq!(steps, 0);
    assert_eq!(before, after, "zero real-time budget must not move the body");
}

#[test]
fn long_frame_caps_substeps() {
    // Power-of-two dt keeps the accumulator arithmetic exact.
    let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0), 0.25, 10);
    world.spawn_ground();
    world.spawn_avatar(Vec3::new(0.0, 5.0, 0.0), HALF_EXTENTS, 70.0);

    assert_eq!(world.advance(60.0), 10);
    // The surplus was dropped: simulated time lags rather than catching up.
    assert_eq!(world.advance(0.0), 0);
    assert_eq!(world.advance(0.25), 1);
}

#[test]
fn avatar_settles_at_rest_height() {
    let (mut world, avatar) = world_with_avatar(Vec3::new(0.0, 3.0, 0.0));
    // ~3 simulated seconds, in frame-sized slices.
    for _ in 0..180 {
        world.advance(FIXED_DT);
    }
    let pos = world.position(avatar).unwrap();
    assert!(
        (pos.y - HALF_EXTENTS.y).abs() < 0.1,
        "expected to rest near y={}, got y={}",
        HALF_EXTENTS.y,
        pos.y
    );
}

#[test]
fn jump_rises_and_lands() {
    let (mut world, avatar) = world_with_avatar(Vec3::new(0.0, HALF_EXTENTS.y, 0.0));
    let controller = AvatarController::new(AvatarConfig::default());
    let jump = MoveIntents { jump: true, ..Default::default() };

    // Let the solver settle contact first.
    for _ in 0..30 {
        world.advance(FIXED_DT);
        controller.update(MoveIntents::default(), 0.0, &mut world, avatar);
    }

    controller.update(jump, 0.0, &mut world, avatar);
    world.advance(FIXED_DT);
    let rising = world.position(avatar).unwrap();
    assert!(rising.y > HALF_EXTENTS.y + 0.01, "expected lift-off, y={}", rising.y);

    // Simulate up to 3 seconds without further jumping; it should land again.
    for _ in 0..180 {
        world.advance(FIXED_DT);
        controller.update(MoveIntents::default(), 0.0, &mut world, avatar);
    }
    let landed = world.position(avatar).unwrap();
    assert!(
        (landed.y - HALF_EXTENTS.y).abs() < 0.1,
        "expected to land near rest height, y={}",
        landed.y
    );
}

#[test]
fn movement_is_camera_relative() {
    let (mut world, avatar) = world_with_avatar(Vec3::new(0.0, HALF_EXTENTS.y, 0.0));
    let controller = AvatarController::new(AvatarConfig::default());
    let forward = MoveIntents { forward: true, ..Default::default() };

    // With the camera yawed a quarter turn, "forward" is world +X.
    let yaw = std::f32::consts::FRAC_PI_2;
    for _ in 0..60 {
        world.advance(FIXED_DT);
        controller.update(forward, yaw, &mut world, avatar);
    }
    let pos = world.position(avatar).unwrap();
    assert!(pos.x > 1.0, "expected +X travel, x={}", pos.x);
    assert!(pos.z.abs() < 0.2, "expected no z drift, z={}", pos.z);
}

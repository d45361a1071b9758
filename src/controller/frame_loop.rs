use std::time::Instant;

use rapier3d::prelude::RigidBodyHandle;

use crate::controller::avatar::AvatarController;
use crate::controller::input::{InputState, KeyBindings};
use crate::controller::orbit::{OrbitConfig, OrbitState};
use crate::controller::physics::PhysicsWorld;
use crate::model::{Camera, Scene};

/// Per-frame simulation context: owns the physics world, the input state and
/// the controllers, and sequences one frame of the core loop. Scheduling of
/// the next frame lives with the window loop (`AboutToWait` requests a
/// redraw), so this struct is a plain state machine.
pub struct FrameContext {
    pub physics: PhysicsWorld,
    pub input: InputState,
    pub bindings: KeyBindings,
    pub avatar_controller: AvatarController,
    pub orbit_config: OrbitConfig,
    pub orbit: OrbitState,
    pub avatar_body: RigidBodyHandle,
    last_frame_time: Option<Instant>,
}

impl FrameContext {
    pub fn new(
        physics: PhysicsWorld,
        avatar_body: RigidBodyHandle,
        avatar_controller: AvatarController,
        orbit_config: OrbitConfig,
    ) -> Self {
        Self {
            physics,
            input: InputState::new(),
            bindings: KeyBindings::default(),
            avatar_controller,
            orbit_config,
            orbit: OrbitState::default(),
            avatar_body,
            last_frame_time: None,
        }
    }

    /// Run one frame of simulation and write the results into the scene and
    /// camera. Returns the wall-clock delta used, for the caller's frame
    /// statistics. The first frame has no prior timestamp and steps with a
    /// zero budget (a warm-up no-op).
    pub fn update(&mut self, scene: &mut Scene, camera: &mut Camera) -> f32 {
        let now = Instant::now();
        let delta = self
            .last_frame_time
            .map(|last| (now - last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame_time = Some(now);

        // Single drain point: everything below sees one consistent snapshot.
        self.input.drain_events();
        let (dx, dy) = self.input.consume_look();
        self.orbit.apply_look(&self.orbit_config, dx, dy);

        self.physics.advance(delta);

        let intents = self.bindings.resolve(&self.input);
        self.avatar_controller
            .update(intents, self.orbit.yaw, &mut self.physics, self.avatar_body);

        if let Some((position, rotation)) = self.physics.body_pose(self.avatar_body) {
            scene.set_avatar_pose(position, rotation);

            let (eye, target) = self.orbit.camera_pose(&self.orbit_config, position);
            camera.eye = eye;
            camera.target = target;
        }

        delta
    }
}

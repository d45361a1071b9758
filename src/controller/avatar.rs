use glam::Vec3;
use rapier3d::prelude::RigidBodyHandle;

use crate::controller::input::MoveIntents;
use crate::controller::physics::PhysicsWorld;

#[derive(Debug, Clone, Copy)]
pub struct AvatarConfig {
    /// Horizontal speed, units/second. Written, not accumulated.
    pub move_speed: f32,
    /// Vertical speed set on a jump, units/second.
    pub jump_speed: f32,
    /// Body-center height when resting on the ground plane (the collider's
    /// vertical half-extent).
    pub rest_height: f32,
    /// How far from `rest_height` the body may be and still count as grounded.
    pub ground_tolerance: f32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            jump_speed: 5.0,
            rest_height: 1.0,
            ground_tolerance: 0.1,
        }
    }
}

/// Horizontal movement basis for a camera yaw; both vectors stay in the
/// ground plane.
pub fn movement_basis(yaw: f32) -> (Vec3, Vec3) {
    let forward = Vec3::new(yaw.sin(), 0.0, yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
    (forward, right)
}

/// Camera-relative move direction from the held intents. Normalized so a
/// diagonal is no faster than a single axis; zero when nothing (or only
/// opposing keys) are held.
pub fn move_direction(intents: MoveIntents, yaw: f32) -> Vec3 {
    let (forward, right) = movement_basis(yaw);
    let mut dir = Vec3::ZERO;
    if intents.forward {
        dir += forward;
    }
    if intents.backward {
        dir -= forward;
    }
    if intents.strafe_right {
        dir += right;
    }
    if intents.strafe_left {
        dir -= right;
    }
    if dir.length_squared() > 0.0 {
        dir.normalize()
    } else {
        Vec3::ZERO
    }
}

/// Maps held movement intents onto the avatar body's velocity once per frame.
pub struct AvatarController {
    pub config: AvatarConfig,
}

impl AvatarController {
    pub fn new(config: AvatarConfig) -> Self {
        Self { config }
    }

    /// Velocity policy. The horizontal components are overwritten outright
    /// (arcade control, no inertia); the vertical component passes through
    /// untouched unless a jump fires. The ground check is positional: near
    /// enough to the rest height counts, regardless of actual contact.
    pub fn next_velocity(
        &self,
        intents: MoveIntents,
        yaw: f32,
        position_y: f32,
        velocity: Vec3,
    ) -> Vec3 {
        let dir = move_direction(intents, yaw);
        let mut vel = velocity;
        vel.x = dir.x * self.config.move_speed;
        vel.z = dir.z * self.config.move_speed;

        if intents.jump && (position_y - self.config.rest_height).abs() < self.config.ground_tolerance {
            vel.y = self.config.jump_speed;
        }
        vel
    }

    pub fn update(
        &self,
        intents: MoveIntents,
        yaw: f32,
        physics: &mut PhysicsWorld,
        avatar: RigidBodyHandle,
    ) {
        let (position, velocity) = match (physics.position(avatar), physics.linvel(avatar)) {
            (Some(p), Some(v)) => (p, v),
            _ => return,
        };
        physics.set_linvel(avatar, self.next_velocity(intents, yaw, position.y, velocity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        let intents = MoveIntents { forward: true, backward: true, ..Default::default() };
        assert_eq!(move_direction(intents, 0.7), Vec3::ZERO);
    }

    #[test]
    fn diagonal_is_unit_length() {
        let intents = MoveIntents { forward: true, strafe_right: true, ..Default::default() };
        let dir = move_direction(intents, 0.3);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert_eq!(dir.y, 0.0);
    }

    #[test]
    fn basis_follows_yaw() {
        let (forward, right) = movement_basis(0.0);
        assert!((forward - Vec3::Z).length() < 1e-6);
        assert!((right - Vec3::X).length() < 1e-6);
    }
}

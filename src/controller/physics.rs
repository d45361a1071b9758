use glam::{Quat, Vec3};
use rapier3d::prelude::{
    CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    QueryPipeline, Real, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, Vector,
};

/// Rigid-body world: one static ground plane, one dynamic avatar, advanced in
/// fixed sub-steps with bounded catch-up.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    fixed_dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3, fixed_dt: f32, max_substeps: u32) -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vec_to_rapier(gravity),
            integration_parameters: IntegrationParameters::default(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            fixed_dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Static ground: an infinite plane with +Y normal through the origin.
    pub fn spawn_ground(&mut self) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .friction(0.8)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Dynamic avatar body with rotation locked so the controls stay purely
    /// translational.
    pub fn spawn_avatar(&mut self, position: Vec3, half_extents: Vec3, mass: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vec_to_rapier(position))
            .lock_rotations()
            .angular_damping(1.0)
            .build();
        let handle = self.bodies.insert(body);
        if let Some(body) = self.bodies.get_mut(handle) {
            if mass > 0.0 {
                body.set_additional_mass(mass, true);
            }
            body.wake_up(true);
        }
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .friction(0.6)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Advance simulation time toward `real_dt` in whole fixed sub-steps,
    /// returning how many ran. The accumulator is clamped to the sub-step
    /// budget, so a long frame makes simulated time lag real time instead of
    /// snowballing. `advance(0.0)` runs nothing.
    pub fn advance(&mut self, real_dt: f32) -> u32 {
        self.accumulator += real_dt.max(0.0);
        let budget = self.fixed_dt * self.max_substeps as f32;
        if self.accumulator > budget {
            self.accumulator = budget;
        }

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt && steps < self.max_substeps {
            self.step_once();
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        steps
    }

    fn step_once(&mut self) {
        self.integration_parameters.dt = self.fixed_dt;
        let hooks = ();
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &hooks,
            &(),
        );
        self.query_pipeline.update(&self.colliders);
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    pub fn position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| vec_from_rapier(b.translation()))
    }

    pub fn rotation(&self, handle: RigidBodyHandle) -> Option<Quat> {
        self.bodies.get(handle).map(|b| {
            let q = b.rotation().coords;
            Quat::from_xyzw(q.x, q.y, q.z, q.w)
        })
    }

    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)> {
        Some((self.position(handle)?, self.rotation(handle)?))
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| vec_from_rapier(b.linvel()))
    }

    pub fn set_linvel(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(vec_to_rapier(velocity), true);
        }
    }
}

fn vec_to_rapier(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

fn vec_from_rapier(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(fixed_dt: f32) -> PhysicsWorld {
        PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0), fixed_dt, 10)
    }

    #[test]
    fn zero_delta_runs_no_steps() {
        let mut w = world(1.0 / 60.0);
        assert_eq!(w.advance(0.0), 0);
    }

    // The step-count tests use a power-of-two dt so the accumulator
    // arithmetic is exact.
    #[test]
    fn whole_substeps_only() {
        let mut w = world(0.25);
        assert_eq!(w.advance(0.875), 3);
        // The half step stays in the accumulator.
        assert_eq!(w.advance(0.125), 1);
    }

    #[test]
    fn catchup_is_bounded() {
        let mut w = world(0.25);
        assert_eq!(w.advance(60.0), 10);
        // Excess real time was discarded, not queued.
        assert_eq!(w.advance(0.0), 0);
    }

    #[test]
    fn gravity_pulls_a_dynamic_body() {
        let mut w = world(1.0 / 60.0);
        w.spawn_ground();
        let avatar = w.spawn_avatar(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.5, 1.0, 0.5), 70.0);
        w.advance(0.25);
        let pos = w.position(avatar).unwrap();
        assert!(pos.y < 5.0, "expected fall, y={}", pos.y);
    }

    #[test]
    fn avatar_rotation_stays_locked() {
        let mut w = world(1.0 / 60.0);
        w.spawn_ground();
        let avatar = w.spawn_avatar(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 0.5), 70.0);
        w.set_linvel(avatar, Vec3::new(10.0, 0.0, 0.0));
        for _ in 0..30 {
            w.advance(1.0 / 60.0);
        }
        let rot = w.rotation(avatar).unwrap();
        assert!(rot.angle_between(Quat::IDENTITY) < 1e-4, "body tipped over: {rot:?}");
    }
}

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Pitch stays strictly inside (-pi/2, pi/2); at the poles the orbit basis
/// degenerates and the look direction is undefined.
pub const PITCH_MARGIN: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct OrbitConfig {
    pub sensitivity: f32,
    /// When true, moving the mouse down raises the camera.
    pub invert_y: bool,
    /// Distance from the orbit target to the camera eye.
    pub radius: f32,
    /// Height of the look target above the avatar origin.
    pub target_offset: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            invert_y: false,
            radius: 10.0,
            target_offset: 3.0,
        }
    }
}

/// Orbit angles around the avatar. Yaw is unbounded and wraps through the
/// trig functions; pitch is clamped on every update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitState {
    /// Mouse-look update. Sign convention: dragging right swings the camera
    /// so yaw decreases; with `invert_y` off, moving the mouse up (negative
    /// dy) raises the camera.
    pub fn apply_look(&mut self, config: &OrbitConfig, dx: f32, dy: f32) {
        self.yaw -= dx * config.sensitivity;
        let dy = if config.invert_y { dy } else { -dy };
        self.pitch = (self.pitch + dy * config.sensitivity)
            .clamp(-FRAC_PI_2 + PITCH_MARGIN, FRAC_PI_2 - PITCH_MARGIN);
    }

    /// Camera eye and look target on a sphere of `config.radius` around the
    /// avatar. Pure: no state besides the angles and the inputs.
    pub fn camera_pose(&self, config: &OrbitConfig, avatar_pos: Vec3) -> (Vec3, Vec3) {
        let (radius, offset) = (config.radius, config.target_offset);
        let eye = Vec3::new(
            avatar_pos.x + radius * self.pitch.cos() * self.yaw.sin(),
            avatar_pos.y + offset + radius * self.pitch.sin(),
            avatar_pos.z + radius * self.pitch.cos() * self.yaw.cos(),
        );
        let target = avatar_pos + Vec3::new(0.0, offset, 0.0);
        (eye, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let config = OrbitConfig { sensitivity: 1.0, ..Default::default() };
        let mut state = OrbitState::default();
        state.apply_look(&config, 0.0, -1000.0);
        assert!(state.pitch <= FRAC_PI_2 - PITCH_MARGIN + 1e-6);
        state.apply_look(&config, 0.0, 1000.0);
        assert!(state.pitch >= -FRAC_PI_2 + PITCH_MARGIN - 1e-6);
    }

    #[test]
    fn invert_y_flips_pitch_direction() {
        let normal = OrbitConfig::default();
        let inverted = OrbitConfig { invert_y: true, ..Default::default() };
        let mut a = OrbitState::default();
        let mut b = OrbitState::default();
        a.apply_look(&normal, 0.0, 10.0);
        b.apply_look(&inverted, 0.0, 10.0);
        assert!(a.pitch < 0.0);
        assert!(b.pitch > 0.0);
        assert!((a.pitch + b.pitch).abs() < 1e-6);
    }
}

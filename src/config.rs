use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "WindowConfig::default_title")]
    pub title: String,
    #[serde(default = "WindowConfig::default_width")]
    pub width: u32,
    #[serde(default = "WindowConfig::default_height")]
    pub height: u32,
}

impl WindowConfig {
    fn default_title() -> String {
        "Strider".to_string()
    }
    const fn default_width() -> u32 {
        1280
    }
    const fn default_height() -> u32 {
        720
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ControlsConfig {
    /// Horizontal speed written into the avatar body, units/second.
    #[serde(default = "ControlsConfig::default_move_speed")]
    pub move_speed: f32,
    /// Vertical speed set on a jump, units/second.
    #[serde(default = "ControlsConfig::default_jump_speed")]
    pub jump_speed: f32,
    #[serde(default = "ControlsConfig::default_mouse_sensitivity")]
    pub mouse_sensitivity: f32,
    /// When true, moving the mouse down raises the camera.
    #[serde(default)]
    pub invert_y: bool,
}

impl ControlsConfig {
    const fn default_move_speed() -> f32 {
        10.0
    }
    const fn default_jump_speed() -> f32 {
        5.0
    }
    const fn default_mouse_sensitivity() -> f32 {
        0.002
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_speed: Self::default_move_speed(),
            jump_speed: Self::default_jump_speed(),
            mouse_sensitivity: Self::default_mouse_sensitivity(),
            invert_y: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CameraConfig {
    /// Distance from the orbit target to the camera eye.
    #[serde(default = "CameraConfig::default_orbit_radius")]
    pub orbit_radius: f32,
    /// Height of the look target above the avatar origin.
    #[serde(default = "CameraConfig::default_target_offset")]
    pub target_offset: f32,
    #[serde(default = "CameraConfig::default_fov_deg")]
    pub fov_deg: f32,
}

impl CameraConfig {
    const fn default_orbit_radius() -> f32 {
        10.0
    }
    const fn default_target_offset() -> f32 {
        3.0
    }
    const fn default_fov_deg() -> f32 {
        60.0
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_radius: Self::default_orbit_radius(),
            target_offset: Self::default_target_offset(),
            fov_deg: Self::default_fov_deg(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SimConfig {
    #[serde(default = "SimConfig::default_gravity_y")]
    pub gravity_y: f32,
    /// Fixed physics step rate, steps/second.
    #[serde(default = "SimConfig::default_fixed_hz")]
    pub fixed_hz: u32,
    /// Cap on physics sub-steps per frame; past this, simulated time lags real time.
    #[serde(default = "SimConfig::default_max_substeps")]
    pub max_substeps: u32,
}

impl SimConfig {
    const fn default_gravity_y() -> f32 {
        -9.81
    }
    const fn default_fixed_hz() -> u32 {
        60
    }
    const fn default_max_substeps() -> u32 {
        10
    }

    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.fixed_hz.max(1) as f32
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity_y: Self::default_gravity_y(),
            fixed_hz: Self::default_fixed_hz(),
            max_substeps: Self::default_max_substeps(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Load a config file, falling back to defaults when it is absent or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("config load failed, using defaults: {err:#}");
                Self::default()
            }
        }
    }
}

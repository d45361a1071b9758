// MODEL: Render-facing scene state
pub mod camera;
pub mod scene;

pub use camera::Camera;
pub use scene::{Renderable, Scene};

// CONTROLLER: Input, simulation, and the per-frame update loop
pub mod avatar;
pub mod frame_loop;
pub mod input;
pub mod orbit;
pub mod physics;

pub use avatar::{AvatarConfig, AvatarController};
pub use frame_loop::FrameContext;
pub use input::{InputEvent, InputState, KeyBindings, MoveIntents};
pub use orbit::{OrbitConfig, OrbitState};
pub use physics::PhysicsWorld;

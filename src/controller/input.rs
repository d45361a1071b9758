/// Platform-agnostic input handling system
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Platform-level input events. Window and device callbacks only push these
/// into a queue; the frame driver drains the queue exactly once per frame, so
/// all state mutation happens at a single point in simulation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { code: KeyCode, pressed: bool },
    MouseMotion { dx: f32, dy: f32 },
    CaptureChanged(bool),
    FocusLost,
}

pub struct InputState {
    queue: Vec<InputEvent>,
    held: HashSet<KeyCode>,
    look_delta: (f32, f32),
    captured: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            held: HashSet::new(),
            look_delta: (0.0, 0.0),
            captured: false,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Apply all queued events in arrival order. Mouse motion only counts
    /// while the pointer is captured; capture changes take effect for the
    /// events queued after them.
    pub fn drain_events(&mut self) {
        for event in std::mem::take(&mut self.queue) {
            match event {
                InputEvent::Key { code, pressed } => self.set_key(code, pressed),
                InputEvent::MouseMotion { dx, dy } => {
                    if self.captured {
                        self.look_delta.0 += dx;
                        self.look_delta.1 += dy;
                    }
                }
                InputEvent::CaptureChanged(captured) => self.captured = captured,
                InputEvent::FocusLost => self.clear_keys(),
            }
        }
    }

    /// Idempotent: repeated presses or releases overwrite the prior value.
    pub fn set_key(&mut self, code: KeyCode, pressed: bool) {
        if pressed {
            self.held.insert(code);
        } else {
            self.held.remove(&code);
        }
    }

    /// Unknown codes are simply not held.
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    pub fn captured(&self) -> bool {
        self.captured
    }

    pub fn clear_keys(&mut self) {
        self.held.clear();
    }

    pub fn consume_look(&mut self) -> (f32, f32) {
        let result = self.look_delta;
        self.look_delta = (0.0, 0.0);
        result
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Key mapping configuration
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub strafe_left: KeyCode,
    pub strafe_right: KeyCode,
    pub jump: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            strafe_left: KeyCode::KeyA,
            strafe_right: KeyCode::KeyD,
            jump: KeyCode::Space,
        }
    }
}

/// Snapshot of the logical movement actions held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntents {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub jump: bool,
}

impl KeyBindings {
    pub fn resolve(&self, input: &InputState) -> MoveIntents {
        MoveIntents {
            forward: input.is_held(self.forward) || input.is_held(KeyCode::ArrowUp),
            backward: input.is_held(self.backward) || input.is_held(KeyCode::ArrowDown),
            strafe_left: input.is_held(self.strafe_left) || input.is_held(KeyCode::ArrowLeft),
            strafe_right: input.is_held(self.strafe_right) || input.is_held(KeyCode::ArrowRight),
            jump: input.is_held(self.jump),
        }
    }
}

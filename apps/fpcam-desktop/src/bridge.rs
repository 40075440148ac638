//! Translation from winit events to [`InputSink`] calls.

use fpcam_input::InputSink;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Button code as the sampler expects it: 0 left, 1 middle, 2 right.
pub fn button_code(button: MouseButton) -> u16 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) => n,
    }
}

/// Platform key name used by key bindings (`KeyCode::KeyW` -> `"KeyW"`).
pub fn key_name(key: KeyCode) -> String {
    format!("{key:?}")
}

pub fn forward_motion(delta: (f64, f64), sink: &mut dyn InputSink) {
    sink.pointer_moved(delta.0 as f32, delta.1 as f32);
}

pub fn forward_button(button: MouseButton, state: ElementState, sink: &mut dyn InputSink) {
    sink.pointer_button(button_code(button), state == ElementState::Pressed);
}

/// Unidentified physical keys are dropped.
pub fn forward_key(key: PhysicalKey, state: ElementState, sink: &mut dyn InputSink) {
    if let PhysicalKey::Code(code) = key {
        sink.key_changed(&key_name(code), state == ElementState::Pressed);
    }
}

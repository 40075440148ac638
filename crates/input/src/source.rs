use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Receiver for device input, one method per event kind the host delivers.
///
/// The host owns the device source and calls into a sink between frames;
/// nothing here is reached through globals.
pub trait InputSink {
    /// Relative pointer motion, in device units.
    fn pointer_moved(&mut self, dx: f32, dy: f32);
    /// Pointer button press or release. `0` is left, `2` is right.
    fn pointer_button(&mut self, button: u16, pressed: bool);
    /// Physical key press or release, by platform key name (`"KeyW"`).
    fn key_changed(&mut self, code: &str, pressed: bool);
    /// Pointer capture was granted or released.
    fn pointer_lock_changed(&mut self, locked: bool);
}

/// A host-owned source that dispatches pending events into a sink.
pub trait EventSource {
    fn pump(&mut self, sink: &mut dyn InputSink);
}

/// A recorded device event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    PointerMove { dx: f32, dy: f32 },
    PointerButton { button: u16, pressed: bool },
    Key { code: String, pressed: bool },
    PointerLock { locked: bool },
}

impl InputEvent {
    /// Deliver this event to `sink`.
    pub fn apply(&self, sink: &mut dyn InputSink) {
        match self {
            Self::PointerMove { dx, dy } => sink.pointer_moved(*dx, *dy),
            Self::PointerButton { button, pressed } => sink.pointer_button(*button, *pressed),
            Self::Key { code, pressed } => sink.key_changed(code, *pressed),
            Self::PointerLock { locked } => sink.pointer_lock_changed(*locked),
        }
    }
}

/// Event source backed by a queue. Every `pump` drains everything queued.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    queue: VecDeque<InputEvent>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.queue.extend(events);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedSource {
    fn pump(&mut self, sink: &mut dyn InputSink) {
        while let Some(event) = self.queue.pop_front() {
            event.apply(sink);
        }
    }
}

use crate::action::{KeyBindings, MoveKey, MoveKeys};
use crate::snapshot::{BUTTON_LEFT, BUTTON_RIGHT, InputSnapshot};
use crate::source::InputSink;

/// Double-buffered input sampler.
///
/// Device events mutate `current` as they arrive. [`InputSampler::update`]
/// commits the frame by copying `current` into `previous`, so pointer deltas
/// are valid for exactly one frame. Events between two commits only ever
/// touch `current`, and pointer motion accumulates across them.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    current: InputSnapshot,
    previous: Option<InputSnapshot>,
    bindings: KeyBindings,
}

impl InputSampler {
    /// Sampler with the default WASD bindings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Live snapshot, including events since the last commit.
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    /// Snapshot committed by the last [`InputSampler::update`], if any.
    pub fn previous(&self) -> Option<&InputSnapshot> {
        self.previous.as_ref()
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Add relative pointer motion.
    ///
    /// The first motion ever observed seeds `previous`, so it never shows up
    /// as a jump in the deltas.
    pub fn on_pointer_move(&mut self, dx: f32, dy: f32) {
        self.current.mouse_x += dx;
        self.current.mouse_y += dy;

        let previous = *self.previous.get_or_insert(self.current);
        self.current.refresh_deltas(&previous);
    }

    pub fn on_pointer_down(&mut self, button: u16) {
        self.set_button(button, true);
    }

    pub fn on_pointer_up(&mut self, button: u16) {
        self.set_button(button, false);
    }

    fn set_button(&mut self, button: u16, pressed: bool) {
        self.on_pointer_move(0.0, 0.0);

        match button {
            BUTTON_LEFT => self.current.left_button = pressed,
            BUTTON_RIGHT => self.current.right_button = pressed,
            _ => {}
        }
    }

    pub fn on_key_change(&mut self, key: MoveKey, pressed: bool) {
        self.current.keys.set(key, pressed);
    }

    /// Mark every move key released, for hosts that lose focus without
    /// receiving the key-up events.
    pub fn release_keys(&mut self) {
        if self.current.keys.any() {
            tracing::debug!("move keys released");
        }
        self.current.keys = MoveKeys::default();
    }

    pub fn on_pointer_lock_change(&mut self, locked: bool) {
        if self.current.pointer_locked != locked {
            tracing::debug!(locked, "pointer lock changed");
        }
        self.current.pointer_locked = locked;
    }

    pub fn key(&self, key: MoveKey) -> bool {
        self.current.key(key)
    }

    /// True once a committed snapshot exists.
    pub fn is_ready(&self) -> bool {
        self.previous.is_some()
    }

    /// Commit the frame boundary.
    ///
    /// Deltas are finalized against the last committed snapshot and the live
    /// snapshot becomes the new committed one, so the finished frame's deltas
    /// are readable from [`InputSampler::previous`]. The live deltas restart
    /// at zero. Before any snapshot was committed this leaves deltas
    /// untouched. `_dt` is unused.
    pub fn update(&mut self, _dt: f32) {
        if let Some(previous) = self.previous {
            self.current.refresh_deltas(&previous);
            self.previous = Some(self.current);
            self.current.clear_deltas();
        }
    }
}

impl InputSink for InputSampler {
    fn pointer_moved(&mut self, dx: f32, dy: f32) {
        self.on_pointer_move(dx, dy);
    }

    fn pointer_button(&mut self, button: u16, pressed: bool) {
        self.set_button(button, pressed);
    }

    fn key_changed(&mut self, code: &str, pressed: bool) {
        match self.bindings.resolve(code) {
            Some(key) => self.on_key_change(key, pressed),
            None => tracing::trace!(code, "ignoring unbound key"),
        }
    }

    fn pointer_lock_changed(&mut self, locked: bool) {
        self.on_pointer_lock_change(locked);
    }
}

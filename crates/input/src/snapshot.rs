use crate::action::{MoveKey, MoveKeys};

/// Pointer button codes as reported by the device source.
pub const BUTTON_LEFT: u16 = 0;
pub const BUTTON_RIGHT: u16 = 2;

/// One frame's view of the input devices.
///
/// A plain value: the sampler keeps one live copy and one committed copy and
/// swaps them at the frame boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub left_button: bool,
    pub right_button: bool,
    /// Accumulated relative pointer motion since the sampler was created.
    pub mouse_x: f32,
    pub mouse_y: f32,
    /// `mouse_x/y` minus the committed snapshot's. Zero until one exists.
    pub mouse_x_delta: f32,
    pub mouse_y_delta: f32,
    pub pointer_locked: bool,
    pub keys: MoveKeys,
}

impl InputSnapshot {
    pub fn key(&self, key: MoveKey) -> bool {
        self.keys.get(key)
    }

    /// Recompute deltas against `previous`.
    pub(crate) fn refresh_deltas(&mut self, previous: &InputSnapshot) {
        self.mouse_x_delta = self.mouse_x - previous.mouse_x;
        self.mouse_y_delta = self.mouse_y - previous.mouse_y;
    }

    pub(crate) fn clear_deltas(&mut self) {
        self.mouse_x_delta = 0.0;
        self.mouse_y_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_idle() {
        let s = InputSnapshot::default();
        assert!(!s.left_button && !s.right_button && !s.pointer_locked);
        assert_eq!(s.mouse_x_delta, 0.0);
        assert!(!s.key(MoveKey::Forward));
    }

    #[test]
    fn refresh_deltas_subtracts_previous() {
        let previous = InputSnapshot {
            mouse_x: 10.0,
            mouse_y: -4.0,
            ..InputSnapshot::default()
        };
        let mut current = InputSnapshot {
            mouse_x: 13.0,
            mouse_y: -6.0,
            ..InputSnapshot::default()
        };
        current.refresh_deltas(&previous);
        assert_eq!(current.mouse_x_delta, 3.0);
        assert_eq!(current.mouse_y_delta, -2.0);
    }
}

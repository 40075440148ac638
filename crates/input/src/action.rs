use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A semantic movement action a physical key can be bound to.
///
/// The camera consumes actions, never raw key codes. Codes are resolved to
/// actions once, at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKey {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [
        MoveKey::Forward,
        MoveKey::Back,
        MoveKey::StrafeLeft,
        MoveKey::StrafeRight,
    ];

    fn index(self) -> usize {
        match self {
            MoveKey::Forward => 0,
            MoveKey::Back => 1,
            MoveKey::StrafeLeft => 2,
            MoveKey::StrafeRight => 3,
        }
    }
}

/// Pressed state for every [`MoveKey`]. Keys never observed read as released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys([bool; 4]);

impl MoveKeys {
    pub fn get(&self, key: MoveKey) -> bool {
        self.0[key.index()]
    }

    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        self.0[key.index()] = pressed;
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&p| p)
    }
}

/// Maps physical key names to move actions.
///
/// Names follow the platform key-code naming (`"KeyW"`, `"ArrowUp"`, ...) so
/// config files stay readable:
/// ```yaml
/// bindings:
///   KeyW: forward
///   ArrowUp: forward
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<String, MoveKey>);

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("KeyW", MoveKey::Forward);
        bindings.bind("KeyS", MoveKey::Back);
        bindings.bind("KeyA", MoveKey::StrafeLeft);
        bindings.bind("KeyD", MoveKey::StrafeRight);
        bindings
    }
}

impl KeyBindings {
    /// Bindings with no keys mapped.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Bind `code` to `action`, replacing any previous binding for that code.
    pub fn bind(&mut self, code: impl Into<String>, action: MoveKey) {
        self.0.insert(code.into(), action);
    }

    /// Resolve a physical key name. Unbound codes resolve to `None`.
    pub fn resolve(&self, code: &str) -> Option<MoveKey> {
        self.0.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

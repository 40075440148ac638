//! Input sampling: device events folded into a per-frame, double-buffered snapshot.
//!
//! # Invariants
//! - Exactly two snapshots: the live one and the one committed at the last `update`.
//! - Events between commits only touch the live snapshot; pointer motion accumulates.
//! - Physical key codes resolve to [`MoveKey`] actions at the boundary.

pub mod action;
pub mod sampler;
pub mod snapshot;
pub mod source;

pub use action::{KeyBindings, MoveKey, MoveKeys};
pub use sampler::InputSampler;
pub use snapshot::{BUTTON_LEFT, BUTTON_RIGHT, InputSnapshot};
pub use source::{EventSource, InputEvent, InputSink, ScriptedSource};

pub fn crate_info() -> &'static str {
    "fpcam-input v0.1.0"
}

//! Scene Adapter: the renderer-agnostic receiver of camera poses.
//!
//! # Invariants
//! - The scene cannot feed back into camera integration.
//! - Pose writes happen at most once per frame.
//!
//! # Workaround
//! Ships a debug text scene in place of a GPU renderer. The trait is stable;
//! swap in a real renderer without changing the controller.

mod scene;

pub use scene::{DebugTextScene, RenderableScene};

pub fn crate_info() -> &'static str {
    "fpcam-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}

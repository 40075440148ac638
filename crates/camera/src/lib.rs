//! First-person camera: look integration, walking, head-bob and gaze raycast.
//!
//! # Invariants
//! - Pitch stays within `[-pitch_limit, pitch_limit]`; yaw is never wrapped.
//! - Nothing integrates while the pointer is unlocked, but the input sampler
//!   still commits every frame.
//! - The gaze raycast only changes the written pose, never yaw/pitch/position.
//! - Invalid frame times are clamped before integration.

mod config;
mod controller;
mod gaze;
mod head_bob;

pub use config::{CameraConfig, ConfigError, HeadBobConfig};
pub use controller::{CameraController, CameraState, Viewport};
pub use gaze::{Gaze, GazeHit, resolve_gaze};
pub use head_bob::HeadBob;

pub fn crate_info() -> &'static str {
    "fpcam-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}

//! Shared math types for the first-person camera crates.
//!
//! # Invariants
//! - Types here are plain values; no crate-level state.
//! - Obstacle boxes are axis-aligned and supplied by the host.

pub mod types;

pub use types::{Aabb, CameraPose, Ray};

pub fn crate_info() -> &'static str {
    "fpcam-common v0.1.0"
}

//! Recorded input sessions replayed through the controller.
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 720 },
//!   "start": [0.0, 3.0, 5.0],
//!   "obstacles": [{ "min": [-0.5, 0.0, -0.5], "max": [0.5, 1.0, 0.5] }],
//!   "frames": [
//!     { "dt": 0.016, "events": [{ "kind": "pointer_lock", "locked": true }] },
//!     { "dt": 0.016, "events": [{ "kind": "key", "code": "KeyW", "pressed": true }] }
//!   ]
//! }
//! ```

use fpcam_camera::{CameraConfig, CameraController, CameraState};
use fpcam_common::Aabb;
use fpcam_input::{InputEvent, ScriptedSource};
use fpcam_scene::DebugTextScene;
use glam::Vec3;
use serde::Deserialize;
use std::path::Path;

/// Errors from reading a session file.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// One frame: events delivered before the update, then the update itself.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionFrame {
    pub dt: f32,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub start: Vec3,
    #[serde(default)]
    pub obstacles: Vec<Aabb>,
    pub frames: Vec<SessionFrame>,
}

/// Result of replaying a session.
#[derive(Debug)]
pub struct ReplayOutcome {
    pub state: CameraState,
    pub frames: usize,
    pub scene: DebugTextScene,
}

impl Session {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let file = std::fs::File::open(path)?;
        let session: Self = serde_json::from_reader(file)?;
        Ok(session)
    }

    /// Run every frame through a fresh controller.
    pub fn replay(&self, config: CameraConfig) -> ReplayOutcome {
        let _span = tracing::info_span!("session_replay", frames = self.frames.len()).entered();

        let mut camera = CameraController::new(config, self.start);
        camera.set_viewport(self.viewport.width, self.viewport.height);
        let mut scene = DebugTextScene::new();
        let mut source = ScriptedSource::new();

        for (i, frame) in self.frames.iter().enumerate() {
            source.extend(frame.events.iter().cloned());
            camera.pump(&mut source);
            camera.update(frame.dt, &self.obstacles, &mut scene);
            tracing::debug!(
                frame = i,
                position = ?camera.position(),
                yaw = camera.yaw(),
                pitch = camera.pitch(),
                "frame replayed"
            );
        }

        ReplayOutcome {
            state: camera.state(),
            frames: self.frames.len(),
            scene,
        }
    }
}

use fpcam_common::CameraPose;
use std::fmt::Write as _;

/// Anything that can display the world from a camera pose.
///
/// The controller writes one pose per locked frame. A scene never reports
/// back; rendering, resizing and assets stay on its side of the boundary.
pub trait RenderableScene {
    fn apply_pose(&mut self, pose: &CameraPose);
}

/// Text scene that keeps the latest pose.
///
/// Useful for CLI output, logging, and testing the scene interface.
#[derive(Debug, Default)]
pub struct DebugTextScene {
    pose: Option<CameraPose>,
    poses_applied: u64,
}

impl DebugTextScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest pose written, if any.
    pub fn pose(&self) -> Option<&CameraPose> {
        self.pose.as_ref()
    }

    pub fn poses_applied(&self) -> u64 {
        self.poses_applied
    }

    /// Describe the current camera as text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Scene (poses applied={}) ===", self.poses_applied);
        match &self.pose {
            None => out.push_str("Camera: <no pose>\n"),
            Some(pose) => {
                let p = pose.position;
                let t = pose.target;
                let f = pose.forward();
                let _ = writeln!(
                    out,
                    "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})",
                    p.x, p.y, p.z, t.x, t.y, t.z
                );
                let _ = writeln!(out, "  forward=({:.3}, {:.3}, {:.3})", f.x, f.y, f.z);
            }
        }
        out
    }
}

impl RenderableScene for DebugTextScene {
    fn apply_pose(&mut self, pose: &CameraPose) {
        self.pose = Some(*pose);
        self.poses_applied += 1;
        tracing::trace!(position = ?pose.position, target = ?pose.target, "pose applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn debug_scene_without_pose() {
        let scene = DebugTextScene::new();
        let output = scene.render();
        assert!(output.contains("poses applied=0"));
        assert!(output.contains("<no pose>"));
    }

    #[test]
    fn debug_scene_keeps_latest_pose() {
        let mut scene = DebugTextScene::new();
        scene.apply_pose(&CameraPose::default());
        scene.apply_pose(&CameraPose {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            target: Vec3::new(1.0, 2.0, -97.0),
        });

        assert_eq!(scene.poses_applied(), 2);
        assert_eq!(scene.pose().unwrap().position, Vec3::new(1.0, 2.0, 3.0));
        let output = scene.render();
        assert!(output.contains("eye=(1.00, 2.00, 3.00)"));
        assert!(output.contains("target=(1.00, 2.00, -97.00)"));
    }
}

use fpcam_common::{Aabb, CameraPose, Ray};
use fpcam_input::{EventSource, InputSampler, MoveKey};
use fpcam_scene::RenderableScene;
use glam::{Mat3, Quat, Vec3};

use crate::config::CameraConfig;
use crate::gaze::{Gaze, resolve_gaze};
use crate::head_bob::HeadBob;

/// Viewport size in pixels, used to normalize pointer motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Read-only copy of the controller's integration state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub rotation: Quat,
    pub yaw: f32,
    pub pitch: f32,
    pub head_bob_timer: f64,
    pub head_bob_active: bool,
}

/// First-person camera driven by an [`InputSampler`].
///
/// All integration is gated on pointer lock: while unlocked the camera is
/// frozen but the sampler still commits every frame, so pointer deltas never
/// pile up across unlocked periods.
pub struct CameraController {
    config: CameraConfig,
    input: InputSampler,
    viewport: Viewport,
    position: Vec3,
    rotation: Quat,
    /// Unbounded; only ever consumed through rotation construction.
    yaw: f32,
    pitch: f32,
    head_bob: HeadBob,
    last_gaze: Option<Gaze>,
}

impl CameraController {
    pub fn new(config: CameraConfig, position: Vec3) -> Self {
        let input = InputSampler::with_bindings(config.bindings.clone());
        Self {
            config,
            input,
            viewport: Viewport::default(),
            position,
            rotation: Quat::IDENTITY,
            yaw: 0.0,
            pitch: 0.0,
            head_bob: HeadBob::new(),
            last_gaze: None,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn input(&self) -> &InputSampler {
        &self.input
    }

    /// Direct access for hosts that deliver events one by one.
    pub fn input_mut(&mut self) -> &mut InputSampler {
        &mut self.input
    }

    /// Dispatch everything pending in `source` into the sampler.
    pub fn pump(&mut self, source: &mut dyn EventSource) {
        source.pump(&mut self.input);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Zero-sized viewports are clamped to one pixel.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport {
            width: width.max(1.0),
            height: height.max(1.0),
        };
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn head_bob(&self) -> &HeadBob {
        &self.head_bob
    }

    /// Gaze resolved on the last locked frame.
    pub fn last_gaze(&self) -> Option<&Gaze> {
        self.last_gaze.as_ref()
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            rotation: self.rotation,
            yaw: self.yaw,
            pitch: self.pitch,
            head_bob_timer: self.head_bob.timer(),
            head_bob_active: self.head_bob.is_active(),
        }
    }

    /// Advance one frame.
    ///
    /// `obstacles` is re-read every frame and may be empty. When the pointer is
    /// locked the pose is written to `scene`; otherwise nothing is written.
    pub fn update(&mut self, dt: f32, obstacles: &[Aabb], scene: &mut dyn RenderableScene) {
        let _span = tracing::trace_span!("camera_update").entered();
        let dt = sanitize_dt(dt);

        if self.input.current().pointer_locked {
            self.update_rotation();
            self.update_camera(obstacles, scene);
            self.head_bob.advance(dt, &self.config.head_bob);
            self.update_translation(dt);
        }

        self.input.update(dt);
    }

    fn update_rotation(&mut self) {
        let snapshot = self.input.current();
        let xh = snapshot.mouse_x_delta / self.viewport.width;
        let yh = snapshot.mouse_y_delta / self.viewport.height;
        if !(xh.is_finite() && yh.is_finite()) {
            tracing::warn!(xh, yh, "ignoring non-finite pointer delta");
            return;
        }

        let limit = self.config.pitch_limit;
        self.yaw += -xh * self.config.yaw_speed;
        self.pitch = (self.pitch + -yh * self.config.pitch_speed).clamp(-limit, limit);

        // Yaw about world up first, then pitch about the yawed right axis.
        let qx = Quat::from_axis_angle(Vec3::Y, self.yaw);
        let qz = Quat::from_axis_angle(Vec3::X, self.pitch);
        self.rotation = qx * qz;
    }

    fn update_camera(&mut self, obstacles: &[Aabb], scene: &mut dyn RenderableScene) {
        let forward = self.rotation * Vec3::NEG_Z;
        let ray = Ray::new(self.position, forward);
        let gaze = resolve_gaze(&ray, self.config.look_distance, obstacles);

        let previous_hit = self.last_gaze.and_then(|g| g.hit).map(|h| h.index);
        let hit = gaze.hit.map(|h| h.index);
        if hit != previous_hit {
            tracing::debug!(?hit, target = ?gaze.point, "gaze target changed");
        }
        self.last_gaze = Some(gaze);

        let mut eye = self.position;
        eye.y += self.head_bob.offset(&self.config.head_bob);

        scene.apply_pose(&CameraPose {
            position: eye,
            rotation: look_rotation(eye, gaze.point).unwrap_or(self.rotation),
            target: gaze.point,
        });
    }

    fn update_translation(&mut self, dt: f32) {
        let axis = |positive: MoveKey, negative: MoveKey| {
            let p = if self.input.key(positive) { 1.0 } else { 0.0 };
            let n = if self.input.key(negative) { -1.0 } else { 0.0 };
            p + n
        };
        let forward_velocity = axis(MoveKey::Forward, MoveKey::Back);
        let strafe_velocity = axis(MoveKey::StrafeLeft, MoveKey::StrafeRight);

        // Yaw only, so strafing and walking never climb or dive.
        let qx = Quat::from_axis_angle(Vec3::Y, self.yaw);
        let speed = self.config.move_speed;

        let forward = qx * Vec3::NEG_Z * (forward_velocity * dt * speed);
        let left = qx * Vec3::NEG_X * (strafe_velocity * dt * speed);
        self.position += forward + left;

        if forward_velocity != 0.0 || strafe_velocity != 0.0 {
            self.head_bob.trigger();
        }
    }
}

/// Non-finite or negative frame times become zero.
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        tracing::warn!(dt, "clamping invalid frame time to zero");
        0.0
    }
}

/// Rotation whose `-Z` axis points from `eye` at `target`, with world up as
/// the up hint. `None` when the direction is degenerate.
fn look_rotation(eye: Vec3, target: Vec3) -> Option<Quat> {
    let back = (eye - target).try_normalize()?;
    let right = Vec3::Y.cross(back).try_normalize()?;
    let up = back.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, back)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpcam_scene::DebugTextScene;

    fn locked_controller() -> CameraController {
        let mut cam = CameraController::new(CameraConfig::default(), Vec3::ZERO);
        cam.input_mut().on_pointer_lock_change(true);
        cam
    }

    #[test]
    fn sanitize_dt_rejects_nan_and_negative() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
        assert_eq!(sanitize_dt(-1.0), 0.0);
    }

    #[test]
    fn look_rotation_straight_ahead_is_identity() {
        let q = look_rotation(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)).unwrap();
        assert!(q.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn look_rotation_points_negative_z_at_target() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(-4.0, 0.5, -2.0);
        let q = look_rotation(eye, target).unwrap();
        let dir = (target - eye).normalize();
        assert!((q * Vec3::NEG_Z - dir).length() < 1e-5);
    }

    #[test]
    fn look_rotation_degenerate() {
        assert!(look_rotation(Vec3::ONE, Vec3::ONE).is_none());
        assert!(look_rotation(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)).is_none());
    }

    #[test]
    fn set_viewport_clamps_zero() {
        let mut cam = CameraController::new(CameraConfig::default(), Vec3::ZERO);
        cam.set_viewport(0.0, 600.0);
        assert_eq!(cam.viewport().width, 1.0);
        assert_eq!(cam.viewport().height, 600.0);
    }

    #[test]
    fn yaw_follows_horizontal_motion() {
        let mut cam = locked_controller();
        let mut scene = DebugTextScene::new();
        cam.set_viewport(1000.0, 500.0);
        cam.input_mut().on_pointer_move(0.0, 0.0);
        cam.input_mut().on_pointer_move(100.0, 0.0);
        cam.update(0.016, &[], &mut scene);

        // -(100 / 1000) * 8
        assert!((cam.yaw() + 0.8).abs() < 1e-6);
        assert_eq!(cam.pitch(), 0.0);
        let expected = Quat::from_axis_angle(Vec3::Y, -0.8);
        assert!(cam.rotation().angle_between(expected) < 1e-5);
    }

    #[test]
    fn rotation_composes_yaw_then_pitch() {
        let mut cam = locked_controller();
        let mut scene = DebugTextScene::new();
        cam.set_viewport(1000.0, 1000.0);
        cam.input_mut().on_pointer_move(0.0, 0.0);
        cam.input_mut().on_pointer_move(-100.0, -100.0);
        cam.update(0.016, &[], &mut scene);

        let forward = cam.rotation() * Vec3::NEG_Z;
        // looking up and to the left, with no roll
        assert!(forward.y > 0.0);
        assert!(forward.x < 0.0);
        let right = cam.rotation() * Vec3::X;
        assert!(right.y.abs() < 1e-5);
    }

    #[test]
    fn unlocked_frame_writes_no_pose() {
        let mut cam = CameraController::new(CameraConfig::default(), Vec3::ZERO);
        let mut scene = DebugTextScene::new();
        cam.update(0.016, &[], &mut scene);
        assert_eq!(scene.poses_applied(), 0);
        assert!(cam.last_gaze().is_none());
    }

    #[test]
    fn locked_frame_writes_pose_with_far_target() {
        let mut cam = locked_controller();
        let mut scene = DebugTextScene::new();
        cam.update(0.016, &[], &mut scene);

        let pose = scene.pose().unwrap();
        assert_eq!(pose.position, Vec3::ZERO);
        assert!((pose.target - Vec3::new(0.0, 0.0, -100.0)).length() < 1e-4);
        assert!(cam.last_gaze().unwrap().hit.is_none());
    }

    #[test]
    fn nan_dt_does_not_corrupt_position() {
        let mut cam = locked_controller();
        let mut scene = DebugTextScene::new();
        cam.input_mut().on_key_change(MoveKey::Forward, true);
        cam.update(f32::NAN, &[], &mut scene);
        assert_eq!(cam.position(), Vec3::ZERO);
        assert!(cam.position().is_finite());
    }
}

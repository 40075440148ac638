use anyhow::Result;
use clap::Parser;
use fpcam_camera::{CameraConfig, CameraController};
use fpcam_common::{Aabb, CameraPose};
use fpcam_input::InputSink;
use fpcam_scene::RenderableScene;
use glam::Vec3;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

mod bridge;

/// Longest frame time fed to the controller.
const MAX_FRAME_DT: f32 = 0.1;
/// Title updates are throttled to every Nth pose.
const TITLE_EVERY: u64 = 15;

#[derive(Parser)]
#[command(name = "fpcam-desktop", about = "First-person camera desktop host")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Camera config file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Scene that shows the camera pose in the window title.
struct TitleScene {
    window: Arc<Window>,
    poses_applied: u64,
}

impl RenderableScene for TitleScene {
    fn apply_pose(&mut self, pose: &CameraPose) {
        self.poses_applied += 1;
        if self.poses_applied % TITLE_EVERY != 0 {
            return;
        }
        let p = pose.position;
        let t = pose.target;
        self.window.set_title(&format!(
            "fpcam  eye=({:.1}, {:.1}, {:.1})  look=({:.1}, {:.1}, {:.1})",
            p.x, p.y, p.z, t.x, t.y, t.z
        ));
    }
}

/// The demo geometry: a unit cube at the origin resting on a 10x10 floor.
fn demo_obstacles() -> Vec<Aabb> {
    vec![
        Aabb::from_center_size(Vec3::ZERO, Vec3::ONE),
        Aabb::new(Vec3::new(-5.0, -0.01, -5.0), Vec3::new(5.0, 0.0, 5.0)),
    ]
}

struct App {
    camera: CameraController,
    obstacles: Vec<Aabb>,
    window: Option<Arc<Window>>,
    scene: Option<TitleScene>,
    last_frame: Instant,
}

impl App {
    fn new(config: CameraConfig) -> Self {
        Self {
            camera: CameraController::new(config, Vec3::new(0.0, 3.0, 5.0)),
            obstacles: demo_obstacles(),
            window: None,
            scene: None,
            last_frame: Instant::now(),
        }
    }

    fn locked(&self) -> bool {
        self.camera.input().current().pointer_locked
    }

    /// Grab the cursor; the sampler only sees the lock once the platform grants it.
    fn request_lock(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                window.set_cursor_visible(false);
                self.camera.input_mut().pointer_lock_changed(true);
                tracing::info!("pointer locked");
            }
            Err(e) => tracing::warn!("pointer lock refused: {e}"),
        }
    }

    fn release_lock(&mut self) {
        if !self.locked() {
            return;
        }
        if let Some(window) = &self.window {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                tracing::warn!("failed to release cursor: {e}");
            }
            window.set_cursor_visible(true);
        }
        self.camera.input_mut().pointer_lock_changed(false);
        tracing::info!("pointer released");
    }

    /// Drop the lock and any held move keys; some platforms never deliver
    /// the key-up events for keys held while focus leaves the window.
    fn focus_lost(&mut self) {
        self.release_lock();
        self.camera.input_mut().release_keys();
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        if let Some(scene) = &mut self.scene {
            self.camera.update(dt, &self.obstacles, scene);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("fpcam")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera
            .set_viewport(size.width as f32, size.height as f32);
        self.scene = Some(TitleScene {
            window: window.clone(),
            poses_applied: 0,
        });
        self.window = Some(window);
        self.last_frame = Instant::now();

        tracing::info!("window ready; click to capture the pointer, Esc to release");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.camera
                    .set_viewport(new_size.width as f32, new_size.height as f32);
            }
            WindowEvent::Focused(false) => {
                self.focus_lost();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.release_lock();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                bridge::forward_key(physical_key, state, self.camera.input_mut());
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if button == MouseButton::Left && state == ElementState::Pressed && !self.locked()
                {
                    self.request_lock();
                }
                bridge::forward_button(button, state, self.camera.input_mut());
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            bridge::forward_motion(delta, self.camera.input_mut());
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => CameraConfig::load(path)?,
        None => CameraConfig::default(),
    };

    tracing::info!("fpcam-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpcam_common::Ray;
    use fpcam_input::MoveKey;

    #[test]
    fn demo_cube_is_in_view_from_start() {
        let ray = Ray::new(Vec3::new(0.0, 0.25, 5.0), Vec3::NEG_Z);
        let obstacles = demo_obstacles();
        let gaze = fpcam_camera::resolve_gaze(&ray, 100.0, &obstacles);
        assert_eq!(gaze.hit.unwrap().index, 0);
        assert!((gaze.point.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn focus_loss_unlocks_and_releases_keys() {
        let mut app = App::new(CameraConfig::default());
        app.camera.input_mut().pointer_lock_changed(true);
        app.camera.input_mut().key_changed("KeyW", true);

        app.focus_lost();
        assert!(!app.locked());
        assert!(!app.camera.input().key(MoveKey::Forward));

        // Relocking does not resume the walk.
        app.camera.input_mut().pointer_lock_changed(true);
        let start = app.camera.position();
        let mut scene = fpcam_scene::DebugTextScene::new();
        app.camera.update(0.1, &app.obstacles, &mut scene);
        assert_eq!(app.camera.position(), start);
    }
}

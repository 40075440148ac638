use clap::{Parser, Subcommand};
use fpcam_camera::{CameraConfig, CameraController};
use fpcam_input::{InputEvent, MoveKey, ScriptedSource};
use fpcam_scene::DebugTextScene;
use glam::Vec3;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod session;

use session::Session;

#[derive(Parser)]
#[command(name = "fpcam-cli", about = "Headless driver for the first-person camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Camera config file (YAML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Replay a recorded input session and print the final camera state
    Replay {
        /// Session file (JSON)
        #[arg(short, long)]
        session: PathBuf,
    },
    /// Lock the pointer, hold forward and report the distance walked
    Walk {
        /// Seconds to hold the forward key
        #[arg(short, long, default_value = "2.0")]
        seconds: f32,
        /// Frame time in seconds
        #[arg(long, default_value = "0.016")]
        dt: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => CameraConfig::load(path)?,
        None => CameraConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("fpcam-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", fpcam_common::crate_info());
            println!("input: {}", fpcam_input::crate_info());
            println!("scene: {}", fpcam_scene::crate_info());
            println!("camera: {}", fpcam_camera::crate_info());
        }
        Commands::Replay { session } => {
            let session = Session::load(&session)?;
            println!(
                "Replaying {} frames against {} obstacles",
                session.frames.len(),
                session.obstacles.len()
            );

            let outcome = session.replay(config);
            let s = outcome.state;
            print!("{}", outcome.scene.render());
            println!("Replayed {} frames", outcome.frames);
            println!(
                "Final: pos=({:.2}, {:.2}, {:.2}) yaw={:.3} pitch={:.3} bob_timer={:.3} bob_active={}",
                s.position.x,
                s.position.y,
                s.position.z,
                s.yaw,
                s.pitch,
                s.head_bob_timer,
                s.head_bob_active
            );
        }
        Commands::Walk { seconds, dt } => {
            if !(dt > 0.0 && dt.is_finite()) {
                anyhow::bail!("dt must be positive, got {dt}");
            }
            let frames = (seconds / dt).round().max(0.0) as usize;
            let speed = config.move_speed;
            println!("Walk demo: {frames} frames of {dt}s with forward held");

            let start = Vec3::new(0.0, 3.0, 5.0);
            let mut camera = CameraController::new(config, start);
            let mut scene = DebugTextScene::new();
            let mut source = ScriptedSource::new();
            source.push(InputEvent::PointerLock { locked: true });
            camera.pump(&mut source);
            // bypass bindings so a remapped config still walks
            camera.input_mut().on_key_change(MoveKey::Forward, true);

            for _ in 0..frames {
                camera.update(dt, &[], &mut scene);
            }

            let walked = (camera.position() - start).length();
            let expected = speed * dt * frames as f32;
            print!("{}", scene.render());
            println!("Walked: {walked:.3} (expected {expected:.3})");
            println!(
                "Match: {}",
                if (walked - expected).abs() < 1e-2 {
                    "OK"
                } else {
                    "MISMATCH"
                }
            );
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand, ValueEnum};
use learngl_camera::{Camera, CameraConfig, CameraMovement};
use learngl_input::{Action, InputState, apply_action};
use learngl_render::{BufferMode, DebugTextRenderer, PolygonMode, Renderer, TriangleScene};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Simulated frame length for `fly`.
const FRAME_SECONDS: f32 = 1.0 / 60.0;
/// Longest movement `fly` will simulate, per axis.
const MAX_HOLD_SECONDS: f32 = 3600.0;

#[derive(Parser)]
#[command(name = "learngl-cli", about = "Headless tool for the learngl examples")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Drive a camera with simulated input and print the resulting view
    Fly {
        /// YAML camera settings
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seconds of forward movement (negative moves backward)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        forward: f32,
        /// Seconds of sideways movement (negative strafes left)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        strafe: f32,
        /// Horizontal mouse offset
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        look_x: f32,
        /// Vertical mouse offset (positive looks up)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        look_y: f32,
        /// Scroll wheel offset (positive zooms in)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        scroll: f32,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Resolve a file name inside the resource directory
    Resource {
        /// File name relative to the resource directory
        name: String,
    },
    /// Describe the draw call for a buffer mode
    Draw {
        #[arg(long, value_enum, default_value = "vertex")]
        buffer: BufferArg,
        /// Wireframe polygons
        #[arg(long)]
        line: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BufferArg {
    Vertex,
    Indexed,
}

impl From<BufferArg> for BufferMode {
    fn from(arg: BufferArg) -> Self {
        match arg {
            BufferArg::Vertex => BufferMode::Vertex,
            BufferArg::Indexed => BufferMode::Indexed,
        }
    }
}

/// Camera state printed by `fly`.
#[derive(Debug, Serialize)]
struct CameraReport {
    position: [f32; 3],
    front: [f32; 3],
    right: [f32; 3],
    up: [f32; 3],
    yaw: f32,
    pitch: f32,
    zoom: f32,
    /// Column-major.
    view: [[f32; 4]; 4],
}

impl CameraReport {
    fn capture(camera: &Camera) -> Self {
        Self {
            position: camera.position().to_array(),
            front: camera.front().to_array(),
            right: camera.right().to_array(),
            up: camera.up().to_array(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            zoom: camera.zoom(),
            view: camera.view_matrix().to_cols_array_2d(),
        }
    }
}

/// Hold a direction for `seconds`, one fixed-length frame at a time.
///
/// The last frame is shortened so the total time matches exactly.
fn hold(
    camera: &mut Camera,
    positive: CameraMovement,
    negative: CameraMovement,
    seconds: f32,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        seconds.is_finite() && seconds.abs() <= MAX_HOLD_SECONDS,
        "movement duration must be finite and within {MAX_HOLD_SECONDS}s, got {seconds}"
    );
    let direction = if seconds < 0.0 { negative } else { positive };
    let mut input = InputState::new();
    input.set_held(direction, true);

    let total = f64::from(seconds.abs());
    let frame = f64::from(FRAME_SECONDS);
    let frames = (total / frame).ceil() as u64;
    for i in 0..frames {
        let dt = if i + 1 == frames {
            total - frame * (frames - 1) as f64
        } else {
            frame
        };
        input.update(camera, dt as f32);
    }
    Ok(())
}

fn simulate(
    mut camera: Camera,
    forward: f32,
    strafe: f32,
    look: (f32, f32),
    scroll: f32,
) -> anyhow::Result<Camera> {
    apply_action(&mut camera, &Action::Look { dx: look.0, dy: look.1 });
    apply_action(&mut camera, &Action::Zoom(scroll));
    hold(
        &mut camera,
        CameraMovement::Forward,
        CameraMovement::Backward,
        forward,
    )?;
    hold(&mut camera, CameraMovement::Right, CameraMovement::Left, strafe)?;
    Ok(camera)
}

fn print_report(report: &CameraReport) {
    let [px, py, pz] = report.position;
    let [fx, fy, fz] = report.front;
    println!("position: ({px:.3}, {py:.3}, {pz:.3})");
    println!("front:    ({fx:.3}, {fy:.3}, {fz:.3})");
    println!(
        "yaw={:.2} pitch={:.2} zoom={:.2}",
        report.yaw, report.pitch, report.zoom
    );
    println!("view (row-major):");
    for row in 0..4 {
        println!(
            "  [{:8.3} {:8.3} {:8.3} {:8.3}]",
            report.view[0][row], report.view[1][row], report.view[2][row], report.view[3][row]
        );
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("learngl-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", learngl_render::crate_info());
            println!(
                "camera: default zoom={} speed={} sensitivity={}",
                learngl_camera::DEFAULT_ZOOM,
                learngl_camera::DEFAULT_SPEED,
                learngl_camera::DEFAULT_SENSITIVITY
            );
        }
        Commands::Fly {
            config,
            forward,
            strafe,
            look_x,
            look_y,
            scroll,
            json,
        } => {
            let config = match config {
                Some(path) => CameraConfig::load(path)?,
                None => CameraConfig::default(),
            };
            let camera = simulate(
                Camera::from_config(&config),
                forward,
                strafe,
                (look_x, look_y),
                scroll,
            )?;
            tracing::debug!("simulated camera: {camera:?}");

            let report = CameraReport::capture(&camera);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Resource { name } => {
            println!("{}", learngl_common::resource_path(&name)?.display());
        }
        Commands::Draw { buffer, line } => {
            let polygon = if line {
                PolygonMode::Line
            } else {
                PolygonMode::Fill
            };
            let scene = TriangleScene::new(buffer.into(), polygon);
            print!("{}", DebugTextRenderer::new().render(&scene));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn forward_then_back_returns_home() {
        let start = Camera::default();
        let moved = simulate(start.clone(), 1.0, 0.0, (0.0, 0.0), 0.0).unwrap();
        assert!((moved.position() - Vec3::new(0.0, 0.0, -2.5)).length() < 1e-4);
        let back = simulate(moved, -1.0, 0.0, (0.0, 0.0), 0.0).unwrap();
        assert!(back.position().length() < 1e-4);
    }

    #[test]
    fn look_and_scroll_apply_before_moving() {
        // 900 * 0.1 = 90 degrees: face +X, then walk forward.
        let cam = simulate(Camera::default(), 0.4, 0.0, (900.0, 0.0), 5.0).unwrap();
        assert!((cam.position() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-4);
        assert_eq!(cam.zoom(), 40.0);
    }

    #[test]
    fn long_hold_finishes_with_expected_distance() {
        let cam = simulate(Camera::default(), 600.0, 0.0, (0.0, 0.0), 0.0).unwrap();
        // 600 s at 2.5 units/s straight down -Z
        assert!((cam.position().z + 1500.0).abs() < 15.0);
        assert!(cam.position().x.abs() < 1e-3);
    }

    #[test]
    fn oversized_or_non_finite_durations_are_rejected() {
        for seconds in [1.0e9, -1.0e9, f32::INFINITY, f32::NAN] {
            assert!(simulate(Camera::default(), seconds, 0.0, (0.0, 0.0), 0.0).is_err());
            assert!(simulate(Camera::default(), 0.0, seconds, (0.0, 0.0), 0.0).is_err());
        }
    }

    #[test]
    fn partial_last_frame_keeps_total_time() {
        // 0.05 s is three frames minus a bit; distance must still be 0.125.
        let cam = simulate(Camera::default(), 0.05, 0.0, (0.0, 0.0), 0.0).unwrap();
        assert!((cam.position().z + 0.125).abs() < 1e-5);
    }

    #[test]
    fn report_serializes_view() {
        let report = CameraReport::capture(&Camera::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["view"].as_array().unwrap().len(), 4);
        assert_eq!(json["zoom"], 45.0);
    }

    #[test]
    fn parses_negative_offsets() {
        let cli = Cli::try_parse_from(["learngl-cli", "fly", "--look-y", "-30", "--forward", "-2"])
            .unwrap();
        match cli.command {
            Commands::Fly {
                look_y, forward, ..
            } => {
                assert_eq!(look_y, -30.0);
                assert_eq!(forward, -2.0);
            }
            _ => panic!("expected fly"),
        }
    }
}

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tekframe::canvas::SvgCanvas;
use tekframe::config::{FileConfig, RemoteConfig};
use tekframe::transport::RemoteTarget;
use tekframe::{ControlInput, FrameLoop, Mesh, Renderer, Tek4010};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render a triangle mesh as a wireframe to SVG frames and, optionally, to a
/// Tektronix 4010-compatible vector terminal.
///
/// Examples:
///   # Fly over the built-in terrain for 60 frames, saving each one
///   tekframe --frames 60 --out-dir frames/
///
///   # Render an OBJ and mirror it to a terminal server
///   tekframe --mesh models/terrain.obj --remote tcp://localhost:4010
///
///   # Use a config file with a camera script
///   tekframe --config flight.toml
#[derive(Parser, Debug)]
#[command(name = "tekframe")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches tekframe.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wavefront OBJ mesh to render (defaults to a generated terrain)
    #[arg(short = 'm', long)]
    mesh: Option<PathBuf>,

    /// Directory to write one SVG per frame into
    #[arg(short = 'o', long)]
    out_dir: Option<PathBuf>,

    /// Number of stationary frames to render when the config has no script
    #[arg(short = 'n', long, default_value = "1")]
    frames: u32,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Remote terminal: tcp://host:port or a device path
    #[arg(short = 'r', long)]
    remote: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn default_terrain() -> Mesh {
    Mesh::terrain(32, 4.0, |x, z| -8.0 + 3.0 * (x / 10.0).sin() * (z / 10.0).cos())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        FileConfig::from_path(config_path)
            .with_context(|| format!("Failed to load config file: {:?}", config_path))?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let width = args.width.unwrap_or(file_config.canvas.width);
    let height = args.height.unwrap_or(file_config.canvas.height);
    if width == 0 || height == 0 {
        bail!("Canvas size must be non-zero, got {}x{}", width, height);
    }

    let mesh = match args.mesh.as_ref().or(file_config.mesh.as_ref()) {
        Some(path) => Mesh::load_obj(path)
            .with_context(|| format!("Failed to load mesh: {}", path.display()))?,
        None => default_terrain(),
    };
    info!(triangles = mesh.len(), "mesh ready");

    let remote_config = match (args.remote.clone(), file_config.remote.clone()) {
        (Some(target), Some(rc)) => Some(RemoteConfig { target, ..rc }),
        (Some(target), None) => Some(RemoteConfig::new(target)),
        (None, rc) => rc,
    };
    let remote = match &remote_config {
        Some(rc) => {
            let target: RemoteTarget = rc.target.parse()?;
            let writer = target
                .connect(rc.write_timeout())
                .with_context(|| format!("Failed to connect to {}", target))?;
            Some(Tek4010::new(writer))
        }
        None => None,
    };

    let out_dir = args.out_dir.clone().or_else(|| file_config.out_dir.clone());
    if let Some(ref dir) = out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let renderer = Renderer::new(mesh)
        .projection(file_config.camera.projection())
        .tolerance(file_config.dedup.tolerance);
    let margin = remote_config
        .as_ref()
        .map(|rc| rc.margin)
        .unwrap_or(tekframe::tek::DEFAULT_MARGIN);
    let mut frame_loop = FrameLoop::new(
        renderer,
        file_config.camera.start_pose(),
        (width, height),
        remote,
    )
    .context("Failed to alert remote terminal")?
    .with_remote_margin(margin);

    let mut inputs = file_config.inputs();
    if inputs.is_empty() {
        let idle = ControlInput {
            send_remote: remote_config.is_some(),
            ..ControlInput::default()
        };
        inputs = vec![idle; args.frames as usize];
    }

    let start = Instant::now();
    let mut canvas = SvgCanvas::new(width, height);
    let mut drawn = 0;
    for (i, input) in inputs.iter().enumerate() {
        canvas.clear();
        let stats = frame_loop
            .step(input, &mut canvas)
            .with_context(|| format!("Frame {} failed", i))?;
        drawn += stats.drawn;
        if let Some(ref dir) = out_dir {
            let path = dir.join(format!("frame_{:04}.svg", i));
            canvas
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    info!(
        frames = inputs.len(),
        edges = drawn,
        elapsed = ?start.elapsed(),
        "done"
    );
    Ok(())
}

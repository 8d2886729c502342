//! `heliobox` command line: render scenes, replay scripted edits and
//! generate solar grids.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};

use heliobox::canvas::AnnotationCanvas;
use heliobox::config::{CanvasConfig, ConfigError, LogLevel};
use heliobox::constants::grid::DEFAULT_SAMPLES;
use heliobox::error::SceneError;
use heliobox::render::{Scene, SceneRenderer};
use heliobox::scene_file::{SceneFile, load_image, save_png};
use heliobox::solar::{PatchRegion, SolarDisk, SolarGrid, SolarOrientation};

#[derive(Parser, Debug)]
#[command(name = "heliobox", about = "Bounding-box annotation canvas for solar disk images")]
struct Cli {
    /// Configuration file; the user config directory is searched otherwise
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of a scene to PNG
    Render(RenderArgs),
    /// Replay a scene's pointer events and write the resulting boxes
    Replay(ReplayArgs),
    /// Write the heliographic grid for an observation time as an overlay
    Grid(GridArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long)]
    scene: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Draw box N with hover emphasis and handles
    #[arg(long)]
    hover: Option<usize>,
    #[arg(long)]
    no_grid: bool,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long)]
    scene: PathBuf,
    /// Where to write the final box list (JSON)
    #[arg(long)]
    out: PathBuf,
    /// Also render the final state to this PNG
    #[arg(long)]
    frame: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GridArgs {
    /// Observation time (UTC), e.g. 2024-05-10T12:00:00
    #[arg(long)]
    time: NaiveDateTime,
    #[arg(long)]
    cx: f64,
    #[arg(long)]
    cy: f64,
    #[arg(long)]
    radius: f64,
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,
    /// Left edge of a patch to rectify the grid into
    #[arg(long, requires = "patch_y")]
    patch_x: Option<f64>,
    #[arg(long, requires = "patch_x")]
    patch_y: Option<f64>,
    #[arg(long, default_value_t = 512)]
    patch_size: u32,
    #[arg(long)]
    out: PathBuf,
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("heliobox: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.log_level);

    let result = match cli.command {
        Command::Render(args) => render(args, config),
        Command::Replay(args) => replay(args, config),
        Command::Grid(args) => grid(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("heliobox: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Explicit path first, then the default location, then built-in defaults.
fn load_config(path: Option<&Path>) -> Result<CanvasConfig, ConfigError> {
    match path {
        Some(path) => CanvasConfig::load(path),
        None => Ok(CanvasConfig::load_from_default_path().unwrap_or_default()),
    }
}

/// `RUST_LOG` overrides the configured level.
fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
}

fn render(args: RenderArgs, config: CanvasConfig) -> Result<(), SceneError> {
    let scene = SceneFile::load(&args.scene)?;
    let image = load_image(&scene.image_path(&args.scene))?;
    let classes = scene.class_table();

    if let Some(index) = args.hover.filter(|&i| i >= scene.boxes.len()) {
        log::warn!("Hover index {} out of range ({} boxes)", index, scene.boxes.len());
    }

    let mut renderer = SceneRenderer::new(config);
    let surface = renderer.render(&Scene {
        image: &image,
        boxes: &scene.boxes,
        classes: &classes,
        grid: scene.grid.as_ref(),
        grid_visible: scene.grid_visible && !args.no_grid,
        hovered: args.hover,
        preview: None,
    })?;
    save_png(&surface, &args.out)
}

fn replay(args: ReplayArgs, config: CanvasConfig) -> Result<(), SceneError> {
    let scene = SceneFile::load(&args.scene)?;
    let mut canvas = AnnotationCanvas::new(config, scene.class_table());
    scene.apply_to(&mut canvas)?;

    let report = scene.replay(&mut canvas);
    println!(
        "{} commits, {} discarded, {} rejected",
        report.commits, report.discarded, report.rejected
    );

    std::fs::write(&args.out, serde_json::to_string_pretty(canvas.boxes())?)?;
    log::info!("Wrote {} boxes to {:?}", canvas.boxes().len(), args.out);

    if let Some(frame_path) = &args.frame {
        canvas.set_image(load_image(&scene.image_path(&args.scene))?);
        match canvas.render()? {
            Some(surface) => save_png(&surface, frame_path)?,
            None => log::warn!("No image loaded; frame not written"),
        }
    }
    Ok(())
}

fn grid(args: GridArgs) -> Result<(), SceneError> {
    if !(args.radius.is_finite() && args.radius > 0.0) {
        return Err(SceneError::Invalid(format!("disk radius must be positive, got {}", args.radius)));
    }

    let orientation = SolarOrientation::from_datetime(args.time);
    let disk = SolarDisk::new(args.cx, args.cy, args.radius);
    let mut grid = SolarGrid::global(&orientation, &disk, args.samples);

    if let (Some(x), Some(y)) = (args.patch_x, args.patch_y) {
        let patch = PatchRegion {
            x,
            y,
            size: args.patch_size,
        };
        grid = grid.patch(&patch, &disk, &orientation);
    }

    let overlay = grid.to_overlay();
    std::fs::write(&args.out, serde_json::to_string_pretty(&overlay)?)?;
    println!(
        "B0={:.3} P0={:.3} L0={:.3}: {} latitude, {} longitude lines",
        orientation.b0,
        orientation.p0,
        orientation.l0,
        overlay.latitude_lines.len(),
        overlay.longitude_lines.len()
    );
    Ok(())
}

use clap::Parser;
use log::{error, info};
use softrender::io::config::Config;
use softrender::io::error::LoadError;
use softrender::io::image::{frame_path, save_buffer_to_image};
use softrender::pipeline::renderer::Renderer;
use softrender::pipeline::settings::{RenderSettings, parse_cull_mode, parse_shading_mode};
use softrender::scene::loader::{build_camera, build_scene};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Software rasterizer: renders a textured, normal-mapped mesh to PNG.
#[derive(Parser, Debug)]
#[command(name = "softrender")]
#[command(about = "CPU triangle rasterizer driven by a TOML scene file")]
struct Cli {
    /// Scene configuration (TOML). Built-in defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of frames to render
    #[arg(short, long)]
    frames: Option<usize>,

    /// Culling mode: none, back or front
    #[arg(long, value_name = "MODE")]
    cull: Option<String>,

    /// Shading mode: combined, observed_area, diffuse or specular
    #[arg(long, value_name = "MODE")]
    shading: Option<String>,

    /// Disable normal mapping
    #[arg(long)]
    no_normal_map: bool,

    /// Output the depth buffer as grayscale
    #[arg(long)]
    depth: bool,

    /// Paint triangle bounding boxes instead of shading
    #[arg(long)]
    bounding_box: bool,

    /// Use the dark uniform background
    #[arg(long)]
    uniform_bg: bool,
}

impl Cli {
    /// Applies command line overrides on top of the configured toggles.
    fn apply(&self, settings: &mut RenderSettings) {
        if let Some(mode) = &self.cull {
            settings.cull_mode = parse_cull_mode(mode);
        }
        if let Some(mode) = &self.shading {
            settings.shading_mode = parse_shading_mode(mode);
        }
        if self.no_normal_map {
            settings.normal_map = false;
        }
        if self.depth {
            settings.visualize_depth = true;
        }
        if self.bounding_box {
            settings.visualize_bounding_box = true;
        }
        if self.uniform_bg {
            settings.uniform_background = true;
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), LoadError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            info!("No config given, using defaults");
            Config::default()
        }
    };

    let mut settings = RenderSettings::from_config(&config.render);
    cli.apply(&mut settings);

    let (width, height) = (config.render.width, config.render.height);
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.render.output));
    let frames = cli.frames.unwrap_or(config.render.frames).max(1);

    let camera = build_camera(&config.camera, width, height);
    let mut scene = build_scene(&config)?;
    let mut renderer = Renderer::new(width, height);

    info!(
        "Rendering {} frame(s) at {}x{} (cull {}, shading {})",
        frames, width, height, settings.cull_mode, settings.shading_mode
    );

    let start = Instant::now();
    for frame in 0..frames {
        let stats = renderer.render_frame(&mut scene, &camera, &settings);
        info!(
            "Frame {}: {:.2?}, {} triangles submitted",
            frame, stats.elapsed, stats.triangles_submitted
        );

        save_buffer_to_image(
            &renderer.pixels(),
            width,
            height,
            frame_path(&output, frame, frames),
        )?;

        if config.render.rotation_speed != 0.0 {
            scene.rotate_all_y(config.render.rotation_speed);
        }
    }
    info!("Done in {:.2?}", start.elapsed());

    Ok(())
}

//! Headless viewer: load a model, frame it on a preset, and log the camera.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vantage::camera::ViewPreset;
use vantage::options::Options;
use vantage::session::{LoadStatus, ViewerSession};
use vantage::util::frame_timing::FrameTiming;
use vantage::VantageError;

#[derive(Parser)]
#[command(name = "vantage", version, about = "Fit a camera to a 3D model")]
struct Cli {
    /// Model file (.stl, .obj, .gltf or .glb)
    file: PathBuf,
    /// Preset to settle on (isometric, top, front, left, right)
    #[arg(long)]
    preset: Option<ViewPreset>,
    /// Options TOML file
    #[arg(long)]
    options: Option<PathBuf>,
    /// Frame limit; the loop also stops once the camera settles
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Frame rate (overrides the options file, 0 = unlimited)
    #[arg(long)]
    fps: Option<u32>,
}

fn run(cli: Cli) -> Result<(), VantageError> {
    let mut options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(fps) = cli.fps {
        options.viewer.target_fps = fps;
    }

    let mut session = ViewerSession::new(options)?;
    let _ = session.open_file(&cli.file)?;
    session.wait();

    let model = match session.status() {
        LoadStatus::Ready(model) => model.clone(),
        _ => {
            let message = session
                .banner()
                .map_or_else(|| "load did not finish".to_owned(), |b| b.message.clone());
            return Err(VantageError::model_load(cli.file.display().to_string(), message));
        }
    };
    log::info!(
        "{}: {} triangles, bounds {:?}",
        cli.file.display(),
        model.triangle_count,
        model.bounds.size()
    );

    if let Some(preset) = cli.preset {
        session.select_preset(preset);
    }

    let mut timing = FrameTiming::new(session.options().viewer.target_fps);
    let mut dt = 0.0;
    while timing.frames() < u64::from(cli.frames) {
        std::thread::sleep(timing.time_until_next());
        let moving = session.advance_frame(dt);
        dt = timing.end_frame();
        if !moving {
            break;
        }
    }

    let camera = session.view().camera();
    log::info!(
        "settled on {} after {} frames ({:.0} fps)",
        session.view().state().preset,
        timing.frames(),
        timing.fps()
    );
    log::info!(
        "eye {:?} target {:?} near {:.4} far {:.1}",
        camera.eye,
        camera.target,
        camera.znear,
        camera.zfar
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

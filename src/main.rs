use std::path::PathBuf;

use clap::Parser;
use zoomer::replay::{self, ReplayScript};
use zoomer::{logging, ZoomConfig, ZoomController};

const BASE_FOV: f64 = 70.0;
const RENDER_FPS: u32 = 60;

#[derive(Debug, Parser)]
#[command(
    name = "zoomer",
    about = "Replay a scripted zoom session and print per-tick frames as JSON",
    version
)]
struct Args {
    /// Replay script (JSON)
    script: PathBuf,

    /// Zoom config (TOML); defaults are used when absent or missing
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging unavailable: {err}");
    }

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ZoomConfig::load_or_default(path)?,
        None => ZoomConfig::default(),
    };
    let script = ReplayScript::load(&args.script)?;

    // Tick-accurate pass
    let mut controller = ZoomController::new(config);
    let frames = replay::run(&mut controller, &script);
    for frame in &frames {
        tracing::debug!(
            "tick {:>4} active={} alpha={:.4} fov_mult={:.4} divisor={:.2}",
            frame.tick,
            frame.active,
            frame.alpha,
            frame.fov_multiplier,
            frame.divisor
        );
    }
    for event in controller.drain_events() {
        tracing::debug!("event {event:?}");
    }

    // Frame-paced pass with sub-tick blending
    let mut controller = ZoomController::new(config);
    let samples = replay::play(&mut controller, &script, RENDER_FPS, BASE_FOV);
    let min_fov = samples.iter().map(|s| s.fov).fold(BASE_FOV, f64::min);

    tracing::info!(
        "Replayed {} ticks ({} render frames); narrowest FOV {:.2}, final divisor {:.2}",
        frames.len(),
        samples.len(),
        min_fov,
        controller.zoom().divisor()
    );
    println!("{}", serde_json::to_string_pretty(&frames)?);
    Ok(())
}

//! flappy_arms — interactive entry point.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use flap_core::GameConfig;

fn main() -> Result<()> {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              Flappy Arms — Gym Edition                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: webcam + pose model");
    #[cfg(not(feature = "camera"))]
    println!("  Mode: keyboard simulation  (build with --features camera for a webcam)");
    println!();
    println!("  Menu: C calibrate, Space play, Esc/Q quit");
    #[cfg(not(feature = "camera"))]
    println!("  Arms: hold A (left) or D (right) to raise");
    println!();

    let cfg = GameConfig::default();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1);

    run_with_source(cfg, seed)
}

#[cfg(feature = "camera")]
fn run_with_source(cfg: GameConfig, seed: u64) -> Result<()> {
    use anyhow::anyhow;
    use pose_input::CameraSource;

    let index = arg_value("--camera-index")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let model = arg_value("--model").unwrap_or_else(|| "movenet_singlepose.onnx".to_string());

    // Camera acquisition failure is fatal — surface it before any screen.
    let source = CameraSource::open(index, &model).map_err(|e| anyhow!(e))?;
    flappy_arms::app::run(cfg, source, None, seed)
}

#[cfg(not(feature = "camera"))]
fn run_with_source(cfg: GameConfig, seed: u64) -> Result<()> {
    use pose_input::{SimArms, SimPoseSource};

    let arms = SimArms::default();
    let source = SimPoseSource::new(arms.clone());
    flappy_arms::app::run(cfg, source, Some(arms), seed)
}

#[cfg(feature = "camera")]
fn arg_value(flag: &str) -> Option<String> {
    let mut args = std::env::args();
    while let Some(a) = args.next() {
        if a == flag {
            return args.next();
        }
    }
    None
}

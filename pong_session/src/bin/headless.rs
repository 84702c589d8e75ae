//! Runs a session without a display, steered by a scripted sweep instead of
//! a webcam model.
//!
//! Usage: `headless [config.json] [seconds]`

use pong_core::{Config, NullSurface};
use pong_session::{Session, SessionError, SteeringError};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<Config, SessionError> {
    let Some(path) = path else {
        return Ok(Config::new());
    };
    let json = std::fs::read_to_string(&path).map_err(|source| SessionError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(Config::from_json(&json)?)
}

#[tokio::main]
async fn main() -> Result<(), SessionError> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next().map(PathBuf::from))?;
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    info!(seed, seconds, "starting headless session");

    let mut session = Session::new(config, NullSurface, seed)?;
    let handle = session.handle();

    let mut frame = 0u32;
    session
        .start_predicting(move || -> Result<f32, SteeringError> {
            frame = frame.wrapping_add(1);
            Ok((frame as f32 * 0.05).sin())
        })
        .await;

    tokio::time::sleep(Duration::from_secs(seconds)).await;

    if let Some(report) = session.stop_predicting().await? {
        info!(frames = report.frames, "prediction finished");
    }
    session.stop_gameplay().await;

    let snapshot = handle.snapshot().await;
    info!(
        ticks = snapshot.tick,
        player = snapshot.score.player,
        computer = snapshot.score.computer,
        "final score"
    );
    if let Ok(json) = serde_json::to_string(&snapshot) {
        println!("{json}");
    }
    Ok(())
}

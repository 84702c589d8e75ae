//! Prediction-to-control bridge
//!
//! Polls a steering model once per frame and forwards each value, unchanged,
//! as the player paddle's velocity. The bridge owns no game state; stopping
//! it leaves the game loop running with the last value it set.

use crate::{GameHandle, SessionError};
use pong_core::steering_gauge;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, trace, warn};

#[derive(Debug, Error)]
pub enum SteeringError {
    #[error("steering model is not ready")]
    NotReady,
    #[error("steering model failed: {0}")]
    Model(String),
}

/// Produces one steering value per call, conventionally in `[-1, 1]`
pub trait SteeringSource: Send + 'static {
    fn predict(&mut self) -> Result<f32, SteeringError>;
}

impl<F> SteeringSource for F
where
    F: FnMut() -> Result<f32, SteeringError> + Send + 'static,
{
    fn predict(&mut self) -> Result<f32, SteeringError> {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PredictionReport {
    pub frames: u64,
    pub last_value: Option<f32>,
}

/// A running prediction loop
pub struct PredictionTask {
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<PredictionReport, SteeringError>>,
}

impl PredictionTask {
    /// Start forwarding predictions from `source` every `frame`
    pub fn spawn(handle: GameHandle, source: impl SteeringSource, frame: Duration) -> Self {
        let (stop, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_prediction(handle, source, frame, stop_rx));
        info!(frame_ms = frame.as_millis() as u64, "prediction started");
        Self { stop, task }
    }

    /// True once the loop has exited on its own (a source error)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the loop and wait for it. No value is forwarded after this
    /// returns. A source error that ended the loop early is returned here.
    pub async fn stop(self) -> Result<PredictionReport, SessionError> {
        let _ = self.stop.send(());
        let report = self.task.await??;
        info!(frames = report.frames, "prediction stopped");
        Ok(report)
    }
}

async fn run_prediction(
    handle: GameHandle,
    mut source: impl SteeringSource,
    frame: Duration,
    mut stop: oneshot::Receiver<()>,
) -> Result<PredictionReport, SteeringError> {
    let mut frames = interval(frame);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut report = PredictionReport::default();

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = frames.tick() => {
                let value = match source.predict() {
                    Ok(value) => value,
                    Err(err) => {
                        warn!(%err, frames = report.frames, "steering source failed");
                        return Err(err);
                    }
                };
                handle.update_player_speed(value).await;
                report.frames += 1;
                report.last_value = Some(value);
                trace!(value, gauge = steering_gauge(value), "steering");
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pong_core::{Config, NullSurface, PongGame, Side};

    fn handle() -> GameHandle {
        GameHandle::new(PongGame::new(Config::new(), 3).unwrap(), NullSurface)
    }

    #[tokio::test(start_paused = true)]
    async fn test_forwards_values_unchanged() {
        let handle = handle();
        let mut values = [0.25_f32, -0.5, 3.0].into_iter().cycle();
        let task = PredictionTask::spawn(
            handle.clone(),
            move || -> Result<f32, SteeringError> { Ok(values.next().unwrap_or(0.0)) },
            Duration::from_millis(16),
        );

        // frames at 0, 16 and 32 ms
        tokio::time::sleep(Duration::from_millis(40)).await;
        let report = task.stop().await.unwrap();

        assert_eq!(report.frames, 3);
        assert_eq!(report.last_value, Some(3.0));
        let velocity = handle.with_game(|g| g.velocity(Side::Player)).await;
        assert_eq!(velocity, Some(3.0), "Out-of-range values pass through");
    }

    #[tokio::test(start_paused = true)]
    async fn test_nan_prediction_does_not_poison_paddle() {
        let handle = handle();
        let mut values = [0.5_f32, f32::NAN].into_iter();
        let task = PredictionTask::spawn(
            handle.clone(),
            move || -> Result<f32, SteeringError> { Ok(values.next().unwrap_or(f32::NAN)) },
            Duration::from_millis(16),
        );

        tokio::time::sleep(Duration::from_millis(40)).await;
        task.stop().await.unwrap();
        handle.tick().await;
        handle.tick().await;

        let (velocity, y) = handle
            .with_game(|g| (g.velocity(Side::Player), g.paddle(Side::Player).unwrap().y))
            .await;
        assert_eq!(velocity, Some(0.5));
        assert_eq!(y, 252.0);
        assert!((0.0..=430.0).contains(&y));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_prediction_after_stop() {
        let handle = handle();
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicU64::new(0));
        let counter = calls.clone();
        let task = PredictionTask::spawn(
            handle,
            move || -> Result<f32, SteeringError> {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Ok(0.5)
            },
            Duration::from_millis(16),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        let report = task.stop().await.unwrap();
        let at_stop = calls.load(std::sync::atomic::Ordering::SeqCst);
        assert_eq!(report.frames, at_stop);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), at_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_error_ends_loop() {
        let handle = handle();
        let mut remaining = 2;
        let task = PredictionTask::spawn(
            handle.clone(),
            move || -> Result<f32, SteeringError> {
                if remaining == 0 {
                    return Err(SteeringError::Model("webcam frame unavailable".into()));
                }
                remaining -= 1;
                Ok(-1.0)
            },
            Duration::from_millis(16),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(task.is_finished());
        let err = task.stop().await.unwrap_err();
        assert!(matches!(err, SessionError::Steering(SteeringError::Model(_))));

        let velocity = handle.with_game(|g| g.velocity(Side::Player)).await;
        assert_eq!(velocity, Some(-1.0), "Last good value stays in effect");
    }
}

use crate::GameHandle;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

struct Ticker {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Fixed-rate driver for a [`GameHandle`].
///
/// At most one ticker runs per loop. Dropping the loop drops the stop
/// channel, which ends the ticker at its next wake-up.
pub struct GameLoop {
    handle: GameHandle,
    period: Duration,
    ticker: Option<Ticker>,
}

impl GameLoop {
    pub fn new(handle: GameHandle, period: Duration) -> Self {
        Self {
            handle,
            period,
            ticker: None,
        }
    }

    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> LoopState {
        match &self.ticker {
            Some(ticker) if !ticker.task.is_finished() => LoopState::Running,
            _ => LoopState::Stopped,
        }
    }

    /// Start ticking. A ticker that is already running is stopped first.
    pub async fn start_gameplay(&mut self) {
        self.stop_gameplay().await;

        let (stop, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_ticks(self.handle.clone(), self.period, stop_rx));
        self.ticker = Some(Ticker { stop, task });
        info!(period_ms = self.period.as_millis() as u64, "gameplay started");
    }

    /// Stop ticking. Once this returns no further tick will run.
    pub async fn stop_gameplay(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };

        // the task may already have exited
        let _ = ticker.stop.send(());
        if let Err(err) = ticker.task.await {
            warn!(%err, "game ticker ended abnormally");
        }
        info!("gameplay stopped");
    }
}

async fn run_ticks(handle: GameHandle, period: Duration, mut stop: oneshot::Receiver<()>) {
    // First tick one period after start, like a browser interval
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = ticker.tick() => {
                let (events, score) = handle.tick().await;
                if events.scored() {
                    info!(player = score.player, computer = score.computer, "point scored");
                }
                if events.ball_hit_paddle {
                    debug!("rally continues");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pong_core::{Config, NullSurface, PongGame};

    fn game_loop() -> GameLoop {
        let config = Config::new();
        let period = config.tick_interval();
        let game = PongGame::new(config, 9).unwrap();
        GameLoop::new(GameHandle::new(game, NullSurface), period)
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_transitions() {
        let mut game_loop = game_loop();
        assert_eq!(game_loop.state(), LoopState::Stopped);

        game_loop.start_gameplay().await;
        assert_eq!(game_loop.state(), LoopState::Running);

        game_loop.stop_gameplay().await;
        assert_eq!(game_loop.state(), LoopState::Stopped);

        // idempotent
        game_loop.stop_gameplay().await;
        assert_eq!(game_loop.state(), LoopState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_configured_rate() {
        let mut game_loop = game_loop();
        let handle = game_loop.handle();

        game_loop.start_gameplay().await;
        tokio::time::sleep(Duration::from_millis(1010)).await;
        game_loop.stop_gameplay().await;

        assert_eq!(handle.ticks().await, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_before_first_period() {
        let mut game_loop = game_loop();
        let handle = game_loop.handle();

        game_loop.start_gameplay().await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(handle.ticks().await, 0);
        game_loop.stop_gameplay().await;
    }
}

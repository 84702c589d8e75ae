use crate::{
    Control, ControllerDataset, GameHandle, GameLoop, LoopState, PredictionReport,
    PredictionTask, SessionError, SteeringSource, TrainingParams, TrainingPlan,
};
use pong_core::{Config, PongGame, RenderSurface};
use std::time::Duration;
use tracing::{info, warn};

/// One user's demo: the game, its ticker, the recorded examples and the
/// prediction loop, owned in one place and driven by UI events.
pub struct Session {
    game_loop: GameLoop,
    dataset: ControllerDataset,
    prediction: Option<PredictionTask>,
    prediction_frame: Duration,
    reset_score_on_reset: bool,
}

impl Session {
    pub fn new(
        config: Config,
        surface: impl RenderSurface + Send + 'static,
        seed: u64,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let tick = config.tick_interval();
        let prediction_frame = config.prediction_interval();
        let reset_score_on_reset = config.reset_score_on_reset;
        let game = PongGame::new(config, seed)?;

        Ok(Self {
            game_loop: GameLoop::new(GameHandle::new(game, surface), tick),
            dataset: ControllerDataset::new(),
            prediction: None,
            prediction_frame,
            reset_score_on_reset,
        })
    }

    pub fn handle(&self) -> GameHandle {
        self.game_loop.handle()
    }

    pub fn state(&self) -> LoopState {
        self.game_loop.state()
    }

    pub fn dataset(&self) -> &ControllerDataset {
        &self.dataset
    }

    pub fn is_predicting(&self) -> bool {
        self.prediction.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Record one feature vector for a gesture
    pub fn add_example(&mut self, control: Control, features: &[f32]) -> Result<usize, SessionError> {
        Ok(self.dataset.add_example(features, control)?)
    }

    /// Stop predicting and describe the training run for the external trainer
    pub async fn prepare_training(&mut self, params: &TrainingParams) -> Result<TrainingPlan, SessionError> {
        if let Err(err) = self.stop_predicting().await {
            warn!(%err, "previous prediction loop failed");
        }
        let plan = self.dataset.plan(params)?;
        info!(
            examples = plan.examples,
            batch_size = plan.batch_size,
            epochs = plan.epochs,
            "training prepared"
        );
        Ok(plan)
    }

    pub async fn start_gameplay(&mut self) {
        self.game_loop.start_gameplay().await;
    }

    pub async fn stop_gameplay(&mut self) {
        self.game_loop.stop_gameplay().await;
    }

    /// Start the game and steer the player paddle from `source`.
    /// Replaces any prediction loop already running.
    pub async fn start_predicting(&mut self, source: impl SteeringSource) {
        self.start_gameplay().await;
        if let Err(err) = self.stop_predicting().await {
            warn!(%err, "previous prediction loop failed");
        }
        self.prediction = Some(PredictionTask::spawn(
            self.handle(),
            source,
            self.prediction_frame,
        ));
    }

    /// Stop steering. The game keeps running with the last value set.
    pub async fn stop_predicting(&mut self) -> Result<Option<PredictionReport>, SessionError> {
        match self.prediction.take() {
            Some(task) => task.stop().await.map(Some),
            None => Ok(None),
        }
    }

    /// Forget all examples and stop both loops
    pub async fn reset(&mut self) {
        self.dataset.clear_examples();
        self.stop_gameplay().await;
        if let Err(err) = self.stop_predicting().await {
            warn!(%err, "prediction loop failed before reset");
        }
        if self.reset_score_on_reset {
            self.handle().reset_score().await;
        }
        info!(reset_score = self.reset_score_on_reset, "session reset");
    }

    pub async fn shutdown(mut self) {
        if let Err(err) = self.stop_predicting().await {
            warn!(%err, "prediction loop failed");
        }
        self.stop_gameplay().await;
    }
}

use pong_core::{Config, Events, GameSnapshot, PongGame, RenderSurface, Score};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything a tick touches, behind one lock
pub struct GameState {
    pub game: PongGame,
    pub surface: Box<dyn RenderSurface + Send>,
}

/// Shared handle to a running game.
///
/// The ticker and the steering bridge each hold a clone; every access takes
/// the lock for one whole tick or one whole update, so the two never see a
/// half-applied change.
#[derive(Clone)]
pub struct GameHandle {
    inner: Arc<Mutex<GameState>>,
}

impl GameHandle {
    pub fn new(game: PongGame, surface: impl RenderSurface + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(GameState {
                game,
                surface: Box::new(surface),
            })),
        }
    }

    /// Run one tick and draw it onto the surface
    pub async fn tick(&self) -> (Events, Score) {
        let mut state = self.inner.lock().await;
        let GameState { game, surface } = &mut *state;
        let events = game.update_logic(surface.as_mut());
        (events, game.score())
    }

    /// Draw the current state without advancing it
    pub async fn render(&self) {
        let mut state = self.inner.lock().await;
        let GameState { game, surface } = &mut *state;
        game.render(surface.as_mut());
    }

    pub async fn update_player_speed(&self, value: f32) {
        self.inner.lock().await.game.update_player_speed(value);
    }

    pub async fn update_multiplier(&self, multiplier: f32) {
        self.inner.lock().await.game.update_multiplier(multiplier);
    }

    pub async fn score(&self) -> Score {
        self.inner.lock().await.game.score()
    }

    pub async fn reset_score(&self) {
        self.inner.lock().await.game.reset_score();
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.inner.lock().await.game.snapshot()
    }

    pub async fn ticks(&self) -> u64 {
        self.inner.lock().await.game.ticks()
    }

    pub async fn config(&self) -> Config {
        self.inner.lock().await.game.config().clone()
    }

    /// Run `f` with exclusive access to the game
    pub async fn with_game<R>(&self, f: impl FnOnce(&mut PongGame) -> R) -> R {
        f(&mut self.inner.lock().await.game)
    }
}

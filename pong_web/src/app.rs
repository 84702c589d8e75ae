use crate::canvas::CanvasSurface;
use crate::fsm::{DemoAction, DemoFsm, DemoState};
use pong_core::{steering_gauge, Config, PongGame};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

struct WebGame {
    game: PongGame,
    surface: CanvasSurface,
}

/// A browser interval; cleared when dropped
struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

/// The game as seen by the page script.
///
/// The script owns the webcam and the neural-network runtime; it calls
/// `predictValue` with each steering value the model produces.
#[wasm_bindgen]
pub struct PongApp {
    inner: Rc<RefCell<WebGame>>,
    interval: Option<Interval>,
    fsm: DemoFsm,
}

#[wasm_bindgen]
impl PongApp {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, multiplier: f32) -> Result<PongApp, JsValue> {
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element #{canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()?;

        let config = Config {
            player_multiplier: multiplier,
            ..Config::with_arena(canvas.width() as f32, canvas.height() as f32)
        };
        Self::with_config(&canvas, config)
    }

    /// Build from a JSON config; the arena always matches the canvas
    #[wasm_bindgen(js_name = withJsonConfig)]
    pub fn with_json_config(canvas: HtmlCanvasElement, json: &str) -> Result<PongApp, JsValue> {
        console_error_panic_hook::set_once();
        let config = Config {
            arena_width: canvas.width() as f32,
            arena_height: canvas.height() as f32,
            ..Config::from_json(json).map_err(to_js)?
        };
        Self::with_config(&canvas, config)
    }

    #[wasm_bindgen(js_name = startGameplay)]
    pub fn start_gameplay(&mut self) -> Result<(), JsValue> {
        self.stop_gameplay();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let inner = self.inner.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            let mut web = inner.borrow_mut();
            let WebGame { game, surface } = &mut *web;
            let events = game.update_logic(surface);
            if events.scored() {
                let score = game.score();
                log(&format!(
                    "Player: {} | Computer: {}",
                    score.player, score.computer
                ));
            }
        });

        let tick_rate = self.inner.borrow().game.config().tick_rate_hz;
        let timeout_ms = (1000.0 / tick_rate).round() as i32;
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout_ms,
        )?;
        self.interval = Some(Interval {
            id,
            _callback: callback,
        });
        Ok(())
    }

    #[wasm_bindgen(js_name = stopGameplay)]
    pub fn stop_gameplay(&mut self) {
        self.interval = None;
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    #[wasm_bindgen(js_name = updatePlayerSpeed)]
    pub fn update_player_speed(&mut self, value: f32) {
        self.inner.borrow_mut().game.update_player_speed(value);
    }

    #[wasm_bindgen(js_name = updateMultiplier)]
    pub fn update_multiplier(&mut self, multiplier: f32) {
        self.inner.borrow_mut().game.update_multiplier(multiplier);
    }

    /// Forward a model prediction to the player paddle. Ignored unless the
    /// demo is predicting. Returns the 0-100 gauge reading for the slider.
    #[wasm_bindgen(js_name = predictValue)]
    pub fn predict_value(&mut self, value: f32) -> f32 {
        if self.fsm.is_predicting() {
            self.update_player_speed(value);
        }
        steering_gauge(value)
    }

    /// The model is (re)training; predictions stop being forwarded
    pub fn train(&mut self) -> bool {
        self.fsm.transition(DemoAction::Train).success()
    }

    /// Start the game and begin forwarding predictions
    pub fn predict(&mut self) -> Result<bool, JsValue> {
        if !self.fsm.transition(DemoAction::Predict).success() {
            return Ok(false);
        }
        self.start_gameplay()?;
        Ok(true)
    }

    /// Stop everything. Score is kept unless the config asks otherwise.
    pub fn reset(&mut self) {
        self.stop_gameplay();
        self.fsm.transition(DemoAction::Reset);
        let mut web = self.inner.borrow_mut();
        if web.game.config().reset_score_on_reset {
            web.game.reset_score();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> DemoState {
        self.fsm.state()
    }

    #[wasm_bindgen(getter, js_name = pointsPlayer)]
    pub fn points_player(&self) -> u32 {
        self.inner.borrow().game.score().player
    }

    #[wasm_bindgen(getter, js_name = pointsComputer)]
    pub fn points_computer(&self) -> u32 {
        self.inner.borrow().game.score().computer
    }

    /// Current game state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.borrow().game.snapshot()).map_err(to_js)
    }
}

impl PongApp {
    fn with_config(canvas: &HtmlCanvasElement, config: Config) -> Result<PongApp, JsValue> {
        let seed = js_sys::Date::now() as u64;
        let game = PongGame::new(config, seed).map_err(to_js)?;
        let mut surface = CanvasSurface::new(canvas)?;
        game.render(&mut surface);

        Ok(PongApp {
            inner: Rc::new(RefCell::new(WebGame { game, surface })),
            interval: None,
            fsm: DemoFsm::new(),
        })
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

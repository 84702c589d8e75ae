//! Browser front end for webcam Pong
//!
//! Draws the game on a 2D canvas, ticks it from a `setInterval` timer and
//! exposes the control surface the page script wires to its buttons and to
//! the model's prediction loop.

pub mod fsm;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use app::PongApp;
pub use fsm::{DemoAction, DemoFsm, DemoState, TransitionResult};

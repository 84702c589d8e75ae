//! Native runtime for webcam Pong
//!
//! Drives a [`pong_core::PongGame`] from a fixed-rate tokio ticker and feeds
//! it steering values from a separately scheduled prediction task. Both tasks
//! share the game through a [`GameHandle`].

pub mod bridge;
pub mod dataset;
pub mod error;
pub mod game_loop;
pub mod handle;
pub mod session;

pub use bridge::*;
pub use dataset::*;
pub use error::*;
pub use game_loop::*;
pub use handle::*;
pub use session::*;

pub mod ai;
pub mod collision;
pub mod draw;
pub mod movement;
pub mod scoring;

pub use ai::*;
pub use collision::*;
pub use draw::*;
pub use movement::*;
pub use scoring::*;

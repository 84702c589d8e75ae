pub mod components;
pub mod config;
pub mod game;
pub mod params;
pub mod render;
pub mod resources;
pub mod systems;

pub use components::*;
pub use config::*;
pub use game::*;
pub use params::*;
pub use render::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Advance the game by one tick.
///
/// The order is fixed: later collision checks look at the state the earlier
/// ones leave behind.
pub fn update_logic(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
    surface: &mut dyn RenderSurface,
) {
    // Clear events at start of tick
    events.clear();

    // 1-3. Computer AI, then both paddles
    steer_computer(world, config);
    move_paddles(world, config);

    // 4. Clear, advance the ball, redraw
    clear_surface(config, surface);
    move_ball(world);
    draw_entities(world, config, surface);

    // 5. Ball left the arena
    check_scoring(world, config, score, events, rng);

    // 6. Top/bottom walls
    bounce_walls(world, config, events);

    // 7. Paddles
    bounce_paddles(world, config, events);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, paddle: Paddle, velocity: f32) -> hecs::Entity {
    world.spawn((paddle, PaddleVelocity(velocity), side))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}

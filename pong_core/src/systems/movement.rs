use crate::{Ball, Config, Paddle, PaddleVelocity, Side};
use hecs::World;

/// Apply paddle velocities. The player's velocity is a steering value and
/// is scaled by the configured multiplier; the computer's is a raw delta.
pub fn move_paddles(world: &mut World, config: &Config) {
    for (_entity, (paddle, velocity, side)) in
        world.query_mut::<(&mut Paddle, &PaddleVelocity, &Side)>()
    {
        match side {
            Side::Computer => paddle.move_position(velocity.0),
            Side::Player => paddle.move_player(velocity.0, config.player_multiplier),
        }
    }
}

/// Move ball by one tick of velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.advance();
    }
}

use crate::{create_ball, Ball, Config, Events, GameRng, Score};
use hecs::World;
use tracing::debug;

/// Award a point when the ball has fully left the arena on either side and
/// serve a fresh ball from the centre.
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) {
    if current_ball(world).is_some_and(|ball| ball.pos.x + ball.radius < 0.0) {
        score.increment_computer();
        events.computer_scored = true;
        debug!(player = score.player, computer = score.computer, "computer scored");
        respawn_ball(world, config, rng);
    }

    if current_ball(world).is_some_and(|ball| ball.pos.x - ball.radius > config.arena_width) {
        score.increment_player();
        events.player_scored = true;
        debug!(player = score.player, computer = score.computer, "player scored");
        respawn_ball(world, config, rng);
    }
}

/// Replace whatever ball exists with a new one at the arena centre
pub fn respawn_ball(world: &mut World, config: &Config, rng: &mut GameRng) -> hecs::Entity {
    let old: Vec<hecs::Entity> = world.query::<&Ball>().iter().map(|(e, _)| e).collect();
    for entity in old {
        // entity came from this world a moment ago
        let _ = world.despawn(entity);
    }

    let ball = Ball::spawn(
        config.ball_spawn(),
        config.ball_radius,
        config.ball_speed_min,
        config.ball_speed_max,
        rng,
    );
    create_ball(world, ball)
}

fn current_ball(world: &World) -> Option<Ball> {
    world.query::<&Ball>().iter().next().map(|(_e, ball)| *ball)
}

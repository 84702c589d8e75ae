use crate::{Ball, Config, Events, Paddle, Side};
use hecs::World;

/// Reflect the ball off the top and bottom walls
pub fn bounce_walls(world: &mut World, config: &Config, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let leaving_top = ball.pos.y - ball.radius < 0.0 && ball.vel.y < 0.0;
        let leaving_bottom = ball.pos.y + ball.radius > config.arena_height && ball.vel.y > 0.0;

        if leaving_top || leaving_bottom {
            ball.vel.y = -ball.vel.y;
            events.ball_hit_wall = true;
        }
    }
}

/// Reflect the ball off a paddle it is heading into and speed up the rally.
///
/// Only the ball's centre is tested against the paddle box; the radius is
/// ignored.
pub fn bounce_paddles(world: &mut World, config: &Config, events: &mut Events) {
    let paddles: Vec<(Side, Paddle)> = world
        .query::<(&Paddle, &Side)>()
        .iter()
        .map(|(_e, (paddle, side))| (*side, *paddle))
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let hit = paddles.iter().any(|(side, paddle)| {
            let approaching = match side {
                Side::Player => ball.vel.x < 0.0,
                Side::Computer => ball.vel.x > 0.0,
            };
            approaching && paddle.hit_test_point(ball.pos)
        });

        if hit {
            ball.vel.x = -ball.vel.x;
            ball.vel *= config.rally_acceleration;
            events.ball_hit_paddle = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle};
    use glam::Vec2;

    fn setup_world() -> (World, Config, Events) {
        let mut world = World::new();
        let config = Config::new();
        create_paddle(
            &mut world,
            Side::Player,
            Paddle::new(0.0, 200.0, 10.0, 50.0, 480.0),
            0.0,
        );
        create_paddle(
            &mut world,
            Side::Computer,
            Paddle::new(630.0, 200.0, 10.0, 50.0, 480.0),
            0.0,
        );
        (world, config, Events::new())
    }

    fn only_ball(world: &World) -> Ball {
        let mut query = world.query::<&Ball>();
        let (_e, ball) = query.iter().next().expect("ball");
        *ball
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Ball::new(Vec2::new(320.0, 2.0), Vec2::new(2.5, -3.0), 4.0));

        bounce_walls(&mut world, &config, &mut events);

        let ball = only_ball(&world);
        assert_eq!(ball.vel, Vec2::new(2.5, 3.0), "Only Y flips, magnitude kept");
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Ball::new(Vec2::new(320.0, 478.0), Vec2::new(-2.5, 2.25), 4.0));

        bounce_walls(&mut world, &config, &mut events);

        assert_eq!(only_ball(&world).vel, Vec2::new(-2.5, -2.25));
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_no_wall_bounce_when_moving_away() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Ball::new(Vec2::new(320.0, 2.0), Vec2::new(2.5, 3.0), 4.0));

        bounce_walls(&mut world, &config, &mut events);

        assert_eq!(only_ball(&world).vel, Vec2::new(2.5, 3.0));
        assert!(!events.ball_hit_wall);
    }

    #[test]
    fn test_ball_bounces_off_player_paddle() {
        let (mut world, config, mut events) = setup_world();
        let vel = Vec2::new(-2.5, 2.0);
        create_ball(&mut world, Ball::new(Vec2::new(8.0, 220.0), vel, 4.0));

        bounce_paddles(&mut world, &config, &mut events);

        let ball = only_ball(&world);
        assert_eq!(ball.vel.x, 2.5 * config.rally_acceleration);
        assert_eq!(ball.vel.y, 2.0 * config.rally_acceleration);
        assert!(events.ball_hit_paddle);
    }

    #[test]
    fn test_ball_bounces_off_computer_paddle() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Ball::new(Vec2::new(632.0, 240.0), Vec2::new(3.0, -2.0), 4.0));

        bounce_paddles(&mut world, &config, &mut events);

        let ball = only_ball(&world);
        assert_eq!(ball.vel.x, -(3.0 * config.rally_acceleration));
        assert_eq!(ball.vel.y, -2.0 * config.rally_acceleration);
    }

    #[test]
    fn test_no_paddle_bounce_when_moving_away() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Ball::new(Vec2::new(8.0, 220.0), Vec2::new(2.5, 2.0), 4.0));

        bounce_paddles(&mut world, &config, &mut events);

        assert_eq!(only_ball(&world).vel, Vec2::new(2.5, 2.0));
        assert!(!events.ball_hit_paddle);
    }

    #[test]
    fn test_paddle_hit_ignores_ball_radius() {
        let (mut world, config, mut events) = setup_world();
        // Ball edge overlaps the paddle but its centre is just outside
        create_ball(&mut world, Ball::new(Vec2::new(12.0, 220.0), Vec2::new(-2.5, 0.0), 4.0));

        bounce_paddles(&mut world, &config, &mut events);

        assert_eq!(only_ball(&world).vel.x, -2.5);
        assert!(!events.ball_hit_paddle);
    }
}

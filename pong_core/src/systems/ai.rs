use crate::components::within_range;
use crate::{Ball, Config, Paddle, PaddleVelocity, Side};
use hecs::World;

/// Update the computer paddle's velocity from the ball's height
pub fn steer_computer(world: &mut World, config: &Config) {
    let ball_y = match world.query::<&Ball>().iter().next() {
        Some((_e, ball)) => ball.pos.y,
        None => return,
    };

    for (_entity, (paddle, velocity, side)) in
        world.query_mut::<(&Paddle, &mut PaddleVelocity, &Side)>()
    {
        if *side == Side::Computer {
            velocity.0 = computer_velocity(paddle, velocity.0, ball_y, config);
        }
    }
}

/// Reactive controller for the right paddle.
///
/// Chases the ball at full speed when it is level with the top or bottom
/// quarter of the paddle (or beyond), otherwise coasts with damping.
pub fn computer_velocity(paddle: &Paddle, current: f32, ball_y: f32, config: &Config) -> f32 {
    let top_zone = paddle.y + paddle.height * config.ai_top_zone;
    let bottom_zone = paddle.y + paddle.height * config.ai_bottom_zone;

    if within_range(ball_y, 0.0, top_zone) {
        -config.computer_speed
    } else if within_range(ball_y, bottom_zone, config.arena_height) {
        config.computer_speed
    } else {
        current * config.computer_damping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer_paddle(y: f32) -> Paddle {
        Paddle::new(630.0, y, 10.0, 50.0, 480.0)
    }

    #[test]
    fn test_ball_above_top_quarter_moves_up() {
        let config = Config::new();
        let paddle = computer_paddle(200.0);
        assert_eq!(computer_velocity(&paddle, 0.5, 50.0, &config), -3.0);
        // boundary of the top quarter is inclusive
        assert_eq!(computer_velocity(&paddle, 0.5, 212.5, &config), -3.0);
    }

    #[test]
    fn test_ball_below_bottom_quarter_moves_down() {
        let config = Config::new();
        let paddle = computer_paddle(200.0);
        assert_eq!(computer_velocity(&paddle, -0.5, 237.5, &config), 3.0);
        assert_eq!(computer_velocity(&paddle, -0.5, 479.0, &config), 3.0);
    }

    #[test]
    fn test_ball_in_safe_zone_decays_velocity() {
        let config = Config::new();
        let paddle = computer_paddle(200.0);
        let v = computer_velocity(&paddle, 40.0, 225.0, &config);
        assert_eq!(v, 40.0 * 0.95);
        let v = computer_velocity(&paddle, v, 225.0, &config);
        assert_eq!(v, 40.0 * 0.95 * 0.95);
    }

    #[test]
    fn test_steer_computer_leaves_player_untouched() {
        let config = Config::new();
        let mut world = World::new();
        crate::create_paddle(&mut world, Side::Player, computer_paddle(200.0), 1.0);
        let computer = crate::create_paddle(&mut world, Side::Computer, computer_paddle(200.0), 1.0);
        crate::create_ball(
            &mut world,
            Ball::new(glam::Vec2::new(320.0, 10.0), glam::Vec2::ZERO, 4.0),
        );

        steer_computer(&mut world, &config);

        for (entity, (velocity, side)) in world.query::<(&PaddleVelocity, &Side)>().iter() {
            match side {
                Side::Player => assert_eq!(velocity.0, 1.0),
                Side::Computer => {
                    assert_eq!(entity, computer);
                    assert_eq!(velocity.0, -3.0);
                }
            }
        }
    }
}

use crate::{Ball, Config, Paddle, RenderSurface, Side};
use hecs::World;

pub fn clear_surface(config: &Config, surface: &mut dyn RenderSurface) {
    surface.clear_rect(0.0, 0.0, config.arena_width, config.arena_height);
}

/// Draw the ball, then the player and computer paddles
pub fn draw_entities(world: &World, config: &Config, surface: &mut dyn RenderSurface) {
    for (_e, ball) in world.query::<&Ball>().iter() {
        surface.fill_circle(ball.pos, ball.radius, &config.ball_color);
    }

    for wanted in [Side::Player, Side::Computer] {
        for (_e, (paddle, side)) in world.query::<(&Paddle, &Side)>().iter() {
            if *side == wanted {
                surface.fill_rect(
                    paddle.x,
                    paddle.y,
                    paddle.width,
                    paddle.height,
                    &config.paddle_color,
                );
            }
        }
    }
}

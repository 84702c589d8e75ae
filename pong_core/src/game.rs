//! Single-session game controller
//!
//! `PongGame` owns the world and every resource the tick needs. It is the
//! object front ends share between their tick driver and the steering bridge.

use crate::{
    create_ball, create_paddle, update_logic, Ball, Config, ConfigError, Events, GameRng, Paddle,
    PaddleVelocity, RenderSurface, Score, Side,
};
use glam::Vec2;
use hecs::World;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Flat view of the game for external consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub player_y: f32,
    pub computer_y: f32,
    pub score: Score,
}

pub struct PongGame {
    pub world: World,
    config: Config,
    score: Score,
    events: Events,
    rng: GameRng,
    tick: u64,
}

impl PongGame {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        // Create paddles
        let spawn_y = config.paddle_spawn_y();
        for (side, velocity) in [
            (Side::Player, 0.0),
            (Side::Computer, config.computer_initial_velocity),
        ] {
            let paddle = Paddle::new(
                config.paddle_x(side),
                spawn_y,
                config.paddle_width,
                config.paddle_height,
                config.arena_height,
            );
            create_paddle(&mut world, side, paddle, velocity);
        }

        // Create ball
        let ball = Ball::spawn(
            config.ball_spawn(),
            config.ball_radius,
            config.ball_speed_min,
            config.ball_speed_max,
            &mut rng,
        );
        create_ball(&mut world, ball);

        Ok(Self {
            world,
            config,
            score: Score::new(),
            events: Events::new(),
            rng,
            tick: 0,
        })
    }

    /// Run one tick and draw it. Returns what happened during the tick.
    pub fn update_logic(&mut self, surface: &mut dyn RenderSurface) -> Events {
        update_logic(
            &mut self.world,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
            surface,
        );
        self.tick += 1;
        self.events
    }

    /// Draw the current state without advancing it
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        crate::systems::clear_surface(&self.config, surface);
        crate::systems::draw_entities(&self.world, &self.config, surface);
    }

    /// Set the player paddle's steering velocity. Not range-checked, but a
    /// non-finite value is dropped and the last good one stays in effect.
    pub fn update_player_speed(&mut self, value: f32) {
        if !value.is_finite() {
            warn!(value, "ignoring non-finite steering value");
            return;
        }
        self.set_velocity(Side::Player, value);
    }

    pub fn update_multiplier(&mut self, multiplier: f32) {
        if !multiplier.is_finite() {
            warn!(multiplier, "ignoring non-finite multiplier");
            return;
        }
        self.config.player_multiplier = multiplier;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn reset_score(&mut self) {
        self.score.reset();
    }

    /// Events from the most recent tick
    pub fn events(&self) -> Events {
        self.events
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.query::<&Ball>().iter().next().map(|(_e, b)| *b)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<(&Paddle, &Side)>()
            .iter()
            .find(|(_e, (_p, s))| **s == side)
            .map(|(_e, (p, _s))| *p)
    }

    pub fn velocity(&self, side: Side) -> Option<f32> {
        self.world
            .query::<(&PaddleVelocity, &Side)>()
            .iter()
            .find(|(_e, (_v, s))| **s == side)
            .map(|(_e, (v, _s))| v.0)
    }

    pub fn set_velocity(&mut self, side: Side, value: f32) {
        for (_e, (velocity, s)) in self.world.query_mut::<(&mut PaddleVelocity, &Side)>() {
            if *s == side {
                velocity.0 = value;
            }
        }
    }

    /// Move a paddle's top edge, clamped to the arena
    pub fn place_paddle(&mut self, side: Side, y: f32) {
        for (_e, (paddle, s)) in self.world.query_mut::<(&mut Paddle, &Side)>() {
            if *s == side {
                paddle.y = y.clamp(0.0, paddle.max_y());
            }
        }
    }

    /// Replace the ball with one in a known state
    pub fn serve_ball(&mut self, pos: Vec2, vel: Vec2) {
        let old: Vec<hecs::Entity> = self.world.query::<&Ball>().iter().map(|(e, _)| e).collect();
        for entity in old {
            let _ = self.world.despawn(entity);
        }
        create_ball(&mut self.world, Ball::new(pos, vel, self.config.ball_radius));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let ball = self.ball().unwrap_or(Ball::new(
            self.config.ball_spawn(),
            Vec2::ZERO,
            self.config.ball_radius,
        ));
        let spawn_y = self.config.paddle_spawn_y();
        GameSnapshot {
            tick: self.tick,
            ball_x: ball.pos.x,
            ball_y: ball.pos.y,
            ball_vx: ball.vel.x,
            ball_vy: ball.vel.y,
            player_y: self.paddle(Side::Player).map_or(spawn_y, |p| p.y),
            computer_y: self.paddle(Side::Computer).map_or(spawn_y, |p| p.y),
            score: self.score,
        }
    }
}

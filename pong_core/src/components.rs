use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which paddle an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,   // left, steered by the model
    Computer, // right, steered by the AI
}

/// Paddle component. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub y_move_area: f32, // playfield height
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, y_move_area: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            y_move_area,
        }
    }

    /// Lowest legal value of `y`
    pub fn max_y(&self) -> f32 {
        self.y_move_area - self.height
    }

    /// Move by a steering velocity scaled by `multiplier`, clamped to the arena.
    /// A non-finite displacement leaves the paddle where it is.
    pub fn move_player(&mut self, velocity: f32, multiplier: f32) {
        let displacement = velocity * multiplier;
        if !displacement.is_finite() {
            return;
        }
        self.y = (self.y + displacement).clamp(0.0, self.max_y());
    }

    /// Move by a raw delta, snapping to the nearest edge when it overshoots
    pub fn move_position(&mut self, delta_y: f32) {
        self.y += delta_y;
        if self.y < 0.0 {
            self.y = 0.0;
        } else if self.y + self.height > self.y_move_area {
            self.y = self.max_y();
        }
    }

    /// Inclusive point-in-box test
    pub fn hit_test_point(&self, point: Vec2) -> bool {
        within_range(point.x, self.x, self.x + self.width)
            && within_range(point.y, self.y, self.y + self.height)
    }
}

/// Vertical velocity of a paddle, in pixels per tick before any multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddleVelocity(pub f32);

/// Position of a steering value on a 0-100 gauge (-1 maps to 0, 1 to 100)
pub fn steering_gauge(value: f32) -> f32 {
    (value + 1.0) * 50.0
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2, // pixels per tick
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// New ball at `center` heading into a random quadrant.
    ///
    /// Each axis gets an independent speed in `[speed_min, speed_max)` and an
    /// independent coin flip for its sign.
    pub fn spawn(
        center: Vec2,
        radius: f32,
        speed_min: f32,
        speed_max: f32,
        rng: &mut crate::GameRng,
    ) -> Self {
        let mut axis = || {
            let speed: f32 = rng.0.gen_range(speed_min..speed_max);
            if rng.0.gen_bool(0.5) {
                -speed
            } else {
                speed
            }
        };
        let vel = Vec2::new(axis(), axis());
        Self::new(center, vel, radius)
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

pub(crate) fn within_range(value: f32, min: f32, max: f32) -> bool {
    value >= min && value <= max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    fn paddle(y: f32) -> Paddle {
        Paddle::new(0.0, y, 10.0, 50.0, 480.0)
    }

    #[test]
    fn test_steering_gauge() {
        assert_eq!(steering_gauge(-1.0), 0.0);
        assert_eq!(steering_gauge(0.0), 50.0);
        assert_eq!(steering_gauge(1.0), 100.0);
        assert_eq!(steering_gauge(1.5), 125.0);
    }

    #[test]
    fn test_move_player_ignores_non_finite_displacement() {
        let mut p = paddle(100.0);
        p.move_player(f32::NAN, 12.0);
        assert_eq!(p.y, 100.0);
        p.move_player(1.0, f32::INFINITY);
        assert_eq!(p.y, 100.0);
        p.move_player(1.0, 12.0);
        assert_eq!(p.y, 112.0);
    }

    #[test]
    fn test_move_player_within_bounds() {
        let mut p = paddle(100.0);
        p.move_player(1.0, 12.0);
        assert_eq!(p.y, 112.0);
    }

    #[test]
    fn test_move_player_clamps_bottom() {
        let mut p = paddle(470.0);
        p.move_player(1.0, 12.0);
        assert_eq!(p.y, 430.0, "Should clamp to yMoveArea - height");
    }

    #[test]
    fn test_move_player_clamps_top() {
        let mut p = paddle(5.0);
        p.move_player(-1.0, 12.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_move_player_accepts_out_of_range_velocity() {
        let mut p = paddle(100.0);
        p.move_player(3.0, 12.0);
        assert_eq!(p.y, 136.0, "Velocity is not clamped, only position");
        p.move_player(100.0, 12.0);
        assert_eq!(p.y, 430.0);
    }

    #[test]
    fn test_move_position_snaps_to_edges() {
        let mut p = paddle(2.0);
        p.move_position(-3.0);
        assert_eq!(p.y, 0.0);

        let mut p = paddle(420.0);
        p.move_position(40.0);
        assert_eq!(p.y, 430.0);

        let mut p = paddle(200.0);
        p.move_position(-3.0);
        assert_eq!(p.y, 197.0);
    }

    #[test]
    fn test_movement_keeps_paddle_in_range() {
        let inputs = [-1000.0, -50.0, -1.0, -0.3, 0.0, 0.5, 1.0, 7.0, 50.0, 1000.0];
        for start in [0.0, 1.0, 100.0, 215.0, 429.0, 430.0] {
            for &input in &inputs {
                let mut a = paddle(start);
                a.move_player(input, 12.0);
                assert!((0.0..=430.0).contains(&a.y), "move_player {start} {input}");

                let mut b = paddle(start);
                b.move_position(input);
                assert!((0.0..=430.0).contains(&b.y), "move_position {start} {input}");
            }
        }
    }

    #[test]
    fn test_hit_test_point_is_inclusive() {
        let p = paddle(100.0);
        assert!(p.hit_test_point(Vec2::new(0.0, 100.0)), "top-left corner");
        assert!(p.hit_test_point(Vec2::new(10.0, 150.0)), "bottom-right corner");
        assert!(p.hit_test_point(Vec2::new(5.0, 125.0)));
        assert!(!p.hit_test_point(Vec2::new(10.1, 125.0)));
        assert!(!p.hit_test_point(Vec2::new(5.0, 99.9)));
        assert!(!p.hit_test_point(Vec2::new(5.0, 150.1)));
    }

    #[test]
    fn test_ball_advance() {
        let mut ball = Ball::new(Vec2::new(320.0, 240.0), Vec2::new(2.5, 2.0), 4.0);
        ball.advance();
        assert_eq!(ball.pos, Vec2::new(322.5, 242.0));
    }

    #[test]
    fn test_ball_spawn_speed_range() {
        let mut rng = GameRng::new(7);
        let center = Vec2::new(320.0, 240.0);
        let mut signs = std::collections::HashSet::new();
        for _ in 0..200 {
            let ball = Ball::spawn(center, 4.0, 2.0, 3.5, &mut rng);
            assert_eq!(ball.pos, center);
            assert_eq!(ball.radius, 4.0);
            for speed in [ball.vel.x.abs(), ball.vel.y.abs()] {
                assert!((2.0..3.5).contains(&speed), "speed {speed} out of range");
            }
            signs.insert((ball.vel.x > 0.0, ball.vel.y > 0.0));
        }
        assert_eq!(signs.len(), 4, "All four quadrants should appear");
    }
}

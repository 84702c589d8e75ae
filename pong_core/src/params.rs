/// Game tuning parameters for webcam Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (canvas pixels)
    pub const ARENA_WIDTH: f32 = 640.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 50.0;
    pub const PLAYER_MULTIPLIER: f32 = 12.0; // steering value -> pixels per tick

    // Computer paddle
    pub const COMPUTER_SPEED: f32 = 3.0;
    pub const COMPUTER_INITIAL_VELOCITY: f32 = 40.0;
    pub const COMPUTER_DAMPING: f32 = 0.95;
    pub const AI_TOP_ZONE: f32 = 0.25;
    pub const AI_BOTTOM_ZONE: f32 = 0.75;

    // Ball
    pub const BALL_RADIUS: f32 = 4.0;
    pub const BALL_SPEED_MIN: f32 = 2.0;
    pub const BALL_SPEED_MAX: f32 = 3.5; // exclusive
    pub const RALLY_ACCELERATION: f32 = 1.2; // Multiply both axes on paddle hit

    // Timing
    pub const TICK_RATE_HZ: f32 = 50.0;
    pub const PREDICTION_RATE_HZ: f32 = 60.0;
    pub const MIN_RATE_HZ: f32 = 1.0;
    pub const MAX_RATE_HZ: f32 = 1000.0;

    // Colours
    pub const PADDLE_COLOR: &str = "#0ae";
    pub const BALL_COLOR: &str = "#f0f";
}

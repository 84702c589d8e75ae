use crate::Params;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be within [{min}, {max}] Hz, got {value}")]
    RateOutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("paddle height {paddle} does not fit in arena height {arena}")]
    PaddleTooTall { paddle: f32, arena: f32 },
    #[error("ball speed range [{min}, {max}) is empty")]
    EmptySpeedRange { min: f32, max: f32 },
    #[error("AI zones must satisfy 0 <= top < bottom <= 1, got {top} and {bottom}")]
    InvalidAiZones { top: f32, bottom: f32 },
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub player_multiplier: f32,
    pub computer_speed: f32,
    pub computer_initial_velocity: f32,
    pub computer_damping: f32,
    pub ai_top_zone: f32,
    pub ai_bottom_zone: f32,
    pub ball_radius: f32,
    pub ball_speed_min: f32,
    pub ball_speed_max: f32,
    pub rally_acceleration: f32,
    pub tick_rate_hz: f32,
    pub prediction_rate_hz: f32,
    pub paddle_color: String,
    pub ball_color: String,
    /// Whether a session reset also zeroes the score counters
    pub reset_score_on_reset: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            player_multiplier: Params::PLAYER_MULTIPLIER,
            computer_speed: Params::COMPUTER_SPEED,
            computer_initial_velocity: Params::COMPUTER_INITIAL_VELOCITY,
            computer_damping: Params::COMPUTER_DAMPING,
            ai_top_zone: Params::AI_TOP_ZONE,
            ai_bottom_zone: Params::AI_BOTTOM_ZONE,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_min: Params::BALL_SPEED_MIN,
            ball_speed_max: Params::BALL_SPEED_MAX,
            rally_acceleration: Params::RALLY_ACCELERATION,
            tick_rate_hz: Params::TICK_RATE_HZ,
            prediction_rate_hz: Params::PREDICTION_RATE_HZ,
            paddle_color: Params::PADDLE_COLOR.to_string(),
            ball_color: Params::BALL_COLOR.to_string(),
            reset_score_on_reset: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for a canvas of the given size, everything else default
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed_min", self.ball_speed_min),
            ("computer_speed", self.computer_speed),
            ("rally_acceleration", self.rally_acceleration),
            ("tick_rate_hz", self.tick_rate_hz),
            ("prediction_rate_hz", self.prediction_rate_hz),
        ];
        for (field, value) in positive {
            // also rejects NaN
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("tick_rate_hz", self.tick_rate_hz),
            ("prediction_rate_hz", self.prediction_rate_hz),
        ] {
            if !(Params::MIN_RATE_HZ..=Params::MAX_RATE_HZ).contains(&value) {
                return Err(ConfigError::RateOutOfRange {
                    field,
                    value,
                    min: Params::MIN_RATE_HZ,
                    max: Params::MAX_RATE_HZ,
                });
            }
        }
        if self.paddle_height > self.arena_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                arena: self.arena_height,
            });
        }
        if !(self.ball_speed_max > self.ball_speed_min) {
            return Err(ConfigError::EmptySpeedRange {
                min: self.ball_speed_min,
                max: self.ball_speed_max,
            });
        }
        if !(0.0 <= self.ai_top_zone
            && self.ai_top_zone < self.ai_bottom_zone
            && self.ai_bottom_zone <= 1.0)
        {
            return Err(ConfigError::InvalidAiZones {
                top: self.ai_top_zone,
                bottom: self.ai_bottom_zone,
            });
        }
        Ok(())
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: crate::Side) -> f32 {
        match side {
            crate::Side::Player => 0.0,
            crate::Side::Computer => self.arena_width - self.paddle_width,
        }
    }

    /// Both paddles start with their top edge at the vertical centre
    pub fn paddle_spawn_y(&self) -> f32 {
        self.arena_height / 2.0
    }

    pub fn ball_spawn(&self) -> glam::Vec2 {
        glam::Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Only meaningful on a validated config
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz))
    }

    pub fn prediction_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.prediction_rate_hz))
    }
}

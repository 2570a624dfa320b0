//! Brick Breaker - A single-screen paddle, ball and bricks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, session state machine)
//! - `renderer`: Drawing surface contract and an in-memory scene implementing it
//! - `settings`: Screen size, lives and presentation preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use renderer::{Color, Fill, ItemId, Scene, Shape, Surface};
pub use settings::Settings;
pub use sim::{Game, GameEvent, GamePhase, Key};

/// Game configuration constants
pub mod consts {
    use crate::renderer::Color;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 830.0;
    pub const SCREEN_HEIGHT: f32 = 400.0;
    pub const BACKGROUND: Color = Color::rgb(0xFF78F0);

    /// Delay between simulation ticks (ms)
    pub const TICK_MS: u64 = 50;
    /// Delay between losing a ball and serving the next one (ms)
    pub const RESERVE_DELAY_MS: u64 = 1000;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Distance travelled per tick along each axis
    pub const BALL_SPEED: f32 = 10.0;
    /// Ball center height when docked on the paddle
    pub const BALL_SERVE_Y: f32 = 310.0;
    pub const BALL_COLOR: Color = Color::rgb(0xB6FFFA);

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 50.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_Y: f32 = 326.0;
    /// Horizontal offset per arrow key press
    pub const PADDLE_STEP: f32 = 15.0;
    pub const PADDLE_COLOR: Color = Color::rgb(0x6528F7);

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Horizontal inset of the first column and the right margin
    pub const BRICK_MARGIN: f32 = 5.0;
    /// Row center heights paired with starting hit counts, top to bottom
    pub const BRICK_ROWS: [(f32, u32); 8] = [
        (30.0, 4),
        (50.0, 4),
        (70.0, 3),
        (90.0, 3),
        (110.0, 2),
        (130.0, 2),
        (150.0, 1),
        (170.0, 1),
    ];

    /// Scoring
    pub const POINTS_PER_HIT: u64 = 10;
    pub const DESTROY_BONUS: u64 = 10;

    /// Flash animation (brick destruction and lost ball)
    pub const FLASH_CYCLES: u64 = 5;
    pub const FLASH_PERIOD_MS: u64 = 100;
    pub const FLASH_ON_MS: u64 = 50;
    pub const FLASH_COLOR: Color = Color::rgb(0xFF0000);
    /// Brick is removed once its flashes are done
    pub const BRICK_REMOVE_MS: u64 = FLASH_CYCLES * FLASH_PERIOD_MS;

    /// HUD layout
    pub const HUD_TEXT_SIZE: u16 = 15;
    pub const HUD_LIVES_X: f32 = 50.0;
    /// Score label sits this far from the right edge
    pub const HUD_SCORE_INSET: f32 = 55.0;
    pub const HUD_Y: f32 = 10.0;
    pub const MESSAGE_X: f32 = 400.0;
    pub const MESSAGE_Y: f32 = 200.0;
    pub const MESSAGE_SIZE: u16 = 40;

    pub const START_PROMPT: &str = "Press Space to start";
    pub const WINDOW_TITLE: &str = "Ball Brick Breaker (Expert Mode)";
}

//! Canvas Pong - two-player keyboard Pong on a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, paddles, ball, collisions, score)
//! - `renderer`: Frame description and 2D canvas drawing
//! - `platform`: Frame clock, scheduler abstraction and browser glue
//! - `settings`: Tunable configuration persisted in LocalStorage

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{PlatformError, SettingsError};
pub use settings::{KeyBindings, Palette, Settings, Timing};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 1024.0;
    pub const CANVAS_HEIGHT: f32 = 768.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;

    /// Speeds per frame for `Timing::FrameCounted`
    pub const PADDLE_SPEED_PER_FRAME: f32 = 5.0;
    pub const BALL_SPEED_PER_FRAME: f32 = 4.0;

    /// Speeds per second for `Timing::DeltaTime` (same feel at 60 Hz)
    pub const PADDLE_SPEED: f32 = PADDLE_SPEED_PER_FRAME * 60.0;
    pub const BALL_SPEED: f32 = BALL_SPEED_PER_FRAME * 60.0;

    /// Nominal frame duration used before a real delta is available
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;
    /// Clamp to prevent large jumps after a stalled tab
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Score text placement
    pub const SCORE_OFFSET_X: f32 = 50.0;
    pub const SCORE_OFFSET_Y: f32 = 50.0;
    pub const SCORE_FONT: &str = "1.875rem Arial";
}

/// Clamp `value` into `[min, max]`, saturating at `min` when the range is empty
#[inline]
pub fn clamp_saturating(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max.max(min))
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Fixed collision order every tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Side, bounce_off_paddle, bounce_off_walls, check_score};
pub use input::{InputState, KeyEvent, KeyEventKind, derive_velocity};
pub use state::{Ball, Direction, GameState, Paddle, Player, Score};
pub use tick::{GameEvent, tick};

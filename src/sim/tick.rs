//! Simulation tick
//!
//! Advances the game by one step: input → paddles → ball → collisions.

use super::collision::{Side, bounce_off_paddle, bounce_off_walls, check_score};
use super::input::{InputState, derive_velocity};
use super::state::{GameState, Player};

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleHit(Player),
    PointScored(Player),
}

/// Advance the game state by `dt` step units (1.0 per frame when
/// frame-counted, seconds otherwise)
///
/// Collision checks always run in the same order: walls, paddle one, paddle
/// two, scoring. None of them short-circuits the others.
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    // Paddles
    state.paddle_one.velocity = derive_velocity(
        input.player_one_up,
        input.player_one_down,
        state.paddle_speed,
    );
    state.paddle_two.velocity = derive_velocity(
        input.player_two_up,
        input.player_two_down,
        state.paddle_speed,
    );
    state.paddle_one.integrate(dt, state.canvas.y);
    state.paddle_two.integrate(dt, state.canvas.y);

    // Ball
    let step = state.ball.speed * dt;
    state.ball.integrate(dt);

    if bounce_off_walls(&mut state.ball, state.canvas.y) {
        events.push(GameEvent::WallBounce);
    }
    if bounce_off_paddle(&mut state.ball, &state.paddle_one, Side::Left, step) {
        events.push(GameEvent::PaddleHit(Player::One));
    }
    if bounce_off_paddle(&mut state.ball, &state.paddle_two, Side::Right, step) {
        events.push(GameEvent::PaddleHit(Player::Two));
    }
    if let Some(scorer) = check_score(&state.ball, state.canvas.x) {
        state.score.award(scorer);
        state.reset_ball();
        events.push(GameEvent::PointScored(scorer));
    }

    events
}

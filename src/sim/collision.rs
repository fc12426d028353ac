//! Collision detection and response
//!
//! Everything is axis-aligned, so a collision is a box overlap followed by a
//! direction flip. Responses only flip when the ball is travelling into the
//! surface, and they move the ball back to the surface, so a ball can never
//! stay overlapped long enough to be flipped twice.

use glam::Vec2;

use super::state::{Ball, Direction, Paddle, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Inclusive overlap: touching edges count as a hit
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

impl From<&Ball> for Aabb {
    fn from(ball: &Ball) -> Self {
        Aabb::from_pos_size(ball.pos, ball.size)
    }
}

impl From<&Paddle> for Aabb {
    fn from(paddle: &Paddle) -> Self {
        Aabb::from_pos_size(paddle.pos, paddle.size)
    }
}

/// Which side of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal direction a ball travels when heading toward this side
    fn incoming(self) -> Direction {
        match self {
            Side::Left => Direction::Negative,
            Side::Right => Direction::Positive,
        }
    }
}

/// Reflect off the top and bottom walls. Returns true if the ball bounced.
pub fn bounce_off_walls(ball: &mut Ball, canvas_height: f32) -> bool {
    let bottom = canvas_height - ball.size.y;

    if ball.pos.y <= 0.0 && ball.dir_y == Direction::Negative {
        ball.dir_y = Direction::Positive;
        ball.pos.y = 0.0;
        true
    } else if ball.pos.y >= bottom && ball.dir_y == Direction::Positive {
        ball.dir_y = Direction::Negative;
        ball.pos.y = bottom;
        true
    } else {
        false
    }
}

/// Reflect off a paddle on `side`. Returns true if the ball bounced.
///
/// `step` is the horizontal distance the ball travelled this tick. The flip
/// only happens while the ball moves toward the paddle and its leading edge
/// started the tick in front of the paddle's face; a ball already behind the
/// face keeps going. The ball is then placed against that face.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, side: Side, step: f32) -> bool {
    if ball.dir_x != side.incoming() {
        return false;
    }
    let was_in_front = match side {
        Side::Left => ball.pos.x + step >= paddle.right(),
        Side::Right => ball.pos.x + ball.size.x - step <= paddle.left(),
    };
    if !was_in_front {
        return false;
    }
    if !Aabb::from(&*ball).overlaps(&Aabb::from(paddle)) {
        return false;
    }

    ball.dir_x = ball.dir_x.flip();
    ball.pos.x = match side {
        Side::Left => paddle.right(),
        Side::Right => paddle.left() - ball.size.x,
    };
    true
}

/// Which player (if any) scores with the ball at its current position.
/// A ball touching the left wall is a point for player two.
pub fn check_score(ball: &Ball, canvas_width: f32) -> Option<Player> {
    if ball.pos.x <= 0.0 {
        Some(Player::Two)
    } else if ball.pos.x + ball.size.x >= canvas_width {
        Some(Player::One)
    } else {
        None
    }
}

//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Settings;
use crate::clamp_saturating;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Left paddle
    One,
    /// Right paddle
    Two,
}

/// Sign of ball travel along one axis. Only two values exist, so the
/// direction can never be zero or fractional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Negative,
    Positive,
}

impl Direction {
    /// Pick a direction uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Negative => -1.0,
            Direction::Positive => 1.0,
        }
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Direction::Negative => Direction::Positive,
            Direction::Positive => Direction::Negative,
        }
    }
}

/// A player's paddle. Horizontal position is fixed; only `pos.y` moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed vertical speed (negative = up)
    pub velocity: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            velocity: 0.0,
        }
    }

    /// Move by `velocity * dt`, then clamp so the paddle stays on the canvas.
    /// Hitting a wall stops the paddle; it never bounces.
    pub fn integrate(&mut self, dt: f32, canvas_height: f32) {
        let y = self.pos.y + self.velocity * dt;
        self.pos.y = clamp_saturating(y, 0.0, canvas_height - self.size.y);
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// The ball. Drawn as a circle inscribed in its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    /// Scalar speed shared by both axes
    pub speed: f32,
    pub dir_x: Direction,
    pub dir_y: Direction,
}

impl Ball {
    pub fn new(pos: Vec2, size: Vec2, speed: f32, dir_x: Direction, dir_y: Direction) -> Self {
        Self {
            pos,
            size,
            speed,
            dir_x,
            dir_y,
        }
    }

    /// Advance along both axes by `speed * direction * dt`
    pub fn integrate(&mut self, dt: f32) {
        self.pos.x += self.speed * self.dir_x.sign() * dt;
        self.pos.y += self.speed * self.dir_y.sign() * dt;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }
}

/// Points per player. Never decreases during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player_one: u32,
    pub player_two: u32,
}

impl Score {
    pub fn award(&mut self, player: Player) {
        match player {
            Player::One => self.player_one += 1,
            Player::Two => self.player_two += 1,
        }
    }

    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub canvas: Vec2,
    pub paddle_one: Paddle,
    pub paddle_two: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Paddle speed in pixels per step unit
    pub paddle_speed: f32,
    /// Simulation step counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }

    /// Create a new game state drawing ball directions from `rng`
    pub fn with_rng(settings: &Settings, mut rng: Pcg32) -> Self {
        let canvas = Vec2::new(settings.canvas_width, settings.canvas_height);
        let paddle_size = Vec2::new(settings.paddle_width, settings.paddle_height);
        let paddle_y = (canvas.y - paddle_size.y) / 2.0;

        let paddle_one = Paddle::new(Vec2::new(settings.paddle_margin, paddle_y), paddle_size);
        let paddle_two = Paddle::new(
            Vec2::new(canvas.x - paddle_size.x - settings.paddle_margin, paddle_y),
            paddle_size,
        );

        let ball_size = Vec2::splat(settings.ball_size);
        let ball = Ball::new(
            (canvas - ball_size) / 2.0,
            ball_size,
            settings.ball_speed,
            Direction::random(&mut rng),
            Direction::random(&mut rng),
        );

        Self {
            canvas,
            paddle_one,
            paddle_two,
            ball,
            score: Score::default(),
            paddle_speed: settings.paddle_speed,
            time_ticks: 0,
            rng,
        }
    }

    /// Recenter the ball and pick fresh directions for both axes
    pub fn reset_ball(&mut self) {
        self.ball.pos = (self.canvas - self.ball.size) / 2.0;
        self.ball.dir_x = Direction::random(&mut self.rng);
        self.ball.dir_y = Direction::random(&mut self.rng);
    }
}

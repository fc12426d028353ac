//! Rendering
//!
//! `build_frame` turns game state into a list of draw commands without
//! touching the state. A `DrawSurface` then executes the commands.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::Settings;
use crate::consts::{SCORE_FONT, SCORE_OFFSET_X, SCORE_OFFSET_Y};
use crate::sim::{GameState, Paddle};

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a rectangle (also used to clear the background)
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: String,
    },
    /// Fill a circle
    FillCircle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    /// Draw text with its baseline starting at `pos`
    FillText {
        text: String,
        pos: Vec2,
        font: String,
        color: String,
    },
}

/// Target for draw commands
pub trait DrawSurface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}

/// Everything needed to draw one frame, in painter's order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Execute every command on `surface`
    pub fn paint(&self, surface: &mut dyn DrawSurface) {
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { pos, size, color } => {
                    surface.fill_rect(*pos, *size, color);
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    surface.fill_circle(*center, *radius, color);
                }
                DrawCommand::FillText {
                    text,
                    pos,
                    font,
                    color,
                } => {
                    surface.fill_text(text, *pos, font, color);
                }
            }
        }
    }
}

fn paddle_rect(paddle: &Paddle, color: &str) -> DrawCommand {
    DrawCommand::FillRect {
        pos: paddle.pos,
        size: paddle.size,
        color: color.to_string(),
    }
}

/// Describe the current state as a frame: background, paddles, scores, ball
pub fn build_frame(state: &GameState, settings: &Settings) -> Frame {
    let fg = settings.palette.foreground.as_str();
    let mut commands = Vec::with_capacity(6);

    commands.push(DrawCommand::FillRect {
        pos: Vec2::ZERO,
        size: state.canvas,
        color: settings.palette.background.clone(),
    });
    commands.push(paddle_rect(&state.paddle_one, fg));
    commands.push(paddle_rect(&state.paddle_two, fg));

    if settings.show_score {
        let middle_x = state.canvas.x / 2.0;
        let scores = [
            (state.score.player_one, middle_x - SCORE_OFFSET_X),
            (state.score.player_two, middle_x + SCORE_OFFSET_X),
        ];
        for (points, x) in scores {
            commands.push(DrawCommand::FillText {
                text: points.to_string(),
                pos: Vec2::new(x, SCORE_OFFSET_Y),
                font: SCORE_FONT.to_string(),
                color: fg.to_string(),
            });
        }
    }

    commands.push(DrawCommand::FillCircle {
        center: state.ball.center(),
        radius: state.ball.radius(),
        color: fg.to_string(),
    });

    Frame { commands }
}

/// Build a frame for `state` and paint it onto `surface`
pub fn render(state: &GameState, settings: &Settings, surface: &mut dyn DrawSurface) {
    build_frame(state, settings).paint(surface);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Coarse software rasterizer: one RGB byte triple per pixel.
    /// Text is recorded rather than rasterized.
    struct PixelSurface {
        width: usize,
        height: usize,
        pixels: Vec<[u8; 3]>,
        text: Vec<(String, Vec2)>,
    }

    impl PixelSurface {
        fn new(width: usize, height: usize) -> Self {
            Self {
                width,
                height,
                pixels: vec![[0x80; 3]; width * height],
                text: Vec::new(),
            }
        }

        fn parse(color: &str) -> [u8; 3] {
            let hex = color.trim_start_matches('#');
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
            [byte(0), byte(2), byte(4)]
        }

        fn at(&self, x: usize, y: usize) -> [u8; 3] {
            self.pixels[y * self.width + x]
        }
    }

    impl DrawSurface for PixelSurface {
        fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str) {
            let rgb = Self::parse(color);
            let x0 = pos.x.max(0.0) as usize;
            let y0 = pos.y.max(0.0) as usize;
            let x1 = ((pos.x + size.x) as usize).min(self.width);
            let y1 = ((pos.y + size.y) as usize).min(self.height);
            for y in y0..y1 {
                for x in x0..x1 {
                    self.pixels[y * self.width + x] = rgb;
                }
            }
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
            let rgb = Self::parse(color);
            for y in 0..self.height {
                for x in 0..self.width {
                    let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    if p.distance(center) <= radius {
                        self.pixels[y * self.width + x] = rgb;
                    }
                }
            }
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, _font: &str, _color: &str) {
            self.text.push((text.to_string(), pos));
        }
    }

    fn small_state() -> (GameState, Settings) {
        let settings = Settings {
            canvas_width: 64.0,
            canvas_height: 48.0,
            paddle_width: 2.0,
            paddle_height: 10.0,
            paddle_margin: 1.0,
            ball_size: 4.0,
            ..Settings::default()
        };
        (GameState::new(&settings, 5), settings)
    }

    #[test]
    fn test_frame_order_and_layout() {
        let state = GameState::new(&Settings::default(), 1);
        let frame = build_frame(&state, &Settings::default());

        assert_eq!(frame.commands.len(), 6);
        assert_eq!(
            frame.commands[0],
            DrawCommand::FillRect {
                pos: Vec2::ZERO,
                size: Vec2::new(1024.0, 768.0),
                color: "#000000".to_string(),
            }
        );
        assert!(matches!(
            &frame.commands[3],
            DrawCommand::FillText { text, pos, .. } if text == "0" && *pos == Vec2::new(462.0, 50.0)
        ));
        assert!(matches!(
            &frame.commands[4],
            DrawCommand::FillText { pos, .. } if *pos == Vec2::new(562.0, 50.0)
        ));
        assert_eq!(
            frame.commands[5],
            DrawCommand::FillCircle {
                center: Vec2::new(512.0, 384.0),
                radius: 7.5,
                color: "#FFFFFF".to_string(),
            }
        );
    }

    #[test]
    fn test_score_text_hidden_when_disabled() {
        let state = GameState::new(&Settings::default(), 1);
        let settings = Settings {
            show_score: false,
            ..Settings::default()
        };
        let frame = build_frame(&state, &settings);
        assert_eq!(frame.commands.len(), 4);
        assert!(
            !frame
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::FillText { .. }))
        );
    }

    #[test]
    fn test_score_text_tracks_score() {
        let mut state = GameState::new(&Settings::default(), 1);
        state.score.player_one = 3;
        state.score.player_two = 11;
        let frame = build_frame(&state, &Settings::default());
        let texts: Vec<&str> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["3", "11"]);
    }

    #[test]
    fn test_render_twice_same_pixels() {
        let (state, settings) = small_state();
        let before = state.clone();

        let mut first = PixelSurface::new(64, 48);
        render(&state, &settings, &mut first);
        let mut second = PixelSurface::new(64, 48);
        render(&state, &settings, &mut second);

        assert_eq!(first.pixels, second.pixels);
        assert_eq!(first.text, second.text);
        assert_eq!(state.ball, before.ball);
        assert_eq!(state.score, before.score);
    }

    #[test]
    fn test_render_paints_entities() {
        let (state, settings) = small_state();
        let mut surface = PixelSurface::new(64, 48);
        render(&state, &settings, &mut surface);

        // Background cleared
        assert_eq!(surface.at(30, 2), [0, 0, 0]);
        // Paddle one spans x 1..3, y 19..29
        assert_eq!(surface.at(1, 20), [0xFF; 3]);
        // Ball centered at (32, 24)
        assert_eq!(surface.at(32, 24), [0xFF; 3]);
        assert_eq!(surface.text.len(), 2);
    }
}

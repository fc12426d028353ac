//! Platform abstraction layer
//!
//! Frame timing, frame scheduling and the per-frame driver. The browser
//! specifics (DOM, key listeners, `requestAnimationFrame`) live in `web`;
//! everything here runs natively so the loop can be driven from tests.

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::Settings;
use crate::Timing;
use crate::consts::{MAX_FRAME_DT, NOMINAL_FRAME_DT};
use crate::renderer::{DrawSurface, render};
use crate::sim::{GameEvent, GameState, InputState, KeyEvent, tick};

/// Number of frames averaged for the FPS estimate
const FPS_WINDOW: usize = 60;

/// Turns frame timestamps into simulation step sizes
#[derive(Debug, Clone)]
pub struct FrameClock {
    timing: Timing,
    last_time: Option<f64>,
    recent: VecDeque<f64>,
}

impl FrameClock {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            last_time: None,
            recent: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// Record a frame at `timestamp_ms` and return the step to simulate.
    ///
    /// Frame-counted timing always steps by 1.0. Delta timing steps by the
    /// seconds since the previous frame, clamped to `[0, MAX_FRAME_DT]`; the
    /// first frame uses one nominal 60 Hz frame.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let elapsed = match self.last_time {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => NOMINAL_FRAME_DT,
        };
        self.last_time = Some(timestamp_ms);

        if self.recent.len() == FPS_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(timestamp_ms);

        match self.timing {
            Timing::FrameCounted => 1.0,
            Timing::DeltaTime if elapsed.is_finite() => elapsed.clamp(0.0, MAX_FRAME_DT),
            Timing::DeltaTime => 0.0,
        }
    }

    /// Frames per second over the last `FPS_WINDOW` frames
    pub fn fps(&self) -> Option<f32> {
        let (first, last) = (self.recent.front()?, self.recent.back()?);
        let elapsed = last - first;
        if elapsed <= 0.0 {
            return None;
        }
        Some(((self.recent.len() - 1) as f64 * 1000.0 / elapsed) as f32)
    }
}

/// Callback invoked with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Something that can call back once per display frame
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback);
}

/// Game instance holding all state
pub struct Game {
    pub settings: Settings,
    pub state: GameState,
    pub input: InputState,
    clock: FrameClock,
    frames: u64,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let state = GameState::new(&settings, seed);
        let clock = FrameClock::new(settings.timing);
        Self {
            settings,
            state,
            input: InputState::default(),
            clock,
            frames: 0,
        }
    }

    /// Forward a key event to the input state
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let recognized = self.input.handle_input(event, &self.settings.keys);
        if !recognized {
            log::trace!("Ignoring key {:?}", event.key);
        }
        recognized
    }

    /// Advance the simulation to `timestamp_ms`
    pub fn update(&mut self, timestamp_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.advance(timestamp_ms);
        let events = tick(&mut self.state, &self.input, dt);

        for event in &events {
            match event {
                GameEvent::PointScored(player) => log::info!(
                    "Player {:?} scores ({} - {})",
                    player,
                    self.state.score.player_one,
                    self.state.score.player_two
                ),
                GameEvent::PaddleHit(player) => log::debug!("Paddle {:?} hit", player),
                GameEvent::WallBounce => log::debug!("Wall bounce"),
            }
        }

        self.frames += 1;
        if self.frames % 600 == 0 {
            if let Some(fps) = self.clock.fps() {
                log::debug!("{:.0} fps after {} frames", fps, self.frames);
            }
        }

        events
    }

    /// One full frame: input → integrate → render
    pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn DrawSurface) -> Vec<GameEvent> {
        let events = self.update(timestamp_ms);
        render(&self.state, &self.settings, surface);
        events
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Request the next frame from `scheduler`. Each frame runs the game once and
/// requests the one after it, so the loop lasts as long as the scheduler keeps
/// calling back.
pub fn run_loop<S, D>(game: Rc<RefCell<Game>>, surface: Rc<RefCell<D>>, scheduler: Rc<S>)
where
    S: FrameScheduler + 'static,
    D: DrawSurface + 'static,
{
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |timestamp| {
        {
            let mut surface = surface.borrow_mut();
            game.borrow_mut().frame(timestamp, &mut *surface);
        }
        run_loop(game, surface, next);
    }));
}

/// Drive the game through a fixed list of timestamps (headless use)
pub fn run_frames<I>(game: &mut Game, surface: &mut dyn DrawSurface, timestamps: I) -> Vec<GameEvent>
where
    I: IntoIterator<Item = f64>,
{
    let mut events = Vec::new();
    for timestamp in timestamps {
        events.extend(game.frame(timestamp, surface));
    }
    events
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::Direction;

    /// Scheduler that holds callbacks until the test fires them
    #[derive(Default)]
    struct ManualScheduler {
        pending: RefCell<VecDeque<FrameCallback>>,
    }

    impl ManualScheduler {
        fn fire(&self, timestamp: f64) {
            let callback = self.pending.borrow_mut().pop_front();
            if let Some(callback) = callback {
                callback(timestamp);
            }
        }

        fn pending(&self) -> usize {
            self.pending.borrow().len()
        }
    }

    impl FrameScheduler for ManualScheduler {
        fn request_frame(&self, callback: FrameCallback) {
            self.pending.borrow_mut().push_back(callback);
        }
    }

    #[derive(Default)]
    struct CountingSurface {
        rects: usize,
        circles: usize,
        texts: usize,
    }

    impl DrawSurface for CountingSurface {
        fn fill_rect(&mut self, _pos: Vec2, _size: Vec2, _color: &str) {
            self.rects += 1;
        }
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str) {
            self.circles += 1;
        }
        fn fill_text(&mut self, _text: &str, _pos: Vec2, _font: &str, _color: &str) {
            self.texts += 1;
        }
    }

    #[test]
    fn test_clock_delta_time() {
        let mut clock = FrameClock::new(Timing::DeltaTime);
        assert_eq!(clock.advance(1000.0), NOMINAL_FRAME_DT);
        assert!((clock.advance(1016.0) - 0.016).abs() < 1e-6);
        // Stalled tab is clamped
        assert_eq!(clock.advance(5000.0), MAX_FRAME_DT);
        // Time going backwards never produces a negative step
        assert_eq!(clock.advance(4000.0), 0.0);
    }

    #[test]
    fn test_clock_frame_counted() {
        let mut clock = FrameClock::new(Timing::FrameCounted);
        assert_eq!(clock.advance(0.0), 1.0);
        assert_eq!(clock.advance(100.0), 1.0);
        assert_eq!(clock.advance(100.5), 1.0);
    }

    #[test]
    fn test_clock_fps() {
        let mut clock = FrameClock::new(Timing::DeltaTime);
        assert_eq!(clock.fps(), None);
        for i in 0..120 {
            clock.advance(i as f64 * 20.0);
        }
        let fps = clock.fps().unwrap();
        assert!((fps - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_loop_reschedules_once_per_frame() {
        let game = Rc::new(RefCell::new(Game::new(Settings::default(), 1)));
        let surface = Rc::new(RefCell::new(CountingSurface::default()));
        let scheduler = Rc::new(ManualScheduler::default());

        run_loop(game.clone(), surface.clone(), scheduler.clone());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(game.borrow().frames(), 0);

        for i in 1..=5 {
            scheduler.fire(i as f64 * 16.0);
            assert_eq!(scheduler.pending(), 1);
            assert_eq!(game.borrow().frames(), i);
        }

        let surface = surface.borrow();
        assert_eq!(surface.circles, 5);
        assert_eq!(surface.rects, 15);
        assert_eq!(surface.texts, 10);
    }

    #[test]
    fn test_input_applied_before_next_frame() {
        let mut game = Game::new(Settings::frame_counted(), 1);
        let mut surface = CountingSurface::default();
        let start = game.state.paddle_two.pos.y;

        assert!(game.handle_key(&KeyEvent::press("k")));
        game.frame(0.0, &mut surface);
        assert_eq!(game.state.paddle_two.pos.y, start + 5.0);

        assert!(game.handle_key(&KeyEvent::release("k")));
        game.frame(16.0, &mut surface);
        assert_eq!(game.state.paddle_two.pos.y, start + 5.0);

        assert!(!game.handle_key(&KeyEvent::press("Enter")));
    }

    #[test]
    fn test_run_frames_scores() {
        let mut game = Game::new(Settings::frame_counted(), 1);
        let mut surface = CountingSurface::default();
        // Ball starts behind paddle one's face, level with the paddle
        game.state.ball.pos = Vec2::new(8.0, 376.0);
        game.state.ball.dir_x = Direction::Negative;

        let events = run_frames(&mut game, &mut surface, (0..2).map(|i| i as f64 * 16.0));

        assert!(events.contains(&GameEvent::PointScored(crate::sim::Player::Two)));
        assert_eq!(game.state.score.player_two, 1);
        assert_eq!(game.frames(), 2);
    }
}

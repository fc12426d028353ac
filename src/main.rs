//! Canvas Pong entry point
//!
//! Handles platform-specific initialization and starts the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }

    if let Err(e) = canvas_pong::platform::web::run() {
        log::error!("Canvas Pong failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_pong::Settings;
    use canvas_pong::platform::{Game, run_frames};

    env_logger::init();
    log::info!("Canvas Pong (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let settings = Settings::load();
    let mut game = Game::new(settings, seed);
    let mut surface = headless::NullSurface;

    // One minute of play at 60 Hz with nobody at the keys
    let timestamps = (0..3600).map(|i| i as f64 * 1000.0 / 60.0);
    let events = run_frames(&mut game, &mut surface, timestamps);

    println!(
        "Seed {}: {} frames, {} events, score {} - {}",
        seed,
        game.frames(),
        events.len(),
        game.state.score.player_one,
        game.state.score.player_two
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use canvas_pong::renderer::DrawSurface;
    use glam::Vec2;

    /// Discards every draw call
    pub struct NullSurface;

    impl DrawSurface for NullSurface {
        fn fill_rect(&mut self, _pos: Vec2, _size: Vec2, _color: &str) {}
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str) {}
        fn fill_text(&mut self, _text: &str, _pos: Vec2, _font: &str, _color: &str) {}
    }
}

//! Browser glue: canvas creation, keyboard listeners and
//! `requestAnimationFrame` scheduling

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

use super::{FrameCallback, FrameScheduler, Game, run_loop};
use crate::Settings;
use crate::error::PlatformError;
use crate::renderer::CanvasSurface;
use crate::sim::{KeyEvent, KeyEventKind};

/// Schedules frames with `window.requestAnimationFrame`
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        let closure = Closure::once(move |time: f64| callback(time));
        if let Err(e) = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }
}

/// Create the game canvas and attach it to the page body
fn create_canvas(document: &Document, settings: &Settings) -> Result<HtmlCanvasElement, PlatformError> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| PlatformError::js("createElement", e))?
        .dyn_into()
        .map_err(|e| PlatformError::js("canvas cast", e.into()))?;

    canvas.set_id("canvas");
    canvas.set_width(settings.canvas_width as u32);
    canvas.set_height(settings.canvas_height as u32);

    let body = document.body().ok_or(PlatformError::NoBody)?;
    body.append_child(&canvas)
        .map_err(|e| PlatformError::js("appendChild", e))?;

    Ok(canvas)
}

fn setup_input_handlers(
    window: &Window,
    document: &Document,
    game: Rc<RefCell<Game>>,
) -> Result<(), PlatformError> {
    // Key down / key up
    for (event_name, kind) in [
        ("keydown", KeyEventKind::Press),
        ("keyup", KeyEventKind::Release),
    ] {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let event = KeyEvent {
                key: event.key(),
                kind,
            };
            game.borrow_mut().handle_key(&event);
        });
        document
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .map_err(|e| PlatformError::js("addEventListener", e))?;
        closure.forget();
    }

    // Window blur: key-up events are lost while unfocused, so release everything
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().input.clear();
            log::info!("Window lost focus, keys released");
        });
        window
            .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
            .map_err(|e| PlatformError::js("addEventListener", e))?;
        closure.forget();
    }

    Ok(())
}

/// Set up the page and start the frame loop
pub fn run() -> Result<(), PlatformError> {
    log::info!("Canvas Pong starting...");

    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
    let document = window.document().ok_or(PlatformError::NoDocument)?;

    let settings = Settings::load_or_init();
    let canvas = create_canvas(&document, &settings)?;
    let surface = CanvasSurface::new(&canvas)?;

    let seed = js_sys::Date::now() as u64;
    log::info!(
        "Game initialized with seed: {} ({} timing)",
        seed,
        settings.timing.as_str()
    );
    let game = Rc::new(RefCell::new(Game::new(settings, seed)));

    setup_input_handlers(&window, &document, game.clone())?;

    let scheduler = Rc::new(AnimationFrameScheduler::new(window));
    run_loop(game, Rc::new(RefCell::new(surface)), scheduler);

    log::info!("Canvas Pong running!");
    Ok(())
}

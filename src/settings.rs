//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web build; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// How elapsed time is measured between simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Timing {
    /// Every frame advances by exactly one step; speeds are pixels/frame
    FrameCounted,
    /// Frames advance by measured wall-clock seconds; speeds are pixels/second
    #[default]
    DeltaTime,
}

impl Timing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timing::FrameCounted => "FrameCounted",
            Timing::DeltaTime => "DeltaTime",
        }
    }
}

/// Keys controlling each paddle, matched against `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub player_one_up: String,
    pub player_one_down: String,
    pub player_two_up: String,
    pub player_two_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            player_one_up: "w".to_string(),
            player_one_down: "s".to_string(),
            player_two_up: "i".to_string(),
            player_two_down: "k".to_string(),
        }
    }
}

/// CSS colour strings used by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub foreground: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#000000".to_string(),
            foreground: "#FFFFFF".to_string(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Entities ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub ball_size: f32,

    // === Motion ===
    pub timing: Timing,
    /// Paddle speed in pixels per step unit (frame or second, see `timing`)
    pub paddle_speed: f32,
    /// Ball speed in pixels per step unit (frame or second, see `timing`)
    pub ball_speed: f32,

    // === Presentation ===
    /// Draw the score counters
    pub show_score: bool,
    pub palette: Palette,

    // === Input ===
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            ball_size: BALL_SIZE,
            timing: Timing::DeltaTime,
            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_SPEED,
            show_score: true,
            palette: Palette::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Settings matching the frame-counted revision: one step per frame,
    /// per-frame speeds
    pub fn frame_counted() -> Self {
        Self {
            timing: Timing::FrameCounted,
            paddle_speed: PADDLE_SPEED_PER_FRAME,
            ball_speed: BALL_SPEED_PER_FRAME,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that every entity fits inside the playfield
    pub fn validate(&self) -> Result<(), SettingsError> {
        let dims = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::InvalidDimension { name, value });
            }
        }

        // Speeds and margin may be zero but not negative
        let non_negative = [
            ("paddle_margin", self.paddle_margin),
            ("paddle_speed", self.paddle_speed),
            ("ball_speed", self.ball_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidDimension { name, value });
            }
        }

        if self.paddle_height > self.canvas_height {
            return Err(SettingsError::DoesNotFit {
                name: "paddle_height",
                size: self.paddle_height,
                canvas: self.canvas_height,
            });
        }
        if self.ball_size > self.canvas_height {
            return Err(SettingsError::DoesNotFit {
                name: "ball_size",
                size: self.ball_size,
                canvas: self.canvas_height,
            });
        }
        // Both paddles plus their margins must leave room for the ball
        let occupied = 2.0 * (self.paddle_margin + self.paddle_width) + self.ball_size;
        if occupied > self.canvas_width {
            return Err(SettingsError::DoesNotFit {
                name: "paddles and ball",
                size: occupied,
                canvas: self.canvas_width,
            });
        }

        // A ball covering paddle width plus its own size in one step can
        // skip over a paddle without ever overlapping it
        let travel = match self.timing {
            Timing::FrameCounted => self.ball_speed,
            Timing::DeltaTime => self.ball_speed * MAX_FRAME_DT,
        };
        let limit = self.paddle_width + self.ball_size;
        if travel >= limit {
            return Err(SettingsError::TooFast { travel, limit });
        }

        let keys = [
            ("player_one_up", &self.keys.player_one_up),
            ("player_one_down", &self.keys.player_one_down),
            ("player_two_up", &self.keys.player_two_up),
            ("player_two_down", &self.keys.player_two_down),
        ];
        for (name, key) in keys {
            if key.is_empty() {
                return Err(SettingsError::EmptyBinding(name));
            }
        }

        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "canvas_pong_settings";

    /// Settings from a stored JSON string, or `None` if nothing usable is stored
    pub fn from_stored(stored: Option<&str>) -> Option<Self> {
        match Self::from_json(stored?) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                None
            }
        }
    }

    /// Settings from LocalStorage, or defaults if none are stored
    pub fn load() -> Self {
        Self::load_stored().unwrap_or_else(|| {
            log::info!("Using default settings");
            Self::default()
        })
    }

    /// Load settings, writing the defaults back only when nothing valid was
    /// stored
    pub fn load_or_init() -> Self {
        match Self::load_stored() {
            Some(settings) => settings,
            None => {
                log::info!("Using default settings");
                let settings = Self::default();
                settings.save();
                settings
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load_stored() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        let json = storage.get_item(Self::STORAGE_KEY).ok().flatten();
        let settings = Self::from_stored(json.as_deref())?;
        log::info!("Loaded settings from LocalStorage");
        Some(settings)
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Settings saved"),
                    Err(e) => log::warn!("Could not save settings: {:?}", e),
                },
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_stored() -> Option<Self> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

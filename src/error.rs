//! Error types

use thiserror::Error;

/// Errors raised while parsing or validating [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{name} must be a positive finite number, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("{name} ({size}) does not fit in the canvas ({canvas})")]
    DoesNotFit {
        name: &'static str,
        size: f32,
        canvas: f32,
    },

    #[error("ball moves {travel} px per step, must stay under {limit} to hit a paddle")]
    TooFast { travel: f32, limit: f32 },

    #[error("key binding for {0} is empty")]
    EmptyBinding(&'static str),
}

/// Errors raised while wiring the game into the host page
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("canvas 2D context is unavailable")]
    NoContext,

    #[error("{what} failed: {message}")]
    Js { what: &'static str, message: String },
}

impl PlatformError {
    /// Wrap a JS exception value with a short description of the failed call
    #[cfg(target_arch = "wasm32")]
    pub fn js(what: &'static str, value: wasm_bindgen::JsValue) -> Self {
        PlatformError::Js {
            what,
            message: format!("{value:?}"),
        }
    }
}

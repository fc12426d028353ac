//! Keyboard input state
//!
//! Key handlers write flags; the tick reads them once per frame. There is no
//! queueing: the last press or release of a key wins.

use crate::KeyBindings;

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A platform-neutral keyboard event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Value of `KeyboardEvent.key`
    pub key: String,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    pub fn press(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Press,
        }
    }

    pub fn release(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Release,
        }
    }
}

/// Held state of the four paddle keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub player_one_up: bool,
    pub player_one_down: bool,
    pub player_two_up: bool,
    pub player_two_down: bool,
}

impl InputState {
    /// Apply a key event. Returns `false` (and changes nothing) for keys that
    /// are not bound.
    pub fn handle_input(&mut self, event: &KeyEvent, keys: &KeyBindings) -> bool {
        let held = event.kind == KeyEventKind::Press;
        let key = event.key.as_str();

        let flag = if key.eq_ignore_ascii_case(&keys.player_one_up) {
            &mut self.player_one_up
        } else if key.eq_ignore_ascii_case(&keys.player_one_down) {
            &mut self.player_one_down
        } else if key.eq_ignore_ascii_case(&keys.player_two_up) {
            &mut self.player_two_up
        } else if key.eq_ignore_ascii_case(&keys.player_two_down) {
            &mut self.player_two_down
        } else {
            return false;
        };

        *flag = held;
        true
    }

    /// Release every key (e.g. when the page loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Map held keys to a signed paddle velocity. Up wins when both are held.
#[inline]
pub fn derive_velocity(up: bool, down: bool, speed: f32) -> f32 {
    if up {
        -speed
    } else if down {
        speed
    } else {
        0.0
    }
}

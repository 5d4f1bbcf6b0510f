//! Platform abstraction layer
//!
//! Maps host key names onto logical controls. The browser adapter lives in
//! `web` and only builds for wasm32.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{Control, InputSampler};

/// Map a host key name (`KeyboardEvent.key` style) to a control
///
/// WASD and the arrow keys move, space shoots. Anything else is ignored.
pub fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "w" | "W" | "ArrowUp" => Some(Control::Up),
        "s" | "S" | "ArrowDown" => Some(Control::Down),
        "a" | "A" | "ArrowLeft" => Some(Control::Left),
        "d" | "D" | "ArrowRight" => Some(Control::Right),
        " " | "Space" | "Spacebar" => Some(Control::Shoot),
        _ => None,
    }
}

/// Press the control bound to `key`, if any. Returns whether it was mapped.
pub fn key_down(input: &InputSampler, key: &str) -> bool {
    match control_for_key(key) {
        Some(control) => {
            input.press(control);
            true
        }
        None => false,
    }
}

/// Release the control bound to `key`, if any. Returns whether it was mapped.
pub fn key_up(input: &InputSampler, key: &str) -> bool {
    match control_for_key(key) {
        Some(control) => {
            input.release(control);
            true
        }
        None => false,
    }
}

//! Browser host adapter
//!
//! The page owns the canvas, the animation-frame loop and the key listeners.
//! It forwards `KeyboardEvent`s and frame timestamps here and draws from the
//! JSON snapshot.

use std::sync::Arc;

use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::consts::SIM_DT;
use crate::sim::InputSampler;
use crate::{Arena, GameMode, SessionHandle, Settings};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Hoop Arena loaded");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebArena {
    arena: Arena,
    input: Arc<InputSampler>,
    last_time: f64,
}

#[wasm_bindgen]
impl WebArena {
    /// Throws "login required" when no user id is given
    #[wasm_bindgen(constructor)]
    pub fn new(user_id: Option<String>, mode: &str) -> Result<WebArena, JsValue> {
        let mode: GameMode = mode.parse().map_err(js_err)?;
        let input = Arc::new(InputSampler::new());
        let arena = Arena::open(
            user_id.map(SessionHandle::new),
            Settings::for_mode(mode),
            Arc::clone(&input),
        )
        .map_err(js_err)?;
        Ok(Self {
            arena,
            input,
            last_time: 0.0,
        })
    }

    pub fn key_down(&self, event: &KeyboardEvent) -> bool {
        super::key_down(&self.input, &event.key())
    }

    pub fn key_up(&self, event: &KeyboardEvent) -> bool {
        super::key_up(&self.input, &event.key())
    }

    pub fn start(&mut self) -> bool {
        self.arena.start()
    }

    pub fn reset(&mut self) {
        self.arena.reset();
    }

    pub fn pause(&mut self) -> bool {
        self.arena.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.arena.resume()
    }

    /// Call from requestAnimationFrame with its timestamp (ms)
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            (time_ms - self.last_time) / 1000.0
        } else {
            SIM_DT
        };
        self.last_time = time_ms;
        self.arena.advance(dt)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.arena.snapshot()).map_err(js_err)
    }

    /// Final result as JSON, or undefined while the match is running
    pub fn result_json(&self) -> Result<Option<String>, JsValue> {
        self.arena
            .result()
            .map(|r| serde_json::to_string(&r))
            .transpose()
            .map_err(js_err)
    }

    pub fn clock_text(&self) -> String {
        self.arena.snapshot().clock.display()
    }
}

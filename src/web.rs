//! Browser bindings
//!
//! The page owns the canvas, the peer connection and the animation callback.
//! It forwards controller messages as JSON strings, calls `frame` from
//! `requestAnimationFrame`, draws from `view_json`, and sends back whatever
//! `frame` returns.

use wasm_bindgen::prelude::*;

use crate::host::Host;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Tilt Tide starting...");
}

#[wasm_bindgen]
pub struct WebHost {
    host: Host,
}

#[wasm_bindgen]
impl WebHost {
    /// `settings_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str, viewport_w: f32, viewport_h: f32, seed: f64) -> WebHost {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed settings: {}", e);
                Settings::default()
            })
        };
        let seed = settings.seed.unwrap_or(seed as u64);
        WebHost {
            host: Host::new(settings, viewport_w, viewport_h, seed),
        }
    }

    /// Peer link delivered a controller message
    pub fn receive(&self, json: &str) {
        if let Err(e) = self.host.sender().push_json(json) {
            log::warn!("Dropping malformed controller message: {}", e);
        }
    }

    /// Controller connected
    pub fn start(&mut self) {
        self.host.start();
    }

    /// Advance one frame; returns a JSON array of messages for the controller
    pub fn frame(&mut self, now_ms: f64) -> String {
        self.host.frame(now_ms);
        let outbound = self.host.take_outbound();
        serde_json::to_string(&outbound).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn resize(&mut self, viewport_w: f32, viewport_h: f32) {
        self.host.resize(viewport_w, viewport_h);
    }

    /// Render surface as JSON
    pub fn view_json(&self) -> String {
        serde_json::to_string(&self.host.state().view()).unwrap_or_default()
    }

    pub fn score(&self) -> f64 {
        self.host.state().score as f64
    }

    pub fn best_score(&self) -> f64 {
        self.host.high_scores().top_score().unwrap_or(0) as f64
    }
}

//! Browser host boundary.
//!
//! Exposes one [`Engine`] to JavaScript. The page drives it from
//! `requestAnimationFrame` and wires its Start/Stop buttons to
//! [`WebStage::start`] / [`WebStage::stop`]:
//!
//! ```js,ignore
//! const stage = new WebStage("walk", null);
//! let last = performance.now();
//! function loop(now) {
//!   const frame = JSON.parse(stage.update((now - last) / 1000));
//!   last = now;
//!   applyToThreeScene(frame);
//!   requestAnimationFrame(loop);
//! }
//! requestAnimationFrame(loop);
//! ```

use std::sync::Once;

use wasm_bindgen::prelude::*;

use crate::engine::Engine;
use crate::presets::ScenePreset;
use crate::settings::StageSettings;

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        // Fails only when the page already installed a logger.
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebStage {
    engine: Engine,
}

#[wasm_bindgen]
impl WebStage {
    /// `preset` is one of `ball`, `canvas`, `walk`, `cutscene`.
    /// `settings_json` optionally overrides the demo settings.
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str, settings_json: Option<String>) -> Result<WebStage, JsValue> {
        init_logging();

        let preset: ScenePreset = preset.parse().map_err(to_js)?;
        let settings = match settings_json {
            Some(json) => StageSettings::from_json_str(&json).map_err(to_js)?,
            None => StageSettings::default(),
        };
        let engine = Engine::from_preset(preset, &settings).map_err(to_js)?;
        Ok(Self { engine })
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Advances by `dt` seconds and returns the frame as JSON.
    pub fn update(&mut self, dt: f32) -> Result<String, JsValue> {
        let state = self.engine.update(dt);
        serde_json::to_string(&state).map_err(to_js)
    }
}

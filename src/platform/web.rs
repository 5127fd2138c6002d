//! Browser bindings
//!
//! The page owns the animation-frame and timer callbacks and forwards them
//! here; both run on the main thread so the lab is never touched
//! concurrently.

use wasm_bindgen::prelude::*;

use crate::lab::Lab;
use crate::narrator::FALLBACK_EXPLANATION;
use crate::settings::Settings;

#[wasm_bindgen]
pub struct WebLab {
    lab: Lab,
    /// Timestamp of the previous animation frame (ms)
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebLab {
    /// Create a lab from optional JSON settings
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> WebLab {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let mut settings = match settings_json.as_deref().map(Settings::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Ignoring bad settings: {e}");
                Settings::default()
            }
            None => Settings::default(),
        };
        let seed = *settings.seed.get_or_insert(js_sys::Date::now() as u64);
        let lab = Lab::new(&settings).unwrap_or_else(|e| {
            log::warn!("Falling back to default settings: {e}");
            Lab::with_seed(seed)
        });

        WebLab {
            lab,
            last_time: None,
        }
    }

    pub fn start(&mut self) {
        self.lab.start();
    }

    /// Teardown signal from the page (view closing)
    pub fn stop(&mut self) {
        self.lab.stop();
        self.last_time = None;
    }

    /// requestAnimationFrame callback; `time` in milliseconds
    pub fn frame(&mut self, time: f64) {
        let elapsed = match self.last_time {
            Some(last) => ((time - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time);
        self.lab.frame(elapsed);
    }

    #[wasm_bindgen(js_name = setDetectorDistance)]
    pub fn set_detector_distance(&mut self, cm: i32) {
        self.lab.set_detector_distance(f64::from(cm));
    }

    #[wasm_bindgen(js_name = setSourceOpen)]
    pub fn set_source_open(&mut self, open: bool) {
        self.lab.set_source_open(open);
    }

    #[wasm_bindgen(js_name = setHeatmapMode)]
    pub fn set_heatmap_mode(&mut self, heatmap: bool) {
        self.lab.set_heatmap_mode(heatmap);
    }

    pub fn reset(&mut self) {
        self.lab.reset();
    }

    /// Current snapshot as JSON
    pub fn snapshot(&mut self) -> Result<String, JsValue> {
        self.lab
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Vertex buffer for the current view (x, y, r, g, b, a per vertex)
    pub fn vertices(&mut self) -> Vec<f32> {
        let frame = self.lab.render();
        bytemuck::cast_slice(&frame.vertices).to_vec()
    }

    #[wasm_bindgen(js_name = fallbackExplanation)]
    pub fn fallback_explanation() -> String {
        FALLBACK_EXPLANATION.to_string()
    }
}

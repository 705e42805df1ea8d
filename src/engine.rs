//! Production converter backed by the JS engine bridge.

use crate::converter::{DocumentConverter, EngineError};
use crate::engine_bindings as bridge;
use crate::profiles::DeviceProfile;
use crate::settings::ConversionSettings;
use wasm_bindgen::{JsCast, JsValue};

/// [`DocumentConverter`] that forwards every capability to the engine
/// build loaded by the host page.
#[derive(Default)]
pub struct BridgeConverter;

impl BridgeConverter {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentConverter for BridgeConverter {
    fn start(&mut self) -> Result<(), EngineError> {
        bridge::engine_start().map_err(|e| engine_error("engine start", &e))
    }

    fn shutdown(&mut self) {
        bridge::engine_shutdown();
    }

    fn ocr_available(&self) -> bool {
        bridge::engine_ocr_available()
    }

    fn apply_profile(&mut self, profile: &DeviceProfile) -> Result<(), EngineError> {
        let json = serde_json::to_string(profile)
            .map_err(|e| EngineError::new(format!("profile encode: {e}")))?;
        bridge::engine_apply_profile(&json).map_err(|e| engine_error("apply profile", &e))
    }

    fn page_count(&mut self, path: &str) -> Result<u32, EngineError> {
        bridge::engine_page_count(path).map_err(|e| engine_error("page count", &e))
    }

    fn convert(
        &mut self,
        input_path: &str,
        settings: &ConversionSettings,
    ) -> Result<(), EngineError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| EngineError::new(format!("settings encode: {e}")))?;
        bridge::engine_convert(input_path, &json).map_err(|e| engine_error("convert", &e))
    }
}

fn engine_error(context: &str, err: &JsValue) -> EngineError {
    EngineError::new(format!("{context}: {}", error_text(err)))
}

/// Best-effort message extraction from a thrown JS value.
fn error_text(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{err:?}")
}

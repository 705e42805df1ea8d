//! JavaScript bindings for the reflow engine bridge.
//!
//! The engine build itself is loaded by the host page and registered with
//! `reflow_bridge.js`; this module declares the calls the session facade
//! makes into it. The `fs` pair moves bytes in and out of the engine's
//! virtual filesystem so conversions have something to read and the host
//! can collect results.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/reflow_bridge.js")]
extern "C" {
    /// Bring the engine up. Throws if the engine failed to start.
    #[wasm_bindgen(catch, js_name = engineStart)]
    pub fn engine_start() -> Result<(), JsValue>;

    /// Release engine resources. Never throws.
    #[wasm_bindgen(js_name = engineShutdown)]
    pub fn engine_shutdown();

    /// Identifying string for the engine build. Works without start.
    #[wasm_bindgen(js_name = engineVersion)]
    pub fn engine_version() -> String;

    /// Whether the engine build carries OCR support.
    #[wasm_bindgen(js_name = engineOcrAvailable)]
    pub fn engine_ocr_available() -> bool;

    /// Apply a device profile (JSON-encoded) to the engine's settings.
    #[wasm_bindgen(catch, js_name = engineApplyProfile)]
    pub fn engine_apply_profile(profile_json: &str) -> Result<(), JsValue>;

    /// Page count of the document at `path` in the virtual filesystem.
    #[wasm_bindgen(catch, js_name = enginePageCount)]
    pub fn engine_page_count(path: &str) -> Result<u32, JsValue>;

    /// Convert one document with a JSON-encoded settings snapshot.
    #[wasm_bindgen(catch, js_name = engineConvert)]
    pub fn engine_convert(input_path: &str, settings_json: &str) -> Result<(), JsValue>;

    /// Write bytes into the engine's virtual filesystem.
    #[wasm_bindgen(catch, js_name = fsWrite)]
    pub fn fs_write(path: &str, bytes: &[u8]) -> Result<(), JsValue>;

    /// Read a file back out of the engine's virtual filesystem.
    #[wasm_bindgen(catch, js_name = fsRead)]
    pub fn fs_read(path: &str) -> Result<Vec<u8>, JsValue>;
}

//! JS-facing session surface.
//!
//! Exposes one [`ReflowSession`] object plus two free queries. Setters and
//! actions throw a JavaScript `Error` carrying a string `code` property on
//! failure; `getPageCount` keeps the legacy integer contract where a
//! negative return means failure.
//!
//! ```javascript
//! import init, { ReflowSession, version, listProfiles } from 'pdf-reflow-wasm';
//!
//! await init();
//! console.log(version());
//!
//! const session = new ReflowSession();
//! session.init();
//! session.stageDocument("in.pdf", bytes);
//! session.setDeviceProfile("kindle");
//! session.setQuality(2);
//! session.processFile("in.pdf", "out.pdf");
//! const converted = session.retrieveOutput("out.pdf");
//! session.cleanup();
//! ```

use crate::engine::BridgeConverter;
use crate::engine_bindings as bridge;
use crate::error::SessionError;
use crate::profiles;
use crate::session::Session;
use base64::Engine as _;
use wasm_bindgen::prelude::*;

/// Session handle over the reflow engine.
///
/// Single-caller: all operations are synchronous and block until the
/// engine returns. Conversions of large documents can take a while; there
/// is no progress callback or cancellation at this boundary.
#[wasm_bindgen]
pub struct ReflowSession {
    inner: Session<BridgeConverter>,
    staged: Vec<String>,
}

#[wasm_bindgen]
impl ReflowSession {
    /// Create an uninitialized session. Call `init()` before anything
    /// else.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Session::new(BridgeConverter::new()),
            staged: Vec::new(),
        }
    }

    /// Start the engine. Idempotent; a repeat call on a live session
    /// succeeds without side effects. A first (or fresh after `cleanup`)
    /// init resets settings to defaults and forgets staged documents.
    pub fn init(&mut self) -> Result<(), JsValue> {
        let first = !self.inner.is_initialized();
        self.inner.init()?;
        if first {
            self.staged.clear();
        }
        Ok(())
    }

    /// Shut the engine down. Idempotent and safe before `init`.
    pub fn cleanup(&mut self) {
        self.inner.cleanup();
    }

    #[wasm_bindgen(js_name = isInitialized)]
    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    /// Whether this engine build can run OCR. Meaningful after `init`.
    #[wasm_bindgen(js_name = ocrAvailable)]
    pub fn ocr_available(&self) -> bool {
        self.inner.ocr_available()
    }

    /// Apply a named device profile, e.g. "kindle", "kv", "dx".
    #[wasm_bindgen(js_name = setDeviceProfile)]
    pub fn set_device_profile(&mut self, name: &str) -> Result<(), JsValue> {
        Ok(self.inner.set_device_profile(name)?)
    }

    /// Set the output width in pixels (must be positive).
    #[wasm_bindgen(js_name = setOutputWidth)]
    pub fn set_output_width(&mut self, px: i32) -> Result<(), JsValue> {
        Ok(self.inner.set_output_width(px)?)
    }

    /// Set the output height in pixels (must be positive).
    #[wasm_bindgen(js_name = setOutputHeight)]
    pub fn set_output_height(&mut self, px: i32) -> Result<(), JsValue> {
        Ok(self.inner.set_output_height(px)?)
    }

    /// Margin control is not exposed by the engine. Always throws
    /// `CAPABILITY_UNAVAILABLE`.
    #[wasm_bindgen(js_name = setMargins)]
    pub fn set_margins(
        &mut self,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    ) -> Result<(), JsValue> {
        Ok(self.inner.set_margins(left, top, right, bottom)?)
    }

    /// Set the quality tier: 1 (smallest), 2, or 3 (best).
    #[wasm_bindgen(js_name = setQuality)]
    pub fn set_quality(&mut self, tier: i32) -> Result<(), JsValue> {
        Ok(self.inner.set_quality(tier)?)
    }

    /// Toggle OCR. Throws `CAPABILITY_UNAVAILABLE` if the engine build
    /// has no OCR support.
    #[wasm_bindgen(js_name = setOcrEnabled)]
    pub fn set_ocr_enabled(&mut self, enabled: bool) -> Result<(), JsValue> {
        Ok(self.inner.set_ocr_enabled(enabled)?)
    }

    /// Set the page range to process, e.g. "1-10,15-20". Stored verbatim
    /// up to the buffer cap; no syntax validation here.
    #[wasm_bindgen(js_name = setPageRange)]
    pub fn set_page_range(&mut self, spec: &str) -> Result<(), JsValue> {
        Ok(self.inner.set_page_range(spec)?)
    }

    /// Convert one document with the current settings. Blocks until the
    /// engine finishes; throws on engine failure.
    #[wasm_bindgen(js_name = processFile)]
    pub fn process_file(&mut self, input_path: &str, output_path: &str) -> Result<(), JsValue> {
        Ok(self.inner.process_file(input_path, output_path)?)
    }

    /// Number of pages in the document at `path`, or a negative value on
    /// failure (missing, unreadable or corrupt file, or no session).
    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&mut self, path: &str) -> i32 {
        match self.inner.get_page_count(path) {
            Ok(n) => n.min(i32::MAX as u32) as i32,
            Err(err) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "page count failed: {err}"
                )));
                -1
            }
        }
    }

    /// Current settings snapshot as a plain object, for diagnostics.
    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.settings())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Write a document into the engine's virtual filesystem so
    /// `processFile` and `getPageCount` can read it.
    #[wasm_bindgen(js_name = stageDocument)]
    pub fn stage_document(&mut self, path: &str, bytes: &[u8]) -> Result<(), JsValue> {
        if !self.inner.is_initialized() {
            return Err(SessionError::NotInitialized.into());
        }
        if path.is_empty() {
            return Err(SessionError::invalid("stage path is empty").into());
        }
        bridge::fs_write(path, bytes)?;
        if !self.staged.iter().any(|p| p == path) {
            self.staged.push(path.to_string());
        }
        Ok(())
    }

    /// `stageDocument` for hosts that carry the bytes as base64 text.
    #[wasm_bindgen(js_name = stageDocumentBase64)]
    pub fn stage_document_base64(&mut self, path: &str, base64_bytes: &str) -> Result<(), JsValue> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(base64_bytes)
            .map_err(|e| SessionError::invalid(format!("base64 decode failed: {e}")))?;
        self.stage_document(path, &bytes)
    }

    /// Paths staged since the session came up.
    #[wasm_bindgen(js_name = stagedDocuments)]
    pub fn staged_documents(&self) -> Vec<String> {
        self.staged.clone()
    }

    /// Read a converted document back out of the virtual filesystem.
    #[wasm_bindgen(js_name = retrieveOutput)]
    pub fn retrieve_output(&self, path: &str) -> Result<Vec<u8>, JsValue> {
        if !self.inner.is_initialized() {
            return Err(SessionError::NotInitialized.into());
        }
        bridge::fs_read(path)
    }
}

impl Default for ReflowSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifying string for the underlying engine build. Needs no session.
#[wasm_bindgen]
pub fn version() -> String {
    bridge::engine_version()
}

/// The built-in device profiles as an array of plain objects, so a host
/// UI can populate a device picker.
#[wasm_bindgen(js_name = listProfiles)]
pub fn list_profiles() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(profiles::all()).map_err(|e| JsValue::from_str(&e.to_string()))
}

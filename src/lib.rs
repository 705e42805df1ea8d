//! Browser bindings for a PDF reflow engine.
//!
//! This crate is glue, not an engine: it validates arguments, keeps one
//! settings record per session, and delegates the actual document work
//! (parsing, reflow, rasterization, OCR) to an engine build loaded by the
//! host page through `reflow_bridge.js`.
//!
//! The core session logic is plain Rust behind the [`DocumentConverter`]
//! trait and runs in host-side unit tests; only the outermost layer talks
//! to JavaScript.
//!
//! ```javascript
//! import init, { ReflowSession, version } from 'pdf-reflow-wasm';
//!
//! await init();
//! const session = new ReflowSession();
//! session.init();
//! session.setDeviceProfile("kindle");
//! session.setQuality(2);
//! session.processFile("in.pdf", "out.pdf");
//! session.cleanup();
//! ```

mod bindings;
mod converter;
mod engine;
mod engine_bindings;
mod error;
mod profiles;
mod session;
mod settings;

pub use bindings::{list_profiles, version, ReflowSession};
pub use converter::{DocumentConverter, EngineError};
pub use engine::BridgeConverter;
pub use error::SessionError;
pub use profiles::{lookup as lookup_profile, DeviceProfile, PROFILES};
pub use session::Session;
pub use settings::{
    ConversionSettings, QualityTier, OUTPUT_PATH_MAX_BYTES, PAGE_RANGE_MAX_BYTES,
};

use wasm_bindgen::prelude::*;

/// Module start: install the panic hook for readable browser stack traces
/// and, when the feature is enabled, route `log` output to the console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Debug).ok();
    }
}

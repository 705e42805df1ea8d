//! WebAssembly integration tests.
//!
//! These run in a headless browser with wasm-bindgen-test:
//! `wasm-pack test --headless --chrome`
//!
//! Only bridge-free paths are exercised here; anything that starts the
//! engine needs a real engine registered with reflow_bridge.js first.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_create_session() {
    let session = pdf_reflow_wasm::ReflowSession::new();
    assert!(!session.is_initialized());
}

#[wasm_bindgen_test]
fn test_settings_snapshot_before_init() {
    let session = pdf_reflow_wasm::ReflowSession::new();
    let snapshot = session.settings_json().expect("snapshot");
    assert!(snapshot.is_object());
}

#[wasm_bindgen_test]
fn test_list_profiles() {
    let profiles = pdf_reflow_wasm::list_profiles().expect("profiles");
    let array = js_sys::Array::from(&profiles);
    assert!(array.length() > 0);
}

//! Error types for the session facade.
//!
//! Every failure is detected synchronously at the call that caused it and
//! returned to the caller. There is no retry logic and no "last error"
//! state to query after the fact.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation was attempted before `init` or after `cleanup`.
    #[error("session is not initialized")]
    NotInitialized,
    /// Empty path, non-positive dimension, out-of-range tier, or an
    /// unknown device profile name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The requested feature is not available in this engine build.
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(&'static str),
    /// The engine reported a failure for a delegated operation.
    #[error("engine failure: {0}")]
    Delegate(String),
}

impl SessionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn delegate(err: impl std::fmt::Display) -> Self {
        Self::Delegate(err.to_string())
    }

    /// Machine-readable code attached to the JavaScript error object.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::CapabilityUnavailable(_) => "CAPABILITY_UNAVAILABLE",
            Self::Delegate(_) => "DELEGATE_FAILURE",
        }
    }
}

impl From<SessionError> for JsValue {
    fn from(err: SessionError) -> Self {
        let js_error = js_sys::Error::new(&err.to_string());
        js_sys::Reflect::set(&js_error, &"code".into(), &JsValue::from_str(err.code())).ok();
        js_error.into()
    }
}

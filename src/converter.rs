//! Capability surface consumed from the reflow engine.
//!
//! The engine that actually parses, reflows and rasterizes documents is an
//! external collaborator. The session facade only talks to it through this
//! trait, so the core stays testable on the host target and the engine
//! build can be swapped without touching session logic.

use crate::profiles::DeviceProfile;
use crate::settings::ConversionSettings;
use thiserror::Error;

/// Failure reported by the engine for a delegated operation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EngineError(String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The operations the session facade delegates to the engine.
///
/// Conversions and page-count queries may block for a long time on large
/// documents; there is no progress reporting or cancellation at this
/// boundary.
pub trait DocumentConverter {
    /// Bring the engine up. Called once per session `init`.
    fn start(&mut self) -> Result<(), EngineError>;

    /// Release engine resources. Called once per session `cleanup`.
    fn shutdown(&mut self);

    /// Whether this engine build carries OCR support. Queried at `init`.
    fn ocr_available(&self) -> bool;

    /// Push a device profile's derived layout parameters into the engine.
    /// The engine owns those parameters; the facade only remembers the
    /// profile name.
    fn apply_profile(&mut self, profile: &DeviceProfile) -> Result<(), EngineError>;

    /// Number of pages in the document at `path`. Re-reads on every call.
    fn page_count(&mut self, path: &str) -> Result<u32, EngineError>;

    /// Convert one document using the given settings snapshot. The output
    /// location comes from `settings.output_path_template`.
    fn convert(&mut self, input_path: &str, settings: &ConversionSettings)
    -> Result<(), EngineError>;
}

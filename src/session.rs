//! Session state and the operation contract of the facade.
//!
//! A [`Session`] owns one converter and one settings record. The lifecycle
//! is `init` once, any number of setter and conversion calls, `cleanup`
//! once. Everything is synchronous and single-caller; the type takes
//! `&mut self` for every mutation, so concurrent misuse is a compile error
//! rather than a data race.

use crate::converter::DocumentConverter;
use crate::error::SessionError;
use crate::profiles;
use crate::settings::{ConversionSettings, QualityTier};

/// Stateful handle coordinating one engine lifecycle and its settings.
pub struct Session<C> {
    converter: C,
    settings: ConversionSettings,
    initialized: bool,
    ocr_available: bool,
}

impl<C: DocumentConverter> Session<C> {
    /// Create an uninitialized session around a converter. The engine is
    /// not started until [`init`](Self::init).
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            settings: ConversionSettings::default(),
            initialized: false,
            ocr_available: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The current settings snapshot.
    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Whether the engine build reported OCR support at `init`.
    pub fn ocr_available(&self) -> bool {
        self.ocr_available
    }

    /// Start the engine and reset settings to defaults.
    ///
    /// Idempotent: a second call on an initialized session succeeds
    /// without side effects. A failed engine start leaves the session
    /// uninitialized.
    pub fn init(&mut self) -> Result<(), SessionError> {
        if self.initialized {
            return Ok(());
        }
        self.converter.start().map_err(SessionError::delegate)?;
        self.settings = ConversionSettings::default();
        self.ocr_available = self.converter.ocr_available();
        self.initialized = true;
        log::debug!("session initialized (ocr available: {})", self.ocr_available);
        Ok(())
    }

    /// Shut the engine down and discard settings.
    ///
    /// Idempotent and safe to call on a session that was never
    /// initialized.
    pub fn cleanup(&mut self) {
        if !self.initialized {
            return;
        }
        self.converter.shutdown();
        self.settings = ConversionSettings::default();
        self.initialized = false;
        log::debug!("session closed");
    }

    fn ensure_initialized(&self) -> Result<(), SessionError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SessionError::NotInitialized)
        }
    }

    /// Apply a named device profile. The engine keeps the derived layout
    /// parameters; the session records the canonical name.
    pub fn set_device_profile(&mut self, name: &str) -> Result<(), SessionError> {
        self.ensure_initialized()?;
        let profile = profiles::lookup(name)
            .ok_or_else(|| SessionError::invalid(format!("unknown device profile '{name}'")))?;
        self.converter
            .apply_profile(profile)
            .map_err(SessionError::delegate)?;
        self.settings.device_profile = Some(profile.name.to_string());
        Ok(())
    }

    /// Set the output width in pixels. Must be positive.
    pub fn set_output_width(&mut self, px: i32) -> Result<(), SessionError> {
        self.ensure_initialized()?;
        if px <= 0 {
            return Err(SessionError::invalid(format!(
                "output width must be positive, got {px}"
            )));
        }
        self.settings.output_width_px = Some(px as u32);
        Ok(())
    }

    /// Set the output height in pixels. Must be positive. Independent of
    /// the width; no aspect ratio coupling.
    pub fn set_output_height(&mut self, px: i32) -> Result<(), SessionError> {
        self.ensure_initialized()?;
        if px <= 0 {
            return Err(SessionError::invalid(format!(
                "output height must be positive, got {px}"
            )));
        }
        self.settings.output_height_px = Some(px as u32);
        Ok(())
    }

    /// Margin control is not exposed by the engine at this boundary.
    /// Always fails; the arguments are ignored.
    pub fn set_margins(
        &mut self,
        _left: f64,
        _top: f64,
        _right: f64,
        _bottom: f64,
    ) -> Result<(), SessionError> {
        self.ensure_initialized()?;
        Err(SessionError::CapabilityUnavailable("margin control"))
    }

    /// Set the 1-3 quality tier. The stored JPEG quality is always
    /// derived from the tier; there is no raw quality setter.
    pub fn set_quality(&mut self, tier: i32) -> Result<(), SessionError> {
        self.ensure_initialized()?;
        let tier = QualityTier::from_tier(tier).ok_or_else(|| {
            SessionError::invalid(format!("quality tier must be 1-3, got {tier}"))
        })?;
        self.settings.jpeg_quality = tier.jpeg_quality();
        Ok(())
    }

    /// Toggle the OCR marker. Fails if the engine build has no OCR
    /// support, regardless of the flag value.
    pub fn set_ocr_enabled(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.ensure_initialized()?;
        if !self.ocr_available {
            return Err(SessionError::CapabilityUnavailable("ocr"));
        }
        self.settings.ocr_enabled = enabled;
        Ok(())
    }

    /// Store a page range spec verbatim (bounded). No syntax validation
    /// here; the engine interprets the spec.
    pub fn set_page_range(&mut self, spec: &str) -> Result<(), SessionError> {
        self.ensure_initialized()?;
        self.settings.set_page_range(spec);
        Ok(())
    }

    /// Number of pages in the document at `path`. No caching; every call
    /// re-reads the file.
    pub fn get_page_count(&mut self, path: &str) -> Result<u32, SessionError> {
        self.ensure_initialized()?;
        if path.is_empty() {
            return Err(SessionError::invalid("document path is empty"));
        }
        self.converter.page_count(path).map_err(SessionError::delegate)
    }

    /// Convert one document with the current settings snapshot.
    ///
    /// Stores `output_path` as the output path template (bounded, like
    /// every string setting) before delegating. The engine's result is
    /// propagated; a failed conversion is a failed call.
    pub fn process_file(&mut self, input_path: &str, output_path: &str) -> Result<(), SessionError> {
        self.ensure_initialized()?;
        if input_path.is_empty() {
            return Err(SessionError::invalid("input path is empty"));
        }
        if output_path.is_empty() {
            return Err(SessionError::invalid("output path is empty"));
        }
        self.settings.set_output_path_template(output_path);
        log::info!(
            "converting {} -> {}",
            input_path,
            self.settings.output_path_template
        );
        self.converter
            .convert(input_path, &self.settings)
            .map_err(SessionError::delegate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{DocumentConverter, EngineError};
    use crate::profiles::DeviceProfile;
    use crate::settings::{OUTPUT_PATH_MAX_BYTES, PAGE_RANGE_MAX_BYTES};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockConverter {
        ocr: bool,
        fail_start: bool,
        fail_convert: bool,
        starts: u32,
        shutdowns: u32,
        applied_profiles: Vec<String>,
        conversions: Vec<(String, ConversionSettings)>,
        pages: HashMap<String, u32>,
    }

    impl DocumentConverter for MockConverter {
        fn start(&mut self) -> Result<(), EngineError> {
            if self.fail_start {
                return Err(EngineError::new("engine start failed"));
            }
            self.starts += 1;
            Ok(())
        }

        fn shutdown(&mut self) {
            self.shutdowns += 1;
        }

        fn ocr_available(&self) -> bool {
            self.ocr
        }

        fn apply_profile(&mut self, profile: &DeviceProfile) -> Result<(), EngineError> {
            self.applied_profiles.push(profile.name.to_string());
            Ok(())
        }

        fn page_count(&mut self, path: &str) -> Result<u32, EngineError> {
            self.pages
                .get(path)
                .copied()
                .ok_or_else(|| EngineError::new(format!("cannot open {path}")))
        }

        fn convert(
            &mut self,
            input_path: &str,
            settings: &ConversionSettings,
        ) -> Result<(), EngineError> {
            if self.fail_convert {
                return Err(EngineError::new("conversion failed"));
            }
            self.conversions.push((input_path.to_string(), settings.clone()));
            Ok(())
        }
    }

    fn open_session() -> Session<MockConverter> {
        let mut session = Session::new(MockConverter::default());
        session.init().unwrap();
        session
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut session = Session::new(MockConverter::default());
        session.init().unwrap();
        session.set_quality(3).unwrap();
        session.init().unwrap();
        // Second init is a no-op: engine started once, settings untouched.
        assert_eq!(session.converter.starts, 1);
        assert_eq!(session.settings().jpeg_quality, 100);
    }

    #[test]
    fn test_init_failure_leaves_session_uninitialized() {
        let mut session = Session::new(MockConverter {
            fail_start: true,
            ..Default::default()
        });
        assert!(matches!(session.init(), Err(SessionError::Delegate(_))));
        assert!(!session.is_initialized());
        assert!(matches!(
            session.set_quality(2),
            Err(SessionError::NotInitialized)
        ));
    }

    #[test]
    fn test_cleanup_is_idempotent_and_safe_before_init() {
        let mut session = Session::new(MockConverter::default());
        session.cleanup();
        assert_eq!(session.converter.shutdowns, 0);

        session.init().unwrap();
        session.cleanup();
        session.cleanup();
        assert_eq!(session.converter.shutdowns, 1);
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_reinit_restores_defaults() {
        let mut session = open_session();
        session.set_quality(3).unwrap();
        session.set_output_width(800).unwrap();
        session.set_page_range("1-5").unwrap();
        session.cleanup();
        session.init().unwrap();
        assert_eq!(*session.settings(), ConversionSettings::default());
    }

    #[test]
    fn test_quality_tier_mapping() {
        let mut session = open_session();
        for (tier, expected) in [(1, 50), (2, 75), (3, 100)] {
            session.set_quality(tier).unwrap();
            assert_eq!(session.settings().jpeg_quality, expected);
        }
    }

    #[test]
    fn test_quality_tier_out_of_range() {
        let mut session = open_session();
        for tier in [0, -1, 4, 100] {
            assert!(matches!(
                session.set_quality(tier),
                Err(SessionError::InvalidArgument(_))
            ));
        }
        // The last valid value survives a rejected call.
        session.set_quality(1).unwrap();
        session.set_quality(9).unwrap_err();
        assert_eq!(session.settings().jpeg_quality, 50);
    }

    #[test]
    fn test_output_dimensions_validated() {
        let mut session = open_session();
        assert!(matches!(
            session.set_output_width(0),
            Err(SessionError::InvalidArgument(_))
        ));
        assert!(matches!(
            session.set_output_width(-5),
            Err(SessionError::InvalidArgument(_))
        ));
        assert!(matches!(
            session.set_output_height(0),
            Err(SessionError::InvalidArgument(_))
        ));

        session.set_output_width(800).unwrap();
        session.set_output_height(1200).unwrap();
        assert_eq!(session.settings().output_width_px, Some(800));
        assert_eq!(session.settings().output_height_px, Some(1200));
    }

    #[test]
    fn test_width_reaches_converter_on_conversion() {
        let mut session = open_session();
        session.set_output_width(800).unwrap();
        session.process_file("in.pdf", "out.pdf").unwrap();
        let (_, snapshot) = &session.converter.conversions[0];
        assert_eq!(snapshot.output_width_px, Some(800));
    }

    #[test]
    fn test_setters_fail_before_init_and_after_cleanup() {
        let mut session = Session::new(MockConverter::default());
        assert!(matches!(
            session.set_output_width(800),
            Err(SessionError::NotInitialized)
        ));
        assert!(matches!(
            session.set_page_range("1-3"),
            Err(SessionError::NotInitialized)
        ));
        assert!(matches!(
            session.process_file("in.pdf", "out.pdf"),
            Err(SessionError::NotInitialized)
        ));
        assert!(matches!(
            session.get_page_count("in.pdf"),
            Err(SessionError::NotInitialized)
        ));

        session.init().unwrap();
        session.cleanup();
        assert!(matches!(
            session.set_quality(2),
            Err(SessionError::NotInitialized)
        ));
    }

    #[test]
    fn test_margins_always_fail() {
        let mut session = open_session();
        assert!(matches!(
            session.set_margins(0.5, 0.5, 0.5, 0.5),
            Err(SessionError::CapabilityUnavailable(_))
        ));
        assert!(matches!(
            session.set_margins(0.0, 0.0, 0.0, 0.0),
            Err(SessionError::CapabilityUnavailable(_))
        ));
    }

    #[test]
    fn test_ocr_requires_engine_support() {
        let mut session = open_session();
        assert!(!session.ocr_available());
        assert!(matches!(
            session.set_ocr_enabled(true),
            Err(SessionError::CapabilityUnavailable(_))
        ));
        assert!(matches!(
            session.set_ocr_enabled(false),
            Err(SessionError::CapabilityUnavailable(_))
        ));
        assert!(!session.settings().ocr_enabled);
    }

    #[test]
    fn test_ocr_toggles_with_engine_support() {
        let mut session = Session::new(MockConverter {
            ocr: true,
            ..Default::default()
        });
        session.init().unwrap();
        assert!(session.ocr_available());
        session.set_ocr_enabled(true).unwrap();
        assert!(session.settings().ocr_enabled);
        session.set_ocr_enabled(false).unwrap();
        assert!(!session.settings().ocr_enabled);
    }

    #[test]
    fn test_device_profile_applied_and_recorded() {
        let mut session = open_session();
        session.set_device_profile("kv").unwrap();
        assert_eq!(session.converter.applied_profiles, vec!["kindle-voyage"]);
        assert_eq!(
            session.settings().device_profile.as_deref(),
            Some("kindle-voyage")
        );
    }

    #[test]
    fn test_unknown_profile_leaves_settings_untouched() {
        let mut session = open_session();
        let before = session.settings().clone();
        assert!(matches!(
            session.set_device_profile("etch-a-sketch"),
            Err(SessionError::InvalidArgument(_))
        ));
        assert_eq!(*session.settings(), before);
        assert!(session.converter.applied_profiles.is_empty());
    }

    #[test]
    fn test_page_range_truncated() {
        let mut session = open_session();
        let long = "1,".repeat(2000);
        session.set_page_range(&long).unwrap();
        assert_eq!(session.settings().page_range.len(), PAGE_RANGE_MAX_BYTES);
    }

    #[test]
    fn test_output_path_truncated() {
        let mut session = open_session();
        let long = "p".repeat(400);
        session.process_file("in.pdf", &long).unwrap();
        let (_, snapshot) = &session.converter.conversions[0];
        assert_eq!(
            snapshot.output_path_template.len(),
            OUTPUT_PATH_MAX_BYTES
        );
    }

    #[test]
    fn test_page_count_delegates_and_propagates_failure() {
        let mut session = open_session();
        session.converter.pages.insert("book.pdf".to_string(), 42);
        assert_eq!(session.get_page_count("book.pdf").unwrap(), 42);
        assert!(matches!(
            session.get_page_count("missing.pdf"),
            Err(SessionError::Delegate(_))
        ));
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut session = open_session();
        assert!(matches!(
            session.get_page_count(""),
            Err(SessionError::InvalidArgument(_))
        ));
        assert!(matches!(
            session.process_file("", "out.pdf"),
            Err(SessionError::InvalidArgument(_))
        ));
        assert!(matches!(
            session.process_file("in.pdf", ""),
            Err(SessionError::InvalidArgument(_))
        ));
        assert!(session.converter.conversions.is_empty());
    }

    #[test]
    fn test_process_file_propagates_engine_failure() {
        let mut session = open_session();
        session.converter.fail_convert = true;
        assert!(matches!(
            session.process_file("in.pdf", "out.pdf"),
            Err(SessionError::Delegate(_))
        ));
    }

    #[test]
    fn test_full_conversion_scenario() {
        let mut session = open_session();
        session.set_device_profile("kindle").unwrap();
        session.set_quality(2).unwrap();
        session.process_file("in.pdf", "out.pdf").unwrap();

        let (input, snapshot) = &session.converter.conversions[0];
        assert_eq!(input, "in.pdf");
        assert_eq!(snapshot.device_profile.as_deref(), Some("kindle"));
        assert_eq!(snapshot.jpeg_quality, 75);
        assert_eq!(snapshot.output_path_template, "out.pdf");

        session.cleanup();
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_settings_mutation_after_conversion_does_not_rewrite_history() {
        let mut session = open_session();
        session.process_file("a.pdf", "a-out.pdf").unwrap();
        session.set_quality(3).unwrap();
        session.process_file("b.pdf", "b-out.pdf").unwrap();

        assert_eq!(session.converter.conversions[0].1.jpeg_quality, 75);
        assert_eq!(session.converter.conversions[1].1.jpeg_quality, 100);
    }
}

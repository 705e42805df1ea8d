//! Conversion settings and their bounded-string rules.
//!
//! This module defines the mutable settings record a session carries
//! between `init` and `cleanup`, plus the quality tier mapping and the
//! legacy string caps.
//!
//! ## Bounded strings
//!
//! The page-range and output-path fields reproduce the fixed-size buffers
//! of the engine's settings block: overflowing input is truncated at the
//! byte cap, snapped back to the nearest UTF-8 boundary, and stored
//! without error. A warning is logged so the data loss is at least
//! visible on the console.

use serde::Serialize;

/// Byte cap for the page-range buffer.
pub const PAGE_RANGE_MAX_BYTES: usize = 1023;

/// Byte cap for the output-path template buffer.
pub const OUTPUT_PATH_MAX_BYTES: usize = 255;

/// Caller-facing quality level, mapped internally to a JPEG quality value.
///
/// The engine consumes a 1-100 JPEG quality; callers only pick one of
/// three tiers. The mapping is `50 + (tier - 1) * 25`, so 50, 75 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl QualityTier {
    /// Parse the caller-facing 1-3 tier number.
    pub fn from_tier(tier: i32) -> Option<Self> {
        match tier {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// The JPEG quality value the engine consumes.
    pub fn jpeg_quality(self) -> u8 {
        50 + (self as u8 - 1) * 25
    }
}

/// Mutable settings record owned by a session.
///
/// Populated with defaults on `init`, mutated in place by the setters,
/// discarded at `cleanup`. The engine receives the current record as the
/// snapshot for each conversion.
///
/// `output_width_px` and `output_height_px` are independent; no aspect
/// ratio coupling is enforced here. `None` means the caller never
/// specified the dimension and the active device profile (or the engine
/// default) decides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionSettings {
    /// Canonical name of the last applied device profile, if any.
    pub device_profile: Option<String>,
    /// User-specified output width in pixels.
    pub output_width_px: Option<u32>,
    /// User-specified output height in pixels.
    pub output_height_px: Option<u32>,
    /// JPEG quality, always derived from the last tier set.
    pub jpeg_quality: u8,
    /// OCR marker consumed by the engine during conversion.
    pub ocr_enabled: bool,
    /// Page range spec stored verbatim, e.g. "1-10,15-20". Not validated
    /// for syntax by this layer; the engine interprets it.
    pub page_range: String,
    /// Output path template for the next conversion.
    pub output_path_template: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            device_profile: None,
            output_width_px: None,
            output_height_px: None,
            jpeg_quality: QualityTier::Medium.jpeg_quality(),
            ocr_enabled: false,
            page_range: String::new(),
            output_path_template: String::new(),
        }
    }
}

impl ConversionSettings {
    /// Store a page range spec, truncated to [`PAGE_RANGE_MAX_BYTES`].
    pub fn set_page_range(&mut self, spec: &str) {
        self.page_range = bounded(spec, PAGE_RANGE_MAX_BYTES, "page range").to_string();
    }

    /// Store the output path template, truncated to
    /// [`OUTPUT_PATH_MAX_BYTES`].
    pub fn set_output_path_template(&mut self, path: &str) {
        self.output_path_template =
            bounded(path, OUTPUT_PATH_MAX_BYTES, "output path").to_string();
    }
}

/// Truncate `s` to at most `max` bytes on a UTF-8 boundary.
fn bounded<'a>(s: &'a str, max: usize, what: &str) -> &'a str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    log::warn!("{} truncated from {} to {} bytes", what, s.len(), end);
    &s[..end]
}

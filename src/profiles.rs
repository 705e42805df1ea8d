//! Built-in device profiles.
//!
//! A profile is a named preset of output geometry for a target display.
//! Lookup is case-insensitive over canonical names and the short aliases
//! e-reader users know their devices by.

use serde::Serialize;

/// A named output geometry preset for a target display.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Usable screen width in pixels.
    pub width_px: u32,
    /// Usable screen height in pixels.
    pub height_px: u32,
    /// Display density the reflow targets.
    pub dpi: u32,
    pub color: bool,
}

/// The built-in profile table.
pub const PROFILES: &[DeviceProfile] = &[
    DeviceProfile {
        name: "kindle",
        aliases: &["k2", "kindle2"],
        width_px: 560,
        height_px: 735,
        dpi: 167,
        color: false,
    },
    DeviceProfile {
        name: "kindle-dx",
        aliases: &["dx"],
        width_px: 741,
        height_px: 1000,
        dpi: 150,
        color: false,
    },
    DeviceProfile {
        name: "kindle-paperwhite",
        aliases: &["kpw", "kp2"],
        width_px: 658,
        height_px: 889,
        dpi: 212,
        color: false,
    },
    DeviceProfile {
        name: "kindle-voyage",
        aliases: &["kv"],
        width_px: 1016,
        height_px: 1364,
        dpi: 300,
        color: false,
    },
    DeviceProfile {
        name: "kobo-touch",
        aliases: &["kbt"],
        width_px: 600,
        height_px: 730,
        dpi: 167,
        color: false,
    },
    DeviceProfile {
        name: "kobo-aura",
        aliases: &["kba"],
        width_px: 704,
        height_px: 965,
        dpi: 212,
        color: false,
    },
    DeviceProfile {
        name: "nook-simple-touch",
        aliases: &["nookst"],
        width_px: 552,
        height_px: 725,
        dpi: 167,
        color: false,
    },
    DeviceProfile {
        name: "tablet",
        aliases: &["ipad"],
        width_px: 768,
        height_px: 1024,
        dpi: 132,
        color: true,
    },
];

/// Resolve a profile by canonical name or alias, case-insensitively.
pub fn lookup(name: &str) -> Option<&'static DeviceProfile> {
    let needle = name.trim();
    if needle.is_empty() {
        return None;
    }
    PROFILES.iter().find(|p| {
        p.name.eq_ignore_ascii_case(needle)
            || p.aliases.iter().any(|a| a.eq_ignore_ascii_case(needle))
    })
}

/// All known profiles, for host UIs that populate a device picker.
pub fn all() -> &'static [DeviceProfile] {
    PROFILES
}

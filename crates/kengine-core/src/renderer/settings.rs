// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Settings describing the rendering context an application wants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A graphics API version as a major/minor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApiVersion {
    /// The major version number.
    pub major: u32,
    /// The minor version number.
    pub minor: u32,
}

impl ApiVersion {
    /// Creates a new version from its major and minor parts.
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The OpenGL profile to request at context creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContextProfile {
    /// The core profile, with deprecated functionality removed.
    #[default]
    Core,
    /// The compatibility profile, keeping the fixed-function pipeline
    /// available.
    Compatibility,
}

/// Everything the graphics backend needs to know to create a context.
///
/// Deserializes with per-field defaults, so a config file can override just
/// the settings it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    /// The minimum API version the application requires.
    pub version: ApiVersion,
    /// The profile to request.
    pub profile: ContextProfile,
    /// Whether presentation should wait for vertical sync.
    pub vsync: bool,
    /// Requested depth buffer size in bits.
    pub depth_bits: u8,
    /// Requested stencil buffer size in bits.
    pub stencil_bits: u8,
    /// Requested multisample count, or `None` for no multisampling.
    pub samples: Option<u8>,
}

impl Default for ContextSettings {
    /// OpenGL 3.3 core with a 24-bit depth buffer and vsync on.
    fn default() -> Self {
        Self {
            version: ApiVersion::new(3, 3),
            profile: ContextProfile::Core,
            vsync: true,
            depth_bits: 24,
            stencil_bits: 8,
            samples: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Version ordering must compare major before minor, and Display must
    /// print the dotted form.
    #[test]
    fn api_version_ordering_and_display() {
        assert!(ApiVersion::new(3, 3) > ApiVersion::new(2, 1));
        assert!(ApiVersion::new(4, 0) > ApiVersion::new(3, 9));
        assert_eq!(ApiVersion::new(4, 6).to_string(), "4.6");
    }

    /// The default context request is a 3.3 core profile with vsync.
    #[test]
    fn default_settings_request_core_33() {
        let settings = ContextSettings::default();
        assert_eq!(settings.version, ApiVersion::new(3, 3));
        assert_eq!(settings.profile, ContextProfile::Core);
        assert!(settings.vsync);
    }

    /// Settings must parse from the JSON shape engine config files use.
    #[test]
    fn settings_parse_from_config_json() {
        let json = r#"{
            "version": { "major": 4, "minor": 1 },
            "profile": "Compatibility",
            "vsync": false,
            "depth_bits": 16,
            "stencil_bits": 0,
            "samples": 4
        }"#;
        let settings: ContextSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.version, ApiVersion::new(4, 1));
        assert_eq!(settings.profile, ContextProfile::Compatibility);
        assert!(!settings.vsync);
        assert_eq!(settings.depth_bits, 16);
        assert_eq!(settings.samples, Some(4));
    }
}

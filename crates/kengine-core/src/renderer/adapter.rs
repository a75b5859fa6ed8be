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

//! Information about the graphics adapter a context runs on.

use std::fmt;

/// Identity strings reported by the driver for the active adapter.
///
/// These are the raw `GL_RENDERER`, `GL_VENDOR`, `GL_VERSION` and
/// `GL_SHADING_LANGUAGE_VERSION` strings; their exact format varies between
/// drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    /// The renderer string (typically the GPU model).
    pub renderer: String,
    /// The vendor string.
    pub vendor: String,
    /// The full version string, including vendor-specific suffixes.
    pub version: String,
    /// The supported shading language version string.
    pub shading_language_version: String,
}

impl fmt::Display for AdapterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - OpenGL {}, GLSL {}",
            self.renderer, self.vendor, self.version, self.shading_language_version
        )
    }
}

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

//! Startup configuration for the engine.

use anyhow::{Context, Result};
use kengine_core::math::LinearRgba;
use kengine_core::renderer::ContextSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything [`Engine::run`](crate::Engine::run) needs to know to bring up
/// a window and its graphics context.
///
/// Deserializes from JSON; any missing field falls back to its default, so a
/// config file only has to spell out what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Title of the window.
    pub window_title: String,
    /// Initial inner width of the window in physical pixels.
    pub window_width: u32,
    /// Initial inner height of the window in physical pixels.
    pub window_height: u32,
    /// Initial window position, or `None` to let the OS choose.
    pub window_position: Option<(i32, i32)>,
    /// The graphics context to request.
    pub gl: ContextSettings,
    /// Clear color applied at the start of every frame.
    pub clear_color: LinearRgba,
}

impl Default for EngineConfig {
    /// A 1024x768 window titled "K-Engine" with a default GL 3.3 core
    /// context and a black clear color.
    fn default() -> Self {
        Self {
            window_title: "K-Engine".to_string(),
            window_width: 1024,
            window_height: 768,
            window_position: None,
            gl: ContextSettings::default(),
            clear_color: LinearRgba::BLACK,
        }
    }
}

impl EngineConfig {
    /// Loads a configuration from a JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config from {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse engine config from {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kengine_core::renderer::{ApiVersion, ContextProfile};

    /// A partial JSON document keeps defaults for everything it omits.
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "window_title": "Configured", "window_width": 640 }"#)
                .expect("partial config should deserialize");

        assert_eq!(config.window_title, "Configured");
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 768, "omitted field keeps default");
        assert_eq!(config.gl.version, ApiVersion::new(3, 3));
        assert_eq!(config.gl.profile, ContextProfile::Core);
    }

    /// The full config survives a serialize/deserialize round trip.
    #[test]
    fn config_round_trips_through_json() {
        let mut config = EngineConfig::default();
        config.window_title = "Round Trip".to_string();
        config.window_position = Some((64, 32));
        config.gl.vsync = false;

        let text = serde_json::to_string(&config).expect("config should serialize");
        let back: EngineConfig = serde_json::from_str(&text).expect("config should deserialize");
        assert_eq!(back, config);
    }

    /// A missing file is an error, not a silent default.
    #[test]
    fn load_from_missing_path_fails() {
        let result = EngineConfig::load_from_path("/nonexistent/kengine-config.json");
        assert!(result.is_err());
    }
}

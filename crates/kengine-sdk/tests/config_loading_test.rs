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

use anyhow::Result;
use kengine_core::renderer::{ApiVersion, ContextProfile};
use kengine_sdk::EngineConfig;
use tempfile::tempdir;

#[test]
fn test_load_config_from_json_file() -> Result<()> {
    // --- 1. Setup: write a REAL config file on disk ---
    let dir = tempdir()?;
    let config_path = dir.path().join("engine.json");
    std::fs::write(
        &config_path,
        r#"{
            "window_title": "Configured Game",
            "window_width": 1920,
            "window_height": 1080,
            "window_position": [32, 64],
            "gl": {
                "version": { "major": 4, "minor": 1 },
                "profile": "Compatibility",
                "vsync": false
            },
            "clear_color": { "r": 0.1, "g": 0.2, "b": 0.3, "a": 1.0 }
        }"#,
    )?;

    // --- 2. Load it through the public API ---
    let config = EngineConfig::load_from_path(&config_path)?;

    // --- 3. Assert: explicit fields are taken, omitted ones keep defaults ---
    assert_eq!(config.window_title, "Configured Game");
    assert_eq!(config.window_width, 1920);
    assert_eq!(config.window_height, 1080);
    assert_eq!(config.window_position, Some((32, 64)));
    assert_eq!(config.gl.version, ApiVersion::new(4, 1));
    assert_eq!(config.gl.profile, ContextProfile::Compatibility);
    assert!(!config.gl.vsync);
    assert_eq!(
        config.gl.depth_bits, 24,
        "GL fields omitted from the file keep their defaults"
    );
    assert_eq!(config.clear_color.g, 0.2);

    Ok(())
}

#[test]
fn test_unparsable_config_error_names_the_file() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("broken.json");
    std::fs::write(&config_path, "{ this is not json")?;

    let err = EngineConfig::load_from_path(&config_path).unwrap_err();
    assert!(
        format!("{err:#}").contains("broken.json"),
        "error should name the offending file, got: {err:#}"
    );
    Ok(())
}

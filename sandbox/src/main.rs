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

// K-Engine Sandbox
// Main binary for testing and demos

use anyhow::Result;
use kengine_sdk::prelude::*;
use std::f32::consts::TAU;
use std::path::PathBuf;
use std::time::Duration;

const VERTEX_SHADER: &str = include_str!("../shaders/spin.vert");
const FRAGMENT_SHADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/spin.frag");

/// Spin speed in radians per second.
const SPIN_SPEED: f32 = 1.2;

/// A colored quad spinning around the view axis. Escape quits.
struct SandboxApp {
    program: Option<GlslProgram>,
    quad: Option<MeshNode>,
    angle: f32,
    escape_pressed: bool,
}

impl SandboxApp {
    fn new() -> Self {
        Self {
            program: None,
            quad: None,
            angle: 0.0,
            escape_pressed: false,
        }
    }
}

/// Where the linked program binary is cached between runs.
fn program_cache_path() -> PathBuf {
    std::env::temp_dir().join("kengine-sandbox-spin.kepb")
}

/// A quad with one RGBA color per corner, matching the six-vertex triangle
/// list the quad generator emits.
fn build_quad_mesh() -> Mesh {
    let mut mesh = primitives::quad(1.2);
    #[rustfmt::skip]
    let colors = vec![
        1.0, 0.2, 0.2, 1.0,
        0.2, 1.0, 0.2, 1.0,
        0.2, 0.2, 1.0, 1.0,
        1.0, 0.2, 0.2, 1.0,
        0.2, 0.2, 1.0, 1.0,
        1.0, 1.0, 0.2, 1.0,
    ];
    let attribute = VertexAttribute::new(colors, 4).expect("color data is statically valid");
    mesh.insert_attribute(1, attribute)
        .expect("location 1 is free and the counts match");
    mesh
}

impl Application for SandboxApp {
    fn on_window_ready(&mut self, ctx: &mut EngineContext<'_>) {
        log::info!("SandboxApp: Initializing GPU resources...");

        let gl = ctx
            .render_system
            .as_any_mut()
            .downcast_mut::<GlRenderSystem>()
            .expect("the sandbox drives the OpenGL backend");

        // Try the cached program binary first; fall back to compiling the
        // GLSL sources and refresh the cache for the next run.
        let cache_path = program_cache_path();
        let program = match gl.load_program_binary("spin", &cache_path) {
            Ok(program) => {
                log::info!(
                    "SandboxApp: restored program binary from {}",
                    cache_path.display()
                );
                program
            }
            Err(e) => {
                log::debug!("SandboxApp: program binary cache unavailable ({e}).");
                let stages = [
                    ShaderStageDescriptor::from_text(ShaderStage::Vertex, VERTEX_SHADER)
                        .with_label("spin.vert"),
                    ShaderStageDescriptor::from_path(ShaderStage::Fragment, FRAGMENT_SHADER_PATH),
                ];
                let program = gl
                    .create_program("spin", &stages)
                    .expect("Failed to build the spin shader program");
                if let Err(e) = program.save_binary(&cache_path) {
                    log::debug!("SandboxApp: could not cache the program binary: {e}");
                }
                program
            }
        };

        let mut mesh = build_quad_mesh();
        let quad = gl
            .upload_mesh(&mut mesh)
            .expect("Failed to upload the quad mesh");

        self.program = Some(program);
        self.quad = Some(quad);
    }

    fn update(&mut self, ctx: &mut EngineContext<'_>, frame_time: Duration) {
        if self.escape_pressed {
            ctx.control.stop();
            return;
        }

        self.angle = (self.angle + SPIN_SPEED * frame_time.as_secs_f32()) % TAU;

        let (Some(program), Some(quad)) = (self.program.as_ref(), self.quad.as_ref()) else {
            return;
        };
        let gl = ctx
            .render_system
            .as_any_mut()
            .downcast_mut::<GlRenderSystem>()
            .expect("the sandbox drives the OpenGL backend");

        program.bind();
        let transform = Mat4::from_rotation_z(self.angle);
        program.set_uniform_mat4("u_transform", &transform);
        if let Err(e) = gl.draw(quad) {
            log::error!("SandboxApp: draw failed: {e}");
        }
    }

    fn on_keyboard(&mut self, key: &str, pressed: bool) {
        if pressed && key == "Escape" {
            log::info!("SandboxApp: escape pressed, requesting shutdown.");
            self.escape_pressed = true;
        }
    }

    fn on_finish(&mut self) {
        log::info!("SandboxApp: finished.");
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = EngineConfig {
        window_title: "K-Engine Sandbox".to_string(),
        window_width: 1280,
        window_height: 720,
        clear_color: LinearRgba::new(0.06, 0.06, 0.08, 1.0),
        ..EngineConfig::default()
    };

    Engine::run(SandboxApp::new(), config)?;
    Ok(())
}

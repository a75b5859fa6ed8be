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

//! The concrete, OpenGL-based implementation of the `RenderSystem` trait.

use super::context::GlGraphicsContext;
use super::mesh_node::MeshNode;
use super::program::GlslProgram;
use glow::HasContext;
use kengine_core::math::LinearRgba;
use kengine_core::platform::window::EngineWindow;
use kengine_core::renderer::{
    AdapterInfo, ApiVersion, ContextSettings, Mesh, RenderContext, RenderError, RenderStats,
    RenderSystem, ShaderStageDescriptor,
};
use kengine_core::Stopwatch;
use std::fmt;
use std::path::Path;

/// The concrete, OpenGL-based implementation of the [`RenderSystem`] trait.
///
/// Owns the GL context and drives the per-frame clear/draw/swap cycle. It is
/// also the factory for GPU resources ([`GlslProgram`], [`MeshNode`]), which
/// keeps the loaded function table an implementation detail of this module.
///
/// GL contexts are bound to the thread that made them current, so this type
/// must stay on the thread it was initialized on.
pub struct GlRenderSystem {
    context: Option<GlGraphicsContext>,
    adapter_info: Option<AdapterInfo>,
    current_width: u32,
    current_height: u32,
    frame_count: u64,
    frame_timer: Stopwatch,
    draw_calls: u32,
    triangles: u32,
    last_frame_stats: RenderStats,
}

impl fmt::Debug for GlRenderSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlRenderSystem")
            .field("context", &self.context)
            .field("adapter_info", &self.adapter_info)
            .field("current_width", &self.current_width)
            .field("current_height", &self.current_height)
            .field("frame_count", &self.frame_count)
            .field("last_frame_stats", &self.last_frame_stats)
            .finish()
    }
}

impl Default for GlRenderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GlRenderSystem {
    /// Creates a new, uninitialized `GlRenderSystem`.
    ///
    /// The system is not usable until [`RenderSystem::init`] is called.
    pub fn new() -> Self {
        log::info!("GlRenderSystem created (uninitialized).");
        Self {
            context: None,
            adapter_info: None,
            current_width: 0,
            current_height: 0,
            frame_count: 0,
            frame_timer: Stopwatch::new(),
            draw_calls: 0,
            triangles: 0,
            last_frame_stats: RenderStats::default(),
        }
    }

    /// Compiles and links a shader program for use with this system.
    pub fn create_program(
        &self,
        label: impl Into<String>,
        stages: &[ShaderStageDescriptor],
    ) -> Result<GlslProgram, RenderError> {
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        GlslProgram::new(context.gl().clone(), context.binary_api(), label, stages)
            .map_err(RenderError::from)
    }

    /// Restores a shader program from a binary file written by
    /// [`GlslProgram::save_binary`].
    pub fn load_program_binary(
        &self,
        label: impl Into<String>,
        path: &Path,
    ) -> Result<GlslProgram, RenderError> {
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        GlslProgram::from_binary_file(context.gl().clone(), context.binary_api(), label, path)
            .map_err(RenderError::from)
    }

    /// Uploads a mesh to the GPU.
    pub fn upload_mesh(&self, mesh: &mut Mesh) -> Result<MeshNode, RenderError> {
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        MeshNode::from_mesh(context.gl().clone(), mesh)
    }

    /// Draws an uploaded mesh with the currently bound program and counts it
    /// into this frame's statistics.
    pub fn draw(&mut self, node: &MeshNode) -> Result<(), RenderError> {
        if self.context.is_none() {
            return Err(RenderError::NotInitialized);
        }
        node.draw();
        self.draw_calls += 1;
        self.triangles += node.triangle_count() as u32;
        Ok(())
    }
}

impl RenderSystem for GlRenderSystem {
    fn init(
        &mut self,
        window: &dyn EngineWindow,
        settings: &ContextSettings,
    ) -> Result<(), RenderError> {
        if self.context.is_some() {
            return Err(RenderError::Internal(
                "GlRenderSystem is already initialized.".to_string(),
            ));
        }
        log::info!("GlRenderSystem: Initializing...");

        let context = GlGraphicsContext::new(window, settings)?;
        let adapter_info = context.adapter_info();
        log::info!("GlRenderSystem: using {adapter_info}");

        let (width, height) = window.inner_size();
        self.current_width = width;
        self.current_height = height;

        unsafe {
            let gl = context.gl();
            gl.viewport(0, 0, width as i32, height as i32);
            gl.enable(glow::DEPTH_TEST);
        }

        self.adapter_info = Some(adapter_info);
        self.context = Some(context);
        Ok(())
    }

    fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            log::warn!(
                "GlRenderSystem::resize called with zero size ({new_width}, {new_height}). Ignoring."
            );
            return;
        }
        let Some(context) = &self.context else {
            log::warn!("GlRenderSystem::resize called before init. Ignoring.");
            return;
        };
        log::debug!("GlRenderSystem: resize to W:{new_width}, H:{new_height}");
        self.current_width = new_width;
        self.current_height = new_height;
        context.resize_surface(new_width, new_height);
        unsafe {
            context
                .gl()
                .viewport(0, 0, new_width as i32, new_height as i32)
        };
    }

    fn begin_frame(&mut self, clear_color: LinearRgba) -> Result<(), RenderError> {
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        if !context.is_current() {
            context.make_current()?;
        }

        self.frame_timer.restart();
        self.draw_calls = 0;
        self.triangles = 0;

        unsafe {
            let gl = context.gl();
            gl.clear_color(clear_color.r, clear_color.g, clear_color.b, clear_color.a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        context.swap_buffers()?;

        self.frame_count += 1;
        self.last_frame_stats = RenderStats {
            frame_number: self.frame_count,
            cpu_frame_time_ms: self.frame_timer.elapsed_us().unwrap_or(0) as f32 / 1000.0,
            draw_calls: self.draw_calls,
            triangles_rendered: self.triangles,
        };
        Ok(())
    }

    fn get_last_frame_stats(&self) -> &RenderStats {
        &self.last_frame_stats
    }

    fn supports_feature(&self, feature_name: &str) -> bool {
        self.context
            .as_ref()
            .is_some_and(|c| c.gl().supported_extensions().contains(feature_name))
    }

    fn get_adapter_info(&self) -> Option<AdapterInfo> {
        self.adapter_info.clone()
    }

    fn get_api_version(&self) -> Option<ApiVersion> {
        self.context.as_ref().map(|c| c.api_version())
    }

    fn shutdown(&mut self) {
        log::info!("GlRenderSystem shutting down...");
        self.context = None;
        self.adapter_info = None;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame operations must fail cleanly rather than touch a context that
    /// was never created.
    #[test]
    fn uninitialized_system_rejects_frame_operations() {
        let mut system = GlRenderSystem::new();
        assert!(matches!(
            system.begin_frame(LinearRgba::BLACK),
            Err(RenderError::NotInitialized)
        ));
        assert!(matches!(system.present(), Err(RenderError::NotInitialized)));
    }

    /// Query methods on an uninitialized system report absence instead of
    /// panicking.
    #[test]
    fn uninitialized_system_reports_no_adapter() {
        let system = GlRenderSystem::new();
        assert!(system.get_adapter_info().is_none());
        assert!(system.get_api_version().is_none());
        assert!(!system.supports_feature("GL_ARB_get_program_binary"));
    }

    /// Resizing before init (or to a zero size) is ignored with a warning.
    #[test]
    fn resize_before_init_is_ignored() {
        let mut system = GlRenderSystem::new();
        system.resize(800, 600);
        system.resize(0, 0);
        assert_eq!(system.get_last_frame_stats().frame_number, 0);
    }
}

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

use crate::math::LinearRgba;
use crate::platform::window::EngineWindow;
use crate::renderer::adapter::AdapterInfo;
use crate::renderer::error::RenderError;
use crate::renderer::settings::{ApiVersion, ContextSettings};
use crate::renderer::stats::RenderStats;

/// Trait representing a render system.
/// This trait defines the methods that a render system must implement.
pub trait RenderSystem: std::fmt::Debug {
    /// Initialize the rendering system against a live window.
    ///
    /// Every other method except `shutdown` returns
    /// [`RenderError::NotInitialized`] or a neutral value until this has
    /// succeeded.
    fn init(
        &mut self,
        window: &dyn EngineWindow,
        settings: &ContextSettings,
    ) -> Result<(), RenderError>;

    /// Resize the drawable area of the render system.
    fn resize(&mut self, new_width: u32, new_height: u32);

    /// Begin a frame by clearing the color and depth buffers.
    fn begin_frame(&mut self, clear_color: LinearRgba) -> Result<(), RenderError>;

    /// Present the finished frame to the window.
    fn present(&mut self) -> Result<(), RenderError>;

    /// Get the stats of the last rendered frame.
    fn get_last_frame_stats(&self) -> &RenderStats;

    /// Indicate if a specific driver extension is supported.
    fn supports_feature(&self, feature_name: &str) -> bool;

    /// Get the adapter information of the rendering system.
    fn get_adapter_info(&self) -> Option<AdapterInfo>;

    /// Get the API version of the live context.
    fn get_api_version(&self) -> Option<ApiVersion>;

    /// Clean up and release the resources of the rendering system.
    fn shutdown(&mut self);

    /// Downcast to Any for type-specific access
    fn as_any(&self) -> &dyn std::any::Any;

    /// Downcast to Any for mutable type-specific access
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

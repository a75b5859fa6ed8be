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

use crate::renderer::error::ContextError;
use crate::renderer::settings::{ApiVersion, ContextProfile};

/// Trait representing a live rendering context bound to one window.
///
/// A context is created ready to use: construction performs the full
/// bootstrap (display connection, pixel format negotiation, context and
/// surface creation, function loading) and fails with a [`ContextError`]
/// rather than ever exposing a partially initialized context. At most one
/// context can be current per thread; making one current displaces any other.
pub trait RenderContext {
    /// Makes this context current on the calling thread.
    fn make_current(&self) -> Result<(), ContextError>;

    /// Returns `true` if this context is current on the calling thread.
    fn is_current(&self) -> bool;

    /// Presents the back buffer to the window.
    fn swap_buffers(&self) -> Result<(), ContextError>;

    /// Resizes the drawable surface. Zero dimensions are clamped to one
    /// pixel.
    fn resize_surface(&self, width: u32, height: u32);

    /// Returns the API version the driver actually provided.
    fn api_version(&self) -> ApiVersion;

    /// Returns the profile of the created context.
    fn profile(&self) -> ContextProfile;
}

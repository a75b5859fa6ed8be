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

//! The window abstraction every engine subsystem talks to.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::fmt;
use std::sync::Arc;

/// A trait that combines the windowing handle traits required by graphics
/// backends. This is used to satisfy Rust's "trait object" rules.
pub trait WindowHandle: HasWindowHandle + HasDisplayHandle {}

// Blanket implementation: any type carrying both handle traits qualifies.
impl<T: HasWindowHandle + HasDisplayHandle> WindowHandle for T {}

/// A shared, thread-safe handle to a live window.
///
/// Graphics backends keep one of these alive for as long as they own a
/// surface created from it.
pub type SharedWindowHandle = Arc<dyn WindowHandle + Send + Sync>;

/// A trait that abstracts the behavior of a window.
///
/// Any windowing backend (Winit, SDL2, Glfw, etc.) can implement this trait
/// to be compatible with the engine. The window is destroyed when its backing
/// value is dropped; there is no separate destroy call.
pub trait EngineWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Returns the physical dimensions (width, height) of the window's inner area.
    fn inner_size(&self) -> (u32, u32);

    /// Returns the position of the window's top-left corner in screen
    /// coordinates, or `(0, 0)` if the backend cannot provide it.
    fn outer_position(&self) -> (i32, i32);

    /// Returns the scale factor of the window.
    fn scale_factor(&self) -> f64;

    /// Changes the window title.
    fn set_title(&self, title: &str);

    /// Shows or hides the window.
    fn set_visible(&self, visible: bool);

    /// Requests that the window be redrawn.
    fn request_redraw(&self);

    /// Clones an Arc'd, thread-safe handle to the window.
    /// This is necessary for the renderer to create a surface.
    fn clone_handle_arc(&self) -> SharedWindowHandle;

    /// Returns the unique identifier for the window.
    fn id(&self) -> u64;
}

/// Errors that can occur while creating or querying a window.
#[derive(Debug)]
pub enum WindowError {
    /// The operating system refused to create the window.
    CreationFailed(String),
    /// The backend could not produce a raw window or display handle.
    HandleUnavailable(String),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::CreationFailed(reason) => {
                write!(f, "Window creation failed: {reason}")
            }
            WindowError::HandleUnavailable(reason) => {
                write!(f, "Window handle unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for WindowError {}

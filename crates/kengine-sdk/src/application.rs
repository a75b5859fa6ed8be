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

//! The [`Application`] trait and the context object handed to its callbacks.
//!
//! Game code implements [`Application`] and hands an instance to
//! [`Engine::run`](crate::Engine::run). Every engine service the game needs
//! arrives through the [`EngineContext`] parameter of the lifecycle
//! callbacks; there is no global state to reach for.

use crate::control::LoopController;
use kengine_core::platform::input::MouseButton;
use kengine_core::platform::window::EngineWindow;
use kengine_core::renderer::RenderSystem;
use std::time::Duration;
use winit::event::WindowEvent;

/// Borrowed engine services, threaded into every callback that needs them.
///
/// The context is rebuilt for each dispatch, so the borrows it carries are
/// only valid for the duration of one callback.
pub struct EngineContext<'a> {
    /// The live window.
    pub window: &'a dyn EngineWindow,
    /// The render system that owns the window's graphics context.
    ///
    /// Backend-specific operations (shader programs, mesh uploads) are
    /// reached by downcasting through
    /// [`RenderSystem::as_any_mut`], e.g. to
    /// [`GlRenderSystem`](kengine_infra::graphics::gl::GlRenderSystem).
    pub render_system: &'a mut dyn RenderSystem,
    /// Loop control. Callbacks may request a stop or a pause from here.
    pub control: &'a mut LoopController,
}

/// The callback surface of a game or tool built on the engine.
///
/// All callbacks except [`Application::update`] have default no-op
/// implementations, so an application only spells out what it cares about.
///
/// # Lifecycle
///
/// The engine dispatches, in order: [`on_window_ready`] once the window and
/// its graphics context exist, [`on_start`] once before the first update,
/// then [`update`] every frame until the loop stops, and [`on_finish`] after
/// the loop has exited. On platforms that suspend applications (Android),
/// [`on_pause`] marks the loss of the graphics context and a later resume
/// dispatches [`on_window_ready`] again, followed by [`on_resume`].
///
/// [`on_window_ready`]: Application::on_window_ready
/// [`on_start`]: Application::on_start
/// [`update`]: Application::update
/// [`on_finish`]: Application::on_finish
/// [`on_pause`]: Application::on_pause
/// [`on_resume`]: Application::on_resume
pub trait Application: 'static {
    /// Called once after the window and graphics context are ready, before
    /// the first [`Application::update`].
    fn on_start(&mut self, ctx: &mut EngineContext<'_>) {
        let _ = ctx;
    }

    /// Called every frame while the loop is running.
    ///
    /// `frame_time` is the measured duration of the previous loop iteration;
    /// a frame cannot know its own length before it has run. The first
    /// update receives [`Duration::ZERO`].
    ///
    /// The frame's clear has already happened when this is called, and the
    /// engine presents after it returns, so draw calls issued here through
    /// `ctx.render_system` end up on screen.
    fn update(&mut self, ctx: &mut EngineContext<'_>, frame_time: Duration);

    /// Called once after the main loop has exited, while the graphics
    /// context is still alive.
    fn on_finish(&mut self) {}

    /// Called whenever the window and its graphics context become usable,
    /// including again after a resume from suspension.
    ///
    /// GPU resources (shader programs, mesh uploads) should be created here.
    fn on_window_ready(&mut self, ctx: &mut EngineContext<'_>) {
        let _ = ctx;
    }

    /// Called when the window is destroyed by the windowing system.
    fn on_window_destroy(&mut self) {}

    /// Called when the OS suspends the application.
    ///
    /// The graphics context is torn down right after this returns. GPU
    /// resources created from it are invalid until the next
    /// [`Application::on_window_ready`].
    fn on_pause(&mut self) {}

    /// Called when the OS resumes the application after a suspension, after
    /// the graphics context has been rebuilt.
    fn on_resume(&mut self) {}

    /// Called when the user asks to close the window.
    ///
    /// Return `true` to allow the shutdown, `false` to keep running. The
    /// default allows it.
    fn on_close_requested(&mut self) -> bool {
        true
    }

    /// Called when the window's inner size changes.
    fn on_window_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called when the window is moved, with the new outer position.
    fn on_window_move(&mut self, x: i32, y: i32) {
        let _ = (x, y);
    }

    /// Called when the cursor moves inside the window, in physical pixels.
    fn on_mouse_motion(&mut self, x: f64, y: f64) {
        let _ = (x, y);
    }

    /// Called when a mouse button changes state.
    ///
    /// `x` and `y` are the last cursor position the engine observed, so
    /// button handlers know where the click landed without tracking motion
    /// themselves.
    fn on_mouse_button(&mut self, button: MouseButton, pressed: bool, x: f64, y: f64) {
        let _ = (button, pressed, x, y);
    }

    /// Called when the mouse wheel is scrolled.
    fn on_mouse_wheel(&mut self, delta_x: f32, delta_y: f32) {
        let _ = (delta_x, delta_y);
    }

    /// Called when a character-producing key changes state.
    ///
    /// `key` is the stable key code name (e.g. `"KeyW"`, `"Space"`).
    fn on_keyboard(&mut self, key: &str, pressed: bool) {
        let _ = (key, pressed);
    }

    /// Called when a non-character key changes state (arrows, function
    /// keys, modifiers, the navigation cluster).
    fn on_keyboard_special(&mut self, key: &str, pressed: bool) {
        let _ = (key, pressed);
    }

    /// Called with the raw windowing event for anything the engine did not
    /// translate into one of the callbacks above.
    fn on_raw_event(&mut self, event: &WindowEvent) {
        let _ = event;
    }
}

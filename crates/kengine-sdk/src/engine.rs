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

//! The engine runtime: event loop integration and the public entry point.
//!
//! [`Engine::run`] owns the process's main thread. It creates the window
//! and graphics context described by an [`EngineConfig`], then drives the
//! [`Application`] callbacks from the windowing event loop until the
//! [`LoopController`](crate::LoopController) reports a stop.

use crate::application::{Application, EngineContext};
use crate::clock::FrameClock;
use crate::config::EngineConfig;
use crate::control::LoopController;
use anyhow::Result;
use kengine_core::platform::input::{is_special_key, InputEvent};
use kengine_core::platform::window::EngineWindow;
use kengine_core::renderer::RenderSystem;
use kengine_infra::graphics::gl::GlRenderSystem;
use kengine_infra::platform::input::translate_winit_input;
use kengine_infra::platform::window::{WinitWindow, WinitWindowBuilder};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

/// The internal state of the running engine, managed by the winit event
/// loop. It holds the user's application state (`app: A`) alongside the
/// engine systems its callbacks borrow.
struct EngineState<A: Application> {
    app: Option<A>,
    config: EngineConfig,
    window: Option<WinitWindow>,
    render_system: Option<Box<dyn RenderSystem>>,
    controller: LoopController,
    clock: FrameClock,
    /// Last cursor position observed, handed to mouse button callbacks.
    cursor_position: (f64, f64),
}

impl<A: Application> EngineState<A> {
    fn new(app: A, config: EngineConfig) -> Self {
        Self {
            app: Some(app),
            config,
            window: None,
            render_system: None,
            controller: LoopController::new(),
            clock: FrameClock::new(),
            cursor_position: (0.0, 0.0),
        }
    }

    /// Assembles an [`EngineContext`] from disjoint borrows of the engine
    /// state and runs `f` with it. Does nothing before the window and
    /// renderer exist.
    fn with_context(&mut self, f: impl FnOnce(&mut A, &mut EngineContext<'_>)) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let mut ctx = EngineContext {
            window,
            render_system: render_system.as_mut(),
            control: &mut self.controller,
        };
        f(app, &mut ctx);
    }

    /// Translates one engine input event into the matching application
    /// callback, tracking the cursor position along the way.
    fn dispatch_input(&mut self, input: InputEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };

        match input {
            InputEvent::KeyPressed { key_code } => {
                if is_special_key(&key_code) {
                    app.on_keyboard_special(&key_code, true);
                } else {
                    app.on_keyboard(&key_code, true);
                }
            }
            InputEvent::KeyReleased { key_code } => {
                if is_special_key(&key_code) {
                    app.on_keyboard_special(&key_code, false);
                } else {
                    app.on_keyboard(&key_code, false);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.cursor_position = (x, y);
                app.on_mouse_motion(x, y);
            }
            InputEvent::MouseButtonPressed { button } => {
                let (x, y) = self.cursor_position;
                app.on_mouse_button(button, true, x, y);
            }
            InputEvent::MouseButtonReleased { button } => {
                let (x, y) = self.cursor_position;
                app.on_mouse_button(button, false, x, y);
            }
            InputEvent::MouseWheelScrolled { delta_x, delta_y } => {
                app.on_mouse_wheel(delta_x, delta_y);
            }
        }
    }

    /// Runs one frame: update, then render.
    ///
    /// Events for this iteration were already pumped by winit, so a stop
    /// requested by any of their callbacks is honored here before the
    /// application sees another update.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.controller.is_stopped() {
            event_loop.exit();
            return;
        }

        let frame_time = self.clock.tick();

        if !self.controller.should_update() {
            // Paused: keep pumping events, skip update and rendering.
            return;
        }

        let clear_color = self.config.clear_color;
        {
            let Some(render_system) = self.render_system.as_mut() else {
                return;
            };
            if let Err(e) = render_system.begin_frame(clear_color) {
                log::error!("Rendering error: {e}");
                return;
            }
        }

        // The update callback carries the game logic and its draw calls.
        self.with_context(|app, ctx| app.update(ctx, frame_time));

        // A stop from inside update exits without presenting the frame.
        if self.controller.is_stopped() {
            event_loop.exit();
            return;
        }

        if let Some(render_system) = self.render_system.as_mut() {
            match render_system.present() {
                Ok(()) => {
                    let stats = render_system.get_last_frame_stats();
                    log::trace!("Frame {} rendered.", stats.frame_number);
                }
                Err(e) => log::error!("Rendering error: {e}"),
            }
        }
    }
}

/// When `EngineState` goes out of scope (after the event loop exits), this
/// performs the controlled shutdown. The application drops first so its GPU
/// resources are released while the graphics context is still alive.
impl<A: Application> Drop for EngineState<A> {
    fn drop(&mut self) {
        log::info!("EngineState is being dropped. Performing controlled shutdown...");

        if let Some(mut app) = self.app.take() {
            if self.window.is_some() {
                app.on_finish();
            }
        }

        if let Some(mut render_system) = self.render_system.take() {
            render_system.shutdown();
        }

        log::info!("Engine systems shutdown complete.");
    }
}

impl<A: Application> ApplicationHandler for EngineState<A> {
    /// Called when the event loop is ready to start processing events, and
    /// again after every suspension. The first call creates the window and
    /// brings up the renderer; later calls rebuild the graphics context the
    /// suspension tore down.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            log::info!("Application resumed. Initializing window and engine systems...");

            let mut builder = WinitWindowBuilder::new()
                .with_title(self.config.window_title.clone())
                .with_dimensions(self.config.window_width, self.config.window_height);
            if let Some((x, y)) = self.config.window_position {
                builder = builder.with_position(x, y);
            }
            let window = match builder.build(event_loop) {
                Ok(window) => window,
                Err(e) => {
                    log::error!("Failed to create the window: {e}");
                    event_loop.exit();
                    return;
                }
            };

            let mut render_system: Box<dyn RenderSystem> = Box::new(GlRenderSystem::new());
            if let Err(e) = render_system.init(&window, &self.config.gl) {
                log::error!("Failed to initialize the render system: {e}");
                event_loop.exit();
                return;
            }

            self.window = Some(window);
            self.render_system = Some(render_system);

            self.controller.start();
            self.with_context(|app, ctx| app.on_window_ready(ctx));
            self.with_context(|app, ctx| app.on_start(ctx));
        } else {
            log::info!("Application resumed from suspension. Rebuilding graphics context...");

            {
                let Some(window) = self.window.as_ref() else {
                    return;
                };
                let Some(render_system) = self.render_system.as_mut() else {
                    return;
                };
                if let Err(e) = render_system.init(window, &self.config.gl) {
                    log::error!("Failed to rebuild the render system: {e}");
                    event_loop.exit();
                    return;
                }
            }

            self.controller.resume();
            self.with_context(|app, ctx| app.on_window_ready(ctx));
            if let Some(app) = self.app.as_mut() {
                app.on_resume();
            }
        }

        if self.controller.is_stopped() {
            event_loop.exit();
        }
    }

    /// Called when the OS suspends the application (Android lifecycle). The
    /// graphics context does not survive a suspension, so it is torn down
    /// after the application was told to let go of its GPU resources.
    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Application suspended. Releasing the graphics context...");

        if let Some(app) = self.app.as_mut() {
            app.on_pause();
        }
        if let Some(render_system) = self.render_system.as_mut() {
            render_system.shutdown();
        }
        self.controller.pause();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != window_id_hash(id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                let allow = match self.app.as_mut() {
                    Some(app) => app.on_close_requested(),
                    None => true,
                };
                if allow {
                    log::info!("Shutdown requested, stopping the main loop...");
                    self.controller.stop();
                } else {
                    log::debug!("Close request refused by the application.");
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    log::info!("Window resized to: {}x{}", size.width, size.height);
                    render_system.resize(size.width, size.height);
                }
                if let Some(app) = self.app.as_mut() {
                    app.on_window_resize(size.width, size.height);
                }
            }
            WindowEvent::Moved(position) => {
                if let Some(app) = self.app.as_mut() {
                    app.on_window_move(position.x, position.y);
                }
            }
            WindowEvent::Destroyed => {
                if let Some(app) = self.app.as_mut() {
                    app.on_window_destroy();
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            other => {
                // Translate winit events into the engine's event type for
                // game logic to consume; anything untranslated is passed
                // through raw.
                if let Some(input) = translate_winit_input(&other) {
                    self.dispatch_input(input);
                } else if let Some(app) = self.app.as_mut() {
                    app.on_raw_event(&other);
                }
            }
        }

        // A stop requested from any callback ends the loop after the
        // current pump.
        if self.controller.is_stopped() {
            event_loop.exit();
        }
    }

    /// Called when the event loop has processed all pending events and is
    /// about to wait. Requesting a redraw here keeps the loop continuous.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.controller.is_stopped() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Hashes a winit window id the same way [`EngineWindow::id`] does, so the
/// two can be compared.
fn window_id_hash(id: WindowId) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

/// The public entry point for the engine.
pub struct Engine;

impl Engine {
    /// Runs `app` under the default [`EngineConfig`].
    pub fn run_default<A: Application>(app: A) -> Result<()> {
        Self::run(app, EngineConfig::default())
    }

    /// Creates the window and graphics context described by `config` and
    /// drives `app`'s callbacks until the main loop stops.
    ///
    /// This is the primary function for a game developer to call. It blocks
    /// the current thread until the application is closed.
    pub fn run<A: Application>(app: A, config: EngineConfig) -> Result<()> {
        log::info!("K-Engine SDK: Starting...");
        let event_loop = EventLoop::new()?;

        // The window and renderer are created in the `resumed` event.
        let mut state = EngineState::new(app, config);
        event_loop.run_app(&mut state)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kengine_core::platform::input::MouseButton;
    use std::time::Duration;

    /// Records every callback it receives, for dispatch assertions.
    #[derive(Default)]
    struct RecordingApp {
        calls: Vec<String>,
    }

    impl Application for RecordingApp {
        fn update(&mut self, _ctx: &mut EngineContext<'_>, _frame_time: Duration) {}

        fn on_mouse_motion(&mut self, x: f64, y: f64) {
            self.calls.push(format!("motion:{x}:{y}"));
        }

        fn on_mouse_button(&mut self, button: MouseButton, pressed: bool, x: f64, y: f64) {
            self.calls.push(format!("button:{button:?}:{pressed}:{x}:{y}"));
        }

        fn on_mouse_wheel(&mut self, delta_x: f32, delta_y: f32) {
            self.calls.push(format!("wheel:{delta_x}:{delta_y}"));
        }

        fn on_keyboard(&mut self, key: &str, pressed: bool) {
            self.calls.push(format!("keyboard:{key}:{pressed}"));
        }

        fn on_keyboard_special(&mut self, key: &str, pressed: bool) {
            self.calls.push(format!("special:{key}:{pressed}"));
        }
    }

    fn recording_state() -> EngineState<RecordingApp> {
        EngineState::new(RecordingApp::default(), EngineConfig::default())
    }

    fn recorded(state: &EngineState<RecordingApp>) -> &[String] {
        state.app.as_ref().map(|app| app.calls.as_slice()).unwrap_or(&[])
    }

    /// Character keys go to on_keyboard, non-character keys to
    /// on_keyboard_special, for both press and release.
    #[test]
    fn keyboard_dispatch_splits_on_special_keys() {
        let mut state = recording_state();

        state.dispatch_input(InputEvent::KeyPressed {
            key_code: "KeyW".to_string(),
        });
        state.dispatch_input(InputEvent::KeyPressed {
            key_code: "F5".to_string(),
        });
        state.dispatch_input(InputEvent::KeyReleased {
            key_code: "ArrowLeft".to_string(),
        });
        state.dispatch_input(InputEvent::KeyReleased {
            key_code: "Space".to_string(),
        });

        assert_eq!(
            recorded(&state),
            [
                "keyboard:KeyW:true",
                "special:F5:true",
                "special:ArrowLeft:false",
                "keyboard:Space:false",
            ]
        );
    }

    /// Button callbacks receive the cursor position from the latest motion
    /// event, starting at the origin before any motion was seen.
    #[test]
    fn mouse_buttons_carry_tracked_cursor_position() {
        let mut state = recording_state();

        state.dispatch_input(InputEvent::MouseButtonPressed {
            button: MouseButton::Left,
        });
        state.dispatch_input(InputEvent::MouseMoved { x: 120.0, y: 45.5 });
        state.dispatch_input(InputEvent::MouseButtonPressed {
            button: MouseButton::Right,
        });
        state.dispatch_input(InputEvent::MouseButtonReleased {
            button: MouseButton::Right,
        });

        assert_eq!(
            recorded(&state),
            [
                "button:Left:true:0:0",
                "motion:120:45.5",
                "button:Right:true:120:45.5",
                "button:Right:false:120:45.5",
            ]
        );
    }

    /// Wheel events reach the dedicated wheel callback.
    #[test]
    fn wheel_events_reach_wheel_callback() {
        let mut state = recording_state();

        state.dispatch_input(InputEvent::MouseWheelScrolled {
            delta_x: 0.0,
            delta_y: -1.0,
        });

        assert_eq!(recorded(&state), ["wheel:0:-1"]);
    }

    /// Callbacks needing a context are silently skipped before the window
    /// and renderer exist.
    #[test]
    fn with_context_is_inert_before_initialization() {
        let mut state = recording_state();
        let mut ran = false;
        state.with_context(|_, _| ran = true);
        assert!(!ran, "no context should be built without a window");
    }
}

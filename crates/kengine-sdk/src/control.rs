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

//! The main loop lifecycle state machine.

/// The lifecycle state of the engine's main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// The loop is not running. The initial state, and the final one once a
    /// stop has been requested.
    #[default]
    Stopped,
    /// The loop is pumping events and dispatching updates.
    Running,
    /// The loop keeps pumping events but skips updates and rendering.
    Paused,
}

/// Owns the loop state and validates its transitions.
///
/// Invalid transitions (starting a loop that is already running, pausing a
/// stopped one) are logged at debug level and ignored instead of panicking,
/// so a misplaced call from game code cannot take the process down.
#[derive(Debug, Default)]
pub struct LoopController {
    state: LoopState,
}

impl LoopController {
    /// Creates a controller in the [`LoopState::Stopped`] state.
    pub fn new() -> Self {
        Self {
            state: LoopState::Stopped,
        }
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Returns `true` once a stop has been requested (or before the loop
    /// ever started).
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.state == LoopState::Stopped
    }

    /// Returns `true` if the loop should dispatch an update this frame.
    #[inline]
    pub fn should_update(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Starts the loop. Valid only from [`LoopState::Stopped`].
    pub fn start(&mut self) {
        match self.state {
            LoopState::Stopped => {
                log::debug!("Main loop starting.");
                self.state = LoopState::Running;
            }
            other => log::debug!("start() ignored: loop is {other:?}."),
        }
    }

    /// Requests a stop. Valid from any state.
    ///
    /// Once stopped, no further update is dispatched and the event loop
    /// exits after the current pump.
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::debug!("Main loop stop requested.");
            self.state = LoopState::Stopped;
        }
    }

    /// Pauses a running loop. Updates are skipped until a resume.
    pub fn pause(&mut self) {
        match self.state {
            LoopState::Running => {
                log::debug!("Main loop paused.");
                self.state = LoopState::Paused;
            }
            other => log::debug!("pause() ignored: loop is {other:?}."),
        }
    }

    /// Resumes a paused loop.
    pub fn resume(&mut self) {
        match self.state {
            LoopState::Paused => {
                log::debug!("Main loop resumed.");
                self.state = LoopState::Running;
            }
            other => log::debug!("resume() ignored: loop is {other:?}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fresh controller is stopped and must not dispatch updates.
    #[test]
    fn controller_starts_stopped() {
        let controller = LoopController::new();
        assert_eq!(controller.state(), LoopState::Stopped);
        assert!(controller.is_stopped());
        assert!(!controller.should_update());
    }

    /// start() transitions Stopped to Running; a second start is ignored.
    #[test]
    fn start_is_only_valid_from_stopped() {
        let mut controller = LoopController::new();
        controller.start();
        assert_eq!(controller.state(), LoopState::Running);
        assert!(controller.should_update());

        controller.pause();
        controller.start();
        assert_eq!(
            controller.state(),
            LoopState::Paused,
            "start() from Paused should be ignored"
        );
    }

    /// A stop issued while running must prevent any subsequent update
    /// dispatch.
    #[test]
    fn stop_from_running_prevents_further_updates() {
        let mut controller = LoopController::new();
        controller.start();
        assert!(controller.should_update());

        controller.stop();
        assert!(controller.is_stopped());
        assert!(
            !controller.should_update(),
            "no update may be dispatched after stop()"
        );
    }

    /// stop() is valid from every state and idempotent.
    #[test]
    fn stop_is_valid_from_any_state() {
        let mut controller = LoopController::new();
        controller.stop();
        assert!(controller.is_stopped());

        controller.start();
        controller.pause();
        controller.stop();
        assert!(controller.is_stopped());
        controller.stop();
        assert!(controller.is_stopped());
    }

    /// pause()/resume() round-trip between Running and Paused; a paused
    /// loop skips updates without being stopped.
    #[test]
    fn pause_resume_round_trip() {
        let mut controller = LoopController::new();
        controller.start();

        controller.pause();
        assert_eq!(controller.state(), LoopState::Paused);
        assert!(!controller.should_update());
        assert!(!controller.is_stopped());

        controller.resume();
        assert_eq!(controller.state(), LoopState::Running);
        assert!(controller.should_update());
    }

    /// pause()/resume() outside their valid source states are ignored.
    #[test]
    fn pause_and_resume_are_ignored_when_invalid() {
        let mut controller = LoopController::new();
        controller.pause();
        assert_eq!(controller.state(), LoopState::Stopped);

        controller.resume();
        assert_eq!(controller.state(), LoopState::Stopped);

        controller.start();
        controller.resume();
        assert_eq!(
            controller.state(),
            LoopState::Running,
            "resume() from Running should be ignored"
        );
    }
}

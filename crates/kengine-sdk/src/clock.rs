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

//! Per-frame wall-clock measurement for the main loop.

use std::time::{Duration, Instant};

/// Measures the duration of main loop iterations.
///
/// [`FrameClock::tick`] is called once at the top of every frame and returns
/// the delta to hand to the application update. That delta is the measured
/// duration of the *previous* iteration, since a frame cannot know its own
/// length before it has run. The first frame receives [`Duration::ZERO`].
#[derive(Debug, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    /// Creates a clock that has not yet seen a frame.
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    /// Marks the top of a frame and returns the previous iteration's
    /// duration.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Duration {
        let delta = match self.last_tick {
            Some(previous) => now.duration_since(previous),
            None => Duration::ZERO,
        };
        self.last_tick = Some(now);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The first frame has no predecessor to measure, so its delta is zero.
    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), Duration::ZERO);
    }

    /// Each tick returns the gap to the previous tick, i.e. the duration of
    /// the frame that just finished, never the current frame's own time.
    #[test]
    fn tick_returns_previous_iteration_duration() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();

        assert_eq!(clock.tick_at(t0), Duration::ZERO);
        assert_eq!(
            clock.tick_at(t0 + Duration::from_millis(16)),
            Duration::from_millis(16),
            "second update should see the first frame's duration"
        );
        assert_eq!(
            clock.tick_at(t0 + Duration::from_millis(16) + Duration::from_millis(33)),
            Duration::from_millis(33),
            "a slow frame shows up in the next update's delta"
        );
    }

    /// Deltas depend only on consecutive ticks, not on the total run time.
    #[test]
    fn deltas_are_independent_of_total_elapsed() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();

        clock.tick_at(t0);
        clock.tick_at(t0 + Duration::from_secs(5));
        assert_eq!(
            clock.tick_at(t0 + Duration::from_secs(5) + Duration::from_millis(7)),
            Duration::from_millis(7)
        );
    }
}

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

//! Wall-clock timing utilities built on [`std::time::Instant`].

use std::time::{Duration, Instant};

/// A simple stopwatch that starts counting on creation.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Option<Instant>,
}

impl Stopwatch {
    /// Creates a new `Stopwatch` and starts it immediately.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
        }
    }

    /// Returns the elapsed time since the stopwatch was started.
    ///
    /// Returns `None` if the stopwatch has no start time.
    #[inline]
    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|start| start.elapsed())
    }

    /// Returns the elapsed time in whole milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.elapsed().map(|d| d.as_millis() as u64)
    }

    /// Returns the elapsed time in whole microseconds.
    #[inline]
    pub fn elapsed_us(&self) -> Option<u64> {
        self.elapsed().map(|d| d.as_micros() as u64)
    }

    /// Returns the elapsed time in seconds as `f64`.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> Option<f64> {
        self.elapsed().map(|d| d.as_secs_f64())
    }

    /// Resets the start time to now.
    #[inline]
    pub fn restart(&mut self) {
        self.start_time = Some(Instant::now());
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// A repeating timer with a fixed period.
///
/// Completion checks are pull-based: the owner polls
/// [`IntervalTimer::done_and_restart`] as often as it likes (typically once
/// per frame). When a period completes, the next deadline is advanced by
/// exactly one period from the *previous* deadline, so any overshoot between
/// the deadline and the poll carries into the next period instead of being
/// silently absorbed. Polling a timer that has fallen several periods behind
/// reports one completion per poll until it has caught up.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    deadline: Instant,
    total: Stopwatch,
}

impl IntervalTimer {
    /// Creates a timer whose first period starts now.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "IntervalTimer period must be non-zero");
        Self {
            period,
            deadline: Instant::now() + period,
            total: Stopwatch::new(),
        }
    }

    /// Returns the configured period.
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` if the current period has completed.
    ///
    /// Does not restart the timer.
    #[inline]
    pub fn done(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Checks the current period and, if it has completed, advances the
    /// deadline by one period.
    ///
    /// Returns `true` exactly when a period completed. The deadline moves
    /// relative to the old deadline, not to the time of the call, so late
    /// polls shorten the following period by the overshoot.
    pub fn done_and_restart(&mut self) -> bool {
        if Instant::now() >= self.deadline {
            self.deadline += self.period;
            true
        } else {
            false
        }
    }

    /// Discards the current period and starts a fresh one from now.
    ///
    /// Unlike [`IntervalTimer::done_and_restart`], this drops any accumulated
    /// overshoot.
    pub fn restart(&mut self) {
        self.deadline = Instant::now() + self.period;
    }

    /// Returns the total time since the timer was created, unaffected by
    /// restarts.
    #[inline]
    pub fn total_elapsed(&self) -> Option<Duration> {
        self.total.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SMALL_DURATION_MS: u64 = 15;
    const SLEEP_DURATION_MS: u64 = 100;
    const SLEEP_MARGIN_MS: u64 = 200;

    /// A freshly created stopwatch must report a very small elapsed time.
    #[test]
    fn stopwatch_creation_starts_timer() {
        let watch = Stopwatch::new();
        assert!(
            watch.elapsed().is_some(),
            "Elapsed should return Some after creation"
        );
        let elapsed = watch.elapsed().unwrap();
        assert!(
            elapsed < Duration::from_millis(SMALL_DURATION_MS),
            "Initial elapsed duration ({elapsed:?}) should be very small"
        );
    }

    /// The stopwatch must report at least the slept duration afterwards, and
    /// not wildly more.
    #[test]
    fn stopwatch_elapsed_time_after_delay() {
        let watch = Stopwatch::new();
        let sleep_duration = Duration::from_millis(SLEEP_DURATION_MS);
        thread::sleep(sleep_duration);

        let elapsed = watch.elapsed().expect("Should have elapsed duration");
        assert!(
            elapsed >= sleep_duration,
            "Elapsed duration ({elapsed:?}) should be >= sleep duration ({sleep_duration:?})"
        );
        assert!(
            elapsed < sleep_duration + Duration::from_millis(SLEEP_MARGIN_MS),
            "Elapsed duration ({elapsed:?}) should be < sleep duration + margin"
        );

        let elapsed_ms = watch.elapsed_ms().expect("Should have elapsed ms");
        assert!(
            elapsed_ms >= SLEEP_DURATION_MS,
            "Elapsed ms ({elapsed_ms}) should be >= sleep duration ms ({SLEEP_DURATION_MS})"
        );
    }

    /// Restarting must bring the elapsed time back near zero.
    #[test]
    fn stopwatch_restart_resets_elapsed() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(50));
        watch.restart();
        let elapsed = watch.elapsed().unwrap();
        assert!(
            elapsed < Duration::from_millis(SMALL_DURATION_MS),
            "Elapsed after restart ({elapsed:?}) should be very small"
        );
    }

    /// Stopwatch must be usable through Default like through new.
    #[test]
    fn stopwatch_implements_default() {
        let watch = Stopwatch::default();
        assert!(watch.elapsed().is_some());
    }

    /// A timer with a long period must not report completion immediately.
    #[test]
    fn interval_timer_not_done_before_period() {
        let mut timer = IntervalTimer::new(Duration::from_secs(60));
        assert!(!timer.done(), "60s period should not complete immediately");
        assert!(
            !timer.done_and_restart(),
            "done_and_restart should report false before the period elapses"
        );
    }

    /// After sleeping past the period the timer must fire, and the deadline
    /// advance must make an immediate re-poll false again.
    #[test]
    fn interval_timer_fires_after_period() {
        let mut timer = IntervalTimer::new(Duration::from_millis(30));
        thread::sleep(Duration::from_millis(45));

        assert!(timer.done(), "Period should have completed after sleep");
        assert!(timer.done_and_restart(), "First poll should fire");
        // 45ms elapsed, next deadline at 60ms: not due yet.
        assert!(
            !timer.done_and_restart(),
            "Second poll right after the first should not fire"
        );
    }

    /// A timer several periods behind must report one completion per poll
    /// until it catches up, because each completion advances the deadline by
    /// exactly one period.
    #[test]
    fn interval_timer_overshoot_carries_into_next_period() {
        let mut timer = IntervalTimer::new(Duration::from_millis(200));
        thread::sleep(Duration::from_millis(450));

        assert!(timer.done_and_restart(), "First missed period should fire");
        assert!(timer.done_and_restart(), "Second missed period should fire");
        // Deadline is now at 600ms from creation; only ~450ms have passed.
        assert!(
            !timer.done_and_restart(),
            "Timer should be caught up after two completions"
        );
    }

    /// restart() must discard the accumulated overshoot entirely.
    #[test]
    fn interval_timer_restart_discards_overshoot() {
        let mut timer = IntervalTimer::new(Duration::from_millis(50));
        thread::sleep(Duration::from_millis(120));
        timer.restart();
        assert!(
            !timer.done(),
            "A manual restart should start a full fresh period"
        );
    }

    /// The total stopwatch must keep accumulating across completions.
    #[test]
    fn interval_timer_total_elapsed_is_monotonic() {
        let mut timer = IntervalTimer::new(Duration::from_millis(20));
        thread::sleep(Duration::from_millis(30));
        let _ = timer.done_and_restart();
        let first = timer.total_elapsed().unwrap();
        thread::sleep(Duration::from_millis(10));
        let second = timer.total_elapsed().unwrap();
        assert!(
            second > first,
            "total_elapsed should grow across restarts ({first:?} -> {second:?})"
        );
    }

    /// Zero periods are a construction error.
    #[test]
    #[should_panic(expected = "period must be non-zero")]
    fn interval_timer_rejects_zero_period() {
        let _ = IntervalTimer::new(Duration::ZERO);
    }
}

//! Countdown and count-up timers driven one tick (second) at a time.
//!
//! Neither timer reads the clock. The caller decides when a second has
//! passed, which keeps pause handling exact and makes the timers easy to
//! drive from tests.

use chrono::Duration;

/// Where a countdown is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    /// Counting
    Running,
    /// Frozen until resumed
    Paused,
    /// Reached its length
    Completed,
}

/// Counts whole seconds up to a fixed length.
#[derive(Debug, Clone)]
pub struct Timer {
    length: i64,
    counted: i64,
    state: TimerState,
}

impl Timer {
    /// Create a paused countdown. A non-positive length is already complete.
    #[must_use]
    pub fn new(length: Duration) -> Self {
        let length = length.num_seconds().max(0);
        let state = if length == 0 {
            TimerState::Completed
        } else {
            TimerState::Paused
        };
        Self {
            length,
            counted: 0,
            state,
        }
    }

    /// Start counting, or resume after a pause.
    pub fn start(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }

    /// Flip between running and paused. Returns true if now paused.
    ///
    /// A completed timer stays completed.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            TimerState::Running => TimerState::Paused,
            TimerState::Paused => TimerState::Running,
            TimerState::Completed => TimerState::Completed,
        };
        self.is_paused()
    }

    /// Count one second. Returns true on the tick that reaches the length.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.counted = (self.counted + 1).min(self.length);
        let done = self.counted == self.length;
        if done {
            self.state = TimerState::Completed;
        }
        done
    }

    /// The full length.
    #[must_use]
    pub fn total(&self) -> Duration {
        Duration::seconds(self.length)
    }

    /// Time still to count.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        Duration::seconds(self.length - self.counted)
    }

    /// Time counted so far, excluding pauses.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::seconds(self.counted)
    }

    /// Fraction counted, from 0.0 to 1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.length == 0 {
            1.0
        } else {
            self.counted as f64 / self.length as f64
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }
}

/// A count-up timer with no end.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    counted: i64,
    paused: bool,
}

impl Stopwatch {
    /// Create a running stopwatch at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counted: 0,
            paused: false,
        }
    }

    /// Count one second unless paused.
    pub fn tick(&mut self) {
        if !self.paused {
            self.counted += 1;
        }
    }

    /// Flip between running and paused. Returns true if now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time counted so far, excluding pauses.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::seconds(self.counted)
    }
}

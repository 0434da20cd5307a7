//! In-memory session state.
//!
//! A `Session` lives for one run of the program. It holds the completion
//! counters, the accumulated work and break time, and the activity
//! timeline. Nothing is persisted.

use chrono::{DateTime, Duration, Local};

use super::activity::{Activity, ActivityEntry};
use super::phase::Phase;

/// What to do with a stopped stopwatch's time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchChoice {
    /// Add the elapsed time to work time
    Keep,
    /// Throw the elapsed time away
    Discard,
}

/// Counters, accumulators and the activity timeline for one run.
#[derive(Debug, Clone)]
pub struct Session {
    started_at: DateTime<Local>,
    work_cycles: u32,
    short_breaks: u32,
    long_breaks: u32,
    work_time: Duration,
    break_time: Duration,
    entries: Vec<ActivityEntry>,
}

impl Session {
    /// Create an empty session.
    #[must_use]
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            work_cycles: 0,
            short_breaks: 0,
            long_breaks: 0,
            work_time: Duration::zero(),
            break_time: Duration::zero(),
            entries: Vec::new(),
        }
    }

    /// Record a phase that ran to its end.
    pub fn record_completion(&mut self, phase: Phase, duration: Duration) {
        match phase {
            Phase::Work => self.work_cycles += 1,
            Phase::ShortBreak => self.short_breaks += 1,
            Phase::LongBreak => self.long_breaks += 1,
            Phase::Idle => return,
        }
        self.accumulate(phase, duration);
    }

    /// Record a phase that was skipped or cancelled after `elapsed`.
    ///
    /// Only the accumulator grows; the completion counter is untouched.
    pub fn record_partial(&mut self, phase: Phase, elapsed: Duration) {
        self.accumulate(phase, elapsed);
    }

    fn accumulate(&mut self, phase: Phase, duration: Duration) {
        let duration = duration.max(Duration::zero());
        if phase.is_break() {
            self.break_time += duration;
        } else if phase == Phase::Work {
            self.work_time += duration;
        }
    }

    /// Apply a stopwatch result. Returns the time added to work.
    pub fn record_stopwatch(&mut self, elapsed: Duration, choice: StopwatchChoice) -> Duration {
        match choice {
            StopwatchChoice::Keep => {
                let added = Duration::seconds(elapsed.num_seconds().max(0));
                self.work_time += added;
                added
            }
            StopwatchChoice::Discard => Duration::zero(),
        }
    }

    /// Start tracking an activity, closing whatever entry was open.
    pub fn start_activity(&mut self, activity: Activity, at: DateTime<Local>) {
        self.stop_activity(at);
        log::debug!("Activity '{activity}' started");
        self.entries.push(ActivityEntry::open(activity, at));
    }

    /// Close the open entry, if any. Returns its length.
    pub fn stop_activity(&mut self, at: DateTime<Local>) -> Option<Duration> {
        let entry = self.entries.last_mut().filter(|e| e.is_open())?;
        // Clamp so an entry never ends before it started
        let end = at.max(entry.started_at);
        entry.ended_at = Some(end);
        log::debug!("Activity '{}' stopped", entry.activity);
        Some(entry.duration(end))
    }

    /// Get the open entry.
    #[must_use]
    pub fn open_entry(&self) -> Option<&ActivityEntry> {
        self.entries.last().filter(|e| e.is_open())
    }

    /// Get all entries in the order they were opened.
    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// When the session began.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Completed work phases.
    #[must_use]
    pub const fn work_cycles(&self) -> u32 {
        self.work_cycles
    }

    /// Completed short breaks.
    #[must_use]
    pub const fn short_breaks(&self) -> u32 {
        self.short_breaks
    }

    /// Completed long breaks.
    #[must_use]
    pub const fn long_breaks(&self) -> u32 {
        self.long_breaks
    }

    /// Accumulated work time.
    #[must_use]
    pub const fn work_time(&self) -> Duration {
        self.work_time
    }

    /// Accumulated break time, short and long.
    #[must_use]
    pub const fn break_time(&self) -> Duration {
        self.break_time
    }

    /// Check if anything has been recorded yet.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.work_cycles + self.short_breaks + self.long_breaks > 0
            || !self.work_time.is_zero()
            || !self.break_time.is_zero()
            || !self.entries.is_empty()
    }
}

//! Phase durations and the fixed Pomodoro cycle.

use chrono::Duration;

use super::phase::Phase;
use crate::error::RudoroError;

/// Durations and cycle length for one Pomodoro set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    /// Length of a work phase
    pub work: Duration,
    /// Length of a short break
    pub short_break: Duration,
    /// Length of a long break
    pub long_break: Duration,
    /// Work phases per set; the break after the last one is long
    pub cycles_before_long_break: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self::from_minutes(60, 10, 25, 4)
    }
}

impl TimerSettings {
    /// Build settings from whole minutes.
    #[must_use]
    pub fn from_minutes(work: i64, short_break: i64, long_break: i64, cycles: u32) -> Self {
        Self {
            work: Duration::minutes(work),
            short_break: Duration::minutes(short_break),
            long_break: Duration::minutes(long_break),
            cycles_before_long_break: cycles,
        }
    }

    /// Check that every duration and the cycle count are positive.
    ///
    /// # Errors
    ///
    /// Returns `RudoroError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<(), RudoroError> {
        let durations = [
            ("work", self.work),
            ("short break", self.short_break),
            ("long break", self.long_break),
        ];

        for (name, duration) in durations {
            if duration.num_seconds() <= 0 {
                return Err(RudoroError::Config(format!(
                    "{name} duration must be positive"
                )));
            }
        }

        if self.cycles_before_long_break == 0 {
            return Err(RudoroError::Config(
                "cycles before long break must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the configured length of a phase. Idle has no length.
    #[must_use]
    pub fn duration_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
            Phase::Idle => Duration::zero(),
        }
    }

    /// Which break follows the given number of finished work phases.
    #[must_use]
    pub const fn break_after(&self, work_phases: u32) -> Phase {
        if self.cycles_before_long_break > 0
            && work_phases > 0
            && work_phases % self.cycles_before_long_break == 0
        {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }
}

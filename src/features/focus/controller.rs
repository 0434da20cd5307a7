//! The session controller.
//!
//! Runs one countdown at a time and walks the fixed Pomodoro cycle:
//! Work → Short Break → Work → … → Work → Long Break, after which the set
//! is over and the controller is idle again. Every completion, skip and
//! cancel is written into the owned [`Session`].

use chrono::{DateTime, Duration, Local};

use super::activity::Activity;
use super::cycle::TimerSettings;
use super::phase::Phase;
use super::session::Session;
use super::timer::Timer;
use crate::error::RudoroError;

/// Source of wall-clock time for activity entries.
pub type Clock = fn() -> DateTime<Local>;

/// The user's answer to an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptChoice {
    /// End the current phase and move on
    Skip,
    /// Abandon the set and return to idle
    Cancel,
}

/// How a phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// Counted down to zero
    Completed,
    /// Ended early by the user; the cycle moved on
    Skipped,
    /// Ended early by the user; the set was abandoned
    Cancelled,
}

/// Result of a phase ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    /// The phase that ended
    pub finished: Phase,
    /// Time that was actually counted
    pub elapsed: Duration,
    /// How it ended
    pub outcome: PhaseOutcome,
    /// What runs next; `Idle` when the set is over
    pub next: Phase,
}

impl PhaseTransition {
    /// Check if this transition closed the set.
    #[must_use]
    pub fn set_finished(&self) -> bool {
        self.next == Phase::Idle
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// One second counted
    Running,
    /// Nothing counted because the phase is paused
    Paused,
    /// The phase reached its end
    Completed(PhaseTransition),
}

#[derive(Debug, Clone)]
struct RunningPhase {
    phase: Phase,
    timer: Timer,
}

/// Owns the session and the phase currently counting down.
pub struct SessionController {
    settings: TimerSettings,
    session: Session,
    current: Option<RunningPhase>,
    category: Option<Activity>,
    /// Work phases ended (completed or skipped) in the current set
    work_phases_in_set: u32,
    pending: Phase,
    clock: Clock,
}

impl SessionController {
    /// Create an idle controller with a fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn new(settings: TimerSettings) -> Result<Self, RudoroError> {
        Self::with_clock(settings, Local::now)
    }

    /// Create a controller reading wall-clock time from `clock`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn with_clock(settings: TimerSettings, clock: Clock) -> Result<Self, RudoroError> {
        settings.validate()?;
        Ok(Self {
            settings,
            session: Session::new(clock()),
            current: None,
            category: None,
            work_phases_in_set: 0,
            pending: Phase::Idle,
            clock,
        })
    }

    /// Get the current settings.
    #[must_use]
    pub const fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Replace the settings. Only allowed between phases.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase is running or the settings are invalid.
    pub fn set_settings(&mut self, settings: TimerSettings) -> Result<(), RudoroError> {
        if let Some(running) = &self.current {
            return Err(RudoroError::PhaseAlreadyRunning(running.phase));
        }
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Get the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Get the session for activity tracking.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Current wall-clock time.
    #[must_use]
    pub fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }

    /// The phase counting down, or `Idle`.
    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.current.as_ref().map_or(Phase::Idle, |r| r.phase)
    }

    /// The phase the set will run next, or `Idle` outside a set.
    #[must_use]
    pub const fn next_phase(&self) -> Phase {
        self.pending
    }

    /// The category of the set in progress.
    #[must_use]
    pub const fn category(&self) -> Option<&Activity> {
        self.category.as_ref()
    }

    /// Work phases ended so far in this set.
    #[must_use]
    pub const fn work_phases_in_set(&self) -> u32 {
        self.work_phases_in_set
    }

    /// Get the running timer.
    #[must_use]
    pub fn timer(&self) -> Option<&Timer> {
        self.current.as_ref().map(|r| &r.timer)
    }

    /// Check if the running phase is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.timer().is_some_and(Timer::is_paused)
    }

    /// Begin a Pomodoro set for a structured category.
    ///
    /// Opens an activity entry for the category; the first phase is Work.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase is running or the activity is not a
    /// structured category.
    pub fn begin_set(&mut self, category: Activity) -> Result<(), RudoroError> {
        if let Some(running) = &self.current {
            return Err(RudoroError::PhaseAlreadyRunning(running.phase));
        }
        if !category.is_structured() {
            return Err(RudoroError::InvalidInput(format!(
                "'{category}' cannot run a Pomodoro set"
            )));
        }

        log::info!("Starting a set of {} for {category}", self.settings.cycles_before_long_break);
        let now = self.now();
        self.session.start_activity(category.clone(), now);
        self.category = Some(category);
        self.work_phases_in_set = 0;
        self.pending = Phase::Work;
        Ok(())
    }

    /// Start counting down `duration` for `phase`.
    ///
    /// # Errors
    ///
    /// Returns `PhaseAlreadyRunning` if a phase is counting down, or
    /// `InvalidPhase` for `Idle` or a non-positive duration.
    pub fn start_phase(&mut self, phase: Phase, duration: Duration) -> Result<(), RudoroError> {
        if let Some(running) = &self.current {
            return Err(RudoroError::PhaseAlreadyRunning(running.phase));
        }
        if !phase.is_timed() {
            return Err(RudoroError::InvalidPhase("idle cannot be timed".to_string()));
        }
        if duration.num_seconds() <= 0 {
            return Err(RudoroError::InvalidPhase(format!(
                "{phase} needs a positive duration"
            )));
        }

        let mut timer = Timer::new(duration);
        timer.start();
        log::info!("{phase} started ({}s)", duration.num_seconds());
        self.current = Some(RunningPhase { phase, timer });
        Ok(())
    }

    /// Start the set's pending phase with its configured duration.
    ///
    /// # Errors
    ///
    /// Returns an error if no set is in progress or a phase is running.
    pub fn start_next(&mut self) -> Result<Phase, RudoroError> {
        let phase = self.pending;
        if phase == Phase::Idle {
            return Err(RudoroError::InvalidPhase("no set in progress".to_string()));
        }
        self.start_phase(phase, self.settings.duration_for(phase))?;
        Ok(phase)
    }

    /// Count one second.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePhase` when nothing is running.
    pub fn tick(&mut self) -> Result<TickEvent, RudoroError> {
        let running = self.current.as_mut().ok_or(RudoroError::NoActivePhase)?;

        if running.timer.is_paused() {
            return Ok(TickEvent::Paused);
        }
        if !running.timer.tick() {
            return Ok(TickEvent::Running);
        }

        let phase = running.phase;
        let total = running.timer.total();
        self.current = None;
        self.session.record_completion(phase, total);
        log::info!("{phase} completed");

        let next = self.advance(phase);
        Ok(TickEvent::Completed(PhaseTransition {
            finished: phase,
            elapsed: total,
            outcome: PhaseOutcome::Completed,
            next,
        }))
    }

    /// Handle a user interrupt of the running phase.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePhase` when nothing is running.
    pub fn on_interrupt(&mut self, choice: InterruptChoice) -> Result<PhaseTransition, RudoroError> {
        let running = self.current.take().ok_or(RudoroError::NoActivePhase)?;
        let phase = running.phase;
        let elapsed = running.timer.elapsed();
        self.session.record_partial(phase, elapsed);

        let (outcome, next) = match choice {
            InterruptChoice::Skip => {
                log::info!("{phase} skipped after {}s", elapsed.num_seconds());
                (PhaseOutcome::Skipped, self.advance(phase))
            }
            InterruptChoice::Cancel => {
                log::info!("{phase} cancelled after {}s", elapsed.num_seconds());
                self.finish_set();
                (PhaseOutcome::Cancelled, Phase::Idle)
            }
        };

        Ok(PhaseTransition {
            finished: phase,
            elapsed,
            outcome,
            next,
        })
    }

    /// Pause or resume the running phase. Returns true if now paused.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePhase` when nothing is running.
    pub fn toggle_pause(&mut self) -> Result<bool, RudoroError> {
        let running = self.current.as_mut().ok_or(RudoroError::NoActivePhase)?;
        let paused = running.timer.toggle_pause();
        log::debug!("{} {}", running.phase, if paused { "paused" } else { "resumed" });
        Ok(paused)
    }

    /// Leave the set and go idle, closing the category's activity entry.
    ///
    /// A running phase is cancelled first.
    pub fn finish_set(&mut self) {
        if let Some(running) = self.current.take() {
            self.session.record_partial(running.phase, running.timer.elapsed());
        }
        if self.category.take().is_some() {
            let now = self.now();
            self.session.stop_activity(now);
        }
        self.pending = Phase::Idle;
        self.work_phases_in_set = 0;
    }

    /// Move the cycle past `finished` and return the new pending phase.
    fn advance(&mut self, finished: Phase) -> Phase {
        let next = match finished {
            Phase::Work => {
                self.work_phases_in_set += 1;
                self.settings.break_after(self.work_phases_in_set)
            }
            Phase::ShortBreak => Phase::Work,
            Phase::LongBreak | Phase::Idle => Phase::Idle,
        };

        if next == Phase::Idle {
            log::info!("Set finished");
            self.finish_set();
        } else {
            self.pending = next;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn controller(cycles: u32) -> SessionController {
        SessionController::with_clock(TimerSettings::from_minutes(25, 5, 15, cycles), fixed_clock)
            .unwrap()
    }

    fn run_to_end(ctl: &mut SessionController) -> PhaseTransition {
        loop {
            if let TickEvent::Completed(transition) = ctl.tick().unwrap() {
                return transition;
            }
        }
    }

    fn tick_n(ctl: &mut SessionController, n: usize) {
        for _ in 0..n {
            assert_eq!(ctl.tick().unwrap(), TickEvent::Running);
        }
    }

    #[test]
    fn test_work_runs_to_completion() {
        let mut ctl = controller(4);
        ctl.begin_set(Activity::Estudio).unwrap();
        assert_eq!(ctl.start_next().unwrap(), Phase::Work);

        let transition = run_to_end(&mut ctl);

        assert_eq!(transition.finished, Phase::Work);
        assert_eq!(transition.outcome, PhaseOutcome::Completed);
        assert_eq!(transition.next, Phase::ShortBreak);
        assert_eq!(ctl.session().work_cycles(), 1);
        assert_eq!(ctl.session().work_time(), Duration::minutes(25));
        assert_eq!(ctl.current_phase(), Phase::Idle);
        assert_eq!(ctl.next_phase(), Phase::ShortBreak);
    }

    #[test]
    fn test_interrupt_and_cancel_at_ten_minutes() {
        let mut ctl = controller(4);
        ctl.begin_set(Activity::Trabajo).unwrap();
        ctl.start_next().unwrap();
        tick_n(&mut ctl, 600);

        let transition = ctl.on_interrupt(InterruptChoice::Cancel).unwrap();

        assert_eq!(transition.outcome, PhaseOutcome::Cancelled);
        assert_eq!(transition.elapsed, Duration::minutes(10));
        assert!(transition.set_finished());
        assert_eq!(ctl.session().work_cycles(), 0);
        assert_eq!(ctl.session().work_time(), Duration::minutes(10));
        assert_eq!(ctl.current_phase(), Phase::Idle);
        assert_eq!(ctl.next_phase(), Phase::Idle);
        assert!(ctl.session().open_entry().is_none());
        assert!(ctl.category().is_none());
    }

    #[test]
    fn test_long_break_after_configured_cycles() {
        let mut ctl = controller(3);
        ctl.begin_set(Activity::Lectura).unwrap();

        let mut breaks = Vec::new();
        for _ in 0..3 {
            assert_eq!(ctl.start_next().unwrap(), Phase::Work);
            let work = run_to_end(&mut ctl);
            breaks.push(work.next);

            ctl.start_next().unwrap();
            run_to_end(&mut ctl);
        }

        assert_eq!(
            breaks,
            vec![Phase::ShortBreak, Phase::ShortBreak, Phase::LongBreak]
        );
        assert_eq!(ctl.session().work_cycles(), 3);
        assert_eq!(ctl.session().short_breaks(), 2);
        assert_eq!(ctl.session().long_breaks(), 1);
        assert_eq!(ctl.session().break_time(), Duration::minutes(25));
        // The long break closes the set
        assert_eq!(ctl.next_phase(), Phase::Idle);
        assert!(ctl.session().open_entry().is_none());
    }

    #[test]
    fn test_skip_advances_without_counting() {
        let mut ctl = controller(4);
        ctl.begin_set(Activity::Estudio).unwrap();
        ctl.start_next().unwrap();
        tick_n(&mut ctl, 90);

        let transition = ctl.on_interrupt(InterruptChoice::Skip).unwrap();

        assert_eq!(transition.outcome, PhaseOutcome::Skipped);
        assert_eq!(transition.next, Phase::ShortBreak);
        assert_eq!(ctl.session().work_cycles(), 0);
        assert_eq!(ctl.session().work_time(), Duration::seconds(90));
        assert_eq!(ctl.work_phases_in_set(), 1);
        // Category entry stays open while the set continues
        assert!(ctl.session().open_entry().is_some());
    }

    #[test]
    fn test_skipping_long_break_ends_set() {
        let mut ctl = controller(1);
        ctl.begin_set(Activity::Estudio).unwrap();
        ctl.start_next().unwrap();
        assert_eq!(run_to_end(&mut ctl).next, Phase::LongBreak);

        ctl.start_next().unwrap();
        let transition = ctl.on_interrupt(InterruptChoice::Skip).unwrap();
        assert!(transition.set_finished());
        assert_eq!(ctl.session().long_breaks(), 0);
    }

    #[test]
    fn test_start_phase_while_running_fails() {
        let mut ctl = controller(4);
        ctl.start_phase(Phase::Work, Duration::minutes(25)).unwrap();

        let err = ctl.start_phase(Phase::ShortBreak, Duration::minutes(5));
        assert!(matches!(err, Err(RudoroError::PhaseAlreadyRunning(Phase::Work))));
        assert!(ctl.begin_set(Activity::Estudio).is_err());
        assert!(ctl.set_settings(TimerSettings::default()).is_err());
    }

    #[test]
    fn test_start_phase_rejects_idle_and_zero() {
        let mut ctl = controller(4);
        assert!(matches!(
            ctl.start_phase(Phase::Idle, Duration::minutes(5)),
            Err(RudoroError::InvalidPhase(_))
        ));
        assert!(matches!(
            ctl.start_phase(Phase::Work, Duration::zero()),
            Err(RudoroError::InvalidPhase(_))
        ));
        assert!(ctl.start_next().is_err());
    }

    #[test]
    fn test_tick_and_interrupt_without_phase() {
        let mut ctl = controller(4);
        assert!(matches!(ctl.tick(), Err(RudoroError::NoActivePhase)));
        assert!(matches!(
            ctl.on_interrupt(InterruptChoice::Skip),
            Err(RudoroError::NoActivePhase)
        ));
        assert!(ctl.toggle_pause().is_err());
    }

    #[test]
    fn test_pause_freezes_countdown() {
        let mut ctl = controller(4);
        ctl.start_phase(Phase::Work, Duration::seconds(10)).unwrap();
        tick_n(&mut ctl, 3);

        assert!(ctl.toggle_pause().unwrap());
        assert!(ctl.is_paused());
        for _ in 0..20 {
            assert_eq!(ctl.tick().unwrap(), TickEvent::Paused);
        }
        assert_eq!(ctl.timer().unwrap().elapsed(), Duration::seconds(3));

        assert!(!ctl.toggle_pause().unwrap());
        let transition = run_to_end(&mut ctl);
        assert_eq!(transition.elapsed, Duration::seconds(10));
    }

    #[test]
    fn test_non_structured_category_rejected() {
        let mut ctl = controller(4);
        let err = ctl.begin_set(Activity::Other("Gym".to_string()));
        assert!(matches!(err, Err(RudoroError::InvalidInput(_))));
        assert!(ctl.session().entries().is_empty());
    }

    #[test]
    fn test_finish_set_between_phases() {
        let mut ctl = controller(4);
        ctl.begin_set(Activity::Trabajo).unwrap();
        ctl.start_next().unwrap();
        run_to_end(&mut ctl);

        ctl.finish_set();
        assert_eq!(ctl.next_phase(), Phase::Idle);
        assert!(ctl.session().open_entry().is_none());
        assert_eq!(ctl.session().entries().len(), 1);
    }

    #[test]
    fn test_new_set_resets_cycle_position() {
        let mut ctl = controller(2);
        ctl.begin_set(Activity::Estudio).unwrap();
        ctl.start_next().unwrap();
        run_to_end(&mut ctl);
        ctl.finish_set();

        ctl.begin_set(Activity::Lectura).unwrap();
        ctl.start_next().unwrap();
        assert_eq!(run_to_end(&mut ctl).next, Phase::ShortBreak);
        assert_eq!(ctl.session().entries().len(), 2);
    }
}

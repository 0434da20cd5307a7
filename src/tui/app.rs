//! The interactive application.
//!
//! The main menu and its prompts run in cooked mode through [`Console`].
//! Countdown and stopwatch screens switch to raw mode and poll keys once
//! per tick: Enter pauses or resumes, Ctrl+C interrupts.

use std::io::{BufRead, Write};
use std::time::{Duration as StdDuration, Instant};

use colored::Colorize;
use rand::rngs::ThreadRng;

use super::console::Console;
use super::event::{InputSource, Key};
use super::RawModeGuard;
use crate::config::DisplayConfig;
use crate::core::duration::{format_hhmm, format_mmss};
use crate::error::RudoroError;
use crate::features::focus::{
    quotes, Activity, InterruptChoice, Phase, PhaseOutcome, PhaseTransition, SessionController,
    SessionSummary, Stopwatch, StopwatchChoice, TickEvent, TimerSettings,
};
use crate::features::notify::{BellNotifier, Notifier};
use crate::output::{format_counters, format_time_left, phase_label, render_progress_bar};

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Pomodoro,
    Stopwatch,
    Track,
    Summary,
    Quit,
}

/// What happened during one tick's worth of waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickInput {
    Elapsed,
    TogglePause,
    Interrupt,
}

/// Behavior knobs for the app.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Start phases without waiting for Enter.
    pub auto_start: bool,
    /// Wall-clock length of one tick.
    pub tick: StdDuration,
    /// Switch the terminal to raw mode while timers run.
    pub raw_mode: bool,
    /// Phase screen appearance.
    pub display: DisplayConfig,
    /// Extra activities suggested when tracking.
    pub suggestions: Vec<String>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            auto_start: false,
            tick: StdDuration::from_secs(1),
            raw_mode: true,
            display: DisplayConfig::default(),
            suggestions: Vec::new(),
        }
    }
}

/// Interactive Pomodoro application state.
pub struct App<I, R, W> {
    controller: SessionController,
    /// Settings restored after a customised set.
    base_settings: TimerSettings,
    input: I,
    console: Console<R, W>,
    notifier: Box<dyn Notifier>,
    options: AppOptions,
    rng: ThreadRng,
}

impl<I: InputSource, R: BufRead, W: Write> App<I, R, W> {
    /// Create a new app.
    pub fn new(
        controller: SessionController,
        input: I,
        console: Console<R, W>,
        notifier: Box<dyn Notifier>,
        options: AppOptions,
    ) -> Self {
        Self {
            base_settings: controller.settings().clone(),
            controller,
            input,
            console,
            notifier,
            options,
            rng: rand::thread_rng(),
        }
    }

    /// Get the controller.
    pub const fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Consume the app, returning the console writer.
    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Run the main menu until the user quits or input ends.
    ///
    /// Returns the final session summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails.
    pub fn run(&mut self) -> Result<SessionSummary, RudoroError> {
        loop {
            self.draw_menu()?;
            let choice = self.console.choose(
                &format!("{}", "Your choice (1-5): ".bold()),
                &[
                    ("1", MenuChoice::Pomodoro),
                    ("2", MenuChoice::Stopwatch),
                    ("3", MenuChoice::Track),
                    ("4", MenuChoice::Summary),
                    ("5", MenuChoice::Quit),
                ],
            )?;

            match choice {
                Some(MenuChoice::Pomodoro) => self.pomodoro_set()?,
                Some(MenuChoice::Stopwatch) => self.stopwatch()?,
                Some(MenuChoice::Track) => self.track_activity()?,
                Some(MenuChoice::Summary) => self.show_summary()?,
                Some(MenuChoice::Quit) | None => break,
            }
        }

        let now = self.controller.now();
        self.controller.session_mut().stop_activity(now);
        let summary = self.summary();
        log::info!("Session ended");
        Ok(summary)
    }

    /// Summarize the session as of now.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_session(self.controller.session(), self.controller.now())
    }

    fn draw_menu(&mut self) -> Result<(), RudoroError> {
        let mut lines = vec![
            "--- rudoro: Pomodoro timer ---".green().bold().to_string(),
            "Outwork others consistently.".dimmed().to_string(),
            String::new(),
        ];

        if self.controller.session().has_progress() {
            lines.push("--- Current session ---".blue().bold().to_string());
            lines.push(self.summary().format_totals());
            lines.push(String::new());
        }

        lines.push("Choose an option:".bold().to_string());
        lines.push(format!("  {}", "1. Start a Pomodoro set".green()));
        lines.push(format!("  {}", "2. Start the stopwatch (counts up)".blue()));
        lines.push(format!("  {}", "3. Track another activity".cyan()));
        lines.push(format!("  {}", "4. Show session summary".yellow()));
        lines.push(format!("  {}", "5. Quit".red()));
        self.console.draw(&lines.join("\n"))
    }

    fn pomodoro_set(&mut self) -> Result<(), RudoroError> {
        let keys: Vec<String> = (1..=Activity::STRUCTURED.len())
            .map(|n| n.to_string())
            .collect();
        let mut prompt = String::from("Category:\n");
        let mut categories: Vec<(&str, usize)> = Vec::with_capacity(keys.len());
        for (index, (key, category)) in keys.iter().zip(Activity::STRUCTURED.iter()).enumerate() {
            prompt.push_str(&format!("  {key}. {category}\n"));
            categories.push((key.as_str(), index));
        }
        prompt.push_str(&format!("Your choice (1-{}): ", keys.len()));

        let Some(index) = self.console.choose(&prompt, &categories)? else {
            return Ok(());
        };
        let category = Activity::STRUCTURED[index].clone();

        let Some(customise) = self.console.confirm("Customise durations for this set?")? else {
            return Ok(());
        };
        let settings = if customise {
            match self.ask_settings()? {
                Some(settings) => settings,
                None => return Ok(()),
            }
        } else {
            self.base_settings.clone()
        };
        self.controller.set_settings(settings)?;

        let s = self.controller.settings();
        self.console.say(&format!(
            "{} min work, {} min short break, {} min long break after {} cycles.",
            s.work.num_minutes(),
            s.short_break.num_minutes(),
            s.long_break.num_minutes(),
            s.cycles_before_long_break
        ))?;

        self.controller.begin_set(category)?;
        let result = self.run_set();
        // Leave the set cleanly even if the terminal failed mid-phase
        self.controller.finish_set();
        self.controller.set_settings(self.base_settings.clone())?;
        result
    }

    fn ask_settings(&mut self) -> Result<Option<TimerSettings>, RudoroError> {
        let Some(work) = self.console.ask_positive("Work duration (minutes): ")? else {
            return Ok(None);
        };
        let Some(short) = self.console.ask_positive("Short break duration (minutes): ")? else {
            return Ok(None);
        };
        let Some(long) = self.console.ask_positive("Long break duration (minutes): ")? else {
            return Ok(None);
        };
        let Some(cycles) = self
            .console
            .ask_positive("Work cycles before the long break: ")?
        else {
            return Ok(None);
        };

        Ok(Some(TimerSettings::from_minutes(
            i64::from(work),
            i64::from(short),
            i64::from(long),
            cycles,
        )))
    }

    fn run_set(&mut self) -> Result<(), RudoroError> {
        let before = (
            self.controller.session().work_cycles(),
            self.controller.session().short_breaks(),
            self.controller.session().long_breaks(),
        );

        loop {
            let next = self.controller.next_phase();
            if next == Phase::Idle {
                break;
            }

            if !self.options.auto_start {
                let prompt = format!("Press Enter to start the {} phase...", phase_label(next));
                if !self.console.wait_enter(&prompt)? {
                    return Ok(());
                }
            }

            self.controller.start_next()?;
            let transition = self.run_phase()?;
            self.report_transition(&transition)?;

            if transition.outcome == PhaseOutcome::Cancelled {
                break;
            }
        }

        let session = self.controller.session();
        let lines = [
            "Pomodoro set finished.".blue().bold().to_string(),
            format!("Pomodoros completed:    {}", session.work_cycles() - before.0)
                .green()
                .to_string(),
            format!("Short breaks completed: {}", session.short_breaks() - before.1)
                .yellow()
                .to_string(),
            format!("Long breaks completed:  {}", session.long_breaks() - before.2)
                .blue()
                .to_string(),
        ];
        self.console.say(&lines.join("\n"))?;
        self.console
            .wait_enter(&"Press Enter to return to the menu...".dimmed().to_string())?;
        Ok(())
    }

    /// Count the running phase down until it ends.
    fn run_phase(&mut self) -> Result<PhaseTransition, RudoroError> {
        let phase = self.controller.current_phase();
        let quote = quotes::pick(phase, &mut self.rng);
        let _raw = RawModeGuard::enable(self.options.raw_mode)?;

        loop {
            self.draw_phase(quote)?;

            match self.wait_tick()? {
                TickInput::Elapsed => {
                    if let TickEvent::Completed(transition) = self.controller.tick()? {
                        return Ok(transition);
                    }
                }
                TickInput::TogglePause => {
                    self.controller.toggle_pause()?;
                }
                TickInput::Interrupt => {
                    if let Some(choice) = self.ask_interrupt(phase)? {
                        return self.controller.on_interrupt(choice);
                    }
                }
            }
        }
    }

    /// Wait out one tick, returning early on a key that matters.
    fn wait_tick(&mut self) -> Result<TickInput, RudoroError> {
        let deadline = Instant::now() + self.options.tick;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.input.poll_key(remaining)? {
                None => return Ok(TickInput::Elapsed),
                Some(Key::Enter) => return Ok(TickInput::TogglePause),
                Some(Key::Interrupt) => return Ok(TickInput::Interrupt),
                Some(_) => {}
            }
        }
    }

    fn ask_interrupt(&mut self, phase: Phase) -> Result<Option<InterruptChoice>, RudoroError> {
        let prompt = format!(
            "{}\n{} {} skip to the next phase / {} cancel the set / {} keep going",
            format!("{} interrupted!", phase.display_name()).red().bold(),
            "What now?".bold(),
            "[S]".yellow(),
            "[C]".red(),
            "[Esc]".dimmed()
        );
        self.console.draw(&prompt)?;

        loop {
            match self.input.read_key()? {
                Key::Char('s') => return Ok(Some(InterruptChoice::Skip)),
                Key::Char('c') => return Ok(Some(InterruptChoice::Cancel)),
                Key::Escape => return Ok(None),
                _ => {}
            }
        }
    }

    fn draw_phase(&mut self, quote: &str) -> Result<(), RudoroError> {
        let Some(timer) = self.controller.timer() else {
            return Ok(());
        };
        let phase = self.controller.current_phase();
        let category = self
            .controller
            .category()
            .map_or_else(String::new, |c| format!(" ({c})"));

        let mut lines = vec![
            format!("--- {}{} ---", phase_label(phase), category),
            format_counters(self.controller.session()),
            "-".repeat(60),
        ];
        if self.options.display.show_quotes {
            lines.push(String::new());
            lines.push(format!("\"{quote}\"").dimmed().to_string());
        }
        lines.push(String::new());
        lines.push(format!(
            "{} Time left: {}",
            render_progress_bar(timer.progress(), self.options.display.bar_width),
            format_time_left(timer.remaining())
        ));
        lines.push(String::new());
        if timer.is_paused() {
            lines.push(
                "PAUSED. Press [Enter] to resume..."
                    .yellow()
                    .bold()
                    .to_string(),
            );
        } else {
            lines.push(
                "Press [Enter] to pause, [Ctrl+C] to interrupt."
                    .dimmed()
                    .to_string(),
            );
        }

        self.console.draw(&lines.join("\n"))
    }

    fn report_transition(&mut self, transition: &PhaseTransition) -> Result<(), RudoroError> {
        let phase = transition.finished;
        let message = match transition.outcome {
            PhaseOutcome::Completed => {
                self.notify(phase)?;
                format!("{} complete! Time to switch.", phase_label(phase))
            }
            PhaseOutcome::Skipped => format!(
                "{} skipped after {}.",
                phase_label(phase),
                format_mmss(transition.elapsed)
            ),
            PhaseOutcome::Cancelled => format!(
                "{} Come back when you're ready.",
                "Set cancelled.".red().bold()
            ),
        };
        self.console.say(&message)
    }

    fn notify(&mut self, phase: Phase) -> Result<(), RudoroError> {
        match self.notifier.phase_finished(phase) {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => {
                log::warn!("{e}");
                self.console
                    .say(&format!("Warning: {e}. Continuing without sound.").red().to_string())?;
                BellNotifier.phase_finished(phase).or_else(|e| {
                    log::debug!("Bell failed: {e}");
                    Ok(())
                })
            }
            Err(e) => Err(e),
        }
    }

    fn stopwatch(&mut self) -> Result<(), RudoroError> {
        let mut stopwatch = Stopwatch::new();

        {
            let _raw = RawModeGuard::enable(self.options.raw_mode)?;
            loop {
                self.draw_stopwatch(&stopwatch)?;
                match self.wait_tick()? {
                    TickInput::Elapsed => stopwatch.tick(),
                    TickInput::TogglePause => {
                        stopwatch.toggle_pause();
                    }
                    TickInput::Interrupt => break,
                }
            }
        }

        let elapsed = stopwatch.elapsed();
        self.console.draw(&format!(
            "{}\nTime counted: {}",
            "Stopwatch stopped.".red().bold(),
            format_time_left(elapsed)
        ))?;
        let choice = self.console.choose(
            &format!(
                "{} add it to work time / {} discard it: ",
                "[K]".green(),
                "[D]".red()
            ),
            &[
                ("k", StopwatchChoice::Keep),
                ("d", StopwatchChoice::Discard),
            ],
        )?;
        let choice = choice.unwrap_or(StopwatchChoice::Discard);

        let added = self
            .controller
            .session_mut()
            .record_stopwatch(elapsed, choice);
        log::info!(
            "Stopwatch stopped at {}s, kept {}s",
            elapsed.num_seconds(),
            added.num_seconds()
        );

        let message = match choice {
            StopwatchChoice::Keep => format!("Added {} to work time.", format_mmss(added))
                .green()
                .to_string(),
            StopwatchChoice::Discard => "Stopwatch time discarded.".red().to_string(),
        };
        self.console.say(&message)?;
        self.console
            .wait_enter(&"Press Enter to return to the menu...".dimmed().to_string())?;
        Ok(())
    }

    fn draw_stopwatch(&mut self, stopwatch: &Stopwatch) -> Result<(), RudoroError> {
        let mut lines = vec![
            "--- STOPWATCH ---".blue().bold().to_string(),
            format_counters(self.controller.session()),
            "-".repeat(60),
            String::new(),
            format!(
                "{} {}",
                "Elapsed:".bold(),
                format_mmss(stopwatch.elapsed()).green().bold()
            ),
            String::new(),
        ];
        if stopwatch.is_paused() {
            lines.push("PAUSED. Press [Enter] to resume...".yellow().bold().to_string());
        } else {
            lines.push(
                "Press [Enter] to pause, [Ctrl+C] to stop."
                    .dimmed()
                    .to_string(),
            );
        }
        self.console.draw(&lines.join("\n"))
    }

    fn track_activity(&mut self) -> Result<(), RudoroError> {
        let mut prompt = String::from("Activity to track");
        if !self.options.suggestions.is_empty() {
            prompt.push_str(&format!(" (e.g. {})", self.options.suggestions.join(", ")));
        }
        prompt.push_str(": ");

        let Some(label) = self.console.ask_non_empty(&prompt)? else {
            return Ok(());
        };
        let now = self.controller.now();
        self.controller
            .session_mut()
            .start_activity(Activity::parse(&label), now);

        loop {
            let current = self
                .controller
                .session()
                .open_entry()
                .map(|e| e.activity.to_string())
                .unwrap_or_default();
            self.console
                .say(&format!("Tracking {}.", current.cyan().bold()))?;

            let answer = self
                .console
                .ask("Type another activity to switch, or press Enter to stop: ")?;
            let now = self.controller.now();
            match answer {
                Some(next) if !next.is_empty() => {
                    self.controller
                        .session_mut()
                        .start_activity(Activity::parse(&next), now);
                }
                _ => {
                    let length = self
                        .controller
                        .session_mut()
                        .stop_activity(now)
                        .unwrap_or_else(chrono::Duration::zero);
                    self.console.say(&format!(
                        "Stopped {} after {}.",
                        current.cyan(),
                        format_hhmm(length)
                    ))?;
                    return Ok(());
                }
            }
        }
    }

    fn show_summary(&mut self) -> Result<(), RudoroError> {
        let text = self.summary().format();
        self.console.draw(&text)?;
        self.console
            .wait_enter(&"Press Enter to return to the menu...".dimmed().to_string())?;
        Ok(())
    }
}

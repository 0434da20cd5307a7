//! Colored terminal rendering for the phase screen.

use chrono::Duration;
use colored::{ColoredString, Colorize};

use crate::core::duration::format_mmss;
use crate::features::focus::{Phase, Session};

/// Color a phase name: work blue, breaks yellow.
#[must_use]
pub fn phase_label(phase: Phase) -> ColoredString {
    let name = phase.display_name().to_uppercase();
    match phase {
        Phase::Work => name.blue().bold(),
        Phase::ShortBreak | Phase::LongBreak => name.yellow().bold(),
        Phase::Idle => name.normal(),
    }
}

/// Render a time as MM:SS colored by how much is left.
///
/// Red at ten seconds or less, yellow within the last minute, green
/// otherwise.
#[must_use]
pub fn format_time_left(remaining: Duration) -> ColoredString {
    let seconds = remaining.num_seconds();
    let text = format_mmss(remaining);
    let colored = if seconds <= 0 {
        text.green()
    } else if seconds <= 10 {
        text.red()
    } else if seconds <= 60 {
        text.yellow()
    } else {
        text.green()
    };
    colored.bold()
}

/// Render a progress bar with its percentage.
///
/// Filled cells are green, the rest grey. The percentage is red below 25%,
/// yellow below 50% and green from there on.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    let percent = progress * 100.0;
    let percent_text = format!("{percent:.0}%");
    let percent_text = if percent < 25.0 {
        percent_text.red()
    } else if percent < 50.0 {
        percent_text.yellow()
    } else {
        percent_text.green()
    };

    format!(
        "[{}{}] {}",
        "█".repeat(filled).green(),
        "-".repeat(empty).white().dimmed(),
        percent_text
    )
}

/// Render the one-line session counters.
#[must_use]
pub fn format_counters(session: &Session) -> String {
    format!(
        "{} {} | {} | {}",
        "Session:".bold(),
        format!("Pomodoros: {}", session.work_cycles()).green(),
        format!("Breaks: {}", session.short_breaks()).yellow(),
        format!("Long breaks: {}", session.long_breaks()).blue()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_render_progress_bar() {
        colored::control::set_override(false);
        let bar = render_progress_bar(0.5, 10);
        assert_eq!(bar, "[█████-----] 50%");

        let bar = render_progress_bar(0.0, 4);
        assert_eq!(bar, "[----] 0%");

        let bar = render_progress_bar(1.5, 4);
        assert_eq!(bar, "[████] 100%");
    }

    #[test]
    fn test_format_time_left_text() {
        colored::control::set_override(false);
        assert_eq!(format_time_left(Duration::seconds(9)).to_string(), "00:09");
        assert_eq!(format_time_left(Duration::minutes(25)).to_string(), "25:00");
    }

    #[test]
    fn test_format_time_left_colors() {
        assert_eq!(format_time_left(Duration::seconds(5)).fgcolor(), Some(colored::Color::Red));
        assert_eq!(format_time_left(Duration::seconds(45)).fgcolor(), Some(colored::Color::Yellow));
        assert_eq!(format_time_left(Duration::minutes(5)).fgcolor(), Some(colored::Color::Green));
    }

    #[test]
    fn test_format_counters() {
        colored::control::set_override(false);
        let mut session = Session::new(Local.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap());
        session.record_completion(Phase::Work, Duration::minutes(25));
        let line = format_counters(&session);
        assert!(line.contains("Pomodoros: 1"));
        assert!(line.contains("Long breaks: 0"));
    }
}

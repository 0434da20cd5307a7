//! Session summaries.
//!
//! Builds a snapshot of a [`Session`] for display or JSON output.

use chrono::{DateTime, Duration, Local};
use colored::Colorize;
use serde::Serialize;

use super::session::Session;
use crate::core::duration::{format_hhmm, format_mmss};

/// Time spent on one activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityTotal {
    /// Activity label
    pub activity: String,
    /// Total seconds across all entries
    pub seconds: i64,
    /// Number of entries
    pub entries: usize,
}

/// One row of the activity timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    /// Activity label
    pub activity: String,
    /// When the entry started
    pub started_at: DateTime<Local>,
    /// When the entry ended (None while open)
    pub ended_at: Option<DateTime<Local>>,
    /// Length in seconds, open entries measured up to the summary time
    pub seconds: i64,
}

/// A point-in-time view of the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// When the session began
    pub started_at: DateTime<Local>,
    /// When the summary was taken
    pub generated_at: DateTime<Local>,
    /// Completed work phases
    pub work_cycles: u32,
    /// Completed short breaks
    pub short_breaks: u32,
    /// Completed long breaks
    pub long_breaks: u32,
    /// Accumulated work seconds
    pub work_seconds: i64,
    /// Accumulated break seconds
    pub break_seconds: i64,
    /// Time per activity, largest first
    pub by_activity: Vec<ActivityTotal>,
    /// Entries in the order they were opened
    pub timeline: Vec<TimelineEntry>,
}

impl SessionSummary {
    /// Summarize a session as of `now`.
    #[must_use]
    pub fn from_session(session: &Session, now: DateTime<Local>) -> Self {
        let timeline: Vec<TimelineEntry> = session
            .entries()
            .iter()
            .map(|entry| TimelineEntry {
                activity: entry.activity.label().to_string(),
                started_at: entry.started_at,
                ended_at: entry.ended_at,
                seconds: entry.duration(now).num_seconds(),
            })
            .collect();

        // Keep first-seen order for ties
        let mut by_activity: Vec<ActivityTotal> = Vec::new();
        for row in &timeline {
            match by_activity.iter_mut().find(|t| t.activity == row.activity) {
                Some(total) => {
                    total.seconds += row.seconds;
                    total.entries += 1;
                }
                None => by_activity.push(ActivityTotal {
                    activity: row.activity.clone(),
                    seconds: row.seconds,
                    entries: 1,
                }),
            }
        }
        by_activity.sort_by(|a, b| b.seconds.cmp(&a.seconds));

        Self {
            started_at: session.started_at(),
            generated_at: now,
            work_cycles: session.work_cycles(),
            short_breaks: session.short_breaks(),
            long_breaks: session.long_breaks(),
            work_seconds: session.work_time().num_seconds(),
            break_seconds: session.break_time().num_seconds(),
            by_activity,
            timeline,
        }
    }

    /// Format the counters block shown on the menu and at exit.
    #[must_use]
    pub fn format_totals(&self) -> String {
        let lines = [
            format!("Pomodoros completed:    {}", self.work_cycles)
                .green()
                .to_string(),
            format!("Short breaks completed: {}", self.short_breaks)
                .yellow()
                .to_string(),
            format!("Long breaks completed:  {}", self.long_breaks)
                .blue()
                .to_string(),
            format!(
                "{} {}",
                "Total work time: ".bold(),
                format_hhmm(Duration::seconds(self.work_seconds)).green()
            ),
            format!(
                "{} {}",
                "Total break time:".bold(),
                format_hhmm(Duration::seconds(self.break_seconds)).yellow()
            ),
        ];
        lines.join("\n")
    }

    /// Format the full summary for display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Session summary".bold().blue().to_string());
        lines.push("═".repeat(50));
        lines.push(format!(
            "Started {}",
            self.started_at.format("%Y-%m-%d %H:%M")
        ));
        lines.push(String::new());
        lines.push(self.format_totals());

        if !self.by_activity.is_empty() {
            lines.push(String::new());
            lines.push("By activity".bold().to_string());
            lines.push("─".repeat(40));
            for total in &self.by_activity {
                lines.push(format!(
                    "  {:<20} {:>8} ({} {})",
                    total.activity,
                    format_hhmm(Duration::seconds(total.seconds)),
                    total.entries,
                    if total.entries == 1 { "entry" } else { "entries" }
                ));
            }
        }

        if !self.timeline.is_empty() {
            lines.push(String::new());
            lines.push("Timeline".bold().to_string());
            lines.push("─".repeat(40));
            for row in &self.timeline {
                let end = row.ended_at.map_or_else(
                    || "now".dimmed().to_string(),
                    |t| t.format("%H:%M:%S").to_string(),
                );
                lines.push(format!(
                    "  {} - {:<8}  {:<20} {}",
                    row.started_at.format("%H:%M:%S"),
                    end,
                    row.activity,
                    format_mmss(Duration::seconds(row.seconds)).dimmed()
                ));
            }
        }

        lines.join("\n")
    }
}

//! Activities that time can be attributed to.

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

/// A named activity.
///
/// The three structured categories may host timed Pomodoro phases. Any
/// other label is tracked passively by wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Activity {
    /// Study
    Estudio,
    /// Work
    Trabajo,
    /// Reading
    Lectura,
    /// Free-form, passively tracked activity
    Other(String),
}

impl Activity {
    /// The categories that can run a Pomodoro set.
    pub const STRUCTURED: [Self; 3] = [Self::Estudio, Self::Trabajo, Self::Lectura];

    /// Parse an activity label. Structured names match case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "estudio" => Self::Estudio,
            "trabajo" => Self::Trabajo,
            "lectura" => Self::Lectura,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Estudio => "Estudio",
            Self::Trabajo => "Trabajo",
            Self::Lectura => "Lectura",
            Self::Other(label) => label,
        }
    }

    /// Check if this activity can host timed phases.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for Activity {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Activity> for String {
    fn from(activity: Activity) -> Self {
        activity.label().to_string()
    }
}

/// An interval of wall-clock time attributed to an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// What the time was spent on
    pub activity: Activity,
    /// When the entry was opened
    pub started_at: DateTime<Local>,
    /// When the entry was closed (None while open)
    pub ended_at: Option<DateTime<Local>>,
}

impl ActivityEntry {
    /// Open a new entry.
    #[must_use]
    pub fn open(activity: Activity, started_at: DateTime<Local>) -> Self {
        Self {
            activity,
            started_at,
            ended_at: None,
        }
    }

    /// Check if the entry is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Length of the entry, measuring open entries up to `now`.
    #[must_use]
    pub fn duration(&self, now: DateTime<Local>) -> Duration {
        let end = self.ended_at.unwrap_or(now);
        end.signed_duration_since(self.started_at).max(Duration::zero())
    }
}

//! Pomodoro sessions and activity tracking.
//!
//! - Phases and the fixed work/break cycle
//! - The session controller and its countdown
//! - Stopwatch and passive activity tracking
//! - Session summaries

pub mod activity;
pub mod controller;
pub mod cycle;
pub mod phase;
pub mod quotes;
pub mod session;
pub mod summary;
pub mod timer;

pub use activity::{Activity, ActivityEntry};
pub use controller::{
    InterruptChoice, PhaseOutcome, PhaseTransition, SessionController, TickEvent,
};
pub use cycle::TimerSettings;
pub use phase::Phase;
pub use session::{Session, StopwatchChoice};
pub use summary::SessionSummary;
pub use timer::{Stopwatch, Timer};

//! Command implementations for rudoro.
//!
//! Each command returns the text to print on stdout.

mod completions;
mod config;
mod run;

pub use completions::generate_completions;
pub use config::config;
pub use run::{notifier_for, options_for, run, settings_for};

//! Configuration management for rudoro.
//!
//! This module handles loading and saving configuration from `~/.rudoro/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ActivitiesConfig, Config, DisplayConfig, SoundConfig, TimerConfig};

//! rudoro - A Pomodoro timer and activity tracker for the terminal
//!
//! This crate runs work/break cycles from an interactive menu, tracks time
//! per activity and summarizes the session when you quit.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::RudoroError;

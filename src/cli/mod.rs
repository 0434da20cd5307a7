//! Command-line interface for rudoro.

pub mod args;
pub mod commands;

//! Shared utilities for rudoro.

pub mod duration;

pub use duration::{format_hhmm, format_mmss, parse_duration};

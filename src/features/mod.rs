//! Feature implementations for rudoro.
//!
//! - Focus: phases, the session controller, activity tracking, summaries
//! - Notifications when a phase ends

pub mod focus;
pub mod notify;

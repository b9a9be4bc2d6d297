//! Alert engine crate.
//!
//! Matches active weather against the special list and runs the
//! poll/announce/suppress loop.

pub mod engine;
pub mod messenger;
pub mod runner;

pub use engine::AlertEngine;
pub use messenger::Messenger;
pub use runner::{new_announced_set, run_cycle, start_weather_alerts, AnnouncedSet};

//! Utility Module
//!
//! - [`Clock`]: start/stop gated elapsed-time accumulator driving every animator
//! - [`Timer`]: wall-clock frame delta for native hosts

pub mod time;

pub use time::{Clock, PlaybackState, Timer};

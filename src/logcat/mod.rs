//! Logcat line inspection.
//!
//! This module provides:
//! - `patterns`: PID extraction across the logcat output formats and
//!   detection of process death announcements

pub mod patterns;

// Re-export commonly used types
pub use patterns::{detect_death, extract_pid, DEATH_PATTERNS, PID_PATTERNS};

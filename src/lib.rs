//! logcatp library
//!
//! Annotates Android `logcat` lines with the name of the process that
//! emitted them. The PID is located with a fixed, ordered set of patterns
//! covering the logcat output formats; names come from
//! `/proc/<pid>/cmdline` on the device, read through `adb` and cached.
//!
//! # Usage
//!
//! ```rust
//! use logcatp::{LineAnnotator, NameCache, NameProbe};
//!
//! struct Static;
//!
//! impl NameProbe for Static {
//!     fn probe(&mut self, pid: u32) -> String {
//!         format!("com.example.app {}", pid)
//!     }
//! }
//!
//! let mut annotator = LineAnnotator::new(NameCache::default(), Static, 25);
//! let (mut out, mut diag) = (Vec::new(), Vec::new());
//! annotator
//!     .annotate(b"I/Tag    ( 1234): hello\n", &mut out, &mut diag)
//!     .unwrap();
//! assert_eq!(out, b"[com.example.app 1234     ] I/Tag    ( 1234): hello\n");
//! ```

pub mod annotator;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logcat;
pub mod process;
pub mod startup_checks;

// Re-export main types for convenience
pub use annotator::{format_line, LineAnnotator, DEFAULT_WIDTH, PID_NOT_FOUND};
pub use config::Config;
pub use error::LogcatpError;
pub use logcat::{detect_death, extract_pid};
pub use process::{AdbProbe, CmdlineProbe, CmdlineSource, NameCache, NameProbe, RetryPolicy};

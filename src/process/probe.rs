//! Process name resolution through `adb`.
//!
//! This module reads `/proc/<pid>/cmdline` on the connected device and turns
//! it into a displayable `"<cmdline> <pid>"` string. Android briefly reports
//! `<pre-initialized>` for freshly forked processes, so such results are
//! retried a bounded number of times.

use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Transient cmdline reported before argv is installed.
pub const PRE_INITIALIZED: &str = "<pre-initialized>";
/// Name part used when the probe could not run.
pub const NOT_FOUND: &str = "(not found)";
/// Name part used when every attempt produced an empty cmdline.
pub const UNKNOWN: &str = "(unknown)";

pub const DEFAULT_PRE_INITIALIZED_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 200;

/// Resolves a PID into the name shown in the annotation column.
pub trait NameProbe {
    /// Returns `"<name-part> <pid>"`; never empty.
    fn probe(&mut self, pid: u32) -> String;
}

/// Single attempt at reading the raw cmdline of a PID.
pub trait CmdlineSource {
    /// Raw cmdline bytes, or `None` if the reader could not run or failed.
    fn fetch_cmdline(&mut self, pid: u32) -> Option<Vec<u8>>;
}

/// How often and how patiently `<pre-initialized>` is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_PRE_INITIALIZED_RETRIES,
            interval: Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS),
        }
    }
}

/// Reads cmdlines by running `adb shell cat /proc/<pid>/cmdline`.
#[derive(Debug, Clone)]
pub struct AdbCmdline {
    adb_path: String,
}

impl AdbCmdline {
    pub fn new(adb_path: impl Into<String>) -> Self {
        Self {
            adb_path: adb_path.into(),
        }
    }
}

impl CmdlineSource for AdbCmdline {
    fn fetch_cmdline(&mut self, pid: u32) -> Option<Vec<u8>> {
        // output() waits for the child, so it is reaped on every path.
        let result = Command::new(&self.adb_path)
            .arg("shell")
            .arg(format!("cat /proc/{pid}/cmdline 2>/dev/null"))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match result {
            Ok(output) if output.status.success() => Some(output.stdout),
            Ok(output) => {
                debug!(
                    "{} shell cat /proc/{}/cmdline exited with {}",
                    self.adb_path, pid, output.status
                );
                None
            }
            Err(e) => {
                debug!("Failed to run {}: {}", self.adb_path, e);
                None
            }
        }
    }
}

/// Converts raw cmdline bytes into a single line of text.
///
/// Trailing NULs are dropped and each remaining NUL becomes one space.
pub fn decode_cmdline(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.trim_end_matches('\0').replace('\0', " ")
}

/// Name probe combining a cmdline source with the retry policy.
pub struct CmdlineProbe<S> {
    source: S,
    policy: RetryPolicy,
}

/// The production probe.
pub type AdbProbe = CmdlineProbe<AdbCmdline>;

impl AdbProbe {
    pub fn adb(adb_path: impl Into<String>, policy: RetryPolicy) -> Self {
        CmdlineProbe::new(AdbCmdline::new(adb_path), policy)
    }
}

impl<S: CmdlineSource> CmdlineProbe<S> {
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// One attempt: the decoded cmdline, or `(not found)` on failure.
    fn attempt(&mut self, pid: u32) -> String {
        match self.source.fetch_cmdline(pid) {
            Some(raw) => decode_cmdline(&raw),
            None => NOT_FOUND.to_string(),
        }
    }

    /// Resolves the name part, retrying while the device reports
    /// `<pre-initialized>`.
    pub fn resolve_name_part(&mut self, pid: u32) -> String {
        let mut name = UNKNOWN.to_string();

        for _ in 0..=self.policy.retries {
            let raw = self.attempt(pid);
            if raw == PRE_INITIALIZED {
                debug!("{} detected for pid {}", PRE_INITIALIZED, pid);
                thread::sleep(self.policy.interval);
                continue;
            }
            if !raw.is_empty() {
                name = raw;
            }
            break;
        }

        name
    }
}

impl<S: CmdlineSource> NameProbe for CmdlineProbe<S> {
    fn probe(&mut self, pid: u32) -> String {
        debug!("Getting process name for {}", pid);
        format!("{} {}", self.resolve_name_part(pid), pid)
    }
}

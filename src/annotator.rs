//! Per-line annotation pipeline.
//!
//! For every input line the annotator extracts the PID, resolves its name
//! through the cache, handles death announcements and writes
//! `[<name padded to width>] <original line>`.

use crate::error::LogcatpError;
use crate::input::for_each_line;
use crate::logcat::patterns::{detect_death, extract_pid, matched_format};
use crate::process::{NameCache, NameProbe};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, trace};

pub const DEFAULT_WIDTH: usize = 40;
/// Name column placeholder for lines without a recognisable PID.
pub const PID_NOT_FOUND: &str = "(pid not found)";
/// Prefix of diagnostics written to the error stream.
pub const DIAGNOSTIC_PREFIX: &str = "logcatp: ";

/// Builds one output line. `name` is left-justified and space-padded to
/// `width` characters; longer names are kept whole.
pub fn format_line(name: &str, line: &[u8], width: usize) -> Vec<u8> {
    let pad = width.saturating_sub(name.chars().count());
    let mut out = Vec::with_capacity(name.len() + pad + line.len() + 3);
    out.push(b'[');
    out.extend_from_slice(name.as_bytes());
    out.resize(out.len() + pad, b' ');
    out.extend_from_slice(b"] ");
    out.extend_from_slice(line);
    out
}

/// Owns the name cache and probe for the lifetime of a session.
pub struct LineAnnotator<P> {
    cache: NameCache,
    probe: P,
    width: usize,
}

impl<P: NameProbe> LineAnnotator<P> {
    pub fn new(cache: NameCache, probe: P, width: usize) -> Self {
        Self {
            cache,
            probe,
            width,
        }
    }

    pub fn cache(&self) -> &NameCache {
        &self.cache
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Annotates `line`, writing the result to `out`. A death diagnostic, if
    /// any, is written and flushed to `diag` first.
    pub fn annotate<W: Write, D: Write>(
        &mut self,
        line: &[u8],
        out: &mut W,
        diag: &mut D,
    ) -> Result<(), LogcatpError> {
        let name = match extract_pid(line) {
            Some(pid) => {
                trace!("pid {} from {:?} line", pid, matched_format(line));
                self.cache.lookup(pid, &mut self.probe).to_string()
            }
            None => PID_NOT_FOUND.to_string(),
        };

        if let Some(died) = detect_death(line) {
            // A lost diagnostic does not stop the filter.
            if let Err(e) = writeln!(diag, "{}Process {} died", DIAGNOSTIC_PREFIX, died)
                .and_then(|_| diag.flush())
            {
                debug!("Failed to write death diagnostic for pid {}: {}", died, e);
            }
            self.cache.evict(died);
        }

        out.write_all(&format_line(&name, line, self.width))
            .map_err(LogcatpError::Output)
    }

    /// Annotates every line of `files` (stdin if empty) in order.
    pub fn run<W: Write, D: Write>(
        &mut self,
        files: &[PathBuf],
        out: &mut W,
        diag: &mut D,
    ) -> Result<(), LogcatpError> {
        let mut lines = 0u64;
        for_each_line(files, |line| {
            lines += 1;
            self.annotate(line, out, diag)
        })?;
        out.flush().map_err(LogcatpError::Output)?;
        debug!(
            "Annotated {} lines, {} names cached",
            lines,
            self.cache.len()
        );
        Ok(())
    }
}

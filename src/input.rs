//! Line source for the filter.
//!
//! Reads the named files in order, or stdin when none are given. `-` names
//! stdin. Lines are delivered as raw bytes including their `\n`; a last line
//! without a terminator is delivered as-is.

use crate::error::LogcatpError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

const STDIN_NAME: &str = "-";

/// Feeds every line of `reader` to `f`. `path` names the source in errors.
pub fn for_each_line_in<R, F>(reader: &mut R, path: &Path, f: &mut F) -> Result<(), LogcatpError>
where
    R: BufRead,
    F: FnMut(&[u8]) -> Result<(), LogcatpError>,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| LogcatpError::Input {
                path: path.to_path_buf(),
                source,
            })?;
        if n == 0 {
            return Ok(());
        }
        f(&line)?;
    }
}

/// Feeds every line of `paths` (stdin if empty) to `f`, stopping at the
/// first error.
pub fn for_each_line<F>(paths: &[PathBuf], mut f: F) -> Result<(), LogcatpError>
where
    F: FnMut(&[u8]) -> Result<(), LogcatpError>,
{
    if paths.is_empty() {
        return read_stdin(&mut f);
    }

    for path in paths {
        if path.as_os_str() == STDIN_NAME {
            read_stdin(&mut f)?;
            continue;
        }

        debug!("Reading {}", path.display());
        let file = File::open(path).map_err(|source| LogcatpError::Input {
            path: path.clone(),
            source,
        })?;
        for_each_line_in(&mut BufReader::new(file), path, &mut f)?;
    }
    Ok(())
}

fn read_stdin<F>(f: &mut F) -> Result<(), LogcatpError>
where
    F: FnMut(&[u8]) -> Result<(), LogcatpError>,
{
    let stdin = io::stdin();
    let mut lock = stdin.lock();
    for_each_line_in(&mut lock, Path::new("<stdin>"), f)
}

//! Startup requirement validation for logcatp.
//!
//! This module validates that adb can be executed before lines start
//! flowing. Failures are reported but not fatal: probes then degrade to
//! `(not found)` names. Findings are logged at debug level unless the
//! check was asked for explicitly.

use std::io;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Validate all runtime requirements. `verbose` raises findings to warnings.
pub fn validate_requirements(adb_path: &str, verbose: bool) -> Result<(), ValidationError> {
    debug!("Validating runtime requirements...");

    let version = check_adb(adb_path, verbose)?;
    info!("Using {}", version);

    Ok(())
}

fn report(verbose: bool, message: &str) {
    if verbose {
        warn!("{}", message);
    } else {
        debug!("{}", message);
    }
}

/// Runs `<adb> version` and returns its first output line.
fn check_adb(adb_path: &str, verbose: bool) -> Result<String, ValidationError> {
    let output = Command::new(adb_path)
        .arg("version")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let text = String::from_utf8_lossy(&out.stdout);
            Ok(text.lines().next().unwrap_or("adb").trim().to_string())
        }
        Ok(out) => {
            report(verbose, &format!("{} version exited with {}", adb_path, out.status));
            Err(ValidationError::AdbFailed(out.status.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            report(verbose, &format!("adb executable '{}' not found", adb_path));
            report(verbose, "   Install the Android platform-tools and add them to PATH,");
            report(verbose, "   or point --adb / adb_path at the adb binary");
            Err(ValidationError::AdbNotFound(adb_path.to_string()))
        }
        Err(e) => {
            report(verbose, &format!("Could not run {}: {}", adb_path, e));
            Err(ValidationError::AdbFailed(e.to_string()))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("adb executable not found: {0}")]
    AdbNotFound(String),

    #[error("adb is not usable: {0}")]
    AdbFailed(String),
}

//! Fatal error kinds of the filter.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LogcatpError {
    #[error("{}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write error: {0}")]
    Output(#[source] io::Error),

    #[error("configuration invalid: {0}")]
    Config(String),
}

impl LogcatpError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LogcatpError::Config(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(LogcatpError::Config("bad".into()).exit_code(), 2);
        let out = LogcatpError::Output(io::Error::other("disk full"));
        assert_eq!(out.exit_code(), 1);
    }

    #[test]
    fn test_closed_stdout_is_fatal() {
        let err = LogcatpError::Output(io::Error::from(io::ErrorKind::BrokenPipe));
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_input_error_names_path() {
        let err = LogcatpError::Input {
            path: PathBuf::from("/tmp/missing.log"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("/tmp/missing.log: "));
        assert_eq!(err.exit_code(), 1);
    }
}

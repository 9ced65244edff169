//! PID extraction and death detection for logcat lines.
//!
//! Both pattern sets are compiled once on first use and tried in order. The
//! first pattern that matches decides the result, so the order below must not
//! change: the `uid` pattern is a stricter prefix of `threadtime`.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// A named, compiled pattern whose first capture group is a PID.
pub struct PidPattern {
    pub format: &'static str,
    pub regex: Regex,
}

fn compile(format: &'static str, pattern: &str) -> PidPattern {
    PidPattern {
        format,
        regex: Regex::new(pattern).expect("built-in logcat pattern must compile"),
    }
}

/// Patterns locating the PID column, one per logcat `-v` format.
pub static PID_PATTERNS: Lazy<Vec<PidPattern>> = Lazy::new(|| {
    vec![
        compile("uid", r"^\d\d-\d\d\s+[\d:.]+\s+[A-Za-z_0-9]+\s+(\d+)\s+\d"),
        compile("threadtime", r"^\d\d-\d\d\s+[\d:.]+\s+(\d+)"),
        compile("brief", r"^[A-Z]/.+?\(\s*(\d+)"),
        compile("process", r"^[A-Z]\(\s*(\d+)"),
        compile("time", r"^\d\d-\d\d [\d:.]+ [A-Z]/.*?\(\s*(\d+)"),
        compile("long", r"^\[\s*\d\d-\d\d\s+[\d:.]+\s+(\d+)"),
    ]
});

/// Patterns recognising ActivityManager's process death records.
pub static DEATH_PATTERNS: Lazy<Vec<PidPattern>> = Lazy::new(|| {
    vec![
        compile("died", r"ActivityManager.*?Process .*?\(pid (\d+)\) has died"),
        compile("killing", r"ActivityManager.*?Killing (\d+)"),
    ]
});

/// Returns the PID captured by the first pattern in `patterns` that matches.
///
/// A capture that does not fit in a `u32` counts as no PID rather than
/// falling through to later patterns.
fn first_capture(patterns: &[PidPattern], line: &[u8]) -> Option<u32> {
    let caps = patterns.iter().find_map(|p| p.regex.captures(line))?;
    let digits = caps.get(1)?.as_bytes();
    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// Extracts the PID of the process that emitted `line`.
pub fn extract_pid(line: &[u8]) -> Option<u32> {
    first_capture(&PID_PATTERNS, line)
}

/// Returns the PID whose death `line` announces, if any.
pub fn detect_death(line: &[u8]) -> Option<u32> {
    first_capture(&DEATH_PATTERNS, line)
}

/// Name of the first PID pattern matching `line`; used for debug logging.
pub fn matched_format(line: &[u8]) -> Option<&'static str> {
    PID_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(line))
        .map(|p| p.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Tests for extract_pid
    // -------------------------------------------------------------------------

    #[test]
    fn test_extract_threadtime() {
        let line = b"08-15 12:34:56.789  1234  5678 I Tag: hello\n";
        assert_eq!(extract_pid(line), Some(1234));
        assert_eq!(matched_format(line), Some("threadtime"));
    }

    #[test]
    fn test_extract_uid_takes_second_numeric_field() {
        let line = b"08-15 12:34:56.789 u0_a123  4321  4330 D Tag: msg\n";
        assert_eq!(extract_pid(line), Some(4321));
        assert_eq!(matched_format(line), Some("uid"));

        // Numeric uid column: uid pattern wins and yields the second field.
        let line = b"08-15 12:34:56.789  1000  1634  1650 I ActivityManager: x\n";
        assert_eq!(extract_pid(line), Some(1634));
    }

    #[test]
    fn test_extract_brief() {
        assert_eq!(extract_pid(b"I/Tag    ( 1234): hello\n"), Some(1234));
        assert_eq!(extract_pid(b"W/Some(Tag)(  77): x"), Some(77));
    }

    #[test]
    fn test_extract_process_format() {
        assert_eq!(extract_pid(b"I(  555) hello  (Tag)\n"), Some(555));
        assert_eq!(matched_format(b"I(555) hello"), Some("process"));
    }

    #[test]
    fn test_extract_time_format() {
        let line = b"08-15 12:34:56.789 D/Tag( 2468): hi\n";
        // threadtime requires a digit run after the timestamp, so only the
        // time pattern fits this shape.
        assert_eq!(extract_pid(line), Some(2468));
        assert_eq!(matched_format(line), Some("time"));
    }

    #[test]
    fn test_extract_long_format() {
        let line = b"[ 08-15 12:34:56.789  1357: 1360 I/Tag ]\n";
        assert_eq!(extract_pid(line), Some(1357));
        assert_eq!(matched_format(line), Some("long"));
    }

    #[test]
    fn test_extract_no_match() {
        assert_eq!(extract_pid(b"--------- beginning of main\n"), None);
        assert_eq!(extract_pid(b""), None);
        assert_eq!(extract_pid(b"hello (1234)"), None);
        assert_eq!(matched_format(b"--------- beginning of main"), None);
    }

    #[test]
    fn test_extract_is_anchored() {
        assert_eq!(extract_pid(b" 08-15 12:34:56.789  1234  5678 I Tag: x"), None);
    }

    #[test]
    fn test_extract_non_utf8_line() {
        let mut line = b"08-15 12:34:56.789  42  43 I Tag: ".to_vec();
        line.extend_from_slice(&[0xff, 0xfe, b'\n']);
        assert_eq!(extract_pid(&line), Some(42));
    }

    #[test]
    fn test_extract_overflowing_pid() {
        assert_eq!(extract_pid(b"I(99999999999999999999) x"), None);
    }

    // -------------------------------------------------------------------------
    // Tests for detect_death
    // -------------------------------------------------------------------------

    #[test]
    fn test_detect_has_died() {
        let line = b"08-15 12:35:00.000  1000  1000 I ActivityManager: Process com.example.app (pid 1234) has died\n";
        assert_eq!(detect_death(line), Some(1234));
    }

    #[test]
    fn test_detect_killing() {
        let line = b"I/ActivityManager(  600): Killing 4321:com.example.bg/u0a55 (adj 906): empty #17\n";
        assert_eq!(detect_death(line), Some(4321));
    }

    #[test]
    fn test_detect_requires_activity_manager() {
        assert_eq!(detect_death(b"I/Other( 1): Process x (pid 5) has died"), None);
        assert_eq!(detect_death(b"I/Tag( 1): Killing 5"), None);
    }

    #[test]
    fn test_detect_ordinary_line() {
        assert_eq!(detect_death(b"08-15 12:34:56.789  1234  5678 I Tag: hello\n"), None);
    }
}

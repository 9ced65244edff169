//! Integration tests for reading inputs and configuration from disk.

use logcatp::config::{load_config, validate_effective_config};
use logcatp::{CmdlineProbe, CmdlineSource, LineAnnotator, LogcatpError, NameCache, RetryPolicy};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Answers every PID with the same cmdline.
struct OneName(&'static str);

impl CmdlineSource for OneName {
    fn fetch_cmdline(&mut self, _pid: u32) -> Option<Vec<u8>> {
        Some(self.0.as_bytes().to_vec())
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_files_are_concatenated_in_order() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.log", "I(1) first\n");
    let b = write(&dir, "b.log", "I(2) second\nno pid here");

    let probe = CmdlineProbe::new(OneName("app"), RetryPolicy::default());
    let mut annotator = LineAnnotator::new(NameCache::default(), probe, 5);
    let (mut out, mut diag) = (Vec::new(), Vec::new());

    annotator.run(&[a, b], &mut out, &mut diag).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "[app 1] I(1) first\n[app 2] I(2) second\n[(pid not found)] no pid here"
    );
    assert_eq!(annotator.cache().len(), 2);
}

#[test]
fn test_missing_input_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.log", "I(1) ok\n");
    let missing = dir.path().join("missing.log");

    let probe = CmdlineProbe::new(OneName("app"), RetryPolicy::default());
    let mut annotator = LineAnnotator::new(NameCache::default(), probe, 5);
    let (mut out, mut diag) = (Vec::new(), Vec::new());

    let err = annotator
        .run(&[good, missing.clone()], &mut out, &mut diag)
        .unwrap_err();

    assert_eq!(err.exit_code(), 1);
    match err {
        LogcatpError::Input { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(String::from_utf8(out).unwrap(), "[app 1] I(1) ok\n");
}

#[test]
fn test_load_yaml_config() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "logcatp.yaml",
        "width: 32\nadb-path: /opt/android/platform-tools/adb\nretry_interval_ms: 50\n",
    );

    let cfg = load_config(Some(path.as_path())).unwrap();

    assert_eq!(cfg.width(), 32);
    assert_eq!(cfg.adb_path(), "/opt/android/platform-tools/adb");
    assert_eq!(cfg.retry_policy().interval.as_millis(), 50);
    assert_eq!(cfg.retry_policy().retries, 5);
    assert!(validate_effective_config(&cfg).is_ok());
}

#[test]
fn test_load_json_and_toml_config() {
    let dir = TempDir::new().unwrap();
    let json = write(&dir, "logcatp.json", r#"{"width": 20, "cache_ttl_secs": 30}"#);
    let toml = write(&dir, "logcatp.toml", "width = 24\nlog_level = \"debug\"\n");

    let cfg = load_config(Some(json.as_path())).unwrap();
    assert_eq!(cfg.width(), 20);
    assert_eq!(cfg.cache_ttl().as_secs(), 30);

    let cfg = load_config(Some(toml.as_path())).unwrap();
    assert_eq!(cfg.width(), 24);
    assert_eq!(cfg.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.json", "{ width: ");

    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(format!("{:#}", err).contains("bad.json"));

    let path = write(&dir, "zero.yaml", "cache_ttl_secs: 0\n");
    let cfg = load_config(Some(path.as_path())).unwrap();
    assert!(validate_effective_config(&cfg).is_err());
}

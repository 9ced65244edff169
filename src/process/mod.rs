//! Process name resolution.
//!
//! This module provides:
//! - `probe`: Reading `/proc/<pid>/cmdline` on the device through adb
//! - `cache`: TTL-bounded cache of resolved names with death eviction

pub mod cache;
pub mod probe;

// Re-export commonly used types
pub use cache::{NameCache, ProcessInfo, DEFAULT_CACHE_TTL_SECS};
pub use probe::{
    decode_cmdline, AdbCmdline, AdbProbe, CmdlineProbe, CmdlineSource, NameProbe, RetryPolicy,
    DEFAULT_PRE_INITIALIZED_RETRIES, DEFAULT_RETRY_INTERVAL_MS, NOT_FOUND, PRE_INITIALIZED,
    UNKNOWN,
};

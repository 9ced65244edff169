//! Cache of resolved process names.
//!
//! Entries live for a fixed TTL and are dropped early when a death record is
//! seen for their PID, since Android reuses PIDs.

use crate::process::probe::NameProbe;
use ahash::AHashMap as HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Resolved name of a PID and the instant it goes stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub name: String,
    /// `None` when the TTL reaches past what `Instant` can represent.
    pub expires_at: Option<Instant>,
}

impl ProcessInfo {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}

/// PID to name map with time-based freshness.
#[derive(Debug)]
pub struct NameCache {
    entries: HashMap<u32, ProcessInfo>,
    ttl: Duration,
}

impl Default for NameCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

impl NameCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the name for `pid`, probing on a miss or an expired entry.
    pub fn lookup<P: NameProbe + ?Sized>(&mut self, pid: u32, probe: &mut P) -> &str {
        self.lookup_at(pid, Instant::now(), probe)
    }

    /// Same as `lookup`, evaluated at `now`.
    pub fn lookup_at<P: NameProbe + ?Sized>(
        &mut self,
        pid: u32,
        now: Instant,
        probe: &mut P,
    ) -> &str {
        let stale = match self.entries.get(&pid) {
            None => {
                debug!("Name cache miss for pid {}", pid);
                true
            }
            Some(info) if info.is_expired(now) => {
                debug!("Name cache entry for pid {} expired", pid);
                true
            }
            Some(_) => false,
        };

        if stale {
            let info = ProcessInfo {
                name: probe.probe(pid),
                expires_at: now.checked_add(self.ttl),
            };
            self.entries.insert(pid, info);
        }

        self.entries
            .get(&pid)
            .map(|info| info.name.as_str())
            .unwrap_or_default()
    }

    /// Removes the entry for `pid`. Returns whether one was present.
    pub fn evict(&mut self, pid: u32) -> bool {
        let removed = self.entries.remove(&pid).is_some();
        if removed {
            info!("Evicted cached name for pid {}", pid);
        }
        removed
    }

    pub fn get(&self, pid: u32) -> Option<&ProcessInfo> {
        self.entries.get(&pid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

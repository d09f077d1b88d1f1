//! Startup configuration.
//!
//! [`StartupConfig`] is the record of tunables a host passes to
//! [`startup`](crate::startup()). Every field has a zero/false "leave the
//! default" state, so hosts override only what they care about — the same
//! sparse-override convention the rest of the config surface uses. A config
//! loaded from a file can therefore be as short as:
//!
//! ```json
//! { "concurrency": 4 }
//! ```
//!
//! Resolution of unset fields to their defaults is a pure function
//! ([`StartupConfig::resolve`]) so the mapping is testable without touching
//! any process-wide state.

use serde::{Deserialize, Serialize};

/// Worker threads for parallel pixel fills when unset.
pub const DEFAULT_CONCURRENCY: usize = 1;
/// Operation cache memory ceiling when unset: 100 MiB.
pub const DEFAULT_MAX_CACHE_MEM: usize = 100 * 1024 * 1024;
/// Operation cache entry ceiling when unset.
pub const DEFAULT_MAX_CACHE_SIZE: usize = 500;

/// Process-wide tunables, applied exactly once by [`startup`](crate::startup()).
///
/// Fields set to 0/false keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Worker threads for parallel pixel work. 0 = default (1).
    pub concurrency: usize,
    /// Max open files held by the operation cache. 0 = engine default.
    pub max_cache_files: usize,
    /// Max bytes held by the operation cache. 0 = default (100 MiB).
    pub max_cache_mem: usize,
    /// Max entries held by the operation cache. 0 = default (500).
    pub max_cache_size: usize,
    /// Report unreleased resources at shutdown.
    pub report_leaks: bool,
    /// Trace operation cache activity.
    pub cache_trace: bool,
}

/// A [`StartupConfig`] with all unset fields resolved to their defaults.
/// This is what [`startup`](crate::startup()) records and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveSettings {
    pub concurrency: usize,
    pub max_cache_files: usize,
    pub max_cache_mem: usize,
    pub max_cache_size: usize,
    pub report_leaks: bool,
    pub cache_trace: bool,
}

impl StartupConfig {
    /// Resolve unset fields to their defaults.
    ///
    /// `max_cache_files` has no fixed default — 0 means the engine keeps its
    /// own limit, and the value is recorded as-is.
    pub fn resolve(&self) -> EffectiveSettings {
        fn or_default(value: usize, default: usize) -> usize {
            if value == 0 { default } else { value }
        }

        EffectiveSettings {
            concurrency: or_default(self.concurrency, DEFAULT_CONCURRENCY),
            max_cache_files: self.max_cache_files,
            max_cache_mem: or_default(self.max_cache_mem, DEFAULT_MAX_CACHE_MEM),
            max_cache_size: or_default(self.max_cache_size, DEFAULT_MAX_CACHE_SIZE),
            report_leaks: self.report_leaks,
            cache_trace: self.cache_trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let settings = StartupConfig::default().resolve();
        assert_eq!(settings.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(settings.max_cache_files, 0);
        assert_eq!(settings.max_cache_mem, DEFAULT_MAX_CACHE_MEM);
        assert_eq!(settings.max_cache_size, DEFAULT_MAX_CACHE_SIZE);
        assert!(!settings.report_leaks);
        assert!(!settings.cache_trace);
    }

    #[test]
    fn set_fields_override_defaults() {
        let settings = StartupConfig {
            concurrency: 8,
            max_cache_files: 32,
            max_cache_mem: 1024,
            max_cache_size: 10,
            report_leaks: true,
            cache_trace: true,
        }
        .resolve();
        assert_eq!(settings.concurrency, 8);
        assert_eq!(settings.max_cache_files, 32);
        assert_eq!(settings.max_cache_mem, 1024);
        assert_eq!(settings.max_cache_size, 10);
        assert!(settings.report_leaks);
        assert!(settings.cache_trace);
    }

    #[test]
    fn sparse_json_config_fills_in_defaults() {
        let config: StartupConfig = serde_json::from_str(r#"{"concurrency": 4}"#).unwrap();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.max_cache_mem, 0);
        let settings = config.resolve();
        assert_eq!(settings.concurrency, 4);
        assert_eq!(settings.max_cache_mem, DEFAULT_MAX_CACHE_MEM);
    }
}

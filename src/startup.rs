//! One-time process-wide engine initialization.
//!
//! [`startup`] must run once before image work begins. It is guarded by a
//! mutex around a running flag: the first call applies configuration, every
//! later call logs a warning and changes nothing. There is no shutdown —
//! settings live for the process.
//!
//! One condition is fatal: the baseline JPEG/PNG codecs missing from the
//! linked engine. That reflects an unusable build, not a recoverable request.
//! Per-image failures elsewhere in the crate are ordinary [`Error`] values.
//!
//! [`Error`]: crate::Error

use crate::config::{EffectiveSettings, StartupConfig};
use crate::registry;
use crate::types::ImageType;
use std::sync::{Mutex, OnceLock, PoisonError};

static RUNNING: Mutex<bool> = Mutex::new(false);
static SETTINGS: OnceLock<EffectiveSettings> = OnceLock::new();

/// Initialize the engine with the given tunables.
///
/// Idempotent: a second call logs a warning and returns without reapplying
/// anything. Panics if the engine build lacks the baseline JPEG and PNG
/// codecs.
///
/// The concurrency level sizes the global worker pool used for parallel
/// pixel fills. If the host already built that pool, the setting cannot be
/// applied and a warning is logged; everything else still takes effect.
pub fn startup(config: &StartupConfig) {
    let mut running = RUNNING.lock().unwrap_or_else(PoisonError::into_inner);
    if *running {
        tracing::warn!("image engine already started");
        return;
    }

    assert_baseline_codecs();

    let settings = config.resolve();
    if let Err(err) = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.concurrency)
        .build_global()
    {
        tracing::warn!(
            error = %err,
            "worker pool already initialized; concurrency setting not applied"
        );
    }

    tracing::info!(
        concurrency = settings.concurrency,
        cache_max_files = settings.max_cache_files,
        cache_max_mem = settings.max_cache_mem,
        cache_max = settings.max_cache_size,
        report_leaks = settings.report_leaks,
        cache_trace = settings.cache_trace,
        "image engine started"
    );
    let _ = SETTINGS.set(settings);

    registry::init_types();
    *running = true;
}

/// Whether [`startup`] has completed.
pub fn is_running() -> bool {
    *RUNNING.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Settings recorded by the first [`startup`] call, or `None` before it.
pub fn effective_settings() -> Option<&'static EffectiveSettings> {
    SETTINGS.get()
}

/// The engine is unusable without its baseline codecs; refuse to run rather
/// than fail on every later operation.
fn assert_baseline_codecs() {
    for ty in [ImageType::Jpeg, ImageType::Png] {
        let available = ty
            .engine_format()
            .is_some_and(|format| format.reading_enabled() && format.writing_enabled());
        if !available {
            panic!("image engine build is missing the {} codec", ty.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_CACHE_SIZE;

    #[test]
    fn startup_twice_keeps_first_settings_and_does_not_panic() {
        startup(&StartupConfig {
            concurrency: 2,
            ..Default::default()
        });
        assert!(is_running());
        let first = effective_settings().unwrap().clone();
        assert_eq!(first.concurrency, 2);
        assert_eq!(first.max_cache_size, DEFAULT_MAX_CACHE_SIZE);

        startup(&StartupConfig {
            concurrency: 7,
            max_cache_size: 9,
            ..Default::default()
        });
        assert_eq!(effective_settings().unwrap(), &first);
    }
}

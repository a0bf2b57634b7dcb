//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use saass_dashboard::db::repositories::LocalRepository;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Instant the fixture scenarios are evaluated at: 2026-01-20 12:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap()
}

/// Path of the JSON fixture shipped with the crate.
pub fn seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/seed.json")
}

/// Local repository loaded with `fixtures/seed.json`.
///
/// Three launches, four units (one without a fabrication date), four
/// assignments of which 3 and 4 are active, three activity log entries.
pub fn seeded_repository() -> LocalRepository {
    LocalRepository::from_seed_file(seed_path()).expect("fixture seed should load")
}

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the
/// process-global environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Every variable the repository factory and display settings read.
pub const STORE_ENV_VARS: [&str; 12] = [
    "SAASS_CONFIG",
    "REPOSITORY_TYPE",
    "DATA_STORE_URL",
    "SUPABASE_URL",
    "DATA_STORE_KEY",
    "SUPABASE_ANON_KEY",
    "DATA_STORE_TIMEOUT_SECS",
    "DATA_STORE_MAX_RETRIES",
    "DATA_STORE_RETRY_DELAY_MS",
    "LOCAL_SEED_FILE",
    "DISPLAY_UTC_OFFSET_HOURS",
    "DISPLAY_LEGACY_OFFSET",
];

/// Like [`with_scoped_env`] but starting from a clean store environment.
pub fn with_clean_store_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut all: Vec<(&str, Option<&str>)> =
        STORE_ENV_VARS.iter().map(|key| (*key, None)).collect();
    all.retain(|(key, _)| !changes.iter().any(|(k, _)| k == key));
    all.extend_from_slice(changes);
    with_scoped_env(&all, f)
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use cuentas::{Config, Session};
use cuentas_core::{storage::MemoryStorage, FixedClock};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated base directory for a session.
pub fn setup_test_env() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Session over in-memory storage with the clock pinned to `today`.
pub fn memory_session(storage: &MemoryStorage, today: NaiveDate, config: Config) -> Session {
    Session::with_storage(
        Box::new(storage.clone()),
        Box::new(FixedClock::new(today)),
        config,
    )
    .expect("open memory session")
}

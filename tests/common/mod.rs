#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

use lifedash::dashboard::Dashboard;
use lifedash_config::{Config, ConfigManager};
use lifedash_core::{FixedClock, MemoryObjectStore, MemoryRecordStore};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 18).expect("valid date")
}

pub fn clock() -> Box<FixedClock> {
    Box::new(FixedClock::on(today()))
}

/// A loaded dashboard over in-memory stores without a change feed.
pub fn memory_dashboard() -> Dashboard<MemoryRecordStore, MemoryObjectStore> {
    let mut dashboard = Dashboard::new(
        MemoryRecordStore::new(),
        MemoryObjectStore::default(),
        clock(),
        Config::default(),
    );
    dashboard.load().expect("load empty dashboard");
    dashboard
}

/// Creates an isolated base directory plus a config manager rooted in it.
pub fn setup_test_env() -> (PathBuf, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (base, config_manager)
}

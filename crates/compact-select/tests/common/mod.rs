//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use compact_select::prelude::*;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once. Set `RUST_LOG=compact_select=trace` to
/// see controller logs for a failing test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Options keyed and labeled by `(key, label)` pairs.
pub fn items(pairs: &[(&'static str, &'static str)]) -> Vec<SelectItem<&'static str>> {
    pairs
        .iter()
        .map(|(key, label)| SelectOption::new(*key, *label).into())
        .collect()
}

/// Record every `on_change` payload of a region as selected values.
pub fn record_changes<V: SelectValue>(region: &Region<V>) -> Arc<Mutex<Vec<Vec<V>>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let changes_clone = changes.clone();
    region.on_change.connect(move |change: &RegionSelection<V>| {
        changes_clone.lock().push(change.values());
    });
    changes
}

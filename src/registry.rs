//! The process-wide scoped sink registry.
//!
//! Maps (scope, name) keys to capture sinks, lazily: the first lookup
//! for a key creates the sink, every later lookup returns the same
//! instance. Distinct keys always yield distinct sinks, even when names
//! collide across scopes or scopes across names. "No scope" is itself a
//! valid key component: all unscoped callers asking for one name share
//! one sink.

use std::collections::HashMap;
use std::sync::Arc;

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use spin::RwLock;

use crate::scope;
use crate::sink::CaptureSink;

type SinkKey = (Option<String>, String);

lazy_static! {
    static ref REGISTRY: RwLock<FxHashMap<SinkKey, Arc<CaptureSink>>> =
        RwLock::new(FxHashMap::default());
}

/// Returns the sink registered under `name` in the calling thread's
/// current scope, creating it on first access.
///
/// Get-or-create is atomic: even when multiple threads race on the first
/// access of a key, at most one sink is ever created for it.
pub fn sink(name: &str) -> Arc<CaptureSink> {
    let key = (scope::get(), name.to_string());
    let mut registry = REGISTRY.write();
    Arc::clone(
        registry
            .entry(key)
            .or_insert_with(|| Arc::new(CaptureSink::new(name))),
    )
}

/// Snapshot of the name→sink entries visible in the calling thread's
/// current scope.
///
/// The returned map is an owned copy: mutating it has no effect on the
/// registry, and entries of other scopes are never included.
#[must_use]
pub fn sinks_in_scope() -> HashMap<String, Arc<CaptureSink>> {
    let current = scope::get();
    REGISTRY
        .read()
        .iter()
        .filter_map(|(key, sink)| {
            let (scope_id, name) = key;
            if *scope_id == current {
                Some((name.clone(), Arc::clone(sink)))
            } else {
                None
            }
        })
        .collect()
}

/// Drops every sink in every scope.
///
/// The explicit test-isolation reset; callers still holding an `Arc` to
/// a dropped sink keep a detached instance that the registry will not
/// hand out again.
pub fn reset() {
    REGISTRY.write().clear();
}

/// Clears every registered sink and re-enables all five levels.
///
/// The primitive the per-test lifecycle hook is expected to call between
/// test units.
pub fn clear_all() {
    for sink in REGISTRY.read().values() {
        sink.clear();
        sink.set_all_enabled(true);
    }
}

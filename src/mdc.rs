//! The thread-scoped diagnostic context.
//!
//! A key→value mapping associated with the calling thread. Sinks copy the
//! current snapshot into every event they record; the mapping itself is
//! never mutated by the capture machinery.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

thread_local! {
    static CONTEXT: RefCell<BTreeMap<String, String>> = RefCell::new(BTreeMap::new());
}

/// An immutable copy of a thread's diagnostic context at one point in time.
pub type MdcSnapshot = Arc<BTreeMap<String, String>>;

/// Associates `value` with `key` on the calling thread.
pub fn put(key: impl Into<String>, value: impl Into<String>) {
    CONTEXT.with(|ctx| {
        ctx.borrow_mut().insert(key.into(), value.into());
    });
}

/// Returns the value currently associated with `key` on the calling thread.
#[must_use]
pub fn get(key: &str) -> Option<String> {
    CONTEXT.with(|ctx| ctx.borrow().get(key).cloned())
}

/// Removes `key` from the calling thread's context.
pub fn remove(key: &str) {
    CONTEXT.with(|ctx| {
        ctx.borrow_mut().remove(key);
    });
}

/// Empties the calling thread's context.
pub fn clear() {
    CONTEXT.with(|ctx| ctx.borrow_mut().clear());
}

/// Copies the calling thread's current context.
///
/// Later mutations of the context do not affect the returned snapshot.
#[must_use]
pub fn snapshot() -> MdcSnapshot {
    CONTEXT.with(|ctx| Arc::new(ctx.borrow().clone()))
}

//! Thread-affiliated isolation scopes.
//!
//! A scope partitions the global sink registry so concurrently running
//! test cases never share captured state, even under identical sink
//! names. The scope id lives in a thread local; child threads inherit it
//! by value-copy when they are started through [`spawn`]. Mutating the
//! scope on either side afterwards never affects the other.

use std::cell::RefCell;
use std::thread::{self, JoinHandle};

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Sets the calling thread's scope id.
pub fn set(id: impl Into<String>) {
    CURRENT_SCOPE.with(|cell| {
        *cell.borrow_mut() = Some(id.into());
    });
}

/// Returns the calling thread's scope id, if one is set.
#[must_use]
pub fn get() -> Option<String> {
    CURRENT_SCOPE.with(|cell| cell.borrow().clone())
}

/// Removes the calling thread's scope id.
///
/// "No scope" is a valid state, not an error: all unscoped threads share
/// one default sink pool.
pub fn clear() {
    CURRENT_SCOPE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Sets the scope for the lifetime of the returned guard, restoring the
/// previously active scope (or no scope) on drop.
#[must_use]
pub fn enter(id: impl Into<String>) -> ScopeGuard {
    let previous = CURRENT_SCOPE.with(|cell| cell.replace(Some(id.into())));
    ScopeGuard { previous }
}

/// Restores the prior scope when dropped. Created by [`enter`].
#[derive(Debug)]
pub struct ScopeGuard {
    previous: Option<String>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_SCOPE.with(|cell| {
            *cell.borrow_mut() = previous;
        });
    }
}

/// Spawns a thread that inherits the caller's scope.
///
/// The scope id is captured by value at spawn time and installed in the
/// child before `f` runs. This is the inheritance point for scope
/// propagation; threads spawned directly through [`std::thread::spawn`]
/// start without a scope.
pub fn spawn<F, T>(f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let inherited = get();
    thread::spawn(move || {
        if let Some(id) = inherited {
            set(id);
        }
        f()
    })
}

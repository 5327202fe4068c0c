use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::Level;
use spin::RwLock;

use crate::error::QueryError;
use crate::mdc;
use crate::record::{format_template, LogEvent};
use crate::tag::Tag;
use crate::value::Value;

/// The mock recording endpoint for one (scope, name) pair.
///
/// A sink holds an ordered, append-only event sequence plus five
/// independent level-enablement flags, all enabled by default. Sinks are
/// created and owned by the registry (see [`crate::registry::sink`]) and
/// handed out as `Arc`s; they are never removed, only cleared.
pub struct CaptureSink {
    name: Arc<str>,
    state: RwLock<SinkState>,
    // one flag per level, indexed Error..Trace
    enabled: [AtomicBool; 5],
}

struct SinkState {
    events: Vec<LogEvent>,
    next_index: usize,
}

fn slot(level: Level) -> usize {
    level as usize - 1
}

impl CaptureSink {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            state: RwLock::new(SinkState {
                events: Vec::new(),
                next_index: 0,
            }),
            enabled: [
                AtomicBool::new(true),
                AtomicBool::new(true),
                AtomicBool::new(true),
                AtomicBool::new(true),
                AtomicBool::new(true),
            ],
        }
    }

    /// The name this sink was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether calls at `level` are currently recorded.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.enabled[slot(level)].load(Ordering::Relaxed)
    }

    /// Enables or disables recording at `level`. Captured events are
    /// unaffected.
    pub fn set_enabled(&self, level: Level, enabled: bool) {
        self.enabled[slot(level)].store(enabled, Ordering::Relaxed);
    }

    /// Enables or disables recording at every level.
    pub fn set_all_enabled(&self, enabled: bool) {
        for flag in &self.enabled {
            flag.store(enabled, Ordering::Relaxed);
        }
    }

    /// Records a log call at `level`, substituting `args` into `template`.
    ///
    /// A no-op if `level` is disabled: the event is dropped entirely and
    /// does not count. Each `{}` placeholder consumes one argument in
    /// order. If more arguments than placeholders were given and the final
    /// unused argument is a [`Value::Error`], it becomes the event's error
    /// field instead of a formatted value.
    ///
    /// The calling thread's diagnostic context is snapshotted into the
    /// event (see [`crate::mdc`]).
    pub fn record(&self, level: Level, template: &str, args: Vec<Value>) {
        self.record_with(level, None, template, args);
    }

    /// Like [`CaptureSink::record`], with a tag attached to the event.
    pub fn record_tagged(&self, level: Level, tag: &Tag, template: &str, args: Vec<Value>) {
        self.record_with(level, Some(tag.clone()), template, args);
    }

    fn record_with(&self, level: Level, tag: Option<Tag>, template: &str, mut args: Vec<Value>) {
        if !self.is_enabled(level) {
            return;
        }

        let (message, consumed) = format_template(template, &args);

        // a trailing error beyond the placeholders becomes the error field
        let mut error = None;
        if args.len() > consumed && args.last().and_then(Value::as_error).is_some() {
            if let Some(Value::Error(err)) = args.pop() {
                error = Some(err);
            }
        }

        let mdc = mdc::snapshot();

        let mut state = self.state.write();
        let index = state.next_index;
        state.next_index += 1;
        state.events.push(LogEvent {
            index,
            sink: self.name.clone(),
            level,
            tag,
            mdc,
            error,
            template: template.to_string(),
            message,
            args,
        });
    }

    /// Records at [`Level::Trace`].
    pub fn trace(&self, template: &str, args: Vec<Value>) {
        self.record(Level::Trace, template, args);
    }

    /// Records at [`Level::Debug`].
    pub fn debug(&self, template: &str, args: Vec<Value>) {
        self.record(Level::Debug, template, args);
    }

    /// Records at [`Level::Info`].
    pub fn info(&self, template: &str, args: Vec<Value>) {
        self.record(Level::Info, template, args);
    }

    /// Records at [`Level::Warn`].
    pub fn warn(&self, template: &str, args: Vec<Value>) {
        self.record(Level::Warn, template, args);
    }

    /// Records at [`Level::Error`].
    pub fn error(&self, template: &str, args: Vec<Value>) {
        self.record(Level::Error, template, args);
    }

    /// Empties the captured sequence. Enablement flags are untouched.
    ///
    /// Indices mirror list positions, so the sequence counter restarts at
    /// 0: the next recorded event is `#0` again.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.events.clear();
        state.next_index = 0;
    }

    /// Number of captured events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().events.len()
    }

    /// Whether no events have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().events.is_empty()
    }

    /// Returns the event at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`QueryError::OutOfRange`] reporting both the requested
    /// index and the available count.
    pub fn event(&self, index: usize) -> Result<LogEvent, QueryError> {
        let state = self.state.read();
        state
            .events
            .get(index)
            .cloned()
            .ok_or(QueryError::OutOfRange {
                requested: index,
                available: state.events.len(),
            })
    }

    /// Snapshot of the captured sequence, in recording order.
    #[must_use]
    pub fn events(&self) -> Vec<LogEvent> {
        self.state.read().events.clone()
    }

    /// Number of captured events at exactly `level`.
    #[must_use]
    pub fn count_by_level(&self, level: Level) -> usize {
        self.state
            .read()
            .events
            .iter()
            .filter(|event| event.level == level)
            .count()
    }
}

impl std::fmt::Debug for CaptureSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSink")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::Level;

use crate::tag::Tag;
use crate::value::{CapturedError, Value};

/// One captured log call with all structured fields.
///
/// Events are immutable once constructed; sinks hand out clones, never
/// references into their own storage.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// Position of this event in its sink's sequence, ascending.
    pub index: usize,
    /// The name of the sink that captured this event.
    pub sink: Arc<str>,
    /// The severity the call was made at.
    pub level: Level,
    /// The tag attached to the call, if any.
    pub tag: Option<Tag>,
    /// Snapshot of the calling thread's diagnostic context at emission time.
    pub mdc: Arc<BTreeMap<String, String>>,
    /// The error object attached to the call, if any.
    pub error: Option<CapturedError>,
    /// The raw message template.
    pub template: String,
    /// The message with all placeholders substituted.
    pub message: String,
    /// The arguments that were available for substitution. A trailing
    /// error consumed into [`LogEvent::error`] is not part of this list.
    pub args: Vec<Value>,
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {:<5} {}", self.index, self.level, self.message)?;
        if let Some(tag) = &self.tag {
            write!(f, " <{tag}>")?;
        }
        if let Some(error) = &self.error {
            write!(f, " (error: {}: {})", error.type_name(), error.message())?;
        }
        Ok(())
    }
}

/// Substitutes `args` into `template` positionally.
///
/// Each `{}` consumes one argument, left to right. Placeholders beyond
/// the argument list remain literal. Returns the formatted message and
/// the number of arguments consumed.
pub(crate) fn format_template(template: &str, args: &[Value]) -> (String, usize) {
    let mut out = String::with_capacity(template.len());
    let mut consumed = 0;
    let mut rest = template;

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        if consumed < args.len() {
            out.push_str(&args[consumed].to_string());
            consumed += 1;
        } else {
            out.push_str("{}");
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);

    (out, consumed)
}

use std::error::Error;
use std::fmt;

use log::Level;

use crate::record::LogEvent;
use crate::tag::Tag;
use crate::value::{CapturedError, Value};

/// A composable set of per-event expectations.
///
/// Each configured expectation checks one dimension of a single captured
/// event; an event matches when every expectation holds. Expectations
/// that were never configured are unconstrained.
///
/// ```
/// use logcap::Matcher;
/// use log::Level;
///
/// let matcher = Matcher::new()
///     .level(Level::Warn)
///     .message_contains("password")
///     .arg("bob");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    level: Option<Level>,
    tag: TagSpec,
    message_fragments: Vec<String>,
    error_type: Option<ErrorTypeSpec>,
    error_fragments: Vec<String>,
    arg_equals: Vec<Value>,
    arg_at: Vec<(usize, Value)>,
    arg_count: Option<usize>,
}

/// The tag expectation of a [`Matcher`].
///
/// The default, [`TagSpec::Any`], is a wildcard: it matches tagged and
/// untagged events alike. [`TagSpec::Missing`] instead demands that the
/// event carries no tag at all. The two are easy to conflate; keeping
/// them separate variants makes both checkable.
#[derive(Debug, Clone, Default)]
pub enum TagSpec {
    /// Matches any tag, including none.
    #[default]
    Any,
    /// Matches only events without a tag.
    Missing,
    /// Matches only events carrying this exact tag (identity compared).
    Is(Tag),
}

#[derive(Debug, Clone, Copy)]
struct ErrorTypeSpec {
    name: &'static str,
    check: fn(&CapturedError) -> bool,
}

fn error_is<T: Error + 'static>(error: &CapturedError) -> bool {
    error.is::<T>()
}

impl Matcher {
    /// An unconstrained matcher; every event satisfies it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the event's level to be exactly `level`.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Requires the event to carry exactly this tag (identity compared).
    #[must_use]
    pub fn tag(mut self, tag: &Tag) -> Self {
        self.tag = TagSpec::Is(tag.clone());
        self
    }

    /// Requires the event to carry no tag.
    #[must_use]
    pub fn no_tag(mut self) -> Self {
        self.tag = TagSpec::Missing;
        self
    }

    /// Requires the formatted message to contain `fragment`. Repeatable;
    /// all fragments must be present.
    #[must_use]
    pub fn message_contains(mut self, fragment: impl Into<String>) -> Self {
        self.message_fragments.push(fragment.into());
        self
    }

    /// Requires the event's error to be of concrete type `T`.
    #[must_use]
    pub fn error_type<T: Error + 'static>(mut self) -> Self {
        self.error_type = Some(ErrorTypeSpec {
            name: std::any::type_name::<T>(),
            check: error_is::<T>,
        });
        self
    }

    /// Requires the event's error message to contain `fragment`.
    /// Repeatable; all fragments must be present.
    #[must_use]
    pub fn error_message_contains(mut self, fragment: impl Into<String>) -> Self {
        self.error_fragments.push(fragment.into());
        self
    }

    /// Requires some argument of the event to deep-equal `value`.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.arg_equals.push(value.into());
        self
    }

    /// Requires the argument at `index` to deep-equal `value`.
    #[must_use]
    pub fn arg_at(mut self, index: usize, value: impl Into<Value>) -> Self {
        self.arg_at.push((index, value.into()));
        self
    }

    /// Requires the event to carry exactly `count` arguments.
    #[must_use]
    pub fn arg_count(mut self, count: usize) -> Self {
        self.arg_count = Some(count);
        self
    }

    /// Whether `event` satisfies every configured expectation.
    #[must_use]
    pub fn matches(&self, event: &LogEvent) -> bool {
        self.mismatch(event).is_none()
    }

    /// Returns the first unmet expectation as a self-contained
    /// description citing the event's index, or `None` on a match.
    pub(crate) fn mismatch(&self, event: &LogEvent) -> Option<String> {
        if let Some(expected) = self.level {
            if event.level != expected {
                return Some(format!(
                    "event #{}: expected level {expected}, found {}",
                    event.index, event.level
                ));
            }
        }

        match &self.tag {
            TagSpec::Any => {}
            TagSpec::Missing => {
                if let Some(actual) = &event.tag {
                    return Some(format!(
                        "event #{}: expected no tag, found tag `{actual}`",
                        event.index
                    ));
                }
            }
            TagSpec::Is(expected) => match &event.tag {
                Some(actual) if actual == expected => {}
                Some(actual) => {
                    return Some(format!(
                        "event #{}: expected tag `{expected}` (compared by identity), \
                         found tag `{actual}`",
                        event.index
                    ))
                }
                None => {
                    return Some(format!(
                        "event #{}: expected tag `{expected}`, found no tag",
                        event.index
                    ))
                }
            },
        }

        for fragment in &self.message_fragments {
            if !event.message.contains(fragment.as_str()) {
                return Some(format!(
                    "event #{}: expected message containing {fragment:?}, found {:?}",
                    event.index, event.message
                ));
            }
        }

        if let Some(spec) = &self.error_type {
            match &event.error {
                None => {
                    return Some(format!(
                        "event #{}: expected an error of type {}, but no error was captured",
                        event.index, spec.name
                    ))
                }
                Some(error) if !(spec.check)(error) => {
                    return Some(format!(
                        "event #{}: expected an error of type {}, found {} ({})",
                        event.index,
                        spec.name,
                        error.type_name(),
                        error.message()
                    ))
                }
                Some(_) => {}
            }
        }

        for fragment in &self.error_fragments {
            match &event.error {
                None => {
                    return Some(format!(
                        "event #{}: expected an error message containing {fragment:?}, \
                         but no error was captured",
                        event.index
                    ))
                }
                Some(error) if !error.message().contains(fragment.as_str()) => {
                    return Some(format!(
                        "event #{}: expected error message containing {fragment:?}, found {:?}",
                        event.index,
                        error.message()
                    ))
                }
                Some(_) => {}
            }
        }

        for expected in &self.arg_equals {
            if !event.args.iter().any(|arg| arg == expected) {
                return Some(format!(
                    "event #{}: expected some argument equal to {expected}, \
                     found arguments [{}]",
                    event.index,
                    render_args(&event.args)
                ));
            }
        }

        for (index, expected) in &self.arg_at {
            match event.args.get(*index) {
                Some(actual) if actual == expected => {}
                Some(actual) => {
                    return Some(format!(
                        "event #{}: expected argument {index} to equal {expected}, found {actual}",
                        event.index
                    ))
                }
                None => {
                    return Some(format!(
                        "event #{}: expected argument {index} to equal {expected}, \
                         but only {} argument(s) were captured",
                        event.index,
                        event.args.len()
                    ))
                }
            }
        }

        if let Some(expected) = self.arg_count {
            if event.args.len() != expected {
                return Some(format!(
                    "event #{}: expected {expected} argument(s), found {}",
                    event.index,
                    event.args.len()
                ));
            }
        }

        None
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();
        if let Some(level) = self.level {
            clauses.push(format!("level == {level}"));
        }
        match &self.tag {
            TagSpec::Any => {}
            TagSpec::Missing => clauses.push("no tag".to_string()),
            TagSpec::Is(tag) => clauses.push(format!("tag == `{tag}`")),
        }
        for fragment in &self.message_fragments {
            clauses.push(format!("message contains {fragment:?}"));
        }
        if let Some(spec) = &self.error_type {
            clauses.push(format!("error is {}", spec.name));
        }
        for fragment in &self.error_fragments {
            clauses.push(format!("error message contains {fragment:?}"));
        }
        for value in &self.arg_equals {
            clauses.push(format!("some argument == {value}"));
        }
        for (index, value) in &self.arg_at {
            clauses.push(format!("argument {index} == {value}"));
        }
        if let Some(count) = self.arg_count {
            clauses.push(format!("argument count == {count}"));
        }

        if clauses.is_empty() {
            write!(f, "any event")
        } else {
            write!(f, "{}", clauses.join(", "))
        }
    }
}

fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

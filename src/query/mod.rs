//! The query and assertion engine.
//!
//! A [`Matcher`] bundles per-event expectations; the check operations on
//! [`CaptureSink`] quantify it over the captured sequence:
//!
//! - [`CaptureSink::check_event`] — the event at one index must match,
//! - [`CaptureSink::check_any`] — some captured event must match,
//! - [`CaptureSink::check_none`] — no captured event may match,
//! - [`CaptureSink::check_sequence`] — one matcher per position, with
//!   exact length equality.
//!
//! All checks are pure and synchronous. Failures carry a self-contained
//! description of expected vs. actual; existence checks additionally dump
//! the full captured sequence, since there is no single offending event
//! to point at. The `assert_*` twins panic with the same description.

mod matcher;

pub use matcher::{Matcher, TagSpec};

use crate::error::QueryError;
use crate::record::LogEvent;
use crate::sink::CaptureSink;

impl CaptureSink {
    /// Checks the event at `index` against `matcher`.
    ///
    /// # Errors
    ///
    /// [`QueryError::OutOfRange`] if `index` exceeds the captured
    /// sequence, [`QueryError::Mismatch`] if the event fails a criterion.
    pub fn check_event(&self, index: usize, matcher: &Matcher) -> Result<(), QueryError> {
        let event = self.event(index)?;
        match matcher.mismatch(&event) {
            None => Ok(()),
            Some(description) => Err(QueryError::Mismatch(description)),
        }
    }

    /// Checks that at least one captured event satisfies `matcher`.
    ///
    /// # Errors
    ///
    /// [`QueryError::Mismatch`] describing the expectation and dumping
    /// the full captured sequence.
    pub fn check_any(&self, matcher: &Matcher) -> Result<(), QueryError> {
        let events = self.events();
        if events.iter().any(|event| matcher.matches(event)) {
            return Ok(());
        }
        Err(QueryError::Mismatch(format!(
            "sink `{}`: no captured event matches [{matcher}]; captured sequence:\n{}",
            self.name(),
            render_events(&events)
        )))
    }

    /// Checks that no captured event satisfies `matcher`.
    ///
    /// # Errors
    ///
    /// [`QueryError::Mismatch`] citing the first offending event.
    pub fn check_none(&self, matcher: &Matcher) -> Result<(), QueryError> {
        for event in self.events() {
            if matcher.matches(&event) {
                return Err(QueryError::Mismatch(format!(
                    "sink `{}`: event #{} matches [{matcher}], but no event was \
                     expected to; offending event:\n  {event}",
                    self.name(),
                    event.index
                )));
            }
        }
        Ok(())
    }

    /// Checks the captured sequence position by position against
    /// `matchers`, requiring exact length equality first.
    ///
    /// # Errors
    ///
    /// [`QueryError::Mismatch`] reporting the count difference (with a
    /// dump of the captured sequence), or citing the first failing
    /// position.
    pub fn check_sequence(&self, matchers: &[Matcher]) -> Result<(), QueryError> {
        let events = self.events();
        if events.len() != matchers.len() {
            return Err(QueryError::Mismatch(format!(
                "sink `{}`: expected a sequence of exactly {} event(s), but {} were \
                 captured; captured sequence:\n{}",
                self.name(),
                matchers.len(),
                events.len(),
                render_events(&events)
            )));
        }
        for (event, matcher) in events.iter().zip(matchers) {
            if let Some(description) = matcher.mismatch(event) {
                return Err(QueryError::Mismatch(description));
            }
        }
        Ok(())
    }

    /// Number of captured events satisfying `matcher`.
    #[must_use]
    pub fn count_matching(&self, matcher: &Matcher) -> usize {
        self.events()
            .iter()
            .filter(|event| matcher.matches(event))
            .count()
    }

    /// Panicking form of [`CaptureSink::check_event`].
    #[track_caller]
    pub fn assert_event(&self, index: usize, matcher: &Matcher) {
        if let Err(failure) = self.check_event(index, matcher) {
            panic!("{failure}");
        }
    }

    /// Panicking form of [`CaptureSink::check_any`].
    #[track_caller]
    pub fn assert_any(&self, matcher: &Matcher) {
        if let Err(failure) = self.check_any(matcher) {
            panic!("{failure}");
        }
    }

    /// Panicking form of [`CaptureSink::check_none`].
    #[track_caller]
    pub fn assert_none(&self, matcher: &Matcher) {
        if let Err(failure) = self.check_none(matcher) {
            panic!("{failure}");
        }
    }

    /// Panicking form of [`CaptureSink::check_sequence`].
    #[track_caller]
    pub fn assert_sequence(&self, matchers: &[Matcher]) {
        if let Err(failure) = self.check_sequence(matchers) {
            panic!("{failure}");
        }
    }
}

fn render_events(events: &[LogEvent]) -> String {
    if events.is_empty() {
        return "  <no events captured>".to_string();
    }
    events
        .iter()
        .map(|event| format!("  {event}"))
        .collect::<Vec<_>>()
        .join("\n")
}

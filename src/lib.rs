//! An in-memory capture backend for the `log` facade.
//!
//! `logcap` is a test double for structured logging: instead of writing
//! to a console or a file, it records every log call in memory so tests
//! can assert on what was logged. It consists of three pieces:
//!
//! - **Capture sinks** ([`CaptureSink`]) record events per name, with
//!   independent enablement flags for each of the five severity levels.
//! - A **scoped registry** ([`registry`]) hands out sinks keyed by name
//!   and the calling thread's isolation [`scope`], so parallel test cases
//!   never see each other's events even under identical sink names.
//! - A **query engine** ([`query`]) evaluates composable [`Matcher`]
//!   expectations over the captured sequence, with failure messages
//!   designed to be readable without a debugger.
//!
//! # Recording and asserting
//!
//! ```
//! use logcap::{args, registry, Matcher};
//! use log::Level;
//!
//! let sink = registry::sink("auth");
//! sink.info("User {} logged in", args!["alice"]);
//! sink.warn("Invalid password for {}", args!["bob"]);
//!
//! assert_eq!(sink.len(), 2);
//! sink.assert_event(0, &Matcher::new().level(Level::Info).message_contains("alice"));
//! sink.assert_any(&Matcher::new().level(Level::Warn).message_contains("password"));
//! assert_eq!(sink.count_by_level(Level::Info), 1);
//! ```
//!
//! # Scope isolation
//!
//! ```
//! use logcap::{args, registry, scope};
//!
//! let guard = scope::enter("case-1");
//! let sink = registry::sink("db");
//! sink.debug("connected", args![]);
//! drop(guard);
//!
//! // different scope, same name: a different sink
//! let other = registry::sink("db");
//! assert!(other.is_empty());
//! ```
//!
//! # Capturing the `log` macros
//!
//! [`CaptureBackend`] implements [`log::Log`] and routes each record to
//! the sink named after its target, honoring scope isolation and the
//! sink's level flags.

pub mod dump;
pub mod mdc;
pub mod query;
pub mod registry;
pub mod scope;

mod backend;
mod error;
mod macros;
mod record;
mod sink;
mod tag;
mod value;

pub use backend::CaptureBackend;
pub use error::QueryError;
pub use query::{Matcher, TagSpec};
pub use record::LogEvent;
pub use sink::CaptureSink;
pub use tag::Tag;
pub use value::{CapturedError, Value};

pub use log::Level;

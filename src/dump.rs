//! Console rendering of captured sequences.
//!
//! A pure consumer of the read-only query surface, intended for dumping
//! a sink's contents when a test fails for reasons the assertion message
//! alone does not explain.

use std::io::Write;

use log::Level;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::sink::CaptureSink;

const PARENS_COLOR: Color = Color::Rgb(0x7f, 0x8c, 0x8d);

/// Renders every captured event of `sink` to the console.
///
/// Events at `Warn` and `Error` go to stderr, everything else to stdout,
/// colored by level.
///
/// # Errors
///
/// Fails if the underlying stream cannot be written.
pub fn dump_sink(sink: &CaptureSink) -> std::io::Result<()> {
    for event in sink.events() {
        let mut out = match event.level {
            Level::Error | Level::Warn => StandardStream::stderr(ColorChoice::Always),
            _ => StandardStream::stdout(ColorChoice::Always),
        };

        out.set_color(ColorSpec::new().set_fg(Some(PARENS_COLOR)))?;
        write!(&mut out, "[ ")?;
        out.set_color(ColorSpec::new().set_fg(Some(level_color(event.level))))?;
        write!(&mut out, "{:>20}", sink.name())?;
        out.set_color(ColorSpec::new().set_fg(Some(PARENS_COLOR)))?;
        write!(&mut out, " ] ")?;
        out.reset()?;
        writeln!(&mut out, "{event}")?;
    }
    Ok(())
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Debug => Color::Magenta,
        Level::Trace => Color::Cyan,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

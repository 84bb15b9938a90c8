//! The entry point (§4.H): owns the output buffer and lexer cursor for
//! one render, drives the top-level interpreter with the `NUL`
//! sentinel, and turns the result into an owned string or a reported
//! failure.

use crate::error::{self, DiagnosticSink, FormatError, StderrSink};
use crate::interp;
use crate::lexer::Cursor;
use crate::pattern::Pattern;
use crate::OutputBuffer;

/// `NUL` — the sentinel the top-level interpreter always stops at,
/// regardless of what a caller passes as its own terminator.
const TOP_LEVEL_TERMINATOR: u8 = 0;

/// Render `template` against `pattern`, reporting any failure to the
/// process's standard error stream.
///
/// This is the crate's primary entry point (spec.md §6). See
/// [`format_with_sink`] to capture the diagnostic instead.
pub fn format(pattern: &Pattern, template: &str) -> Result<String, FormatError> {
    format_with_sink(pattern, template, &mut StderrSink)
}

/// Render `template` against `pattern`, writing the single diagnostic
/// line of a failed render to `sink` instead of assuming stderr.
pub fn format_with_sink(
    pattern: &Pattern,
    template: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<String, FormatError> {
    let mut cursor = Cursor::new(template.as_bytes());
    let mut buf = OutputBuffer::new();

    if let Err(err) = interp::expr(&mut cursor, pattern, &mut buf, TOP_LEVEL_TERMINATOR) {
        error::report(sink, &err);
        return Err(err);
    }

    buf.finalize().map_err(|err| {
        error::report(sink, &err);
        err
    })
}

//! Error type and diagnostic sink for the pattern-format interpreter.
//!
//! Every render failure is exactly one [`FormatError`], surfaced to the
//! caller as a `Result` and, once, written to a [`DiagnosticSink`] — by
//! default stderr, with a fixed prefix and a trailing `.\n`, matching the
//! single-diagnostic-per-failure contract.

/// Everything that can make a render fail.
///
/// Every variant's [`Display`](std::fmt::Display) text is the bare message —
/// no prefix, no trailing punctuation — so it composes both with
/// [`report`] (which adds the prefix and terminator) and with a caller's
/// own error context.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The template ended before a required character was found.
    #[error("format ended while expecting '{0}'")]
    UnexpectedEnd(char),
    /// A required character was missing at a specific (1-based) offset.
    #[error("expected '{0}' at {1}")]
    ExpectedChar(char, usize),
    /// `read_word` found no non-punctuation bytes to read.
    #[error("expected element name at {0}")]
    ExpectedElementName(usize),
    /// `read_chars` found no bytes before the terminator.
    #[error("expected character data at {0}")]
    ExpectedCharacterData(usize),
    /// `|name` did not match any entry in the converter table.
    #[error("unknown converter \"{0}\"")]
    UnknownConverter(String),
    /// The output buffer could not grow to hold more content.
    #[error("output buffer allocation failed")]
    BufferFailed,
}

/// Destination for the single diagnostic line a failed render emits.
///
/// Parameterized so tests can capture the line instead of writing to
/// stderr.
pub trait DiagnosticSink {
    /// Write one already-formatted diagnostic line (no trailing newline).
    fn write_line(&mut self, line: &str);
}

/// Default sink: the process's standard error stream.
#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn write_line(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// A sink that captures lines in memory, for tests.
#[derive(Debug, Default)]
pub struct CapturingSink {
    /// All lines written so far, in order.
    pub lines: Vec<String>,
}

impl DiagnosticSink for CapturingSink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Fixed prefix for every diagnostic line, per the documented external
/// interface.
const DIAGNOSTIC_PREFIX: &str = "pattern format error: ";

/// Write `err` to `sink` as a single diagnostic line: fixed prefix, the
/// error's message, and `.` (the sink itself adds the trailing newline).
pub fn report(sink: &mut dyn DiagnosticSink, err: &FormatError) {
    sink.write_line(&format!("{DIAGNOSTIC_PREFIX}{err}."));
}

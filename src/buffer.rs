//! Growable output buffer for rendered text.
//!
//! Backed by a `String`. An inline capacity is reserved up front so that
//! most renders never trigger a reallocation, mirroring the fixed-size
//! stack buffer the interpreter this crate is modeled on pre-allocates
//! before falling back to the heap.

use crate::error::FormatError;

/// Initial capacity reserved on [`OutputBuffer::new`]. Most templates
/// render well under this; larger renders just grow the backing `String`
/// like any other.
pub const INLINE_CAPACITY: usize = 8 * 1024;

/// The buffer a render writes into.
///
/// `failed` latches: once set, every append becomes a no-op so a
/// mid-render problem can't produce a truncated-but-plausible result.
/// Callers observe this through `Result`-returning methods rather than
/// polling the flag directly.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    buf: String,
    failed: bool,
}

impl OutputBuffer {
    /// Create an empty buffer with the inline capacity reserved.
    #[must_use]
    pub fn new() -> Self {
        OutputBuffer {
            buf: String::with_capacity(INLINE_CAPACITY),
            failed: false,
        }
    }

    /// Current length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// True once a write has failed; every append after this is a no-op.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Append one byte, re-encoded through `char::from`. Only used for
    /// bytes already known to be valid UTF-8 on their own (ASCII escapes,
    /// punctuation, digits) — see [`append_bytes`](Self::append_bytes) for
    /// arbitrary byte runs.
    pub fn append_byte(&mut self, b: u8) {
        if self.failed {
            return;
        }
        self.buf.push(b as char);
    }

    /// Append a string slice.
    pub fn append_str(&mut self, s: &str) {
        if self.failed {
            return;
        }
        self.buf.push_str(s);
    }

    /// Mark the buffer as failed. All further appends are no-ops.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// The content written since byte offset `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start` does not fall on a UTF-8 boundary or exceeds the
    /// current length — callers only ever pass offsets captured from
    /// [`len`](Self::len), so this cannot happen in practice.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &str {
        &self.buf[start..]
    }

    /// Replace everything from byte offset `start` onward with `content`.
    /// Used by the converter pipeline (§4.F) to splice a converter's
    /// output back into the buffer in place.
    pub fn replace_from(&mut self, start: usize, content: &str) {
        if self.failed {
            return;
        }
        self.buf.truncate(start);
        self.buf.push_str(content);
    }

    /// Insert `count` spaces at byte offset `at`. Used by left-alignment
    /// (positive width) to pad before existing content.
    pub fn insert_spaces(&mut self, at: usize, count: usize) {
        if self.failed || count == 0 {
            return;
        }
        self.buf.insert_str(at, &" ".repeat(count));
    }

    /// Append `count` spaces at the end. Used by right-alignment
    /// (negative width) to pad after existing content.
    pub fn append_spaces(&mut self, count: usize) {
        if self.failed || count == 0 {
            return;
        }
        for _ in 0..count {
            self.buf.push(' ');
        }
    }

    /// Consume the buffer, returning the rendered text, or an error if
    /// the sticky failure bit was ever set.
    pub fn finalize(self) -> Result<String, FormatError> {
        if self.failed {
            Err(FormatError::BufferFailed)
        } else {
            Ok(self.buf)
        }
    }
}

//! The top-level interpreter (§4.G): walks the template, streaming
//! literal bytes straight into the output buffer, decoding backslash
//! escapes, and handing `%` off to the percent dispatcher. Stops at the
//! first occurrence of a caller-supplied terminator byte — or always at
//! `NUL`, which marks end-of-template regardless of what the caller
//! asked for — without consuming it.
//!
//! Every subexpression (`{...}` bodies of filter/delete/cond, and the
//! top-level render itself) re-enters here with a different terminator:
//! `}` for a nested subexpression, `NUL` (`0`) for the whole template.

use crate::dispatch;
use crate::error::FormatError;
use crate::lexer::Cursor;
use crate::pattern::Pattern;
use crate::OutputBuffer;

/// Render `expr` (everything up to `terminator` or `NUL`) against `pat`,
/// appending to `buf`. Leaves the cursor sitting on the terminator byte.
pub fn expr(
    cur: &mut Cursor<'_>,
    pat: &Pattern,
    buf: &mut OutputBuffer,
    terminator: u8,
) -> Result<(), FormatError> {
    loop {
        let b = cur.peek();
        if b == 0 || b == terminator {
            return Ok(());
        }
        match b {
            b'\\' => {
                cur.bump();
                let next = cur.peek();
                if next != 0 {
                    buf.append_byte(Cursor::escape_of(next));
                    cur.bump();
                }
            }
            b'%' => dispatch::percent(cur, pat, buf)?,
            _ => copy_literal_run(cur, buf, terminator),
        }
    }
}

/// Copy a maximal run of plain literal bytes in one shot — bounded only
/// by `\`, `%`, the terminator, or end of template — instead of
/// round-tripping through the buffer one byte at a time. The run is
/// always cut on an ASCII delimiter, so it lands on a UTF-8 boundary.
fn copy_literal_run(cur: &mut Cursor<'_>, buf: &mut OutputBuffer, terminator: u8) {
    let start = cur.pos();
    loop {
        let b = cur.peek();
        if b == 0 || b == terminator || b == b'\\' || b == b'%' {
            break;
        }
        cur.bump();
    }
    buf.append_str(cur.slice(start, cur.pos()));
}

//! The skipper: walks past a directive body without evaluating it.
//!
//! Used for the not-taken branch of a conditional (§4.D's `?`). Brace
//! balancing and backslash handling are enforced exactly as the
//! evaluating walker enforces them; everything else inside a skipped
//! `%{...}` (widths, converter suffixes) is allowed to be syntactically
//! sloppy — only the brace structure and escapes matter here.

use crate::error::FormatError;
use crate::lexer::Cursor;

/// Skip to the next unescaped `}` at the current nesting level,
/// treating `%{...}` as an opaque nested skip so braces inside a
/// directive body don't terminate the outer skip early.
pub fn skip_expr(cur: &mut Cursor<'_>) -> Result<(), FormatError> {
    loop {
        let b = cur.peek();
        if b == 0 || b == b'}' {
            return Ok(());
        }
        match b {
            b'\\' => {
                cur.bump();
                if cur.peek() != 0 {
                    cur.bump();
                }
            }
            b'%' => skip_percent(cur)?,
            _ => cur.bump(),
        }
    }
}

/// Skip a `%{...}` form without caring what width or converters follow
/// — only the directive's own brace balance matters.
fn skip_percent(cur: &mut Cursor<'_>) -> Result<(), FormatError> {
    cur.expect(b'%')?;
    // Swallow an optional (possibly malformed) width; read_width never
    // fails, it just reads zero digits.
    cur.read_width();
    cur.expect(b'{')?;
    loop {
        let b = cur.peek();
        if b == 0 || b == b'}' {
            break;
        }
        match b {
            b'\\' => {
                cur.bump();
                if cur.peek() != 0 {
                    cur.bump();
                }
            }
            b'{' => skip_subexpr(cur)?,
            _ => cur.bump(),
        }
    }
    cur.expect(b'}')
}

/// Skip a brace-delimited subexpression: `{`, [`skip_expr`], `}`.
pub fn skip_subexpr(cur: &mut Cursor<'_>) -> Result<(), FormatError> {
    cur.expect(b'{')?;
    skip_expr(cur)?;
    cur.expect(b'}')
}

/// Skip a subexpression only if one is present (used for the optional
/// `else` branch of a conditional, and the optional trailing subexpr
/// the interpreter never evaluates on the taken side).
pub fn maybe_skip_subexpr(cur: &mut Cursor<'_>) -> Result<(), FormatError> {
    if cur.peek() == b'{' {
        skip_subexpr(cur)
    } else {
        Ok(())
    }
}

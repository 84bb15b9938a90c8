//! The percent dispatcher (§4.F): `%` `<width>?` `{` directive `}`
//! `converters?`.
//!
//! Parses the optional width and opening brace, dispatches to the right
//! [`crate::directive`] evaluator on lookahead, then runs the converter
//! pipeline and width alignment over whatever the directive wrote,
//! before consuming the closing brace.

use crate::convert;
use crate::directive;
use crate::error::FormatError;
use crate::lexer::Cursor;
use crate::pattern::Pattern;
use crate::OutputBuffer;

/// Handle one `%...` form, starting with the cursor on `%`.
pub fn percent(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    cur.expect(b'%')?;

    if cur.consume(b'%') {
        buf.append_byte(b'%');
        return Ok(());
    }

    let width = cur.read_width();
    cur.expect(b'{')?;

    let start = buf.len();
    dispatch_directive(cur, pat, buf)?;
    apply_converter_pipeline(cur, buf, start)?;
    align_to_width(buf, start, width);

    cur.expect(b'}')
}

/// Dispatch on the first byte of the directive body (§4.D).
fn dispatch_directive(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    match cur.peek() {
        b'{' => directive::subexpr(cur, pat, buf),
        b'+' => directive::filter(cur, pat, buf),
        b'-' => directive::delete(cur, pat, buf),
        b'?' => directive::cond(cur, pat, buf),
        b'#' => directive::count(cur, pat, buf),
        _ => directive::simple(cur, pat, buf),
    }
}

/// Run zero or more `|name(args)` converter stages over `buf[start..]`,
/// left to right, splicing each result back in place.
fn apply_converter_pipeline(
    cur: &mut Cursor<'_>,
    buf: &mut OutputBuffer,
    start: usize,
) -> Result<(), FormatError> {
    while cur.consume(b'|') {
        let input = buf.slice_from(start).to_string();
        let converted = convert::apply(cur, &input)?;
        buf.replace_from(start, &converted);
    }
    Ok(())
}

/// Pad `buf[start..]` to `|width|` bytes: left-pad (insert before) for a
/// positive width, right-pad (append after) for a negative one. A
/// width of zero, or content already at least as long, is a no-op.
fn align_to_width(buf: &mut OutputBuffer, start: usize, width: i64) {
    if width == 0 {
        return;
    }
    let len = (buf.len() - start) as i64;
    let target = width.abs();
    if len >= target {
        return;
    }
    let pad = (target - len) as usize;
    if width < 0 {
        buf.append_spaces(pad);
    } else {
        buf.insert_spaces(start, pad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Value;

    fn sample() -> Pattern {
        let mut p = Pattern::new();
        p.add("family", Value::String("DejaVu Sans".to_string()));
        p.add("size", Value::Double(10.0));
        p.add("size", Value::Double(12.0));
        p
    }

    #[test]
    fn simple_field_renders_value() {
        let pat = sample();
        let mut cur = Cursor::new(b"%{family}");
        let mut buf = OutputBuffer::new();
        percent(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "DejaVu Sans");
    }

    #[test]
    fn literal_percent_percent_short_circuits() {
        let pat = sample();
        let mut cur = Cursor::new(b"%%");
        let mut buf = OutputBuffer::new();
        percent(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "%");
    }

    #[test]
    fn count_directive_with_multi_valued_key() {
        let pat = sample();
        let mut cur = Cursor::new(b"%{#size}");
        let mut buf = OutputBuffer::new();
        percent(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "2");
    }

    #[test]
    fn converter_pipeline_applies_left_to_right() {
        let pat = sample();
        let mut cur = Cursor::new(b"%{family|downcase}");
        let mut buf = OutputBuffer::new();
        percent(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "dejavu sans");
    }

    #[test]
    fn negative_width_right_pads() {
        let pat = sample();
        let mut cur = Cursor::new(b"%-12{family}");
        let mut buf = OutputBuffer::new();
        percent(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "DejaVu Sans ");
    }

    #[test]
    fn positive_width_left_pads() {
        let pat = sample();
        let mut cur = Cursor::new(b"%20{family}");
        let mut buf = OutputBuffer::new();
        percent(&mut cur, &pat, &mut buf).unwrap();
        let rendered = buf.finalize().unwrap();
        assert_eq!(rendered.len(), 20);
        assert!(rendered.ends_with("DejaVu Sans"));
    }

    #[test]
    fn width_smaller_than_content_is_a_no_op() {
        let pat = sample();
        let mut cur = Cursor::new(b"%3{family}");
        let mut buf = OutputBuffer::new();
        percent(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "DejaVu Sans");
    }

    #[test]
    fn missing_closing_brace_is_an_error() {
        let pat = sample();
        let mut cur = Cursor::new(b"%{family");
        let mut buf = OutputBuffer::new();
        let err = percent(&mut cur, &pat, &mut buf).unwrap_err();
        assert_eq!(err, FormatError::UnexpectedEnd('}'));
    }

    #[test]
    fn unknown_converter_propagates() {
        let pat = sample();
        let mut cur = Cursor::new(b"%{family|nope}");
        let mut buf = OutputBuffer::new();
        let err = percent(&mut cur, &pat, &mut buf).unwrap_err();
        assert_eq!(err, FormatError::UnknownConverter("nope".to_string()));
    }
}

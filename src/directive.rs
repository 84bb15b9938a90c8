//! Directive evaluators (§4.D): one function per directive kind, plus
//! the shared subexpression helper they all bottom out in.
//!
//! Dispatch on the first byte after `{` lives in [`crate::dispatch`];
//! this module only implements what each directive does once chosen.

use crate::error::FormatError;
use crate::interp;
use crate::lexer::Cursor;
use crate::pattern::Pattern;
use crate::skip;
use crate::OutputBuffer;

/// Read a comma-separated list of words (key names), requiring at least one.
fn read_wordlist(cur: &mut Cursor<'_>) -> Result<Vec<String>, FormatError> {
    let mut words = vec![cur.read_word()?];
    while cur.consume(b',') {
        words.push(cur.read_word()?);
    }
    Ok(words)
}

/// `{expr}` — re-enter the top-level interpreter with terminator `}`.
pub fn subexpr(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    cur.expect(b'{')?;
    interp::expr(cur, pat, buf, b'}')?;
    cur.expect(b'}')
}

/// A `{expr}` subexpression only if one is present (the optional "else"
/// arm of a taken conditional, and the `-size{...}` style bodies that
/// always require one — this helper is only used where it's optional).
fn maybe_subexpr(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    if cur.peek() == b'{' {
        subexpr(cur, pat, buf)
    } else {
        Ok(())
    }
}

/// `+k1,k2{expr}` — evaluate `expr` against a duplicate of `pat`
/// containing only the named keys.
pub fn filter(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    cur.expect(b'+')?;
    let keys = read_wordlist(cur)?;
    let filtered = pat.filter(&keys);
    subexpr(cur, &filtered, buf)
}

/// `-k1,k2{expr}` — evaluate `expr` against a duplicate of `pat` with
/// the named keys removed.
pub fn delete(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    cur.expect(b'-')?;
    let mut sub = pat.duplicate();
    loop {
        let key = cur.read_word()?;
        sub.delete(&key);
        if !cur.consume(b',') {
            break;
        }
    }
    subexpr(cur, &sub, buf)
}

/// `?!k1,k2{then}{else}` — a logical AND of `present XOR negate` tests,
/// then evaluate exactly one of `then`/`else` and skip the other.
pub fn cond(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    cur.expect(b'?')?;
    let mut pass = true;
    loop {
        let negate = cur.consume(b'!');
        let key = cur.read_word()?;
        let present = pat.get(&key).is_some();
        pass &= negate ^ present;
        if !cur.consume(b',') {
            break;
        }
    }
    if pass {
        subexpr(cur, pat, buf)?;
        skip::maybe_skip_subexpr(cur)
    } else {
        skip::skip_subexpr(cur)?;
        maybe_subexpr(cur, pat, buf)
    }
}

/// `#k` — the number of values bound to `k` (`0` if absent).
pub fn count(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    cur.expect(b'#')?;
    let key = cur.read_word()?;
    buf.append_str(&pat.count(&key).to_string());
    Ok(())
}

/// `[:]k[=]` — the default directive: an optional `:` prefix, a key
/// name, an optional `=` prefix. Contributes nothing (prefixes
/// included) when `k` is absent.
pub fn simple(cur: &mut Cursor<'_>, pat: &Pattern, buf: &mut OutputBuffer) -> Result<(), FormatError> {
    let add_colon = cur.consume(b':');
    let key = cur.read_word()?;
    let add_key_eq = cur.consume(b'=');

    if pat.get(&key).is_some() {
        if add_colon {
            buf.append_byte(b':');
        }
        if add_key_eq {
            buf.append_str(&key);
            buf.append_byte(b'=');
        }
        buf.append_str(&pat.unparse(&key));
    }
    Ok(())
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
    fn simple_present_key_with_prefixes() {
        let pat = sample();
        let mut buf = OutputBuffer::new();
        let mut cur = Cursor::new(b":family=}");
        simple(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), ":family=DejaVu Sans");
    }

    #[test]
    fn simple_absent_key_contributes_nothing() {
        let pat = sample();
        let mut buf = OutputBuffer::new();
        let mut cur = Cursor::new(b":weight=}");
        simple(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "");
    }

    #[test]
    fn count_present_and_absent() {
        let pat = sample();
        let mut cur = Cursor::new(b"#size}");
        let mut buf = OutputBuffer::new();
        count(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "2");

        let mut cur = Cursor::new(b"#style}");
        let mut buf = OutputBuffer::new();
        count(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "0");
    }

    #[test]
    fn filter_keeps_only_named_keys() {
        let pat = sample();
        let mut cur = Cursor::new(b"+family{%{family}:%{#size}}");
        let mut buf = OutputBuffer::new();
        filter(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "DejaVu Sans:0");
    }

    #[test]
    fn delete_removes_named_keys_from_duplicate() {
        let pat = sample();
        let mut cur = Cursor::new(b"-size{%{family}}");
        let mut buf = OutputBuffer::new();
        delete(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "DejaVu Sans");
        // original pattern is untouched
        assert_eq!(pat.count("size"), 2);
    }

    #[test]
    fn cond_true_evaluates_then_and_skips_else() {
        let pat = sample();
        let mut cur = Cursor::new(b"?family{yes}{no}");
        let mut buf = OutputBuffer::new();
        cond(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "yes");
        assert!(cur.is_eof());
    }

    #[test]
    fn cond_false_evaluates_else() {
        let pat = sample();
        let mut cur = Cursor::new(b"?style{yes}{no}");
        let mut buf = OutputBuffer::new();
        cond(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "no");
    }

    #[test]
    fn cond_negated_key_demands_absence() {
        let pat = sample();
        let mut cur = Cursor::new(b"?!style{missing}");
        let mut buf = OutputBuffer::new();
        cond(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "missing");
    }

    #[test]
    fn cond_without_else_is_optional() {
        let pat = sample();
        let mut cur = Cursor::new(b"?style{yes}rest");
        let mut buf = OutputBuffer::new();
        cond(&mut cur, &pat, &mut buf).unwrap();
        assert_eq!(buf.finalize().unwrap(), "");
        assert_eq!(cur.peek(), b'r');
    }
}

//! The converter library: named `string -> string` transforms applied
//! through the `|name` pipeline suffix.
//!
//! Unary converters (`downcase`, `basename`, `dirname`, `cescape`,
//! `shescape`, `xmlescape`) take only the value. Parametric converters
//! (`delete`, `escape`, `translate`) additionally parse a `(...)`
//! argument list from the template right after their name — so this
//! module owns a slice of the cursor as well as the string being
//! transformed.
//!
//! All char-class operators (`delete`, `escape`, `translate`) are
//! byte-oriented, not Unicode-aware — a documented limitation, not an
//! oversight: re-implementations wanting UTF-8-correct behavior should
//! add new converter names rather than change these.

use crate::error::FormatError;
use crate::lexer::Cursor;
use crate::strutil;

/// Read a converter name and its optional argument list from `cur`, then
/// apply it to `input`. This is the single entry point the percent
/// dispatcher (§4.F) calls for each `|name(args)` pipeline stage.
pub fn apply(cur: &mut Cursor<'_>, input: &str) -> Result<String, FormatError> {
    let name = cur.read_word()?;
    match name.as_str() {
        "downcase" => Ok(strutil::ascii_downcase(input)),
        "basename" => Ok(strutil::basename(input)),
        "dirname" => Ok(strutil::dirname(input)),
        "cescape" => Ok(cescape(input)),
        "shescape" => Ok(shescape(input)),
        "xmlescape" => Ok(xmlescape(input)),
        "delete" => delete_chars(cur, input),
        "escape" => escape_chars(cur, input),
        "translate" => translate_chars(cur, input),
        other => Err(FormatError::UnknownConverter(other.to_string())),
    }
}

/// Prefix each `\` and `"` with a `\`.
#[must_use]
pub fn cescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.chars() {
        if b == '\\' || b == '"' {
            out.push('\\');
        }
        out.push(b);
    }
    out
}

/// Wrap in single quotes; each embedded `'` becomes `'\''`.
#[must_use]
pub fn shescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('\'');
    for ch in input.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Replace `&`, `<`, `>` with their XML entity forms.
#[must_use]
pub fn xmlescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Parse `(chars)` and drop any byte of `input` appearing in `chars`.
fn delete_chars(cur: &mut Cursor<'_>, input: &str) -> Result<String, FormatError> {
    cur.expect(b'(')?;
    let chars = cur.read_chars(b')')?;
    cur.expect(b')')?;
    Ok(input.chars().filter(|c| !chars.contains(*c)).collect())
}

/// Parse `(chars)` and, before each byte of `input` appearing in
/// `chars`, insert `chars`'s first byte.
fn escape_chars(cur: &mut Cursor<'_>, input: &str) -> Result<String, FormatError> {
    cur.expect(b'(')?;
    let chars = cur.read_chars(b')')?;
    cur.expect(b')')?;
    let escape_with = chars.chars().next().expect("read_chars rejects empty reads");
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if chars.contains(ch) {
            out.push(escape_with);
        }
        out.push(ch);
    }
    Ok(out)
}

/// Parse `(from,to)` and, for each byte of `input` appearing in `from`,
/// substitute the byte at the same index in `to` — reusing `to`'s last
/// byte once `from` runs longer than `to`. `read_chars` already rejects an
/// empty `from` or `to` with `ExpectedCharacterData`, so both are
/// guaranteed non-empty here.
fn translate_chars(cur: &mut Cursor<'_>, input: &str) -> Result<String, FormatError> {
    cur.expect(b'(')?;
    let from = cur.read_chars(b',')?;
    cur.expect(b',')?;
    let to = cur.read_chars(b')')?;
    cur.expect(b')')?;

    let from_chars: Vec<char> = from.chars().collect();
    let to_chars: Vec<char> = to.chars().collect();
    let last_to = *to_chars.last().expect("read_chars rejects empty reads");

    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match from_chars.iter().position(|&f| f == ch) {
            Some(i) => out.push(to_chars.get(i).copied().unwrap_or(last_to)),
            None => out.push(ch),
        }
    }
    Ok(out)
}

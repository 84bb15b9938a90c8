//! The pattern store: a multimap from string keys ("objects") to
//! non-empty lists of typed values.
//!
//! The interpreter treats this as a mostly-external collaborator (see
//! spec.md's Out-of-scope note), but something has to implement its
//! interface for the crate to run end to end. This module is that
//! implementation — deliberately small, with just enough typing to
//! exercise every directive.

use std::collections::BTreeMap;
use std::fmt;

/// A single typed value held in a pattern's value list.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// A UTF-8 string value.
    String(String),
    /// A signed integer value.
    Int(i64),
    /// A floating-point value, unparsed the way fontconfig does:
    /// trailing zeros and a trailing decimal point are trimmed.
    Double(f64),
    /// A boolean value, unparsed as `true`/`false`.
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{}", format_double(*d)),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Render a float the way fontconfig's name-unparser does: as few digits
/// as needed, no trailing `.0` for whole numbers.
fn format_double(d: f64) -> String {
    if d.fract() == 0.0 && d.is_finite() {
        format!("{d:.0}")
    } else {
        format!("{d}")
    }
}

/// A multimap from object name to a non-empty list of values.
///
/// Keys mapped to an empty list are never stored — deleting the last
/// value of a key removes the key entirely, matching `FcPatternDel`'s
/// observable behavior (`get` on a deleted key reports absent).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    objects: BTreeMap<String, Vec<Value>>,
}

impl Pattern {
    /// An empty pattern.
    #[must_use]
    pub fn new() -> Self {
        Pattern::default()
    }

    /// Add one value to `key`'s list, creating the list if absent.
    pub fn add(&mut self, key: impl Into<String>, value: Value) {
        self.objects.entry(key.into()).or_default().push(value);
    }

    /// Number of distinct keys bound in this pattern.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if this pattern has no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up `key`'s value list, or `None` if the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.objects.get(key).map(Vec::as_slice)
    }

    /// Number of values bound to `key` (`0` if absent).
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.objects.get(key).map_or(0, Vec::len)
    }

    /// An independent copy of this pattern — the caller is free to
    /// mutate it (e.g. via [`delete`](Self::delete)) without affecting
    /// the original. Backed by `Clone`, so teardown is ordinary scoping:
    /// there is no explicit destroy step.
    #[must_use]
    pub fn duplicate(&self) -> Pattern {
        self.clone()
    }

    /// Remove `key` and all its values, in place.
    pub fn delete(&mut self, key: &str) {
        self.objects.remove(key);
    }

    /// A new pattern containing only the keys in `keyset` (those present
    /// in `self`; keys named in `keyset` but absent from `self` are
    /// simply not present in the result).
    #[must_use]
    pub fn filter(&self, keyset: &[String]) -> Pattern {
        let mut out = Pattern::new();
        for key in keyset {
            if let Some(values) = self.objects.get(key) {
                out.objects.insert(key.clone(), values.clone());
            }
        }
        out
    }

    /// Render `key`'s value list joined by a single space, or an empty
    /// string if the key is absent. This is the separator fontconfig's
    /// own name-unparser uses for multi-valued objects (confirmed by
    /// the `size=[10.0, 12.0]` -> `"10 12"` worked example).
    #[must_use]
    pub fn unparse(&self, key: &str) -> String {
        match self.objects.get(key) {
            Some(values) => values
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            None => String::new(),
        }
    }
}

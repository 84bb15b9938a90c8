//! Byte-level string utilities the interpreter treats as external leaf
//! functions: locale-independent ASCII case conversion and POSIX-style
//! path splitting.

/// Lowercase ASCII letters; every other byte passes through unchanged.
/// Deliberately not locale- or Unicode-aware — this mirrors the
/// interpreter's own byte-oriented converters.
#[must_use]
pub fn ascii_downcase(s: &str) -> String {
    s.bytes().map(|b| b.to_ascii_lowercase() as char).collect()
}

/// POSIX `basename`-like behavior: the final path component, with
/// trailing slashes ignored. An empty or all-slash input returns `"/"`;
/// a slash-free input is returned unchanged, matching `basename(3)`'s
/// edge cases closely enough for pattern rendering (object names rarely
/// carry them).
#[must_use]
pub fn basename(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rfind('/') {
        Some(idx) => trimmed[idx + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// POSIX `dirname`-like behavior: everything before the final path
/// component. Returns `"."` when there is no directory part.
#[must_use]
pub fn dirname(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
        None => ".".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcase_ascii_only() {
        assert_eq!(ascii_downcase("DejaVu Sans"), "dejavu sans");
        assert_eq!(ascii_downcase("already-lower_42"), "already-lower_42");
    }

    #[test]
    fn basename_examples() {
        assert_eq!(basename("/usr/share/fonts/Foo.ttf"), "Foo.ttf");
        assert_eq!(basename("Foo.ttf"), "Foo.ttf");
        assert_eq!(basename("/usr/share/fonts/"), "fonts");
        assert_eq!(basename("/"), "/");
    }

    #[test]
    fn dirname_examples() {
        assert_eq!(dirname("/usr/share/fonts/Foo.ttf"), "/usr/share/fonts");
        assert_eq!(dirname("Foo.ttf"), ".");
        assert_eq!(dirname("/Foo.ttf"), "/");
    }
}

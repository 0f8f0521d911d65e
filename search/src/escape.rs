//! Escaping of raw terms for the RediSearch query grammar.
//!
//! Tags are not tokenized, so any punctuation inside a tag query has to be
//! escaped with a backslash or the parser treats it as syntax.

/// Marker placed in front of every special character.
pub const ESCAPE_MARKER: char = '\\';

/// Characters with a meaning in the query grammar.
///
/// Contains the marker itself so that escaped output can always be reversed.
const SPECIAL_CHARS: &[char] = &[
    ',', '.', '<', '>', '{', '}', '[', ']', '"', '\'', ':', ';', '!', '@', '#', '$', '%', '^',
    '&', '*', '(', ')', '-', '+', '=', '~', '|', '/', '?', '`', ' ', ESCAPE_MARKER,
];

/// Whether `c` must be escaped inside a query term.
pub fn needs_escape(c: char) -> bool {
    SPECIAL_CHARS.contains(&c)
}

/// Escape every special character in `term`.
///
/// ```rust
/// use docfront_search::escape;
///
/// assert_eq!(escape("chris@alpha.com"), r"chris\@alpha\.com");
/// ```
pub fn escape(term: &str) -> String {
    let mut out = String::with_capacity(term.len() * 2);
    for c in term.chars() {
        if needs_escape(c) {
            out.push(ESCAPE_MARKER);
        }
        out.push(c);
    }
    out
}

/// Reverse [`escape`], dropping each marker and keeping the character after it.
///
/// A lone trailing marker is kept as-is.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE_MARKER {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_uuid_fragment() {
        assert_eq!(escape("0000-000000000001"), r"0000\-000000000001");
    }

    #[test]
    fn escapes_repeated_characters_individually() {
        assert_eq!(escape("a--b"), r"a\-\-b");
        assert_eq!(escape("..."), r"\.\.\.");
    }

    #[test]
    fn marker_is_escaped_once() {
        assert_eq!(escape(r"a\b"), r"a\\b");
        assert_eq!(escape(r"\-"), r"\\\-");
    }

    #[test]
    fn plain_terms_pass_through() {
        assert_eq!(escape("Billy"), "Billy");
        assert_eq!(escape(""), "");
        assert_eq!(escape("日本語"), "日本語");
    }

    #[test]
    fn every_special_char_is_escaped() {
        for &c in SPECIAL_CHARS {
            let escaped = escape(&c.to_string());
            assert_eq!(escaped, format!("{}{}", ESCAPE_MARKER, c));
        }
    }

    #[test]
    fn unescape_reverses_escape() {
        let raw = r#"user:{1} "x" \ y-z"#;
        assert_eq!(unescape(&escape(raw)), raw);
    }

    #[test]
    fn unescape_keeps_trailing_marker() {
        assert_eq!(unescape(r"abc\"), r"abc\");
    }
}

//! Shared utility functions.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Collapse all runs of whitespace (including newlines) into single spaces.
///
/// Used to keep failure messages on one line regardless of what the
/// tracker put in its error body.
pub fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Make sure a message ends with sentence punctuation.
pub fn as_sentence(s: &str) -> String {
    let line = one_line(s);
    match line.chars().last() {
        None => line,
        Some('.' | '!' | '?') => line,
        Some(_) => format!("{}.", line),
    }
}

//! Small string helpers shared by the news client and the strategy.

/// Truncate to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(raw: &str, max_chars: usize) -> &str {
    match raw.char_indices().nth(max_chars) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

/// Collapse newlines and cap length so API error bodies fit on one log line.
pub fn summarize_body(raw: &str, max_chars: usize) -> String {
    let compact = raw.replace(['\n', '\r'], " ");
    let truncated = truncate_chars(&compact, max_chars);
    if truncated.len() < compact.len() {
        format!("{}…", truncated)
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_summarize_body_compacts_and_caps() {
        assert_eq!(summarize_body("a\nb\rc", 100), "a b c");
        assert_eq!(summarize_body("abcdef", 3), "abc…");
    }
}

//! HTML escaping and JSON formatting helpers.
//!
//! Every piece of user-controlled text passes through [`escape_html`] before
//! interpolation into a fragment; that single rule is what keeps the output
//! injection-safe even for malformed input.

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Whether a string looks like a JSON document.
///
/// True iff, after trimming whitespace, the string is non-empty and starts
/// with `{` or `[`. Parseability is deliberately not checked; callers that
/// pretty-print guard the parse themselves and fall back to raw text.
pub fn is_json_like(s: Option<&str>) -> bool {
    match s {
        None => false,
        Some(s) => {
            let trimmed = s.trim_start();
            trimmed.starts_with('{') || trimmed.starts_with('[')
        }
    }
}

/// Pretty-print a JSON value.
pub fn format_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Try to pretty-print a string as JSON, otherwise return it unchanged.
pub fn format_json_or_raw(s: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(s) {
        if let Ok(pretty) = serde_json::to_string_pretty(&value) {
            return pretty;
        }
    }
    s.to_string()
}

/// Longest prefix of `s` holding at most `max_chars` characters.
///
/// Operates on char counts, never splits a UTF-8 sequence.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &s[..byte_index],
        None => s,
    }
}

// ===== Tests =====

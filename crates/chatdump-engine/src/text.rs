use chatdump_types::Limit;

/// Appended to any text cut by a [`Limit`]
pub const TRUNCATION_SUFFIX: &str = "... (truncated)";

/// Characters with structural meaning in the YAML-like output
const STRUCTURAL_CHARS: &[char] = &[
    ':', '#', '{', '}', '[', ']', ',', '&', '*', '?', '|', '>', '!', '%', '@', '`',
];

/// Truncate to `limit` characters, appending [`TRUNCATION_SUFFIX`] when cut
pub fn truncate(s: &str, limit: Limit) -> String {
    match limit.max_chars() {
        Some(max) if s.chars().count() > max => {
            s.chars().take(max).collect::<String>() + TRUNCATION_SUFFIX
        }
        _ => s.to_string(),
    }
}

/// First `max` characters, no marker
pub fn take_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// First `max` characters followed by `...` when anything was cut
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        take_chars(s, max) + "..."
    } else {
        s.to_string()
    }
}

pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

pub fn is_multiline(s: &str) -> bool {
    s.contains('\n')
}

/// Cheap JSON sniff: does the trimmed text open an object or array?
pub fn looks_like_json(s: &str) -> bool {
    let trimmed = s.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

/// Wrap `content` in a fenced code block.
///
/// The fence is one backtick longer than the longest backtick run inside the
/// content, and never shorter than three.
pub fn fence(content: &str, lang: &str) -> String {
    let ticks = "`".repeat(longest_backtick_run(content).max(2) + 1);
    format!("{ticks}{lang}\n{}\n{ticks}", content.trim_end_matches('\n'))
}

fn longest_backtick_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in s.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Whether a string can appear unquoted in the YAML-like output.
///
/// Strings that would read back as another scalar type (`true`, `null`,
/// `42`) are quoted too.
pub fn is_bare_scalar(s: &str) -> bool {
    !s.is_empty()
        && s.trim() == s
        && !s.contains(STRUCTURAL_CHARS)
        && !s.starts_with(['"', '\'', '-'])
        && !s.chars().any(char::is_control)
        && !reads_as_non_string(s)
}

fn reads_as_non_string(s: &str) -> bool {
    matches!(s, "true" | "false" | "null" | "~") || s.parse::<f64>().is_ok()
}

/// JSON string literal for `s`
pub fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// `s` unquoted when safe, JSON-quoted otherwise
pub fn scalar_string(s: &str) -> String {
    if is_bare_scalar(s) {
        s.to_string()
    } else {
        quote(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_appends_suffix() {
        assert_eq!(truncate("abcdef", Limit::Chars(3)), "abc... (truncated)");
        assert_eq!(truncate("abc", Limit::Chars(3)), "abc");
        assert_eq!(truncate("abcdef", Limit::Unlimited), "abcdef");
        assert_eq!(truncate("abcdef", Limit::chars(0)), "abcdef");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let out = truncate("ééééé", Limit::Chars(2));
        assert_eq!(out, format!("éé{}", TRUNCATION_SUFFIX));
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("hello world", 5), "hello...");
        assert_eq!(ellipsize("hello", 5), "hello");
    }

    #[test]
    fn test_looks_like_json() {
        assert!(looks_like_json("  {\"a\": 1}"));
        assert!(looks_like_json("[1, 2]"));
        assert!(!looks_like_json("plain text {"));
    }

    #[test]
    fn test_fence_grows_past_inner_backticks() {
        assert_eq!(fence("x", "json"), "```json\nx\n```");
        assert_eq!(fence("a\n```\nb\n", ""), "````\na\n```\nb\n````");
    }

    #[test]
    fn test_bare_scalar_rules() {
        assert!(is_bare_scalar("hello world"));
        assert!(is_bare_scalar("/tmp/x.py"));
        assert!(!is_bare_scalar(""));
        assert!(!is_bare_scalar(" padded"));
        assert!(!is_bare_scalar("key: value"));
        assert!(!is_bare_scalar("a # comment"));
        assert!(!is_bare_scalar("true"));
        assert!(!is_bare_scalar("12.5"));
        assert!(!is_bare_scalar("- item"));
        assert!(!is_bare_scalar("tab\there"));
    }

    #[test]
    fn test_scalar_string_quotes_when_needed() {
        assert_eq!(scalar_string("plain"), "plain");
        assert_eq!(scalar_string("a, b"), "\"a, b\"");
        assert_eq!(scalar_string("say \"hi\": now"), r#""say \"hi\": now""#);
    }
}

use log::debug;
use serde_json::{Map, Value};

/// Keys whose string value is the whole payload of a small wrapper object
const SINGLE_VALUE_KEYS: &[&str] = &["output", "result", "text", "content", "message", "data"];

/// Wrappers with more keys than this are not unwrapped
const SINGLE_VALUE_MAX_KEYS: usize = 3;

/// Extract the human-relevant payload from a known JSON envelope.
///
/// Recognized shapes:
/// - command execution results (`stdout` + `returncode`, optional `stderr`)
/// - small objects holding a single string under one of [`SINGLE_VALUE_KEYS`]
///
/// Anything else, including text that fails to parse, is returned unchanged.
pub fn unwrap_tool_output(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return text.to_string();
    }

    let obj = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(obj)) => obj,
        Ok(_) => return text.to_string(),
        Err(err) => {
            debug!("tool output looks like JSON but does not parse: {}", err);
            return text.to_string();
        }
    };

    if is_command_result(&obj) {
        return unwrap_command_result(&obj).unwrap_or_else(|| text.to_string());
    }

    if let Some(unwrapped) = unwrap_single_value(&obj) {
        return unwrapped.to_string();
    }

    text.to_string()
}

fn is_command_result(obj: &Map<String, Value>) -> bool {
    obj.contains_key("stdout") && obj.contains_key("returncode")
}

/// `None` when both streams are empty
fn unwrap_command_result(obj: &Map<String, Value>) -> Option<String> {
    let stdout = stream_text(obj.get("stdout"));
    let stderr = stream_text(obj.get("stderr"));
    if stdout.is_empty() && stderr.is_empty() {
        return None;
    }

    let mut sections = Vec::new();
    if !stdout.is_empty() {
        sections.push(stdout.to_string());
    }
    if !stderr.is_empty() {
        sections.push(format!("**stderr:**\n{}", stderr));
    }

    match obj.get("returncode").and_then(Value::as_i64) {
        Some(0) | None => {}
        Some(code) => sections.push(format!("_(exit code: {})_", code)),
    }

    Some(sections.join("\n\n"))
}

fn stream_text(value: Option<&Value>) -> &str {
    value.and_then(Value::as_str).map(str::trim).unwrap_or("")
}

fn unwrap_single_value(obj: &Map<String, Value>) -> Option<&str> {
    if obj.len() > SINGLE_VALUE_MAX_KEYS {
        return None;
    }

    let mut strings = SINGLE_VALUE_KEYS
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str));

    match (strings.next(), strings.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_json_is_unchanged() {
        assert_eq!(unwrap_tool_output("plain output"), "plain output");
        assert_eq!(unwrap_tool_output("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn test_malformed_json_is_unchanged() {
        assert_eq!(unwrap_tool_output("{\"stdout\": "), "{\"stdout\": ");
    }

    #[test]
    fn test_command_result_stdout_only() {
        let out = unwrap_tool_output(r#"{"returncode":0,"stdout":"hello\n","stderr":""}"#);
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_command_result_with_stderr_and_exit_code() {
        let out = unwrap_tool_output(
            r#"{"returncode":2,"stdout":"partial\n","stderr":"  boom\n"}"#,
        );
        assert_eq!(out, "partial\n\n**stderr:**\nboom\n\n_(exit code: 2)_");
    }

    #[test]
    fn test_command_result_stderr_only() {
        let out = unwrap_tool_output(r#"{"returncode":1,"stdout":"","stderr":"not found"}"#);
        assert_eq!(out, "**stderr:**\nnot found\n\n_(exit code: 1)_");
    }

    #[test]
    fn test_empty_command_result_is_unchanged() {
        let raw = r#"{"returncode":1,"stdout":"","stderr":""}"#;
        assert_eq!(unwrap_tool_output(raw), raw);
    }

    #[test]
    fn test_empty_command_result_skips_single_value_wrapper() {
        let raw = r#"{"stdout":"","returncode":0,"output":"x"}"#;
        assert_eq!(unwrap_tool_output(raw), raw);
    }

    #[test]
    fn test_single_value_wrapper() {
        assert_eq!(unwrap_tool_output(r#"{"output": "done"}"#), "done");
        assert_eq!(
            unwrap_tool_output(r#"{"result": "ok", "status": 200, "id": 1}"#),
            "ok"
        );
    }

    #[test]
    fn test_single_value_wrapper_rejects_ambiguity() {
        let two = r#"{"output": "a", "message": "b"}"#;
        assert_eq!(unwrap_tool_output(two), two);

        let too_many = r#"{"output": "a", "b": 1, "c": 2, "d": 3}"#;
        assert_eq!(unwrap_tool_output(too_many), too_many);

        let not_string = r#"{"result": {"nested": true}}"#;
        assert_eq!(unwrap_tool_output(not_string), not_string);
    }
}

#[cfg(test)]
#[path = "event_interpreter_test.rs"]
mod tests;

use serde_json::Value;

use crate::domain::models::EventParseError;
use crate::domain::models::StepEvent;

fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => return "".to_string(),
        Some(Value::String(text)) => return text.to_string(),
        Some(other) => return other.to_string(),
    }
}

fn optional_text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        None | Some(Value::Null) => return None,
        Some(_) => return Some(text_field(value, key)),
    }
}

pub struct EventInterpreter {}

impl EventInterpreter {
    /// Classifies one data payload by its `type` field. Anything that is not a
    /// thinking or tool call step is a text delta, including payloads without
    /// a `type` at all.
    pub fn interpret(payload: &str) -> Result<StepEvent, EventParseError> {
        let value: Value = serde_json::from_str(payload).map_err(|err| {
            return EventParseError {
                line: payload.to_string(),
                reason: err.to_string(),
            };
        })?;

        match value.get("type").and_then(Value::as_str) {
            Some("thinking") => {
                return Ok(StepEvent::Thinking {
                    content: text_field(&value, "content"),
                });
            }
            Some("tool_call") => {
                return Ok(StepEvent::ToolCall {
                    tool_name: text_field(&value, "tool_name"),
                    tool_args: value.get("tool_args").cloned().unwrap_or(Value::Null),
                    tool_result: optional_text_field(&value, "tool_result"),
                });
            }
            _ => {
                return Ok(StepEvent::TextDelta {
                    content: text_field(&value, "content"),
                });
            }
        }
    }
}

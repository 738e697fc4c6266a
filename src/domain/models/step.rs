#[cfg(test)]
#[path = "step_test.rs"]
mod tests;

use serde_json::Value;

/// Marker every data line of the response stream starts with.
pub const DATA_PREFIX: &str = "data: ";

/// A single data line taken off the wire, with its payload still encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub payload: String,
}

impl EventRecord {
    /// Builds a record from one raw line without its `\n`. Returns `None` for
    /// anything that isn't a data line.
    pub fn from_line(line: &[u8]) -> Option<EventRecord> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let text = String::from_utf8_lossy(line);

        return text.strip_prefix(DATA_PREFIX).map(|payload| {
            return EventRecord {
                payload: payload.to_string(),
            };
        });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepEvent {
    /// Incremental fragment of the final answer.
    TextDelta { content: String },
    /// Free-form reasoning, shown collapsed.
    Thinking { content: String },
    /// One tool invocation. A missing result renders without a result block.
    ToolCall {
        tool_name: String,
        tool_args: Value,
        tool_result: Option<String>,
    },
}

impl StepEvent {
    pub fn title(&self) -> String {
        match self {
            StepEvent::TextDelta { .. } => return "Text".to_string(),
            StepEvent::Thinking { .. } => return "Thinking Process".to_string(),
            StepEvent::ToolCall { tool_name, .. } => return format!("Tool Call: {tool_name}"),
        }
    }

    /// Body shown when the step is expanded.
    pub fn detail_lines(&self) -> Vec<String> {
        match self {
            StepEvent::TextDelta { content } | StepEvent::Thinking { content } => {
                return content
                    .lines()
                    .map(|line| return line.to_string())
                    .collect();
            }
            StepEvent::ToolCall {
                tool_name,
                tool_args,
                tool_result,
            } => {
                let mut lines = vec![format!("Tool: {tool_name}"), "Arguments:".to_string()];
                let args = serde_json::to_string_pretty(tool_args)
                    .unwrap_or_else(|_| return tool_args.to_string());
                lines.extend(args.lines().map(|line| return format!("  {line}")));

                if let Some(result) = tool_result {
                    if !result.is_empty() {
                        lines.push("Result:".to_string());
                        lines.extend(result.lines().map(|line| return format!("  {line}")));
                    }
                }

                return lines;
            }
        }
    }
}

#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;

use crate::domain::models::Message;
use crate::domain::models::StepEvent;

pub struct ConversationRenderer {}

impl ConversationRenderer {
    /// Text deltas grow the message text. Every other event is appended as a
    /// new step; earlier steps are never patched, even when a later tool call
    /// repeats the same tool with its result.
    pub fn apply(message: &mut Message, event: StepEvent) {
        match event {
            StepEvent::TextDelta { content } => message.append(&content),
            step => message.push_step(step),
        }
    }
}

#[cfg(test)]
#[path = "chat_controller_test.rs"]
mod tests;

use super::ConversationRenderer;
use crate::domain::models::Author;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::ChatError;
use crate::domain::models::ChatState;
use crate::domain::models::Message;
use crate::domain::models::StepEvent;

/// Owns the conversation and drives one request/response cycle at a time:
/// `Idle -> Sending -> Streaming -> Completed | Failed`.
pub struct ChatController {
    session_id: String,
    state: ChatState,
    messages: Vec<Message>,
    /// Index of the assistant message the in-flight request writes to.
    pending: Option<usize>,
}

impl ChatController {
    pub fn new(session_id: &str) -> ChatController {
        return ChatController {
            session_id: session_id.to_string(),
            state: ChatState::Idle,
            messages: vec![],
            pending: None,
        };
    }

    pub fn session_id(&self) -> &str {
        return &self.session_id;
    }

    pub fn state(&self) -> &ChatState {
        return &self.state;
    }

    pub fn is_busy(&self) -> bool {
        return self.state.is_busy();
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    /// Appends a message that is not part of a request, e.g. a greeting or a
    /// notice. History is append-only.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Starts a new cycle for `text`. Blank input leaves the state untouched.
    pub fn submit(&mut self, text: &str) -> Result<BackendPrompt, ChatError> {
        if self.is_busy() {
            return Err(ChatError::Busy);
        }

        let content = text.trim();
        if content.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        self.messages.push(Message::new(Author::User, content));
        self.pending = None;
        self.state = ChatState::Sending;
        tracing::debug!(session_id = %self.session_id, "Submitting message");

        return Ok(BackendPrompt::new(
            self.session_id.to_string(),
            content.to_string(),
        ));
    }

    pub fn handle_response(&mut self, response: BackendResponse) {
        match response {
            BackendResponse::Started => {
                if self.state != ChatState::Sending {
                    tracing::warn!(state = ?self.state, "Ignoring stream start");
                    return;
                }
                self.open_assistant_message();
                self.state = ChatState::Streaming;
            }
            BackendResponse::Step(event) => {
                if self.state != ChatState::Streaming {
                    tracing::warn!(state = ?self.state, "Ignoring step outside of a stream");
                    return;
                }
                if let Some(message) = self.pending_message() {
                    ConversationRenderer::apply(message, event);
                }
            }
            BackendResponse::Malformed(err) => {
                tracing::warn!(line = %err.line, reason = %err.reason, "Error parsing event");
            }
            BackendResponse::Done => {
                if !self.is_busy() {
                    tracing::warn!(state = ?self.state, "Ignoring stream end");
                    return;
                }
                self.open_assistant_message();
                self.pending = None;
                self.state = ChatState::Completed;
            }
            BackendResponse::Failed(err) => {
                self.fail(err);
            }
        }
    }

    fn fail(&mut self, err: ChatError) {
        if !self.is_busy() {
            tracing::warn!(state = ?self.state, error = ?err, "Ignoring failure outside of a request");
            return;
        }

        tracing::error!(error = ?err, "Request failed");
        self.open_assistant_message();
        if let Some(message) = self.pending_message() {
            message.set_error(&format!(
                "Error: {err}. Please check the debug log for more details."
            ));
            ConversationRenderer::apply(
                message,
                StepEvent::Thinking {
                    content: format!("Error details: {err:?}"),
                },
            );
        }

        self.pending = None;
        self.state = ChatState::Failed(err);
    }

    fn open_assistant_message(&mut self) {
        if self.pending.is_some() {
            return;
        }

        self.messages.push(Message::new(Author::Assistant, ""));
        self.pending = Some(self.messages.len() - 1);
    }

    fn pending_message(&mut self) -> Option<&mut Message> {
        let idx = self.pending?;
        return self.messages.get_mut(idx);
    }
}

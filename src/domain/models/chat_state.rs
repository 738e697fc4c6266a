use super::ChatError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Sending,
    Streaming,
    Completed,
    Failed(ChatError),
}

impl ChatState {
    /// A request is in flight and owns the latest assistant message.
    pub fn is_busy(&self) -> bool {
        return matches!(self, ChatState::Sending | ChatState::Streaming);
    }

    pub fn is_terminal(&self) -> bool {
        return matches!(self, ChatState::Completed | ChatState::Failed(_));
    }
}

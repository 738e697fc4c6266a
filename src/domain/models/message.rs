#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use super::Author;
use super::StepEvent;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

/// Metadata of a file attached through the upload stub. The file itself is
/// never read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub author: Author,
    pub text: String,
    pub steps: Vec<StepEvent>,
    pub attachment: Option<FileInfo>,
    mtype: MessageType,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message::new_with_type(author, MessageType::Normal, text);
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string(),
            steps: vec![],
            attachment: None,
            mtype,
        };
    }

    pub fn with_attachment(mut self, attachment: FileInfo) -> Message {
        self.attachment = Some(attachment);
        return self;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn append(&mut self, text: &str) {
        self.text += text;
    }

    pub fn push_step(&mut self, step: StepEvent) {
        self.steps.push(step);
    }

    /// Replaces the text with an error. Steps collected so far are kept.
    pub fn set_error(&mut self, text: &str) {
        self.text = text.to_string();
        self.mtype = MessageType::Error;
    }
}

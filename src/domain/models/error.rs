use thiserror::Error;

/// Failures of one request/response cycle. Only `EmptyInput` and `Busy` are
/// raised before a request is made, everything else ends the current exchange.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("HTTP error! status: {status}, message: {body}")]
    Transport { status: u16, body: String },
    #[error("network failure: {0}")]
    Network(String),
    #[error("stream read failed: {0}")]
    StreamRead(String),
    #[error("request aborted")]
    Aborted,
    #[error("message is empty")]
    EmptyInput,
    #[error("a response is still in progress")]
    Busy,
}

/// One event line whose payload is not valid JSON. Never fatal to a stream.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("failed to parse event payload ({reason}): {line}")]
pub struct EventParseError {
    pub line: String,
    pub reason: String,
}

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::ChatError;
use super::Event;
use super::EventParseError;
use super::StepEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendPrompt {
    pub session_id: String,
    pub text: String,
}

impl BackendPrompt {
    pub fn new(session_id: String, text: String) -> BackendPrompt {
        return BackendPrompt { session_id, text };
    }
}

/// Progress of one request, in the order a backend reports it: `Started` once
/// headers arrive, any number of `Step`/`Malformed`, then `Done` or `Failed`.
#[derive(Clone, Debug, PartialEq)]
pub enum BackendResponse {
    Started,
    Step(StepEvent),
    Malformed(EventParseError),
    Done,
    Failed(ChatError),
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the backend is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Sends one user message and streams every interpreted event back
    /// through the channel, finishing with `BackendResponse::Done`.
    ///
    /// Errors are returned rather than sent, so the caller decides how a
    /// failed exchange is reported. When `cancel` fires the request is
    /// dropped and `ChatError::Aborted` is returned.
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
        cancel: CancellationToken,
    ) -> Result<()>;
}

#[cfg(test)]
#[path = "agent_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::ChatError;
use crate::domain::models::Event;
use crate::domain::models::EventRecord;
use crate::domain::services::EventInterpreter;
use crate::domain::services::StreamDecoder;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    session_id: String,
    content: String,
}

fn send_response(tx: &mpsc::UnboundedSender<Event>, res: BackendResponse) -> Result<()> {
    tx.send(Event::BackendResponse(res))?;
    return Ok(());
}

fn dispatch(record: EventRecord, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tracing::debug!(payload = %record.payload, "Received event");

    match EventInterpreter::interpret(&record.payload) {
        Ok(step) => return send_response(tx, BackendResponse::Step(step)),
        Err(err) => {
            tracing::error!(line = %err.line, reason = %err.reason, "Error parsing message");
            return send_response(tx, BackendResponse::Malformed(err));
        }
    }
}

/// Client for the agent backend's streaming message endpoint.
pub struct AgentBackend {
    url: String,
    timeout: String,
}

impl Default for AgentBackend {
    fn default() -> AgentBackend {
        return AgentBackend {
            url: Config::get(ConfigKey::BackendURL),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

impl AgentBackend {
    fn messages_url(&self) -> String {
        return format!("{url}/api/messages/", url = self.url.trim_end_matches('/'));
    }
}

#[async_trait]
impl Backend for AgentBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Backend URL is not defined");
        }

        // The messages route answers OPTIONS without a session id.
        let res = reqwest::Client::new()
            .request(Method::OPTIONS, self.messages_url())
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Backend is not reachable");
            bail!("Backend is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Backend health check failed");
            bail!("Backend health check failed with status {status}");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
        cancel: CancellationToken,
    ) -> Result<()> {
        let req = MessageRequest {
            session_id: prompt.session_id,
            content: prompt.text,
        };
        tracing::debug!(session_id = %req.session_id, "Sending message to backend");

        let pending = reqwest::Client::new()
            .post(self.messages_url())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "text/event-stream")
            .json(&req)
            .send();

        let res = tokio::select! {
            biased;
            _ = cancel.cancelled() => bail!(ChatError::Aborted),
            res = pending => res.map_err(|err| return ChatError::Network(err.to_string()))?,
        };

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = tokio::select! {
                biased;
                _ = cancel.cancelled() => bail!(ChatError::Aborted),
                body = res.text() => body.unwrap_or_default(),
            };
            tracing::error!(status = status, body = %body, "Backend error");
            bail!(ChatError::Transport { status, body });
        }

        send_response(tx, BackendResponse::Started)?;

        let mut stream = res.bytes_stream();
        let mut decoder = StreamDecoder::default();

        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => bail!(ChatError::Aborted),
                chunk = stream.next() => chunk,
            };

            let bytes = match chunk {
                Some(Ok(bytes)) => bytes,
                Some(Err(err)) => bail!(ChatError::StreamRead(err.to_string())),
                None => break,
            };

            tracing::debug!(len = bytes.len(), "Received chunk");
            for record in decoder.feed(&bytes) {
                dispatch(record, tx)?;
            }
        }

        if let Some(record) = decoder.finish() {
            dispatch(record, tx)?;
        }

        send_response(tx, BackendResponse::Done)?;

        return Ok(());
    }
}

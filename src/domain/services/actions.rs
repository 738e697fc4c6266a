#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendResponse;
use crate::domain::models::ChatError;
use crate::domain::models::Event;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /toggle (/t) [STEP_NUMBER?] - Expands or collapses a thinking or tool call step. Without a number the latest step is toggled.
- /upload (/u) [PATH] - Attaches a file to the chat. Files are not sent to the backend yet.
- /login [EMAIL] - Signs in locally and shows EMAIL as your name. Nothing is sent to the backend.
- /register [EMAIL] - Same as /login.
- /session (/s) - Shows the session id sent with every message.
- /quit /exit (/q) - Exit Parley.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Abort the response in progress, otherwise exit.
        "#;

    return text.trim().to_string();
}

/// Maps a worker failure back onto the chat error taxonomy.
fn to_chat_error(err: anyhow::Error) -> ChatError {
    match err.downcast::<ChatError>() {
        Ok(chat_err) => return chat_err,
        Err(other) => return ChatError::Network(format!("{other:#}")),
    }
}

fn worker_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    let chat_err = to_chat_error(err);
    tracing::error!(error = ?chat_err, "Backend request failed");
    tx.send(Event::BackendResponse(BackendResponse::Failed(chat_err)))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs backend requests off the UI loop, one at a time. Starting a new
    /// request cancels whatever is still in flight.
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend = Arc::new(backend);
        let mut cancel = CancellationToken::new();

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                cancel.cancel();
                return Ok(());
            }

            match action.unwrap() {
                Action::BackendAbort() => {
                    tracing::debug!("Aborting backend request");
                    cancel.cancel();
                }
                Action::BackendRequest(prompt) => {
                    cancel.cancel();
                    cancel = CancellationToken::new();

                    let worker_backend = backend.clone();
                    let worker_cancel = cancel.clone();
                    let worker_tx = tx.clone();
                    tokio::spawn(async move {
                        let res = worker_backend
                            .get_completion(prompt, &worker_tx, worker_cancel)
                            .await;

                        if let Err(err) = res {
                            worker_error(err, &worker_tx)?;
                        }

                        return Ok::<(), anyhow::Error>(());
                    });
                }
            }
        }
    }
}

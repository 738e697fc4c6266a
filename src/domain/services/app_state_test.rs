use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::AppState;
use super::GREETING;
use crate::domain::models::Author;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::ChatState;
use crate::domain::models::Event;
use crate::domain::models::MessageType;
use crate::domain::models::StepEvent;

struct FakeBackend {
    healthy: bool,
}

#[async_trait]
impl Backend for FakeBackend {
    async fn health_check(&self) -> Result<()> {
        if !self.healthy {
            bail!("connection refused");
        }
        return Ok(());
    }

    async fn get_completion<'a>(
        &self,
        _prompt: BackendPrompt,
        _tx: &'a mpsc::UnboundedSender<Event>,
        _cancel: CancellationToken,
    ) -> Result<()> {
        return Ok(());
    }
}

async fn app_state() -> Result<AppState> {
    let backend: BackendBox = Box::new(FakeBackend { healthy: true });
    return AppState::new(&backend, "session-1").await;
}

fn thinking(content: &str) -> BackendResponse {
    return BackendResponse::Step(StepEvent::Thinking {
        content: content.to_string(),
    });
}

fn last_text(app_state: &AppState) -> String {
    return app_state.chat.messages().last().unwrap().text.to_string();
}

#[tokio::test]
async fn it_greets_the_user() -> Result<()> {
    let app_state = app_state().await?;
    let messages = app_state.chat.messages();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].author, Author::Assistant);
    assert_eq!(messages[0].text, GREETING);
    return Ok(());
}

#[tokio::test]
async fn it_warns_when_backend_is_unreachable() -> Result<()> {
    let backend: BackendBox = Box::new(FakeBackend { healthy: false });
    let app_state = AppState::new(&backend, "session-1").await?;
    let messages = app_state.chat.messages();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].author, Author::Parley);
    assert_eq!(messages[1].message_type(), MessageType::Error);
    assert!(messages[1].text.contains("isn't reachable"));
    assert!(messages[1].text.contains("connection refused"));
    return Ok(());
}

#[tokio::test]
async fn it_ignores_blank_input() -> Result<()> {
    let mut app_state = app_state().await?;

    assert!(app_state.submit("   ").is_none());
    assert_eq!(app_state.chat.messages().len(), 1);
    assert!(!app_state.waiting_for_backend());
    return Ok(());
}

#[tokio::test]
async fn it_submits_and_blocks_second_submission() -> Result<()> {
    let mut app_state = app_state().await?;

    let prompt = app_state.submit("What is 2+2?").unwrap();
    assert_eq!(prompt.session_id, "session-1");
    assert_eq!(prompt.text, "What is 2+2?");
    assert!(app_state.waiting_for_backend());

    assert!(app_state.submit("Hello?").is_none());
    assert!(last_text(&app_state).contains("Still waiting"));
    return Ok(());
}

#[tokio::test]
async fn it_streams_a_response() -> Result<()> {
    let mut app_state = app_state().await?;
    app_state.submit("What is 2+2?").unwrap();

    app_state.handle_backend_response(BackendResponse::Started);
    app_state.handle_backend_response(thinking("add them"));
    app_state.handle_backend_response(BackendResponse::Step(StepEvent::TextDelta {
        content: "4".to_string(),
    }));
    app_state.handle_backend_response(BackendResponse::Done);

    assert_eq!(app_state.chat.state(), &ChatState::Completed);
    assert_eq!(last_text(&app_state), "4");
    assert_eq!(app_state.step_count(), 1);
    assert!(!app_state.waiting_for_backend());
    return Ok(());
}

#[tokio::test]
async fn it_toggles_steps() -> Result<()> {
    let mut app_state = app_state().await?;
    app_state.toggle_step(None);
    assert!(last_text(&app_state).contains("no steps"));

    app_state.submit("Plan it").unwrap();
    app_state.handle_backend_response(BackendResponse::Started);
    app_state.handle_backend_response(thinking("first"));
    app_state.handle_backend_response(thinking("second"));
    app_state.handle_backend_response(BackendResponse::Done);

    app_state.toggle_step(Some(1));
    assert!(app_state.expanded_steps.contains(&1));

    app_state.toggle_step(None);
    assert!(app_state.expanded_steps.contains(&2));

    app_state.toggle_step(Some(1));
    assert!(!app_state.expanded_steps.contains(&1));

    app_state.toggle_step(Some(3));
    assert!(last_text(&app_state).contains("between 1 and 2"));
    return Ok(());
}

#[tokio::test]
async fn it_passes_plain_text_through_slash_commands() -> Result<()> {
    let mut app_state = app_state().await?;

    assert_eq!(app_state.handle_slash_commands("hello").await?, (false, false));
    assert_eq!(app_state.handle_slash_commands("/nope").await?, (false, false));
    assert_eq!(app_state.chat.messages().len(), 1);
    return Ok(());
}

#[tokio::test]
async fn it_quits() -> Result<()> {
    let mut app_state = app_state().await?;

    assert_eq!(app_state.handle_slash_commands("/quit").await?, (true, false));
    assert_eq!(app_state.handle_slash_commands("/q").await?, (true, false));
    return Ok(());
}

#[tokio::test]
async fn it_shows_session_and_help() -> Result<()> {
    let mut app_state = app_state().await?;

    assert_eq!(app_state.handle_slash_commands("/session").await?, (false, true));
    assert_eq!(last_text(&app_state), "Session ID: session-1");

    app_state.handle_slash_commands("/help").await?;
    assert!(last_text(&app_state).contains("COMMANDS:"));
    return Ok(());
}

#[tokio::test]
async fn it_rejects_bad_toggle_argument() -> Result<()> {
    let mut app_state = app_state().await?;
    app_state.handle_slash_commands("/toggle abc").await?;

    let message = app_state.chat.messages().last().unwrap();
    assert_eq!(message.message_type(), MessageType::Error);
    assert!(message.text.contains("'abc'"));
    return Ok(());
}

#[tokio::test]
async fn it_requires_email_to_sign_in() -> Result<()> {
    let mut app_state = app_state().await?;
    app_state.handle_slash_commands("/login").await?;

    let message = app_state.chat.messages().last().unwrap();
    assert_eq!(message.message_type(), MessageType::Error);
    assert!(message.text.contains("email is required"));
    return Ok(());
}

#[tokio::test]
async fn it_attaches_uploaded_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("notes.txt");
    std::fs::write(&file_path, "hello world")?;

    let mut app_state = app_state().await?;
    app_state
        .handle_slash_commands(&format!("/upload {}", file_path.to_string_lossy()))
        .await?;

    let messages = app_state.chat.messages();
    let upload = &messages[messages.len() - 2];
    let attachment = upload.attachment.as_ref().unwrap();
    assert_eq!(upload.author, Author::User);
    assert_eq!(attachment.name, "notes.txt");
    assert_eq!(attachment.size, 11);
    assert_eq!(
        last_text(&app_state),
        "I see you've uploaded notes.txt. How can I help you with this file?"
    );
    assert!(!app_state.waiting_for_backend());
    return Ok(());
}

#[tokio::test]
async fn it_keeps_repeated_spaces_in_upload_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("my  notes.txt");
    std::fs::write(&file_path, "abc")?;

    let mut app_state = app_state().await?;
    app_state
        .handle_slash_commands(&format!("/upload {}", file_path.to_string_lossy()))
        .await?;

    let messages = app_state.chat.messages();
    let attachment = messages[messages.len() - 2].attachment.as_ref().unwrap();
    assert_eq!(attachment.name, "my  notes.txt");
    assert_eq!(attachment.size, 3);
    return Ok(());
}

#[tokio::test]
async fn it_reports_missing_upload() -> Result<()> {
    let mut app_state = app_state().await?;
    app_state
        .handle_slash_commands("/upload ./does-not-exist.txt")
        .await?;

    let message = app_state.chat.messages().last().unwrap();
    assert_eq!(message.message_type(), MessageType::Error);
    assert!(message.text.contains("Unable to read ./does-not-exist.txt"));
    return Ok(());
}

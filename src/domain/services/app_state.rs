#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::collections::HashSet;
use std::path;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::fs;

use super::actions::help_text;
use super::BubbleList;
use super::ChatController;
use super::Scroll;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::ChatError;
use crate::domain::models::FileInfo;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;

pub const GREETING: &str = "Hello! How can I help you today?";

pub struct AppState {
    pub bubble_list: BubbleList,
    pub chat: ChatController,
    pub expanded_steps: HashSet<usize>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub scroll: Scroll,
}

impl AppState {
    pub async fn new(backend: &BackendBox, session_id: &str) -> Result<AppState> {
        let mut app_state = AppState {
            bubble_list: BubbleList::new(),
            chat: ChatController::new(session_id),
            expanded_steps: HashSet::new(),
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
        };

        app_state.add_message(Message::new(Author::Assistant, GREETING));

        if let Err(err) = backend.health_check().await {
            tracing::warn!(error = %err, "Backend health check failed");
            app_state.add_message(Message::new_with_type(
                Author::Parley,
                MessageType::Error,
                &format!(
                    "Hey, it looks like the backend at {} isn't reachable. You should double check it's running before we start talking, otherwise every message will fail.\n\nError: {err}",
                    Config::get(ConfigKey::BackendURL)
                ),
            ));
        }

        return Ok(app_state);
    }

    pub fn waiting_for_backend(&self) -> bool {
        return self.chat.is_busy();
    }

    /// Total number of steps across the conversation. Steps are numbered
    /// from 1 in the order they arrived.
    pub fn step_count(&self) -> usize {
        return self
            .chat
            .messages()
            .iter()
            .map(|message| return message.steps.len())
            .sum();
    }

    /// Sends `text` to the chat controller. Returns the prompt to hand to the
    /// backend, or `None` when nothing should be sent.
    pub fn submit(&mut self, text: &str) -> Option<BackendPrompt> {
        match self.chat.submit(text) {
            Ok(prompt) => {
                self.sync_dependants();
                self.scroll.last();
                return Some(prompt);
            }
            Err(ChatError::EmptyInput) => {
                return None;
            }
            Err(ChatError::Busy) => {
                self.add_notice("Still waiting on the previous response. Press CTRL+C to abort it.");
                return None;
            }
            Err(err) => {
                self.add_error(&err.to_string());
                return None;
            }
        }
    }

    /// Keeps the view pinned to the newest rows unless the user scrolled away.
    pub fn handle_backend_response(&mut self, res: BackendResponse) {
        let follow = self.scroll.is_at_bottom();
        self.chat.handle_response(res);
        self.sync_dependants();

        if follow {
            self.scroll.last();
        }

        if self.chat.state().is_terminal() {
            tracing::debug!(state = ?self.chat.state(), "Request finished");
        }
    }

    /// Flips a step between collapsed and expanded. Without a number the
    /// latest step is toggled.
    pub fn toggle_step(&mut self, number: Option<usize>) {
        let count = self.step_count();
        if count == 0 {
            self.add_notice("There are no steps to toggle yet.");
            return;
        }

        let number = number.unwrap_or(count);
        if number == 0 || number > count {
            self.add_error(&format!(
                "Step {number} doesn't exist. Pick a number between 1 and {count}."
            ));
            return;
        }

        if !self.expanded_steps.remove(&number) {
            self.expanded_steps.insert(number);
        }

        self.sync_dependants();
    }

    /// Runs a slash command. Returns `(should_break, should_continue)`, where
    /// `should_continue` means the input was consumed and must not be sent.
    pub async fn handle_slash_commands(&mut self, input_str: &str) -> Result<(bool, bool)> {
        let command = match SlashCommand::parse(input_str) {
            Some(command) => command,
            None => return Ok((false, false)),
        };

        if command.is_quit() {
            return Ok((true, false));
        }

        self.add_message(Message::new(Author::User, input_str.trim()));

        if command.is_help() {
            self.add_notice(&help_text());
        } else if command.is_session() {
            self.add_notice(&format!("Session ID: {}", self.chat.session_id()));
        } else if command.is_toggle() {
            match command.args.first() {
                None => self.toggle_step(None),
                Some(arg) => match arg.parse::<usize>() {
                    Ok(number) => self.toggle_step(Some(number)),
                    Err(_) => self.add_error(&format!("'{arg}' isn't a step number.")),
                },
            }
        } else if command.is_login() || command.is_register() {
            self.sign_in(&command.arg_text(), command.is_register());
        } else if command.is_upload() {
            self.upload(&command.arg_text()).await?;
        }

        return Ok((false, true));
    }

    fn sign_in(&mut self, email: &str, register: bool) {
        if email.is_empty() {
            self.add_error("An email is required, e.g. `/login me@example.com`.");
            return;
        }

        Config::set(ConfigKey::Username, email);
        self.bubble_list.invalidate();
        tracing::debug!(username = %email, register, "Signed in");

        let verb = if register { "Registered" } else { "Signed in" };
        self.add_notice(&format!(
            "{verb} as {email}. Accounts only change the name shown in chat, nothing is sent to the backend."
        ));
    }

    async fn upload(&mut self, file_path: &str) -> Result<()> {
        if file_path.is_empty() {
            self.add_error("A file path is required, e.g. `/upload ./notes.txt`.");
            return Ok(());
        }

        let metadata = match fs::metadata(file_path).await {
            Ok(metadata) => metadata,
            Err(err) => {
                self.add_error(&format!("Unable to read {file_path}: {err}"));
                return Ok(());
            }
        };

        if !metadata.is_file() {
            self.add_error(&format!("{file_path} isn't a file."));
            return Ok(());
        }

        let name = path::Path::new(file_path)
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return file_path.to_string());

        self.add_message(
            Message::new(Author::User, "I have uploaded a file:").with_attachment(FileInfo {
                name: name.clone(),
                size: metadata.len(),
            }),
        );
        self.add_message(Message::new(
            Author::Assistant,
            &format!("I see you've uploaded {name}. How can I help you with this file?"),
        ));

        return Ok(());
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.chat.add_message(message);
        self.sync_dependants();
        self.scroll.last();
    }

    fn add_notice(&mut self, text: &str) {
        self.add_message(Message::new(Author::Parley, text));
    }

    fn add_error(&mut self, text: &str) {
        self.add_message(Message::new_with_type(
            Author::Parley,
            MessageType::Error,
            text,
        ));
    }

    fn sync_dependants(&mut self) {
        self.bubble_list.set_messages(
            self.chat.messages(),
            self.last_known_width as usize,
            &self.expanded_steps,
        );

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);
    }
}

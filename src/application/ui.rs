use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::SessionIdentity;
use crate::infrastructure::backends::agent::AgentBackend;
use crate::infrastructure::stores::StoreManager;

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
                .split(frame.size());

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            app_state
                .bubble_list
                .render(frame, layout[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if app_state.waiting_for_backend() {
                loading.render(frame, layout[1]);
            } else {
                frame.render_widget(textarea.widget(), layout[1]);
            }
        })?;

        match events.next().await? {
            Event::BackendResponse(res) => {
                app_state.handle_backend_response(res);
            }
            Event::KeyboardCTRLC() => {
                if !app_state.waiting_for_backend() {
                    break;
                }
                tx.send(Action::BackendAbort())?;
            }
            Event::KeyboardEnter() => {
                if app_state.waiting_for_backend() {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }
                textarea = TextArea::default();

                let (should_break, should_continue) =
                    app_state.handle_slash_commands(&input_str).await?;
                if should_break {
                    break;
                }
                if should_continue {
                    continue;
                }

                if let Some(prompt) = app_state.submit(&input_str) {
                    tx.send(Action::BackendRequest(prompt))?;
                }
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_backend() {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.waiting_for_backend() {
                    for char in text.chars() {
                        match char {
                            '\r' => {}
                            '\n' => textarea.insert_newline(),
                            _ => textarea.insert_char(char),
                        }
                    }
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {}
        }
    }

    return Ok(());
}

/// A session id passed on the command line wins over the stored one.
async fn resolve_session_id() -> Result<String> {
    let session_id = Config::get(ConfigKey::SessionID);
    if !session_id.is_empty() {
        return Ok(session_id);
    }

    let store = StoreManager::get(&Config::get(ConfigKey::StorageFile));
    return SessionIdentity::new(store).get_or_create().await;
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let session_id = resolve_session_id().await?;
    tracing::debug!(session_id = %session_id, "Resolved session");

    let backend: BackendBox = Box::<AgentBackend>::default();
    let mut app_state = AppState::new(&backend, &session_id).await?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}

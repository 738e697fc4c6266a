#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK_INTERVAL_MS: u64 = 500;

/// Maps a single key press to the event the app loop understands. Anything
/// unrecognised is handed to the text area as typed input.
pub fn map_input(input: Input) -> Event {
    match input {
        Input { key: Key::Up, .. } | Input {
            key: Key::MouseScrollUp,
            ..
        } => {
            return Event::UIScrollUp();
        }
        Input { key: Key::Down, .. } | Input {
            key: Key::MouseScrollDown,
            ..
        } => {
            return Event::UIScrollDown();
        }
        Input {
            key: Key::PageUp, ..
        }
        | Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => {
            return Event::UIScrollPageUp();
        }
        Input {
            key: Key::PageDown, ..
        }
        | Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => {
            return Event::UIScrollPageDown();
        }
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => {
            return Event::KeyboardCTRLC();
        }
        Input {
            key: Key::Enter, ..
        } => {
            return Event::KeyboardEnter();
        }
        input => {
            return Event::KeyboardCharInput(input);
        }
    }
}

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
                MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
                _ => return None,
            },
            CrosstermEvent::Key(keyevent) => return Some(map_input(keyevent.into())),
            _ => return None,
        }
    }

    /// Waits for the next backend response, terminal input, or tick,
    /// whichever comes first.
    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "Failed to read terminal event");
                        None
                    }
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(TICK_INTERVAL_MS)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}

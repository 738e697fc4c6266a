#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::collections::HashMap;
use std::collections::HashSet;

use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

/// What a cached bubble was rendered from. A bubble is re-rendered once any of
/// these change.
#[derive(PartialEq, Eq)]
struct BubbleCacheKey {
    text_len: usize,
    steps_len: usize,
    step_offset: usize,
    mtype: MessageType,
    has_attachment: bool,
}

impl BubbleCacheKey {
    fn new(message: &Message, step_offset: usize) -> BubbleCacheKey {
        return BubbleCacheKey {
            text_len: message.text.len(),
            steps_len: message.steps.len(),
            step_offset,
            mtype: message.message_type(),
            has_attachment: message.attachment.is_some(),
        };
    }
}

struct BubbleCacheEntry {
    key: BubbleCacheKey,
    lines: Vec<Line<'static>>,
}

#[derive(Default)]
pub struct BubbleList {
    cache: HashMap<usize, BubbleCacheEntry>,
    expanded_steps: HashSet<usize>,
    line_width: usize,
    lines_len: usize,
}

impl BubbleList {
    pub fn new() -> BubbleList {
        return BubbleList::default();
    }

    /// Drops every rendered bubble, e.g. after the user's display name changed.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn set_messages(
        &mut self,
        messages: &[Message],
        line_width: usize,
        expanded_steps: &HashSet<usize>,
    ) {
        if self.line_width != line_width || &self.expanded_steps != expanded_steps {
            self.cache.clear();
            self.line_width = line_width;
            self.expanded_steps = expanded_steps.clone();
        }

        let mut step_offset = 0;
        let mut lines_len = 0;

        for (idx, message) in messages.iter().enumerate() {
            let key = BubbleCacheKey::new(message, step_offset);
            step_offset += message.steps.len();

            if let Some(entry) = self.cache.get(&idx) {
                if entry.key == key {
                    lines_len += entry.lines.len();
                    continue;
                }
            }

            let mut align = BubbleAlignment::Left;
            if message.author == Author::User {
                align = BubbleAlignment::Right;
            }

            let lines = Bubble::new(
                message,
                align,
                line_width,
                key.step_offset,
                &self.expanded_steps,
            )
            .as_lines();
            lines_len += lines.len();

            self.cache.insert(idx, BubbleCacheEntry { key, lines });
        }

        self.cache.retain(|idx, _| return *idx < messages.len());
        self.lines_len = lines_len;
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: u16) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();
        let lines: Vec<Line> = indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|entry| return entry.lines.to_owned())
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}

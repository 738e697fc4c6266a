#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use std::collections::HashSet;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

/// Renders one message as a bordered chat bubble. Steps are listed above the
/// answer text and numbered from `step_offset + 1`.
pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
    step_offset: usize,
    expanded_steps: &'a HashSet<usize>,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let count = subtractions
        .into_iter()
        .map(|e| return e as i64)
        .reduce(|a, b| return a - b)
        .unwrap_or(0);

    if count <= 0 {
        return "".to_string();
    }

    return text.repeat(count as usize);
}

fn char_len(text: &str) -> usize {
    return text.chars().count();
}

/// Greedy word wrap on character count. Words longer than the width are
/// split mid-word.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = vec![];
    let mut current = String::new();

    for word in text.split(' ') {
        let mut word = word.to_string();

        loop {
            let current_len = char_len(&current);
            let separator = usize::from(current_len > 0);
            if current_len + separator + char_len(&word) <= width {
                if separator == 1 {
                    current.push(' ');
                }
                current.push_str(&word);
                break;
            }

            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                continue;
            }

            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            rows.push(head);
            if word.is_empty() {
                break;
            }
        }
    }

    rows.push(current);
    return rows;
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
        step_offset: usize,
        expanded_steps: &'a HashSet<usize>,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
            step_offset,
            expanded_steps,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    /// Unwrapped rows of the bubble body with their styles.
    fn content_rows(&self) -> Vec<(String, Style)> {
        let mut rows = vec![];

        if let Some(attachment) = &self.message.attachment {
            rows.push((
                format!("[file] {} ({} bytes)", attachment.name, attachment.size),
                Style::default().fg(Color::Yellow),
            ));
        }

        for (idx, step) in self.message.steps.iter().enumerate() {
            let number = self.step_offset + idx + 1;
            let expanded = self.expanded_steps.contains(&number);
            let marker = if expanded { "▾" } else { "▸" };

            rows.push((
                format!("{marker} ({number}) {}", step.title()),
                Style::default().fg(Color::Cyan),
            ));

            if expanded {
                for line in step.detail_lines() {
                    rows.push((format!("  {line}"), Style::default().fg(Color::DarkGray)));
                }
            }
        }

        let text = self.message.text.replace('\t', "    ");
        for line in text.lines() {
            rows.push((line.to_string(), Style::default()));
        }

        if rows.is_empty() {
            rows.push(("".to_string(), Style::default()));
        }

        return rows;
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let rows = self.content_rows();
        let max_line_length = self.get_max_line_length(&rows);

        let mut lines = vec![];
        for (row, style) in rows {
            for wrapped in wrap_text(&row, max_line_length) {
                lines.push(self.row_to_line(Span::styled(wrapped, style), max_line_length));
            }
        }

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn row_to_line(&self, span: Span<'static>, max_line_length: usize) -> Line<'static> {
        let line_str_len = char_len(&span.content);
        let fill = repeat_from_subtractions(" ", vec![max_line_length, line_str_len]);
        let formatted_line_length =
            line_str_len + fill.len() + Bubble::style_config().bubble_padding;

        let wrapped_spans = vec![
            self.highlight_span("│ ".to_string()),
            span,
            self.highlight_span(format!("{fill} │")),
        ];

        let outer_bubble_padding =
            repeat_from_subtractions(" ", vec![self.window_max_width, formatted_line_length]);

        if self.alignment == BubbleAlignment::Left {
            let mut line_spans = wrapped_spans;
            line_spans.push(Span::from(outer_bubble_padding));
            return Line::from(line_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self, rows: &[(String, Style)]) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available = self.window_max_width.saturating_sub(line_border_width).max(1);

        let longest = rows
            .iter()
            .map(|(row, _)| return char_len(row))
            .max()
            .unwrap_or(0);

        let username_len = char_len(&self.message.author.to_string());
        return longest.min(available).max(username_len).max(1);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        let username = self.message.author.to_string();
        // Add 2 for the vertical bars.
        let inner_bar_length = max_line_length + 2;
        let top_bar = format!(
            "╭{username}{}╮",
            "─".repeat(inner_bar_length.saturating_sub(char_len(&username)))
        );
        let bottom_bar = format!("╰{}╯", "─".repeat(inner_bar_length));
        let bar_bubble_padding = repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                max_line_length,
                Bubble::style_config().bubble_padding,
            ],
        );

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{bar_bubble_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
        } else {
            res.push(self.highlight_line(format!("{bar_bubble_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        }

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if self.message.message_type() == MessageType::Error {
            return Span::styled(text, Style::default().fg(Color::Red));
        } else if self.message.author == Author::Parley {
            // Brown
            return Span::styled(text, Style::default().fg(Color::Rgb(138, 85, 63)));
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}

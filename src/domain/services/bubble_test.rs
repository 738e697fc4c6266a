use std::collections::HashSet;

use ratatui::style::Color;
use ratatui::text::Line;
use serde_json::json;

use super::wrap_text;
use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::FileInfo;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::StepEvent;

fn to_strings(lines: Vec<Line<'static>>) -> Vec<String> {
    return lines
        .iter()
        .map(|line| {
            let text: String = line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect();
            return text.trim_end().to_string();
        })
        .collect();
}

fn thinking(content: &str) -> StepEvent {
    return StepEvent::Thinking {
        content: content.to_string(),
    };
}

#[test]
fn it_renders_small_bubble() {
    let message = Message::new(Author::Assistant, "Hi");
    let expanded = HashSet::new();
    let bubble = Bubble::new(&message, BubbleAlignment::Left, 30, 0, &expanded);

    assert_eq!(
        to_strings(bubble.as_lines()),
        vec![
            "╭Assistant──╮".to_string(),
            format!("│ Hi{}│", " ".repeat(8)),
            "╰───────────╯".to_string(),
        ]
    );
}

#[test]
fn it_pads_right_aligned_bubbles_on_the_left() {
    let message = Message::new(Author::Assistant, "Hi");
    let expanded = HashSet::new();
    let bubble = Bubble::new(&message, BubbleAlignment::Right, 30, 0, &expanded);
    let lines = to_strings(bubble.as_lines());

    assert!(lines[0].starts_with(&" ".repeat(13)));
    assert!(lines[0].ends_with("╭Assistant──╮"));
}

#[test]
fn it_renders_empty_message_as_single_row() {
    let message = Message::new(Author::Assistant, "");
    let expanded = HashSet::new();
    let bubble = Bubble::new(&message, BubbleAlignment::Left, 40, 0, &expanded);

    assert_eq!(bubble.as_lines().len(), 3);
}

#[test]
fn it_wraps_long_words() {
    let message = Message::new(Author::Assistant, &"a".repeat(30));
    let expanded = HashSet::new();
    let bubble = Bubble::new(&message, BubbleAlignment::Left, 20, 0, &expanded);
    let lines = to_strings(bubble.as_lines());

    assert_eq!(lines.len(), 5);
    assert!(lines[1].contains(&"a".repeat(14)));
    assert!(lines[3].contains("aa"));
}

#[test]
fn it_collapses_steps_by_default() {
    let mut message = Message::new(Author::Assistant, "Done");
    message.push_step(thinking("plan the work"));
    message.push_step(StepEvent::ToolCall {
        tool_name: "calculator".to_string(),
        tool_args: json!({"expression": "2+2"}),
        tool_result: Some("4".to_string()),
    });

    let expanded = HashSet::new();
    let bubble = Bubble::new(&message, BubbleAlignment::Left, 80, 3, &expanded);
    let lines = to_strings(bubble.as_lines());

    assert_eq!(lines.len(), 5);
    assert!(lines[1].contains("▸ (4) Thinking Process"));
    assert!(lines[2].contains("▸ (5) Tool Call: calculator"));
    assert!(lines[3].contains("Done"));
    assert!(!lines.iter().any(|line| return line.contains("plan the work")));
}

#[test]
fn it_expands_selected_steps() {
    let mut message = Message::new(Author::Assistant, "Done");
    message.push_step(thinking("plan the work"));
    message.push_step(thinking("check the plan"));

    let expanded = HashSet::from([2]);
    let bubble = Bubble::new(&message, BubbleAlignment::Left, 80, 0, &expanded);
    let lines = to_strings(bubble.as_lines());

    assert!(lines[1].contains("▸ (1) Thinking Process"));
    assert!(lines[2].contains("▾ (2) Thinking Process"));
    assert!(lines[3].contains("  check the plan"));
    assert!(!lines.iter().any(|line| return line.contains("plan the work")));
}

#[test]
fn it_shows_attachment_row() {
    let message = Message::new(Author::Assistant, "Got it").with_attachment(FileInfo {
        name: "notes.txt".to_string(),
        size: 12,
    });
    let expanded = HashSet::new();
    let bubble = Bubble::new(&message, BubbleAlignment::Left, 80, 0, &expanded);
    let lines = to_strings(bubble.as_lines());

    assert!(lines[1].contains("[file] notes.txt (12 bytes)"));
}

#[test]
fn it_colours_error_borders() {
    let message = Message::new_with_type(Author::Assistant, MessageType::Error, "Broken");
    let expanded = HashSet::new();
    let bubble = Bubble::new(&message, BubbleAlignment::Left, 40, 0, &expanded);
    let lines = bubble.as_lines();

    assert_eq!(lines[0].spans[0].style.fg, Some(Color::Red));
}

#[test]
fn it_wraps_on_word_boundaries() {
    assert_eq!(
        wrap_text("the quick brown fox", 10),
        vec!["the quick".to_string(), "brown fox".to_string()]
    );
    assert_eq!(wrap_text("", 10), vec!["".to_string()]);
    assert_eq!(
        wrap_text("abcdefgh", 3),
        vec!["abc".to_string(), "def".to_string(), "gh".to_string()]
    );
}

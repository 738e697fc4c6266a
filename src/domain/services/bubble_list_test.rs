use std::collections::HashSet;

use super::BubbleList;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::StepEvent;

fn messages() -> Vec<Message> {
    let mut answer = Message::new(Author::Assistant, "The answer is 4.");
    answer.push_step(StepEvent::Thinking {
        content: "add the numbers".to_string(),
    });

    return vec![Message::new(Author::Parley, "Hi there!"), answer];
}

#[test]
fn it_has_no_cached_lines() {
    let bubble_list = BubbleList::new();

    assert_eq!(bubble_list.cache.len(), 0);
    assert_eq!(bubble_list.len(), 0);
}

#[test]
fn it_caches_lines() {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages(), 50, &HashSet::new());

    assert_eq!(bubble_list.cache.len(), 2);
}

#[test]
fn it_returns_correct_length() {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages(), 50, &HashSet::new());

    // 3 rows for the greeting, 4 for the answer with one collapsed step.
    assert_eq!(bubble_list.len(), 7);
}

#[test]
fn it_grows_when_step_is_expanded() {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages(), 50, &HashSet::new());
    bubble_list.set_messages(&messages(), 50, &HashSet::from([1]));

    assert_eq!(bubble_list.len(), 8);
}

#[test]
fn it_rerenders_streaming_message() {
    let mut messages = messages();
    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50, &HashSet::new());

    messages[1].append("\nSecond line.");
    bubble_list.set_messages(&messages, 50, &HashSet::new());

    assert_eq!(bubble_list.len(), 8);
}

#[test]
fn it_numbers_steps_across_messages() {
    let mut messages = messages();
    let mut second = Message::new(Author::Assistant, "Again.");
    second.push_step(StepEvent::Thinking {
        content: "think again".to_string(),
    });
    messages.push(second);

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 60, &HashSet::new());

    let rendered: String = bubble_list.cache[&2]
        .lines
        .iter()
        .flat_map(|line| return line.spans.iter())
        .map(|span| return span.content.to_string())
        .collect();

    assert!(rendered.contains("(2) Thinking Process"));
}

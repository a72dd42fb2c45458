// End-to-end behaviour of the task list through the public API

use prioritodo::{Action, Applied, Ignored, Priority, TaskId, TaskList, jsonl};
use std::fs;
use tempfile::TempDir;

fn add(list: &mut TaskList, text: &str, priority: Priority) -> TaskId {
    match list.add(text, priority) {
        Ok(Applied::Added(id)) => id,
        other => panic!("expected Added, got {:?}", other),
    }
}

fn sorted_texts(list: &TaskList) -> Vec<String> {
    list.sorted_view().iter().map(|t| t.text.clone()).collect()
}

#[test]
fn test_add_then_view_sorted_by_priority() {
    let mut list = TaskList::new();
    add(&mut list, "Buy milk", Priority::Low);
    add(&mut list, "Call bob", Priority::High);

    assert_eq!(sorted_texts(&list), vec!["Call bob", "Buy milk"]);
}

#[test]
fn test_toggle_marks_completed() {
    let mut list = TaskList::new();
    let id = add(&mut list, "A", Priority::Low);

    list.toggle(id).unwrap();

    let task = list.get(id).unwrap();
    assert!(task.completed);
    assert_eq!(task.text, "A");
    assert_eq!(task.priority, Priority::Low);
}

#[test]
fn test_delete_only_task_empties_list() {
    let mut list = TaskList::new();
    let id = add(&mut list, "A", Priority::Low);

    list.delete(id).unwrap();
    assert!(list.is_empty());
}

#[test]
fn test_mixed_priorities_sort_high_medium_low() {
    let mut list = TaskList::new();
    add(&mut list, "l", Priority::Low);
    add(&mut list, "h", Priority::High);
    add(&mut list, "m", Priority::Medium);

    let priorities: Vec<Priority> = list.sorted_view().iter().map(|t| t.priority).collect();
    assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
}

#[test]
fn test_blank_adds_never_grow_list() {
    let mut list = TaskList::new();
    for text in ["", " ", "\t\n", "   "] {
        assert_eq!(list.add(text, Priority::High), Err(Ignored::EmptyText));
    }
    assert!(list.is_empty());
}

#[test]
fn test_ids_unique_across_many_adds() {
    let mut list = TaskList::new();
    let mut ids: Vec<TaskId> = (0..500).map(|i| add(&mut list, &format!("task {}", i), Priority::Low)).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 500);
}

#[test]
fn test_edit_session_round_trip() {
    let mut list = TaskList::new();
    let id = add(&mut list, "Draft report", Priority::Low);
    let before = list.tasks().to_vec();

    list.begin_edit(id).unwrap();
    list.cancel_edit().unwrap();
    assert_eq!(list.tasks(), before.as_slice());

    list.begin_edit(id).unwrap();
    list.set_draft_text("Send report");
    list.set_draft_priority(Priority::Medium);
    list.save_edit().unwrap();

    let task = list.get(id).unwrap();
    assert_eq!(task.id, id);
    assert_eq!(task.text, "Send report");
    assert_eq!(task.priority, Priority::Medium);
    assert!(!list.is_editing());
}

#[test]
fn test_replay_script_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("script.jsonl");
    fs::write(
        &path,
        r#"{"action":"add","text":"Buy milk"}
{"action":"set_draft_text","text":"Call bob"}
{"action":"set_draft_priority","priority":"high"}
{"action":"submit_draft"}
{"action":"add","text":"   ","priority":"medium"}
not json at all
{"action":"cancel_edit"}
"#,
    )
    .unwrap();

    let actions = jsonl::read_actions(&path).unwrap();
    assert_eq!(actions.len(), 6);

    let mut list = TaskList::new();
    let ignored = list.apply_all(actions);
    assert_eq!(ignored, 2);
    assert_eq!(sorted_texts(&list), vec!["Call bob", "Buy milk"]);

    let mut out = Vec::new();
    jsonl::write_jsonl(&mut out, list.sorted_view()).unwrap();
    let out = String::from_utf8(out).unwrap();
    let first: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
    assert_eq!(first["text"], "Call bob");
    assert_eq!(first["priority"], "high");
    assert_eq!(first["completed"], false);
}

#[test]
fn test_actions_reference_ids_from_earlier_adds() {
    let mut list = TaskList::new();
    let id = add(&mut list, "A", Priority::Low);

    let script = format!(
        "{{\"action\":\"toggle\",\"task\":\"{id}\"}}\n{{\"action\":\"begin_edit\",\"task\":\"{id}\"}}\n{{\"action\":\"delete\",\"task\":\"{id}\"}}\n"
    );
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ids.jsonl");
    fs::write(&path, script).unwrap();

    let actions = jsonl::read_actions(&path).unwrap();
    assert_eq!(actions[0], Action::Toggle { task: id.into() });

    assert_eq!(list.apply_all(actions), 0);
    assert!(list.is_empty());
    assert!(!list.is_editing());
}

#[test]
fn test_replay_script_addresses_tasks_by_position() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("positions.jsonl");
    fs::write(
        &path,
        r#"{"action":"add","text":"Buy milk"}
{"action":"add","text":"Call bob","priority":"high"}
{"action":"add","text":"Water plants","priority":"medium"}
{"action":"toggle","task":2}
{"action":"delete","task":1}
{"action":"begin_edit","task":2}
{"action":"set_draft_text","text":"Buy oat milk"}
{"action":"save_edit"}
{"action":"toggle","task":7}
"#,
    )
    .unwrap();

    let actions = jsonl::read_actions(&path).unwrap();
    assert_eq!(actions.len(), 9);

    let mut list = TaskList::new();
    assert_eq!(list.apply_all(actions), 1);

    let view = list.sorted_view();
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].text, "Water plants");
    assert!(view[0].completed);
    assert_eq!(view[1].text, "Buy oat milk");
    assert!(!view[1].completed);
}

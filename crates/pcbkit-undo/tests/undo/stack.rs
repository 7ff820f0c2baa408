use crate::support::{BrokenUndo, Doc, Fail, Push, SetAt};
use pcbkit_undo::UndoStack;

fn stack_with(values: &[i32], doc: &mut Doc) -> UndoStack<Doc> {
    let mut stack = UndoStack::new();
    for v in values {
        stack.exec_cmd(Push(*v), doc).unwrap();
    }
    stack
}

#[test]
fn test_no_open_transaction_rejects_append_and_commit() {
    let mut doc = Doc::default();
    let mut stack: UndoStack<Doc> = UndoStack::new();

    assert!(stack.append_to_cmd_group(Push(1), &mut doc).unwrap_err().is_logic_error());
    assert!(stack.commit_cmd_group().unwrap_err().is_logic_error());
    assert!(stack.abort_cmd_group(&mut doc).unwrap_err().is_logic_error());

    // Undo on an empty history is a quiet no-op.
    stack.undo(&mut doc).unwrap();
    stack.redo(&mut doc).unwrap();
    assert_eq!(stack.count(), 0);
    assert!(doc.values.is_empty());
}

#[test]
fn test_only_one_transaction_at_a_time() {
    let mut stack: UndoStack<Doc> = UndoStack::new();
    stack.begin_cmd_group("First").unwrap();
    assert!(stack.begin_cmd_group("Second").unwrap_err().is_logic_error());
    assert_eq!(stack.active_group_text(), Some("First"));
}

#[test]
fn test_history_truncation() {
    let mut doc = Doc::default();
    let mut stack = stack_with(&[1, 2, 3], &mut doc);
    assert_eq!(stack.count(), 3);

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.values, vec![1, 2]);
    assert!(stack.can_redo());

    stack.exec_cmd(Push(4), &mut doc).unwrap();
    assert_eq!(doc.values, vec![1, 2, 4]);
    assert_eq!(stack.count(), 3);
    assert_eq!(stack.current_index(), 3);
    assert!(!stack.can_redo());

    // g3 is gone for good.
    stack.redo(&mut doc).unwrap();
    assert_eq!(doc.values, vec![1, 2, 4]);
}

#[test]
fn test_no_op_elision() {
    let mut doc = Doc::default();
    let mut stack = stack_with(&[5], &mut doc);

    stack.begin_cmd_group("Same value").unwrap();
    assert!(!stack.append_to_cmd_group(SetAt::new(0, 5), &mut doc).unwrap());
    assert!(!stack.commit_cmd_group().unwrap());
    assert_eq!(stack.count(), 1);
    assert_eq!(stack.current_index(), 1);

    stack.begin_cmd_group("Empty").unwrap();
    assert!(!stack.commit_cmd_group().unwrap());
    assert_eq!(stack.count(), 1);
    assert_eq!(stack.undo_text(), Some("Push"));
}

#[test]
fn test_abort_reverts_applied_children() {
    let mut doc = Doc::default();
    let mut stack = stack_with(&[1], &mut doc);

    stack.begin_cmd_group("Two more").unwrap();
    stack.append_to_cmd_group(Push(2), &mut doc).unwrap();
    stack.append_to_cmd_group(Push(3), &mut doc).unwrap();
    assert_eq!(doc.values, vec![1, 2, 3]);
    assert!(!stack.can_undo());

    stack.abort_cmd_group(&mut doc).unwrap();
    assert_eq!(doc.values, vec![1]);
    assert_eq!(stack.count(), 1);
    assert!(!stack.is_command_group_active());
}

#[test]
fn test_undo_redo_refused_while_group_open() {
    let mut doc = Doc::default();
    let mut stack = stack_with(&[1], &mut doc);
    stack.begin_cmd_group("Open").unwrap();
    assert!(stack.undo(&mut doc).unwrap_err().is_logic_error());
    assert!(stack.redo(&mut doc).unwrap_err().is_logic_error());
    assert!(stack.clear().is_err());
    stack.abort_cmd_group(&mut doc).unwrap();
}

#[test]
fn test_exec_cmd_failure_leaves_history_untouched() {
    let mut doc = Doc::default();
    let mut stack = stack_with(&[1], &mut doc);
    let err = stack.exec_cmd(Fail, &mut doc).unwrap_err();
    assert!(err.is_user_error());
    assert!(!stack.is_command_group_active());
    assert_eq!(stack.count(), 1);
    assert_eq!(doc.values, vec![1]);
}

#[test]
fn test_failing_child_keeps_transaction_open() {
    let mut doc = Doc::default();
    let mut stack: UndoStack<Doc> = UndoStack::new();
    stack.begin_cmd_group("Partial").unwrap();
    stack.append_to_cmd_group(Push(1), &mut doc).unwrap();
    assert!(stack.append_to_cmd_group(Fail, &mut doc).is_err());
    assert!(stack.is_command_group_active());
    stack.abort_cmd_group(&mut doc).unwrap();
    assert!(doc.values.is_empty());
}

#[test]
fn test_replay_failure_is_fatal() {
    let mut doc = Doc::default();
    let mut stack: UndoStack<Doc> = UndoStack::new();
    stack.exec_cmd(BrokenUndo, &mut doc).unwrap();

    let err = stack.undo(&mut doc).unwrap_err();
    assert!(err.is_fatal());
    assert!(!err.is_user_error());
    assert!(stack.is_corrupted());
    assert!(!stack.can_undo());
    assert!(stack.undo(&mut doc).unwrap_err().is_fatal());
}

#[test]
fn test_max_depth_evicts_oldest() {
    let mut doc = Doc::default();
    let mut stack = UndoStack::with_max_depth(2);
    for v in 1..=3 {
        stack.exec_cmd(Push(v), &mut doc).unwrap();
    }
    assert_eq!(stack.count(), 2);
    assert_eq!(stack.current_index(), 2);

    stack.undo(&mut doc).unwrap();
    stack.undo(&mut doc).unwrap();
    stack.undo(&mut doc).unwrap();
    // The first push can no longer be undone.
    assert_eq!(doc.values, vec![1]);
}

#[test]
fn test_clean_state_tracking() {
    let mut doc = Doc::default();
    let mut stack = stack_with(&[1], &mut doc);
    assert!(!stack.is_clean());
    stack.set_clean();
    assert!(stack.is_clean());

    stack.exec_cmd(Push(2), &mut doc).unwrap();
    assert!(!stack.is_clean());
    stack.undo(&mut doc).unwrap();
    assert!(stack.is_clean());

    // Branching away from the clean point makes it unreachable.
    stack.undo(&mut doc).unwrap();
    stack.exec_cmd(Push(3), &mut doc).unwrap();
    stack.undo(&mut doc).unwrap();
    assert!(!stack.is_clean());
}

#[test]
fn test_snapshot_and_entries() {
    let mut doc = Doc::default();
    let mut stack = stack_with(&[1, 2], &mut doc);
    stack.undo(&mut doc).unwrap();

    let state = stack.snapshot();
    assert_eq!(state.count, 2);
    assert_eq!(state.current_index, 1);
    assert!(state.can_undo && state.can_redo);
    assert_eq!(state.redo_text.as_deref(), Some("Push"));

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["current_index"], 1);

    let entries: Vec<_> = stack.entries().collect();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].committed_at() <= entries[1].committed_at());
    assert_eq!(entries[1].child_count(), 1);

    stack.clear().unwrap();
    assert_eq!(stack.count(), 0);
}

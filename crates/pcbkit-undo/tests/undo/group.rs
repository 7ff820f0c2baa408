use crate::support::{Doc, Fail, Push, SetAt};
use pcbkit_undo::{TrackedCommand, UndoCommand, UndoCommandGroup};

#[test]
fn test_group_executes_in_order_and_undoes_in_reverse() {
    let mut doc = Doc::default();
    let mut group = UndoCommandGroup::new("Push three");
    for v in 1..=3 {
        assert!(!group.append_child(Push(v), &mut doc).unwrap());
    }
    // Deferred children do not touch the document.
    assert!(doc.values.is_empty());

    assert!(group.perform_execute(&mut doc).unwrap());
    assert_eq!(doc.values, vec![1, 2, 3]);

    doc.log.clear();
    group.perform_undo(&mut doc).unwrap();
    assert!(doc.values.is_empty());
    assert_eq!(doc.log, vec!["undo 3", "undo 2", "undo 1"]);

    doc.log.clear();
    group.perform_redo(&mut doc).unwrap();
    assert_eq!(doc.values, vec![1, 2, 3]);
    assert_eq!(doc.log, vec!["redo 1", "redo 2", "redo 3"]);
}

#[test]
fn test_group_atomicity_on_child_failure() {
    let mut doc = Doc {
        values: vec![7],
        log: Vec::new(),
    };
    let before = doc.values.clone();

    let mut group = UndoCommandGroup::new("Mixed");
    group.append_child(Push(1), &mut doc).unwrap();
    group.append_child(Push(2), &mut doc).unwrap();
    group.append_child(Fail, &mut doc).unwrap();
    group.append_child(Push(3), &mut doc).unwrap();

    let err = group.perform_execute(&mut doc).unwrap_err();
    assert!(err.is_user_error());
    assert_eq!(doc.values, before);
    // Each earlier child rolled back exactly once, newest first; the
    // child after the failure never ran.
    assert_eq!(doc.log, vec!["exec 1", "exec 2", "undo 2", "undo 1"]);
}

#[test]
fn test_no_op_children_leave_group_unmodified() {
    let mut doc = Doc {
        values: vec![4],
        log: Vec::new(),
    };
    let mut group = UndoCommandGroup::new("Same value");
    group.append_child(SetAt::new(0, 4), &mut doc).unwrap();
    assert!(!group.perform_execute(&mut doc).unwrap());
    assert!(!group.was_modified());
}

#[test]
fn test_open_group_executes_children_immediately() {
    let mut doc = Doc::default();
    let mut group = UndoCommandGroup::open("Live");
    assert!(group.append_child(Push(9), &mut doc).unwrap());
    assert_eq!(doc.values, vec![9]);
    assert!(group.was_modified());

    // A failing child is rejected and not kept.
    assert!(group.append_child(Fail, &mut doc).is_err());
    assert_eq!(group.child_count(), 1);

    group.close();
    assert!(group.is_closed());
    assert!(group.append_child(Push(1), &mut doc).unwrap_err().is_logic_error());
}

#[test]
fn test_nested_groups() {
    let mut doc = Doc::default();
    let mut inner = UndoCommandGroup::new("Inner");
    inner.append_child(Push(2), &mut doc).unwrap();
    inner.append_child(Push(3), &mut doc).unwrap();

    let mut outer = UndoCommandGroup::new("Outer");
    outer.append_child(Push(1), &mut doc).unwrap();
    outer.append_child(inner, &mut doc).unwrap();

    let mut tracked = TrackedCommand::new(outer);
    assert!(tracked.execute(&mut doc).unwrap());
    assert_eq!(doc.values, vec![1, 2, 3]);

    doc.log.clear();
    tracked.undo(&mut doc).unwrap();
    assert_eq!(doc.log, vec!["undo 3", "undo 2", "undo 1"]);
    tracked.redo(&mut doc).unwrap();
    assert_eq!(doc.values, vec![1, 2, 3]);
}

#[test]
fn test_group_cannot_execute_twice() {
    let mut doc = Doc::default();
    let mut group = UndoCommandGroup::new("Once");
    group.append_child(Push(1), &mut doc).unwrap();
    group.perform_execute(&mut doc).unwrap();
    assert!(group.perform_execute(&mut doc).unwrap_err().is_logic_error());
}

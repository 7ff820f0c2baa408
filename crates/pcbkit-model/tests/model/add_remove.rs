use super::support::*;
use pcbkit_core::{Error, Point, ValidationError};
use pcbkit_model::cmd::{remove_command_for, CmdBoardHoleRemove, CmdBoardViaAdd};
use pcbkit_model::{BoardHole, BoardVia, ChangeKind, ItemRef};

#[test]
fn test_add_hole_undo_redo() {
    let (mut project, mut stack) = project();
    let events = record_events(&mut project);

    let uuid = add_hole(&mut project, &mut stack, 0, 0);
    assert_eq!(project.board().holes().len(), 1);
    assert_eq!(stack.undo_text(), Some("Add hole"));

    stack.undo(&mut project).unwrap();
    assert!(project.board().item::<BoardHole>(uuid).is_none());

    stack.redo(&mut project).unwrap();
    assert!(project.board().item::<BoardHole>(uuid).is_some());

    assert_eq!(count(&events, ChangeKind::Added), 2);
    assert_eq!(count(&events, ChangeKind::Removed), 1);
}

#[test]
fn test_remove_restores_original_position() {
    let (mut project, mut stack) = project();
    let a = add_hole(&mut project, &mut stack, 0, 0);
    let b = add_hole(&mut project, &mut stack, 10, 0);
    let c = add_hole(&mut project, &mut stack, 20, 0);

    stack
        .exec_cmd(CmdBoardHoleRemove::new(b), &mut project)
        .unwrap();
    let order: Vec<_> = project.board().holes().iter().map(|h| h.uuid).collect();
    assert_eq!(order, vec![a, c]);

    stack.undo(&mut project).unwrap();
    let order: Vec<_> = project.board().holes().iter().map(|h| h.uuid).collect();
    assert_eq!(order, vec![a, b, c]);
}

#[test]
fn test_remove_by_item_ref() {
    let (mut project, mut stack) = project();
    let uuid = add_hole(&mut project, &mut stack, 0, 0);
    let cmd = remove_command_for(ItemRef::new(pcbkit_model::ItemKind::Hole, uuid)).unwrap();
    stack.exec_cmd(cmd, &mut project).unwrap();
    assert_eq!(project.board().item_count(), 0);
    assert_eq!(stack.undo_text(), Some("Remove hole"));
}

#[test]
fn test_remove_missing_item_fails_without_history() {
    let (mut project, mut stack) = project();
    let err = stack
        .exec_cmd(CmdBoardHoleRemove::new(uuid::Uuid::new_v4()), &mut project)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(stack.count(), 0);
    assert!(!stack.is_command_group_active());
}

#[test]
fn test_via_with_drill_larger_than_size_is_rejected() {
    let (mut project, mut stack) = project();
    let via = BoardVia::new(Point::default(), len(300_000), len(700_000), None);
    let err = stack
        .exec_cmd(CmdBoardViaAdd::new(via), &mut project)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidValue { .. })
    ));
    assert!(project.board().vias().is_empty());
    assert_eq!(stack.count(), 0);
}

#[test]
fn test_via_with_unknown_net_is_rejected() {
    let (mut project, mut stack) = project();
    let via = BoardVia::new(
        Point::default(),
        len(700_000),
        len(300_000),
        Some(uuid::Uuid::new_v4()),
    );
    let err = stack
        .exec_cmd(CmdBoardViaAdd::new(via), &mut project)
        .unwrap_err();
    assert!(err.is_logic_error());
    assert!(project.board().vias().is_empty());
}

#[test]
fn test_via_on_known_net() {
    let (mut project, mut stack) = project();
    let gnd = add_net(&mut project, &mut stack, "GND");
    let via = BoardVia::new(Point::default(), len(700_000), len(300_000), Some(gnd));
    stack
        .exec_cmd(CmdBoardViaAdd::new(via), &mut project)
        .unwrap();
    assert_eq!(project.board().vias()[0].net_signal, Some(gnd));
    assert_eq!(
        project.circuit().net_signal_with_most_elements(project.board()),
        Some(gnd)
    );
}

use super::support::*;
use pcbkit_core::{Angle, Orientation, Point};
use pcbkit_model::cmd::{CmdBoardHoleEdit, CmdMoveSelectedBoardItems};
use pcbkit_model::{BoardHole, ItemKind, ItemRef};
use pcbkit_undo::UndoCommand;

fn hole_pos(project: &pcbkit_model::Project, uuid: uuid::Uuid) -> Point {
    project.board().item::<BoardHole>(uuid).unwrap().position
}

#[test]
fn test_move_selection_is_one_undo_step() {
    let (mut project, mut stack) = project();
    let a = add_hole(&mut project, &mut stack, 0, 0);
    let b = add_hole(&mut project, &mut stack, 1000, 0);
    let selection = [ItemRef::new(ItemKind::Hole, a), ItemRef::new(ItemKind::Hole, b)];

    let mut cmd = CmdMoveSelectedBoardItems::new(&project, &selection).unwrap();
    cmd.set_delta(Point::from_nm(10, 20), &mut project).unwrap();
    assert_eq!(hole_pos(&project, a), Point::from_nm(10, 20));
    cmd.set_delta(Point::from_nm(30, 0), &mut project).unwrap();
    assert_eq!(hole_pos(&project, b), Point::from_nm(1030, 0));

    assert!(stack.exec_cmd(cmd, &mut project).unwrap());
    assert_eq!(stack.count(), 3);

    stack.undo(&mut project).unwrap();
    assert_eq!(hole_pos(&project, a), Point::from_nm(0, 0));
    assert_eq!(hole_pos(&project, b), Point::from_nm(1000, 0));

    stack.redo(&mut project).unwrap();
    assert_eq!(hole_pos(&project, a), Point::from_nm(30, 0));
}

#[test]
fn test_rotate_and_mirror_follow_the_drag() {
    let (mut project, mut stack) = project();
    let a = add_hole(&mut project, &mut stack, 1000, 0);
    let selection = [ItemRef::new(ItemKind::Hole, a)];

    let mut cmd = CmdMoveSelectedBoardItems::new(&project, &selection).unwrap();
    cmd.set_delta(Point::from_nm(0, 500), &mut project).unwrap();
    cmd.rotate(Angle::deg90(), Point::from_nm(0, 500), &mut project)
        .unwrap();
    assert_eq!(hole_pos(&project, a), Point::from_nm(0, 1500));

    cmd.mirror(Orientation::Horizontal, Point::from_nm(100, 0), &mut project)
        .unwrap();
    assert_eq!(hole_pos(&project, a), Point::from_nm(200, 1500));

    // Moving further keeps the transforms.
    cmd.set_delta(Point::from_nm(0, 600), &mut project).unwrap();
    assert_eq!(hole_pos(&project, a), Point::from_nm(200, 1600));

    stack.exec_cmd(cmd, &mut project).unwrap();
    stack.undo(&mut project).unwrap();
    assert_eq!(hole_pos(&project, a), Point::from_nm(1000, 0));
}

#[test]
fn test_locked_items_stay_put() {
    let (mut project, mut stack) = project();
    let a = add_hole(&mut project, &mut stack, 0, 0);
    let mut lock = CmdBoardHoleEdit::new(&project, a).unwrap();
    lock.set_locked(true, false, &mut project).unwrap();
    stack.exec_cmd(lock, &mut project).unwrap();

    let cmd = CmdMoveSelectedBoardItems::new(&project, &[ItemRef::new(ItemKind::Hole, a)]).unwrap();
    assert!(cmd.is_empty());
}

#[test]
fn test_discard_reverts_all_previews() {
    let (mut project, mut stack) = project();
    let a = add_hole(&mut project, &mut stack, 0, 0);
    let b = add_hole(&mut project, &mut stack, 5, 5);
    let selection = [ItemRef::new(ItemKind::Hole, a), ItemRef::new(ItemKind::Hole, b)];

    let mut cmd = CmdMoveSelectedBoardItems::new(&project, &selection).unwrap();
    cmd.set_delta(Point::from_nm(100, 100), &mut project).unwrap();
    cmd.discard(&mut project).unwrap();
    assert_eq!(hole_pos(&project, a), Point::from_nm(0, 0));
    assert_eq!(hole_pos(&project, b), Point::from_nm(5, 5));
}

#[test]
fn test_zero_delta_is_not_recorded() {
    let (mut project, mut stack) = project();
    let a = add_hole(&mut project, &mut stack, 0, 0);
    let cmd = CmdMoveSelectedBoardItems::new(&project, &[ItemRef::new(ItemKind::Hole, a)]).unwrap();
    assert!(!stack.exec_cmd(cmd, &mut project).unwrap());
    assert_eq!(stack.count(), 1);
}

#[test]
fn test_undo_before_execute_is_a_logic_error() {
    let (mut project, _stack) = project();
    let mut cmd = CmdMoveSelectedBoardItems::new(&project, &[]).unwrap();
    assert!(cmd.perform_undo(&mut project).unwrap_err().is_logic_error());
}

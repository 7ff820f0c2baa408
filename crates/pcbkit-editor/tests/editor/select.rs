use crate::support::{len, mm, Editor, ProjectBuilder, MM};
use pcbkit_core::{Angle, Orientation, Point};
use pcbkit_editor::{Features, StateKind};
use pcbkit_model::BoardHole;
use std::collections::BTreeSet;

fn editor_with_holes(positions: &[Point]) -> Editor {
    let mut builder = ProjectBuilder::new();
    for pos in positions {
        builder.item(BoardHole::new(*pos, len(MM)));
    }
    Editor::with_project(builder.build())
}

fn hole_positions(editor: &Editor) -> Vec<Point> {
    editor.project().board().holes().iter().map(|h| h.position).collect()
}

#[test]
fn test_drag_moves_item_as_one_undo_step() {
    let mut editor = editor_with_holes(&[mm(0, 0), mm(20, 20)]);

    assert!(editor.press(mm(0, 0)));
    assert_eq!(editor.fsm.context().selection().len(), 1);
    editor.move_to(mm(1, 0));
    editor.move_to(mm(2, 1));
    editor.move_to(mm(3, 1));
    assert_eq!(editor.history(), 0);
    assert!(editor.release(mm(3, 1)));

    assert_eq!(editor.history(), 1);
    assert_eq!(hole_positions(&editor), vec![mm(3, 1), mm(20, 20)]);

    editor.undo();
    assert_eq!(hole_positions(&editor), vec![mm(0, 0), mm(20, 20)]);
}

#[test]
fn test_click_without_drag_records_nothing() {
    let mut editor = editor_with_holes(&[mm(0, 0)]);
    editor.click(mm(0, 0));
    assert_eq!(editor.history(), 0);
    assert_eq!(editor.fsm.context().selection().len(), 1);
    assert!(editor.log.borrow().features.contains(Features::REMOVE | Features::ROTATE));
}

#[test]
fn test_rubber_band_selects_items_inside() {
    let mut editor = editor_with_holes(&[mm(0, 0), mm(5, 5), mm(20, 20)]);

    assert!(editor.press(mm(-2, -2)));
    editor.move_to(mm(6, 6));
    assert!(editor.release(mm(6, 6)));

    let selected: BTreeSet<_> = editor.fsm.context().selection().into_iter().collect();
    let holes = editor.project().board().holes();
    assert_eq!(selected.len(), 2);
    assert!(selected.iter().all(|item| item.uuid != holes[2].uuid));
    assert_eq!(editor.history(), 0);
}

#[test]
fn test_ctrl_click_toggles_selection() {
    let mut editor = editor_with_holes(&[mm(0, 0), mm(5, 0)]);
    editor.click(mm(0, 0));
    editor.ctrl_click(mm(5, 0));
    assert_eq!(editor.fsm.context().selection().len(), 2);
    editor.ctrl_click(mm(0, 0));
    assert_eq!(editor.fsm.context().selection().len(), 1);
}

#[test]
fn test_remove_selection_and_undo() {
    let mut editor = editor_with_holes(&[mm(0, 0), mm(5, 0), mm(10, 0)]);
    assert!(editor.fsm.process_select_all());
    assert!(editor.fsm.process_remove());

    assert!(editor.project().board().holes().is_empty());
    assert!(editor.fsm.context().selection().is_empty());
    assert_eq!(editor.history(), 1);

    editor.undo();
    assert_eq!(hole_positions(&editor), vec![mm(0, 0), mm(5, 0), mm(10, 0)]);
}

#[test]
fn test_rotate_selection_about_its_center() {
    let mut editor = editor_with_holes(&[mm(0, 0), mm(2, 0)]);
    assert!(editor.fsm.process_select_all());
    assert!(editor.fsm.process_rotate(Angle::deg90()));

    assert_eq!(editor.history(), 1);
    let positions: BTreeSet<_> = hole_positions(&editor)
        .into_iter()
        .map(|p| (p.x.to_nm(), p.y.to_nm()))
        .collect();
    assert_eq!(positions, BTreeSet::from([(MM, -MM), (MM, MM)]));
}

#[test]
fn test_flip_and_move_selection() {
    let mut editor = editor_with_holes(&[mm(0, 0), mm(4, 0)]);
    assert!(editor.fsm.process_select_all());
    assert!(editor.fsm.process_move(mm(1, 2)));
    assert_eq!(hole_positions(&editor), vec![mm(1, 2), mm(5, 2)]);

    assert!(editor.fsm.process_flip(Orientation::Horizontal));
    assert_eq!(hole_positions(&editor), vec![mm(5, 2), mm(1, 2)]);
    assert_eq!(editor.history(), 2);
}

#[test]
fn test_locked_items_are_neither_moved_nor_removed() {
    let mut builder = ProjectBuilder::new();
    let mut locked = BoardHole::new(mm(0, 0), len(MM));
    locked.locked = true;
    builder.item(locked);
    builder.item(BoardHole::new(mm(5, 0), len(MM)));
    let mut editor = Editor::with_project(builder.build());

    assert!(editor.fsm.process_select_all());
    assert!(editor.fsm.process_move(mm(0, 3)));
    assert_eq!(hole_positions(&editor), vec![mm(0, 0), mm(5, 3)]);

    assert!(editor.fsm.process_select_all());
    assert!(editor.fsm.process_remove());
    assert_eq!(hole_positions(&editor), vec![mm(0, 0)]);

    assert!(editor.fsm.process_select_all());
    assert!(!editor.fsm.process_remove());
    assert_eq!(editor.history(), 2);
}

#[test]
fn test_lock_then_unlock_selection() {
    let mut editor = editor_with_holes(&[mm(0, 0)]);
    assert!(editor.fsm.process_select_all());
    assert!(editor.fsm.process_set_locked(true));
    assert!(editor.project().board().holes()[0].locked);

    assert!(editor.fsm.process_set_locked(false));
    assert!(!editor.project().board().holes()[0].locked);
    assert_eq!(editor.history(), 2);
}

#[test]
fn test_snap_to_grid() {
    let mut editor = editor_with_holes(&[Point::from_nm(1_400_000, -600_000)]);
    assert!(editor.fsm.process_select_all());
    assert!(editor.fsm.process_snap_to_grid());
    assert_eq!(hole_positions(&editor), vec![mm(1, -1)]);
    assert_eq!(editor.history(), 1);
}

#[test]
fn test_right_click_while_dragging_rotates() {
    let mut editor = editor_with_holes(&[mm(0, 0), mm(2, 0)]);
    assert!(editor.fsm.process_select_all());
    assert!(editor.press(mm(0, 0)));
    assert!(editor.right_click(mm(0, 0)));
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    assert!(editor.release(mm(0, 0)));

    assert_eq!(editor.history(), 1);
    assert_eq!(hole_positions(&editor), vec![mm(0, 0), mm(0, 2)]);
}

#[test]
fn test_abort_clears_selection_and_cancels_drag() {
    let mut editor = editor_with_holes(&[mm(0, 0)]);
    assert!(editor.press(mm(0, 0)));
    editor.move_to(mm(4, 0));
    assert_eq!(hole_positions(&editor), vec![mm(4, 0)]);

    assert!(editor.fsm.process_abort_command());
    assert_eq!(hole_positions(&editor), vec![mm(0, 0)]);
    assert!(editor.fsm.context().selection().is_empty());
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    assert!(!editor.release(mm(4, 0)));
    assert_eq!(editor.history(), 0);
}

#[test]
fn test_undo_drops_removed_items_from_selection() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_hole());
    editor.click(mm(1, 1));
    assert!(editor.fsm.process_select());
    assert!(editor.fsm.process_select_all());
    assert_eq!(editor.fsm.context().selection().len(), 1);

    editor.undo();
    assert!(editor.fsm.context().selection().is_empty());
}

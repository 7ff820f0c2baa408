use crate::support::{mm, Editor, ProjectBuilder};
use pcbkit_editor::{Features, StateKind, ToolInfo};
use uuid::Uuid;

#[test]
fn test_starts_in_select() {
    let editor = Editor::new();
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    assert_eq!(editor.fsm.previous_state(), StateKind::Idle);
    let log = editor.log.borrow();
    assert_eq!(log.tool_enters, vec![ToolInfo::Select]);
    assert!(log.features.contains(Features::SELECT));
    assert!(!log.features.contains(Features::REMOVE));
}

#[test]
fn test_only_one_tool_active_at_a_time() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_hole());
    assert!(editor.fsm.process_draw_polygon());
    assert!(editor.fsm.process_measure());
    assert!(editor.fsm.process_add_stroke_text());
    assert!(editor.fsm.process_select());
    let log = editor.log.borrow();
    assert_eq!(log.tool_enters.len(), log.tool_leaves + 1);
    assert_eq!(log.tool_leaves, 5);
}

#[test]
fn test_entering_the_current_tool_again_is_a_no_op() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_hole());
    assert!(editor.fsm.process_add_hole());
    assert_eq!(editor.log.borrow().tool_enters.len(), 2);
    assert_eq!(editor.project().board().holes().len(), 1);
}

#[test]
fn test_abort_falls_back_to_select() {
    let mut editor = Editor::new();
    editor.set_cursor(mm(2, 3));
    assert!(editor.fsm.process_add_hole());
    assert_eq!(editor.project().board().holes().len(), 1);

    assert!(editor.fsm.process_abort_command());
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    assert!(editor.project().board().holes().is_empty());
    assert!(!editor.group_open());
    assert_eq!(editor.history(), 0);
}

#[test]
fn test_abort_cancels_operation_before_leaving_tool() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_draw_polygon());
    editor.click(mm(0, 0));
    editor.move_to(mm(5, 0));
    assert_eq!(editor.project().board().polygons().len(), 1);

    assert!(editor.fsm.process_abort_command());
    assert_eq!(editor.fsm.current_state(), StateKind::DrawPolygon);
    assert!(editor.project().board().polygons().is_empty());

    assert!(editor.fsm.process_abort_command());
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
}

#[test]
fn test_right_click_aborts_tool_and_returns_to_it_from_select() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_hole());

    assert!(editor.right_click(mm(0, 0)));
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    assert_eq!(editor.fsm.previous_state(), StateKind::AddHole);

    assert!(editor.right_click(mm(0, 0)));
    assert_eq!(editor.fsm.current_state(), StateKind::AddHole);
}

#[test]
fn test_right_click_in_select_without_history_stays_in_select() {
    let mut editor = Editor::new();
    assert!(editor.right_click(mm(0, 0)));
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    assert_eq!(editor.log.borrow().tool_leaves, 0);
}

#[test]
fn test_add_device_failure_restores_previous_tool() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_measure());

    let unknown = Uuid::new_v4();
    assert!(!editor.fsm.process_add_device(unknown, Uuid::new_v4(), Uuid::new_v4()));
    assert_eq!(editor.fsm.current_state(), StateKind::Measure);
    assert!(editor.project().board().devices().is_empty());
    assert!(!editor.group_open());
    assert_eq!(editor.errors().len(), 1);
}

#[test]
fn test_add_device_places_once_and_returns_to_select() {
    let mut builder = ProjectBuilder::new();
    let component = builder.component("R1");
    let mut editor = Editor::with_project(builder.build());

    assert!(editor.fsm.process_add_device(component, Uuid::new_v4(), Uuid::new_v4()));
    assert_eq!(editor.fsm.current_state(), StateKind::AddDevice);
    assert!(editor.group_open());

    editor.move_to(mm(4, 4));
    editor.click(mm(5, 5));
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    assert_eq!(editor.history(), 1);
    let devices = editor.project().board().devices();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].position, mm(5, 5));
    assert_eq!(editor.fsm.previous_state(), StateKind::Idle);
}

#[test]
fn test_undo_is_refused_while_an_operation_is_open() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_hole());
    editor.click(mm(1, 1));
    assert_eq!(editor.history(), 1);
    assert!(editor.group_open());

    assert!(!editor.fsm.process_undo().unwrap());
    assert_eq!(editor.history(), 1);

    assert!(editor.fsm.process_abort_command());
    assert!(editor.fsm.process_undo().unwrap());
    assert!(editor.project().board().holes().is_empty());
    assert!(!editor.fsm.process_undo().unwrap());

    assert!(editor.fsm.process_redo().unwrap());
    assert_eq!(editor.project().board().holes()[0].position, mm(1, 1));
}

#[test]
fn test_draw_plane_without_net_signals_is_refused() {
    let mut editor = Editor::new();
    assert!(!editor.fsm.process_draw_plane());
    assert_eq!(editor.fsm.current_state(), StateKind::Idle);
    assert!(editor.errors()[0].starts_with("Draw plane"));

    // Events are ignored while idle, switching tools still works.
    assert!(!editor.click(mm(0, 0)));
    assert!(editor.fsm.process_select());
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
}

#[test]
fn test_features_follow_active_tool() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_draw_trace());
    let features = editor.log.borrow().features;
    assert!(features.contains(Features::ABORT | Features::LINE_WIDTH));
    assert!(!features.contains(Features::SELECT));
}

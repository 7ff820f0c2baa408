use crate::support::{len, mm, Editor, ProjectBuilder};
use pcbkit_core::Point;
use pcbkit_editor::{Features, Key, StateKind};
use pcbkit_model::BoardHole;

#[test]
fn test_measure_between_two_clicks() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_measure());
    assert!(editor.log.borrow().gray_out);
    assert_eq!(editor.log.borrow().ruler, None);

    editor.click(mm(0, 0));
    editor.move_to(mm(3, 4));
    assert_eq!(editor.log.borrow().ruler, Some((mm(0, 0), mm(3, 4))));
    editor.click(mm(3, 4));

    let log = editor.log.borrow();
    assert_eq!(log.ruler, Some((mm(0, 0), mm(3, 4))));
    assert!(log.info_box_text.contains("Δ:      5.000000 mm"), "{}", log.info_box_text);
    assert!(log.features.contains(Features::REMOVE));
    drop(log);

    // Moving on does not change a finished measurement.
    editor.move_to(mm(8, 8));
    assert_eq!(editor.log.borrow().ruler, Some((mm(0, 0), mm(3, 4))));
    assert_eq!(editor.history(), 0);
}

#[test]
fn test_measure_third_click_starts_over() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_measure());
    editor.click(mm(0, 0));
    editor.click(mm(3, 4));
    editor.click(mm(1, 1));
    editor.move_to(mm(2, 1));
    assert_eq!(editor.log.borrow().ruler, Some((mm(1, 1), mm(2, 1))));
}

#[test]
fn test_measure_remove_and_abort() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_measure());
    assert!(!editor.fsm.process_remove());

    editor.click(mm(0, 0));
    editor.click(mm(1, 0));
    assert!(editor.fsm.process_remove());
    assert_eq!(editor.log.borrow().ruler, None);
    assert!(!editor.log.borrow().features.contains(Features::REMOVE));

    editor.click(mm(2, 2));
    assert!(editor.fsm.process_abort_command());
    assert_eq!(editor.fsm.current_state(), StateKind::Measure);
    assert_eq!(editor.log.borrow().ruler, None);

    assert!(editor.fsm.process_abort_command());
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    let log = editor.log.borrow();
    assert!(!log.gray_out);
    assert!(log.info_box_text.is_empty());
    assert_eq!(editor.history(), 0);
}

#[test]
fn test_measure_snaps_to_items_unless_shift_is_held() {
    let mut builder = ProjectBuilder::new();
    let hole = Point::from_nm(300_000, 200_000);
    builder.item(BoardHole::new(hole, len(500_000)));
    let mut editor = Editor::with_project(builder.build());
    assert!(editor.fsm.process_measure());

    editor.move_to(Point::from_nm(350_000, 250_000));
    assert_eq!(editor.log.borrow().scene_cursor, Some((hole, true, true)));

    editor.move_to(Point::from_nm(900_000, 900_000));
    assert_eq!(editor.log.borrow().scene_cursor, Some((mm(1, 1), true, false)));

    let raw = Point::from_nm(350_000, 250_000);
    editor.move_to(raw);
    assert!(editor.key_press(Key::Shift));
    assert_eq!(editor.log.borrow().scene_cursor, Some((raw, true, false)));
    assert!(editor.key_release(Key::Shift));
    assert_eq!(editor.log.borrow().scene_cursor, Some((hole, true, true)));
}

#[test]
fn test_measure_survives_leaving_the_tool() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_measure());
    editor.click(mm(0, 0));
    editor.click(mm(0, 2));
    assert!(editor.fsm.process_select());
    assert_eq!(editor.log.borrow().ruler, None);

    assert!(editor.fsm.process_measure());
    assert_eq!(editor.log.borrow().ruler, Some((mm(0, 0), mm(0, 2))));
}

use super::support::*;
use pcbkit_core::{Angle, Layer, Orientation, Path, Point, UnsignedLength};
use pcbkit_model::cmd::{
    edit_command_for, CmdBoardHoleEdit, CmdBoardPolygonAdd, CmdBoardPolygonEdit,
    CmdBoardStrokeTextAdd, CmdBoardStrokeTextEdit,
};
use pcbkit_model::{BoardHole, BoardPolygon, BoardStrokeText, ChangeKind, ItemKind, ItemRef};
use proptest::prelude::*;

#[test]
fn test_preview_is_not_recorded_until_executed() {
    let (mut project, mut stack) = project();
    let uuid = add_hole(&mut project, &mut stack, 0, 0);
    let events = record_events(&mut project);

    let mut cmd = CmdBoardHoleEdit::new(&project, uuid).unwrap();
    cmd.set_position(Point::from_nm(500, 0), true, &mut project)
        .unwrap();
    let hole = project.board().item::<BoardHole>(uuid).unwrap();
    assert_eq!(hole.position, Point::from_nm(500, 0));
    assert_eq!(stack.count(), 1);
    assert_eq!(count(&events, ChangeKind::Previewed), 1);

    stack.exec_cmd(cmd, &mut project).unwrap();
    assert_eq!(stack.count(), 2);
    assert_eq!(count(&events, ChangeKind::Edited), 1);

    stack.undo(&mut project).unwrap();
    let hole = project.board().item::<BoardHole>(uuid).unwrap();
    assert_eq!(hole.position, Point::from_nm(0, 0));
}

#[test]
fn test_discard_reverts_preview() {
    let (mut project, mut stack) = project();
    let uuid = add_hole(&mut project, &mut stack, 100, 100);

    let mut cmd = CmdBoardHoleEdit::new(&project, uuid).unwrap();
    cmd.translate(Point::from_nm(50, 0), true, &mut project)
        .unwrap();
    cmd.discard(&mut project).unwrap();
    cmd.discard(&mut project).unwrap();
    let hole = project.board().item::<BoardHole>(uuid).unwrap();
    assert_eq!(hole.position, Point::from_nm(100, 100));
}

#[test]
fn test_staged_edit_does_not_touch_board() {
    let (mut project, mut stack) = project();
    let uuid = add_hole(&mut project, &mut stack, 0, 0);
    let mut cmd = CmdBoardHoleEdit::new(&project, uuid).unwrap();
    cmd.set_diameter(len(2_000_000), false, &mut project).unwrap();
    assert_eq!(
        project.board().item::<BoardHole>(uuid).unwrap().diameter,
        len(1_000_000)
    );
    assert_eq!(cmd.new_item().diameter, len(2_000_000));
}

#[test]
fn test_polygon_mirror_flips_layer() {
    let (mut project, mut stack) = project();
    let polygon = BoardPolygon::new(
        Layer::TopLegend,
        UnsignedLength::new(200_000).unwrap(),
        false,
        Path::from_points(&[Point::from_nm(0, 0), Point::from_nm(1000, 0)]),
    );
    let uuid = polygon.uuid;
    stack
        .exec_cmd(CmdBoardPolygonAdd::new(polygon), &mut project)
        .unwrap();

    let mut cmd = CmdBoardPolygonEdit::new(&project, uuid).unwrap();
    cmd.mirror(Orientation::Horizontal, Point::default(), false, &mut project)
        .unwrap();
    stack.exec_cmd(cmd, &mut project).unwrap();

    let polygon = project.board().item::<BoardPolygon>(uuid).unwrap();
    assert_eq!(polygon.layer, Layer::BotLegend);
    assert_eq!(polygon.path.last().unwrap().pos, Point::from_nm(-1000, 0));
}

#[test]
fn test_stroke_text_rotation_is_normalized() {
    let (mut project, mut stack) = project();
    let text = BoardStrokeText::new(
        Layer::TopLegend,
        "REV A",
        Point::default(),
        len(1_000_000),
        UnsignedLength::new(150_000).unwrap(),
    );
    let uuid = text.uuid;
    stack
        .exec_cmd(CmdBoardStrokeTextAdd::new(text), &mut project)
        .unwrap();

    let mut cmd = CmdBoardStrokeTextEdit::new(&project, uuid).unwrap();
    cmd.set_rotation(-Angle::deg90(), false, &mut project).unwrap();
    stack.exec_cmd(cmd, &mut project).unwrap();
    assert_eq!(
        project.board().item::<BoardStrokeText>(uuid).unwrap().rotation,
        Angle::deg270()
    );
}

#[test]
fn test_blank_text_is_rejected() {
    let (mut project, mut stack) = project();
    let text = BoardStrokeText::new(
        Layer::TopLegend,
        "X",
        Point::default(),
        len(1_000_000),
        UnsignedLength::new(150_000).unwrap(),
    );
    let uuid = text.uuid;
    stack
        .exec_cmd(CmdBoardStrokeTextAdd::new(text), &mut project)
        .unwrap();
    let mut cmd = CmdBoardStrokeTextEdit::new(&project, uuid).unwrap();
    cmd.set_text("   ", false, &mut project).unwrap();
    assert!(stack.exec_cmd(cmd, &mut project).unwrap_err().is_user_error());
    assert_eq!(project.board().item::<BoardStrokeText>(uuid).unwrap().text, "X");
}

#[test]
fn test_edit_command_for_rejects_circuit_kinds() {
    let (project, _stack) = project();
    let err = edit_command_for(
        &project,
        ItemRef::new(ItemKind::NetSignal, uuid::Uuid::new_v4()),
    )
    .err()
    .unwrap();
    assert!(err.is_logic_error());
}

proptest! {
    #[test]
    fn prop_edit_undo_redo_restores_exact_state(
        moves in prop::collection::vec((-1_000_000i64..1_000_000, -1_000_000i64..1_000_000), 1..8),
    ) {
        let (mut project, mut stack) = project();
        let uuid = add_hole(&mut project, &mut stack, 0, 0);
        let before = project.board().clone();

        let mut cmd = CmdBoardHoleEdit::new(&project, uuid).unwrap();
        for (x, y) in &moves {
            cmd.translate(Point::from_nm(*x, *y), true, &mut project).unwrap();
        }
        stack.exec_cmd(cmd, &mut project).unwrap();
        let after = project.board().clone();

        stack.undo(&mut project).unwrap();
        prop_assert_eq!(project.board(), &before);
        stack.redo(&mut project).unwrap();
        prop_assert_eq!(project.board(), &after);
    }
}

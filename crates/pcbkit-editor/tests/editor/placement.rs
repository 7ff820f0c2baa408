use crate::support::{len, mm, Editor, ProjectBuilder, MM};
use pcbkit_core::{Angle, Layer, Point};
use pcbkit_editor::{StateKind, ToolInfo, ToolSetting};
use pcbkit_model::BoardVia;

#[test]
fn test_add_hole_preview_is_not_recorded() {
    let mut editor = Editor::new();
    editor.set_cursor(mm(3, 4));
    assert!(editor.fsm.process_add_hole());

    let holes = editor.project().board().holes();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].position, mm(3, 4));
    assert_eq!(editor.history(), 0);

    editor.move_to(Point::from_nm(7_400_000, 2_600_000));
    assert_eq!(editor.project().board().holes()[0].position, mm(7, 3));
    assert_eq!(editor.history(), 0);
}

#[test]
fn test_add_hole_click_commits_one_step_and_escape_discards_preview() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_hole());
    editor.move_to(mm(5, 5));
    editor.click(mm(5, 5));

    assert_eq!(editor.history(), 1);
    assert_eq!(editor.project().board().holes().len(), 2);

    assert!(editor.fsm.process_abort_command());
    assert_eq!(editor.fsm.current_state(), StateKind::Select);
    let holes = editor.project().board().holes();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].position, mm(5, 5));
    assert_eq!(editor.history(), 1);
}

#[test]
fn test_add_hole_diameter_setting_updates_preview() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_hole());
    assert!(editor.fsm.process_tool_setting(&ToolSetting::Diameter(len(2 * MM))));

    assert_eq!(editor.project().board().holes()[0].diameter, len(2 * MM));
    let last = editor.log.borrow().tool_enters.last().cloned();
    assert_eq!(last, Some(ToolInfo::AddHole { diameter: len(2 * MM) }));
}

#[test]
fn test_add_via_picks_net_under_cursor() {
    let mut builder = ProjectBuilder::new();
    let a = builder.net("A");
    let b = builder.net("B");
    for pos in [mm(-20, 0), mm(-20, 5)] {
        builder.item(BoardVia::new(pos, len(700_000), len(300_000), Some(a)));
    }
    builder.item(BoardVia::new(mm(10, 10), len(700_000), len(300_000), Some(b)));
    let mut editor = Editor::with_project(builder.build());

    editor.set_cursor(mm(0, 0));
    assert!(editor.fsm.process_add_via());
    let preview = |editor: &Editor| {
        let vias = editor.project().board().vias();
        vias[vias.len() - 1].clone()
    };
    assert_eq!(preview(&editor).net_signal, Some(a));

    editor.move_to(mm(10, 10));
    assert_eq!(preview(&editor).net_signal, Some(b));

    editor.click(mm(10, 10));
    assert!(editor.fsm.process_abort_command());
    assert_eq!(editor.history(), 1);
    let vias = editor.project().board().vias();
    assert_eq!(vias.len(), 4);
    assert_eq!(vias[3].position, mm(10, 10));
    assert_eq!(vias[3].net_signal, Some(b));
}

#[test]
fn test_add_via_fixed_net_signal_overrides_auto() {
    let mut builder = ProjectBuilder::new();
    let a = builder.net("A");
    let b = builder.net("B");
    builder.item(BoardVia::new(mm(10, 10), len(700_000), len(300_000), Some(b)));
    let mut editor = Editor::with_project(builder.build());

    assert!(editor.fsm.process_add_via());
    assert!(editor.fsm.process_tool_setting(&ToolSetting::NetSignal(Some(a))));
    editor.move_to(mm(10, 10));
    let vias = editor.project().board().vias();
    assert_eq!(vias[vias.len() - 1].net_signal, Some(a));
}

#[test]
fn test_add_text_right_click_rotates_and_rotation_carries_over() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_stroke_text());
    assert_eq!(editor.project().board().stroke_texts().len(), 1);

    assert!(editor.right_click(mm(0, 0)));
    assert_eq!(editor.fsm.current_state(), StateKind::AddStrokeText);
    assert_eq!(editor.project().board().stroke_texts()[0].rotation, Angle::deg90());

    editor.click(mm(2, 2));
    assert_eq!(editor.history(), 1);
    let texts = editor.project().board().stroke_texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].position, mm(2, 2));
    assert_eq!(texts[0].rotation, Angle::deg90());
    assert_eq!(texts[1].rotation, Angle::deg90());
    assert_eq!(texts[0].text, "{{PROJECT}}");
}

#[test]
fn test_add_text_rejects_inner_copper_layer() {
    let mut editor = Editor::new();
    assert!(editor.fsm.process_add_stroke_text());
    assert!(editor.fsm.process_tool_setting(&ToolSetting::Layer(Layer::InnerCopper(1))));

    assert_eq!(editor.errors().len(), 1);
    assert_eq!(
        editor.project().board().stroke_texts()[0].layer,
        Layer::BoardDocumentation
    );
}

use super::support::*;
use pcbkit_core::Error;
use pcbkit_model::cmd::{CmdComponentInstanceAdd, CmdComponentInstanceEdit, CmdNetSignalAdd};
use pcbkit_model::{AssemblyOption, ChangeKind, ComponentInstance, NetSignal, Project};
use pcbkit_undo::UndoStack;
use uuid::Uuid;

fn project_with_component() -> (Project, UndoStack<Project>, Uuid) {
    let (mut project, mut stack) = project();
    let mut component = ComponentInstance::new("R1", "10k");
    component.assembly_options = vec![AssemblyOption {
        device: Uuid::new_v4(),
        variants: vec!["default".into()],
    }];
    let uuid = component.uuid;
    stack
        .exec_cmd(CmdComponentInstanceAdd::new(component), &mut project)
        .unwrap();
    (project, stack, uuid)
}

#[test]
fn test_edit_name_and_value_then_undo() {
    let (mut project, mut stack, uuid) = project_with_component();
    let options = project.circuit().component_instance(uuid).unwrap().assembly_options.clone();

    let mut cmd = CmdComponentInstanceEdit::new(&project, uuid).unwrap();
    cmd.set_name("R2");
    cmd.set_value("4k7");
    assert!(stack.exec_cmd(cmd, &mut project).unwrap());

    let c = project.circuit().component_instance(uuid).unwrap();
    assert_eq!((c.name.as_str(), c.value.as_str()), ("R2", "4k7"));
    assert_eq!(c.assembly_options, options);

    stack.undo(&mut project).unwrap();
    let c = project.circuit().component_instance(uuid).unwrap();
    assert_eq!((c.name.as_str(), c.value.as_str()), ("R1", "10k"));
    assert_eq!(c.assembly_options, options);
}

#[test]
fn test_edit_notifies_once_per_change() {
    let (mut project, mut stack, uuid) = project_with_component();
    let events = record_events(&mut project);

    let mut cmd = CmdComponentInstanceEdit::new(&project, uuid).unwrap();
    cmd.set_value("1k");
    stack.exec_cmd(cmd, &mut project).unwrap();
    assert_eq!(count(&events, ChangeKind::Edited), 1);

    stack.undo(&mut project).unwrap();
    stack.redo(&mut project).unwrap();
    assert_eq!(count(&events, ChangeKind::Edited), 3);
}

#[test]
fn test_unchanged_edit_leaves_no_history() {
    let (mut project, mut stack, uuid) = project_with_component();
    let events = record_events(&mut project);
    let cmd = CmdComponentInstanceEdit::new(&project, uuid).unwrap();
    assert!(!stack.exec_cmd(cmd, &mut project).unwrap());
    assert_eq!(stack.count(), 1);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_duplicate_name_is_rejected() {
    let (mut project, mut stack, uuid) = project_with_component();
    stack
        .exec_cmd(
            CmdComponentInstanceAdd::new(ComponentInstance::new("C1", "100n")),
            &mut project,
        )
        .unwrap();

    let mut cmd = CmdComponentInstanceEdit::new(&project, uuid).unwrap();
    cmd.set_name("C1");
    let err = stack.exec_cmd(cmd, &mut project).unwrap_err();
    assert!(err.is_user_error());
    assert_eq!(project.circuit().component_instance(uuid).unwrap().name, "R1");
}

#[test]
fn test_invalid_identifiers() {
    let (mut project, mut stack, uuid) = project_with_component();
    let long = "X".repeat(33);
    for name in ["", "has space", long.as_str()] {
        let mut cmd = CmdComponentInstanceEdit::new(&project, uuid).unwrap();
        cmd.set_name(name);
        assert!(stack.exec_cmd(cmd, &mut project).is_err(), "{name:?}");
    }
    let err = stack
        .exec_cmd(CmdNetSignalAdd::new(NetSignal::new("")), &mut project)
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_duplicate_net_name_is_rejected() {
    let (mut project, mut stack) = project();
    add_net(&mut project, &mut stack, "GND");
    assert!(stack
        .exec_cmd(CmdNetSignalAdd::new(NetSignal::new("GND")), &mut project)
        .is_err());
    assert_eq!(project.circuit().net_signals().len(), 1);
}

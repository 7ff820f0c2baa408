//! Shared fixtures for the model tests.

use pcbkit_core::{Point, PositiveLength};
use pcbkit_model::cmd::{CmdBoardHoleAdd, CmdNetSignalAdd};
use pcbkit_model::{BoardHole, ChangeKind, NetSignal, Project, ProjectEvent};
use pcbkit_undo::UndoStack;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

pub fn len(nm: i64) -> PositiveLength {
    PositiveLength::new(nm).unwrap()
}

pub fn project() -> (Project, UndoStack<Project>) {
    (Project::new("Test"), UndoStack::new())
}

/// Records every event emitted by the project.
pub fn record_events(project: &mut Project) -> Rc<RefCell<Vec<ProjectEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    project.subscribe(move |e: &ProjectEvent| sink.borrow_mut().push(e.clone()));
    events
}

pub fn count(events: &Rc<RefCell<Vec<ProjectEvent>>>, change: ChangeKind) -> usize {
    events.borrow().iter().filter(|e| e.change == change).count()
}

pub fn add_hole(project: &mut Project, stack: &mut UndoStack<Project>, x: i64, y: i64) -> Uuid {
    let hole = BoardHole::new(Point::from_nm(x, y), len(1_000_000));
    let uuid = hole.uuid;
    stack.exec_cmd(CmdBoardHoleAdd::new(hole), project).unwrap();
    uuid
}

pub fn add_net(project: &mut Project, stack: &mut UndoStack<Project>, name: &str) -> Uuid {
    let net = NetSignal::new(name);
    let uuid = net.uuid;
    stack.exec_cmd(CmdNetSignalAdd::new(net), project).unwrap();
    uuid
}

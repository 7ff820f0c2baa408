//! Shared fixtures for the editor tests.

#![allow(dead_code)]

use pcbkit_core::{Point, PositiveLength};
use pcbkit_editor::{
    BoardEditorFsm, HeadlessAdapter, Key, KeyEvent, Modifiers, SceneMouseEvent, SharedHeadlessLog,
};
use pcbkit_model::cmd::{CmdBoardItemAdd, CmdComponentInstanceAdd, CmdNetSignalAdd};
use pcbkit_model::{BoardItem, ComponentInstance, NetSignal, Project};
use pcbkit_settings::EditorConfig;
use pcbkit_undo::UndoStack;
use uuid::Uuid;

pub const MM: i64 = 1_000_000;

/// Point in whole millimetres.
pub fn mm(x: i64, y: i64) -> Point {
    Point::from_nm(x * MM, y * MM)
}

pub fn len(nm: i64) -> PositiveLength {
    PositiveLength::new(nm).unwrap()
}

/// Builds a project outside the editor, so the editor history starts empty.
pub struct ProjectBuilder {
    project: Project,
    stack: UndoStack<Project>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            project: Project::new("Test"),
            stack: UndoStack::new(),
        }
    }

    pub fn net(&mut self, name: &str) -> Uuid {
        let net = NetSignal::new(name);
        let uuid = net.uuid;
        self.stack
            .exec_cmd(CmdNetSignalAdd::new(net), &mut self.project)
            .unwrap();
        uuid
    }

    pub fn component(&mut self, name: &str) -> Uuid {
        let component = ComponentInstance::new(name, "");
        let uuid = component.uuid;
        self.stack
            .exec_cmd(CmdComponentInstanceAdd::new(component), &mut self.project)
            .unwrap();
        uuid
    }

    pub fn item<T: BoardItem>(&mut self, item: T) -> Uuid {
        let uuid = item.uuid();
        self.stack
            .exec_cmd(CmdBoardItemAdd::new(item), &mut self.project)
            .unwrap();
        uuid
    }

    pub fn build(self) -> Project {
        self.project
    }
}

/// An editor on a 1 mm grid driven through the headless adapter.
pub struct Editor {
    pub fsm: BoardEditorFsm,
    pub log: SharedHeadlessLog,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_project(Project::new("Test"))
    }

    pub fn with_project(project: Project) -> Self {
        let adapter = HeadlessAdapter::new(len(MM));
        let log = adapter.log();
        let fsm = BoardEditorFsm::new(project, Box::new(adapter), EditorConfig::default());
        Self { fsm, log }
    }

    pub fn project(&self) -> &Project {
        self.fsm.project()
    }

    /// Places the mouse cursor without sending an event.
    pub fn set_cursor(&self, pos: Point) {
        self.log.borrow_mut().cursor_pos = pos;
    }

    pub fn move_to(&mut self, pos: Point) -> bool {
        self.set_cursor(pos);
        self.fsm.process_mouse_moved(&SceneMouseEvent::new(pos))
    }

    pub fn press(&mut self, pos: Point) -> bool {
        self.set_cursor(pos);
        self.fsm.process_left_pressed(&SceneMouseEvent::new(pos))
    }

    pub fn release(&mut self, pos: Point) -> bool {
        self.fsm.process_left_released(&SceneMouseEvent::new(pos))
    }

    pub fn click(&mut self, pos: Point) -> bool {
        let handled = self.press(pos);
        self.release(pos);
        handled
    }

    pub fn ctrl_click(&mut self, pos: Point) -> bool {
        let control = Modifiers {
            control: true,
            ..Modifiers::none()
        };
        let e = SceneMouseEvent::new(pos).with_modifiers(control);
        let handled = self.fsm.process_left_pressed(&e);
        self.fsm.process_left_released(&e);
        handled
    }

    pub fn right_click(&mut self, pos: Point) -> bool {
        self.fsm.process_right_released(&SceneMouseEvent::new(pos))
    }

    pub fn key_press(&mut self, key: Key) -> bool {
        self.fsm.process_key_pressed(&KeyEvent::new(key))
    }

    pub fn key_release(&mut self, key: Key) -> bool {
        self.fsm.process_key_released(&KeyEvent::new(key))
    }

    /// Number of undo steps that can be undone.
    pub fn history(&self) -> usize {
        self.fsm.context().undo_stack().current_index()
    }

    pub fn group_open(&self) -> bool {
        self.fsm.context().is_command_group_active()
    }

    pub fn errors(&self) -> Vec<String> {
        self.log.borrow().errors.clone()
    }

    pub fn undo(&mut self) {
        assert!(self.fsm.process_undo().unwrap(), "nothing to undo");
    }
}

//! Adapter without a UI
//!
//! Records everything the editor asks the host to show. Used by the replay
//! binary and by tests. Global and scene coordinates are the same.

use crate::adapter::{BoardEditorAdapter, CursorShape, Features, GraphicsScene, ToolInfo};
use pcbkit_core::{Error, Point, PositiveLength};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// What the editor has shown so far
#[derive(Debug, Clone, Default)]
pub struct HeadlessLog {
    /// Position reported as the mouse cursor
    pub cursor_pos: Point,
    pub view_cursor: Option<CursorShape>,
    pub gray_out: bool,
    pub info_box_text: String,
    pub ruler: Option<(Point, Point)>,
    pub scene_cursor: Option<(Point, bool, bool)>,
    pub status_message: String,
    /// `title: message` of every reported error
    pub errors: Vec<String>,
    pub tool_enters: Vec<ToolInfo>,
    pub tool_leaves: usize,
    pub features: Features,
}

pub type SharedHeadlessLog = Rc<RefCell<HeadlessLog>>;

pub struct HeadlessAdapter {
    scene: GraphicsScene,
    grid: PositiveLength,
    log: SharedHeadlessLog,
}

impl HeadlessAdapter {
    pub fn new(grid: PositiveLength) -> Self {
        Self {
            scene: GraphicsScene::new(),
            grid,
            log: SharedHeadlessLog::default(),
        }
    }

    /// Handle that stays valid after the adapter is moved into the editor.
    pub fn log(&self) -> SharedHeadlessLog {
        Rc::clone(&self.log)
    }
}

impl BoardEditorAdapter for HeadlessAdapter {
    fn scene(&self) -> Option<&GraphicsScene> {
        Some(&self.scene)
    }

    fn scene_mut(&mut self) -> Option<&mut GraphicsScene> {
        Some(&mut self.scene)
    }

    fn grid_interval(&self) -> PositiveLength {
        self.grid
    }

    fn set_view_cursor(&mut self, shape: Option<CursorShape>) {
        self.log.borrow_mut().view_cursor = shape;
    }

    fn set_view_gray_out(&mut self, gray_out: bool) {
        self.log.borrow_mut().gray_out = gray_out;
    }

    fn set_view_info_box_text(&mut self, text: &str) {
        self.log.borrow_mut().info_box_text = text.to_string();
    }

    fn set_view_ruler(&mut self, ruler: Option<(Point, Point)>) {
        self.log.borrow_mut().ruler = ruler;
    }

    fn set_scene_cursor(&mut self, pos: Point, crosshair: bool, circle: bool) {
        self.log.borrow_mut().scene_cursor = Some((pos, crosshair, circle));
    }

    fn map_global_pos_to_scene_pos(&self, global: Point) -> Point {
        global
    }

    fn global_cursor_pos(&self) -> Point {
        self.log.borrow().cursor_pos
    }

    fn set_status_bar_message(&mut self, message: &str, _timeout_ms: u32) {
        self.log.borrow_mut().status_message = message.to_string();
    }

    fn set_features(&mut self, features: Features) {
        self.log.borrow_mut().features = features;
    }

    fn tool_enter(&mut self, tool: &ToolInfo) {
        debug!("Tool entered: {:?}", tool);
        self.log.borrow_mut().tool_enters.push(tool.clone());
    }

    fn tool_leave(&mut self) {
        self.log.borrow_mut().tool_leaves += 1;
    }

    fn report_error(&mut self, title: &str, error: &Error) {
        self.log.borrow_mut().errors.push(format!("{}: {}", title, error));
    }
}

//! Editor context shared by all states of one board editor

use crate::adapter::{BoardEditorAdapter, CursorShape, GraphicsScene};
use pcbkit_core::{Error, Layer, Length, Point, PositiveLength, Result};
use pcbkit_model::{ItemRef, Project};
use pcbkit_settings::EditorConfig;
use pcbkit_undo::{UndoCommand, UndoStack};
use tracing::{debug, warn};

/// Hit-test tolerance in nanometres
const HIT_TOLERANCE_NM: i64 = 100_000;

/// The project, its undo stack and the host adapter.
///
/// States receive the context with every event; they never own any of it.
pub struct BoardEditorContext {
    project: Project,
    undo_stack: UndoStack<Project>,
    adapter: Box<dyn BoardEditorAdapter>,
    config: EditorConfig,
    leave_requested: bool,
}

impl BoardEditorContext {
    pub fn new(project: Project, adapter: Box<dyn BoardEditorAdapter>, config: EditorConfig) -> Self {
        let undo_stack = UndoStack::with_max_depth(config.history.max_depth);
        Self {
            project,
            undo_stack,
            adapter,
            config,
            leave_requested: false,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    pub fn undo_stack(&self) -> &UndoStack<Project> {
        &self.undo_stack
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn adapter(&mut self) -> &mut dyn BoardEditorAdapter {
        self.adapter.as_mut()
    }

    pub fn scene(&self) -> Option<&GraphicsScene> {
        self.adapter.scene()
    }

    pub fn scene_mut(&mut self) -> Option<&mut GraphicsScene> {
        self.adapter.scene_mut()
    }

    /// Items selected in the scene; empty without a scene.
    pub fn selection(&self) -> Vec<ItemRef> {
        self.scene()
            .map(|scene| scene.selection().to_vec())
            .unwrap_or_default()
    }

    pub fn is_command_group_active(&self) -> bool {
        self.undo_stack.is_command_group_active()
    }

    pub fn begin_cmd_group(&mut self, text: &str) -> Result<()> {
        self.undo_stack.begin_cmd_group(text)
    }

    pub fn append_to_cmd_group<C>(&mut self, cmd: C) -> Result<bool>
    where
        C: UndoCommand<Project> + 'static,
    {
        self.undo_stack.append_to_cmd_group(cmd, &mut self.project)
    }

    pub fn commit_cmd_group(&mut self) -> Result<bool> {
        self.undo_stack.commit_cmd_group()
    }

    pub fn abort_cmd_group(&mut self) -> Result<()> {
        self.undo_stack.abort_cmd_group(&mut self.project)
    }

    pub fn exec_cmd<C>(&mut self, cmd: C) -> Result<bool>
    where
        C: UndoCommand<Project> + 'static,
    {
        self.undo_stack.exec_cmd(cmd, &mut self.project)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.undo_stack.undo(&mut self.project)
    }

    pub fn redo(&mut self) -> Result<()> {
        self.undo_stack.redo(&mut self.project)
    }

    pub fn grid_interval(&self) -> PositiveLength {
        self.adapter.grid_interval()
    }

    pub fn map_to_grid(&self, pos: Point) -> Point {
        pos.mapped_to_grid(self.grid_interval())
    }

    pub fn hit_tolerance(&self) -> Length {
        Length::new(HIT_TOLERANCE_NM)
    }

    /// Scene position under the mouse cursor, snapped to the grid.
    pub fn cursor_grid_pos(&self) -> Point {
        let global = self.adapter.global_cursor_pos();
        self.map_to_grid(self.adapter.map_global_pos_to_scene_pos(global))
    }

    pub fn set_cursor(&mut self, shape: Option<CursorShape>) {
        self.adapter.set_view_cursor(shape);
    }

    pub fn make_layer_visible(&mut self, layer: Layer) {
        if self.project.board_mut().layer_stack_mut().set_visible(layer, true) {
            debug!("Layer {} made visible", layer);
        }
    }

    /// Asks the FSM to return to the select tool once the current event
    /// has been handled.
    pub fn request_leaving_state(&mut self) {
        self.leave_requested = true;
    }

    pub(crate) fn take_leave_request(&mut self) -> bool {
        std::mem::take(&mut self.leave_requested)
    }

    pub fn report_error(&mut self, title: &str, error: &Error) {
        warn!("{}: {}", title, error);
        self.adapter.report_error(title, error);
    }
}

impl Drop for BoardEditorContext {
    fn drop(&mut self) {
        if self.undo_stack.is_command_group_active() {
            if let Err(e) = self.undo_stack.abort_cmd_group(&mut self.project) {
                warn!("Failed to abort open command group: {}", e);
            }
        }
    }
}

//! Select tool
//!
//! Default state of the editor. Clicking selects items, dragging moves the
//! selection as one undo step and dragging on empty space spans a rubber
//! band. Transformations of the selection are executed immediately.

use super::{BoardEditorState, StateKind};
use crate::adapter::{CursorShape, Features, SceneMouseEvent, ToolInfo};
use crate::context::BoardEditorContext;
use pcbkit_core::{Angle, Length, Orientation, Point, Result};
use pcbkit_model::cmd::{
    edit_command_for, remove_command_for, BoardItemEdit, CmdMoveSelectedBoardItems,
};
use pcbkit_model::ItemRef;
use tracing::debug;

enum SubState {
    Idle,
    /// Dragging the selection; the command previews every step.
    Moving {
        cmd: CmdMoveSelectedBoardItems,
        start: Point,
        cursor: Point,
    },
    Selecting {
        start: Point,
    },
}

pub struct SelectState {
    sub_state: SubState,
}

impl Default for SelectState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectState {
    pub fn new() -> Self {
        Self {
            sub_state: SubState::Idle,
        }
    }

    fn set_selection(ctx: &mut BoardEditorContext, items: Vec<ItemRef>) {
        if let Some(scene) = ctx.scene_mut() {
            scene.set_selection(items);
        }
    }

    /// Grid-mapped mean of the anchors of `items`.
    fn center_of(ctx: &BoardEditorContext, items: &[ItemRef]) -> Point {
        let board = ctx.project().board();
        let anchors: Vec<Point> = items.iter().filter_map(|i| board.anchor_of(*i)).collect();
        if anchors.is_empty() {
            return Point::default();
        }
        let n = anchors.len() as i64;
        let (sx, sy) = anchors
            .iter()
            .fold((0i64, 0i64), |(x, y), p| (x + p.x.to_nm(), y + p.y.to_nm()));
        ctx.map_to_grid(Point::new(Length::new(sx / n), Length::new(sy / n)))
    }

    fn start_moving(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<()> {
        let selection = ctx.selection();
        let cmd = CmdMoveSelectedBoardItems::new(ctx.project(), &selection)?;
        let start = ctx.map_to_grid(pos);
        self.sub_state = SubState::Moving {
            cmd,
            start,
            cursor: start,
        };
        ctx.set_cursor(Some(CursorShape::ClosedHand));
        Ok(())
    }

    fn finish_moving(&mut self, ctx: &mut BoardEditorContext) -> Result<()> {
        let SubState::Moving { cmd, .. } = std::mem::replace(&mut self.sub_state, SubState::Idle)
        else {
            return Ok(());
        };
        ctx.set_cursor(None);
        if cmd.is_empty() {
            return Ok(());
        }
        ctx.exec_cmd(cmd)?;
        Ok(())
    }

    /// Ends a drag or rubber band without recording anything.
    fn abort_sub_state(&mut self, ctx: &mut BoardEditorContext) -> Result<()> {
        match std::mem::replace(&mut self.sub_state, SubState::Idle) {
            SubState::Moving { mut cmd, .. } => {
                ctx.set_cursor(None);
                cmd.discard(ctx.project_mut())
            }
            SubState::Selecting { .. } => {
                if let Some(scene) = ctx.scene_mut() {
                    scene.set_selection_rect(None);
                }
                Ok(())
            }
            SubState::Idle => Ok(()),
        }
    }

    /// Runs `f` on a move command for the selection and executes it.
    fn transform_selection(
        &mut self,
        ctx: &mut BoardEditorContext,
        text: &str,
        f: impl FnOnce(&mut CmdMoveSelectedBoardItems, Point, &mut BoardEditorContext) -> Result<()>,
    ) -> bool {
        if let SubState::Moving { cmd, cursor, .. } = &mut self.sub_state {
            let center = *cursor;
            if let Err(err) = f(cmd, center, ctx) {
                ctx.report_error(text, &err);
            }
            return true;
        }
        let selection = ctx.selection();
        if selection.is_empty() {
            return false;
        }
        let center = Self::center_of(ctx, &selection);
        let result = CmdMoveSelectedBoardItems::new(ctx.project(), &selection).and_then(|cmd| {
            let mut cmd = cmd.with_text(text);
            if let Err(err) = f(&mut cmd, center, ctx) {
                cmd.discard(ctx.project_mut())?;
                return Err(err);
            }
            ctx.exec_cmd(cmd)
        });
        if let Err(err) = result {
            ctx.report_error(text, &err);
        }
        true
    }

    /// Applies one staged edit per selected item as a single undo step.
    fn edit_selection(
        ctx: &mut BoardEditorContext,
        text: &str,
        include_locked: bool,
        f: impl Fn(&mut dyn BoardItemEdit),
    ) -> Result<bool> {
        let selection = ctx.selection();
        if selection.is_empty() {
            return Ok(false);
        }
        ctx.begin_cmd_group(text)?;
        let result = selection.iter().try_for_each(|item| {
            let mut edit = edit_command_for(ctx.project(), *item)?;
            if edit.is_locked() && !include_locked {
                return Ok(());
            }
            f(edit.as_mut());
            ctx.append_to_cmd_group(edit).map(|_| ())
        });
        match result {
            Ok(()) => ctx.commit_cmd_group(),
            Err(err) => {
                ctx.abort_cmd_group()?;
                Err(err)
            }
        }
    }

    fn remove_selection(ctx: &mut BoardEditorContext) -> Result<bool> {
        let selection = ctx.selection();
        let mut removable = Vec::with_capacity(selection.len());
        for item in &selection {
            if !edit_command_for(ctx.project(), *item)?.is_locked() {
                removable.push(*item);
            }
        }
        if removable.is_empty() {
            return Ok(false);
        }
        ctx.begin_cmd_group("Remove board items")?;
        let result = removable.iter().try_for_each(|item| {
            let cmd = remove_command_for(*item)?;
            ctx.append_to_cmd_group(cmd).map(|_| ())
        });
        match result {
            Ok(()) => {
                debug!("Removed {} board items", removable.len());
                Self::set_selection(ctx, Vec::new());
                ctx.commit_cmd_group()
            }
            Err(err) => {
                ctx.abort_cmd_group()?;
                Err(err)
            }
        }
    }
}

impl BoardEditorState for SelectState {
    fn kind(&self) -> StateKind {
        StateKind::Select
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::Select
    }

    fn features(&self, ctx: &BoardEditorContext) -> Features {
        let mut features = Features::SELECT | Features::ABORT;
        let has_selection = ctx.scene().is_some_and(|s| !s.selection().is_empty());
        if has_selection {
            features |= Features::REMOVE
                | Features::ROTATE
                | Features::MIRROR
                | Features::MOVE
                | Features::SNAP_TO_GRID
                | Features::LOCK;
        }
        features
    }

    fn exit(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if let Err(err) = self.abort_sub_state(ctx) {
            ctx.report_error("Failed to leave select tool", &err);
            return false;
        }
        Self::set_selection(ctx, Vec::new());
        true
    }

    fn process_abort_command(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if let Err(err) = self.abort_sub_state(ctx) {
            ctx.report_error("Failed to abort", &err);
        }
        Self::set_selection(ctx, Vec::new());
        true
    }

    fn process_select_all(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if !matches!(self.sub_state, SubState::Idle) {
            return false;
        }
        let all = ctx.project().board().all_items();
        Self::set_selection(ctx, all);
        true
    }

    fn process_remove(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if !matches!(self.sub_state, SubState::Idle) {
            return false;
        }
        match Self::remove_selection(ctx) {
            Ok(removed) => removed,
            Err(err) => {
                ctx.report_error("Failed to remove items", &err);
                true
            }
        }
    }

    fn process_rotate(&mut self, ctx: &mut BoardEditorContext, angle: Angle) -> bool {
        self.transform_selection(ctx, "Rotate board items", |cmd, center, ctx| {
            cmd.rotate(angle, center, ctx.project_mut())
        })
    }

    fn process_flip(&mut self, ctx: &mut BoardEditorContext, orientation: Orientation) -> bool {
        self.transform_selection(ctx, "Flip board items", |cmd, center, ctx| {
            cmd.mirror(orientation, center, ctx.project_mut())
        })
    }

    fn process_move(&mut self, ctx: &mut BoardEditorContext, delta: Point) -> bool {
        if !matches!(self.sub_state, SubState::Idle) {
            return false;
        }
        self.transform_selection(ctx, "Move board items", |cmd, _, ctx| {
            cmd.set_delta(delta, ctx.project_mut())
        })
    }

    fn process_snap_to_grid(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if !matches!(self.sub_state, SubState::Idle) {
            return false;
        }
        let grid = ctx.grid_interval();
        match Self::edit_selection(ctx, "Snap to grid", false, |edit| edit.snap_staged(grid)) {
            Ok(_) => true,
            Err(err) => {
                ctx.report_error("Failed to snap items to grid", &err);
                true
            }
        }
    }

    fn process_set_locked(&mut self, ctx: &mut BoardEditorContext, locked: bool) -> bool {
        if !matches!(self.sub_state, SubState::Idle) {
            return false;
        }
        let text = if locked {
            "Lock board items"
        } else {
            "Unlock board items"
        };
        let result = Self::edit_selection(ctx, text, true, |edit| edit.set_locked_staged(locked));
        if let Err(err) = result {
            ctx.report_error(text, &err);
        }
        true
    }

    fn process_mouse_moved(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        match &mut self.sub_state {
            SubState::Idle => false,
            SubState::Moving { cmd, start, cursor } => {
                *cursor = ctx.map_to_grid(e.scene_pos);
                let delta = *cursor - *start;
                let result = cmd.set_delta(delta, ctx.project_mut());
                if let Err(err) = result {
                    ctx.report_error("Failed to move items", &err);
                    if let Err(err) = self.abort_sub_state(ctx) {
                        ctx.report_error("Failed to abort move", &err);
                    }
                }
                true
            }
            SubState::Selecting { start } => {
                let (a, b) = (*start, e.scene_pos);
                let items = ctx.project().board().items_in_rect(a, b);
                if let Some(scene) = ctx.scene_mut() {
                    scene.set_selection_rect(Some((a, b)));
                    scene.set_selection(items);
                }
                true
            }
        }
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        if !matches!(self.sub_state, SubState::Idle) {
            return false;
        }
        let pos = e.scene_pos;
        let hit = ctx
            .project()
            .board()
            .items_at(&pos, ctx.hit_tolerance())
            .into_iter()
            .next();
        match hit {
            Some(item) if e.modifiers.control => {
                if let Some(scene) = ctx.scene_mut() {
                    scene.toggle(item);
                }
            }
            Some(item) => {
                let selected = ctx.scene().is_some_and(|scene| scene.is_selected(&item));
                if !selected {
                    Self::set_selection(ctx, vec![item]);
                }
                if let Err(err) = self.start_moving(ctx, pos) {
                    ctx.report_error("Failed to start moving items", &err);
                }
            }
            None => {
                if !e.modifiers.control {
                    Self::set_selection(ctx, Vec::new());
                }
                if let Some(scene) = ctx.scene_mut() {
                    scene.set_selection_rect(Some((pos, pos)));
                }
                self.sub_state = SubState::Selecting { start: pos };
            }
        }
        true
    }

    fn process_left_released(&mut self, ctx: &mut BoardEditorContext, _e: &SceneMouseEvent) -> bool {
        match self.sub_state {
            SubState::Idle => false,
            SubState::Moving { .. } => {
                if let Err(err) = self.finish_moving(ctx) {
                    ctx.report_error("Failed to move items", &err);
                }
                true
            }
            SubState::Selecting { .. } => {
                if let Some(scene) = ctx.scene_mut() {
                    scene.set_selection_rect(None);
                }
                self.sub_state = SubState::Idle;
                true
            }
        }
    }

    fn process_right_released(&mut self, ctx: &mut BoardEditorContext, _e: &SceneMouseEvent) -> bool {
        if matches!(self.sub_state, SubState::Moving { .. }) {
            return self.process_rotate(ctx, Angle::deg90());
        }
        false
    }
}

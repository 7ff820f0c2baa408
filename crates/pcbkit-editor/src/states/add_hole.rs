use super::placement::Placement;
use super::{BoardEditorState, StateKind};
use crate::adapter::{CursorShape, Features, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use pcbkit_core::{Point, PositiveLength, Result};
use pcbkit_model::BoardHole;
use tracing::debug;

const GROUP_TEXT: &str = "Add hole to board";

/// Places holes; a new hole follows the cursor right after entry.
pub struct AddHoleState {
    diameter: PositiveLength,
    current: Option<Placement<BoardHole>>,
}

impl AddHoleState {
    pub fn new(diameter: PositiveLength) -> Self {
        Self {
            diameter,
            current: None,
        }
    }

    fn add_hole(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> bool {
        match Placement::start(ctx, GROUP_TEXT, BoardHole::new(pos, self.diameter)) {
            Ok(placement) => {
                debug!("Placing hole at {}", pos);
                self.current = Some(placement);
                true
            }
            Err(e) => {
                ctx.report_error("Failed to add hole", &e);
                false
            }
        }
    }

    fn update_position(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<bool> {
        match self.current.as_mut() {
            Some(placement) => {
                placement.edit_mut()?.set_position(pos, true, ctx.project_mut())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn fix_position(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<()> {
        let Some(mut placement) = self.current.take() else {
            return Ok(());
        };
        let staged = placement
            .edit_mut()
            .and_then(|edit| edit.set_position(pos, false, ctx.project_mut()));
        if let Err(e) = staged {
            placement.abort(ctx)?;
            return Err(e);
        }
        placement.finish(ctx)
    }

    fn abort(&mut self, ctx: &mut BoardEditorContext) -> bool {
        match self.current.take().map(|p| p.abort(ctx)) {
            Some(Err(e)) => {
                ctx.report_error("Failed to abort hole placement", &e);
                false
            }
            _ => true,
        }
    }
}

impl BoardEditorState for AddHoleState {
    fn kind(&self) -> StateKind {
        StateKind::AddHole
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::AddHole {
            diameter: self.diameter,
        }
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        Features::ABORT
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        debug_assert!(self.current.is_none());
        let pos = ctx.cursor_grid_pos();
        if !self.add_hole(ctx, pos) {
            return false;
        }
        ctx.set_cursor(Some(CursorShape::Cross));
        true
    }

    fn exit(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if !self.abort(ctx) {
            return false;
        }
        ctx.set_cursor(None);
        true
    }

    fn process_mouse_moved(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let pos = ctx.map_to_grid(e.scene_pos);
        match self.update_position(ctx, pos) {
            Ok(handled) => handled,
            Err(err) => {
                ctx.report_error("Failed to move hole", &err);
                self.abort(ctx);
                false
            }
        }
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let pos = ctx.map_to_grid(e.scene_pos);
        if let Err(err) = self.fix_position(ctx, pos) {
            ctx.report_error("Failed to add hole", &err);
        }
        self.add_hole(ctx, pos);
        true
    }

    fn process_left_double_clicked(
        &mut self,
        ctx: &mut BoardEditorContext,
        e: &SceneMouseEvent,
    ) -> bool {
        self.process_left_pressed(ctx, e)
    }

    fn process_tool_setting(&mut self, ctx: &mut BoardEditorContext, setting: &ToolSetting) -> bool {
        let ToolSetting::Diameter(diameter) = setting else {
            return false;
        };
        self.diameter = *diameter;
        if let Some(placement) = self.current.as_mut() {
            let result = placement
                .edit_mut()
                .and_then(|edit| edit.set_diameter(*diameter, true, ctx.project_mut()));
            if let Err(err) = result {
                ctx.report_error("Failed to change hole diameter", &err);
            }
        }
        true
    }
}

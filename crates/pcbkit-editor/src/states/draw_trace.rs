//! Trace drawing tool
//!
//! Every fixed segment is one net line committed as its own undo step. The
//! trace continues from the end of the last segment until it lands on an
//! existing via or trace end, or the same point is clicked twice.

use super::placement::Placement;
use super::{BoardEditorState, StateKind, LINE_WIDTH_STEP_NM};
use crate::adapter::{CursorShape, Features, Key, KeyEvent, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use pcbkit_core::{Error, Layer, Point, PositiveLength, Result};
use pcbkit_model::{BoardNetLine, BoardVia, ItemKind};
use pcbkit_settings::TraceDefaults;
use tracing::debug;
use uuid::Uuid;

const GROUP_TEXT: &str = "Draw trace";

pub struct DrawTraceState {
    layer: Layer,
    width: PositiveLength,
    snap_active: bool,
    cursor_pos: Point,
    current: Option<Placement<BoardNetLine>>,
}

impl DrawTraceState {
    pub fn new(defaults: &TraceDefaults) -> Self {
        Self {
            layer: defaults.layer,
            width: defaults.width,
            snap_active: true,
            cursor_pos: Point::default(),
            current: None,
        }
    }

    fn target_pos(&self, ctx: &BoardEditorContext) -> Point {
        if self.snap_active {
            ctx.map_to_grid(self.cursor_pos)
        } else {
            self.cursor_pos
        }
    }

    /// Net of the via or trace under `pos`, ignoring `exclude`.
    fn net_signal_at(ctx: &BoardEditorContext, pos: Point, exclude: Option<Uuid>) -> Option<Uuid> {
        let board = ctx.project().board();
        board
            .items_at(&pos, ctx.hit_tolerance())
            .into_iter()
            .filter(|item| Some(item.uuid) != exclude)
            .find_map(|item| match item.kind {
                ItemKind::Via => board.item::<BoardVia>(item.uuid).map(|v| v.net_signal),
                ItemKind::NetLine => board.item::<BoardNetLine>(item.uuid).map(|l| l.net_signal),
                _ => None,
            })
            .flatten()
    }

    /// Whether `pos` is the position of a via or the end of another trace.
    fn is_anchor(ctx: &BoardEditorContext, pos: Point, exclude: Uuid) -> bool {
        let board = ctx.project().board();
        board.vias().iter().any(|v| v.position == pos)
            || board
                .net_lines()
                .iter()
                .any(|l| l.uuid != exclude && (l.start == pos || l.end == pos))
    }

    fn start_positioning(
        &mut self,
        ctx: &mut BoardEditorContext,
        pos: Point,
        net_signal: Option<Uuid>,
    ) -> Result<()> {
        let line = BoardNetLine::new(net_signal, self.layer, self.width, pos, pos);
        self.current = Some(Placement::start(ctx, GROUP_TEXT, line)?);
        debug!("Started trace at {}", pos);
        Ok(())
    }

    fn add_next_point(&mut self, ctx: &mut BoardEditorContext) -> Result<()> {
        let Some(placement) = self.current.take() else {
            return Ok(());
        };
        let line = placement.item(ctx)?;
        let (start, end, net_signal, uuid) = (line.start, line.end, line.net_signal, line.uuid);
        if start == end {
            return placement.abort(ctx);
        }
        let finished = Self::is_anchor(ctx, end, uuid);
        placement.finish(ctx)?;
        if finished {
            debug!("Trace ends on an existing anchor at {}", end);
            return Ok(());
        }
        self.start_positioning(ctx, end, net_signal)
    }

    fn update_end(&mut self, ctx: &mut BoardEditorContext) -> Result<bool> {
        let target = self.target_pos(ctx);
        let Some(placement) = self.current.as_mut() else {
            return Ok(false);
        };
        placement.edit_mut()?.set_end(target, true, ctx.project_mut())?;
        Ok(true)
    }

    fn abort_positioning(&mut self, ctx: &mut BoardEditorContext) -> bool {
        match self.current.take().map(|p| p.abort(ctx)) {
            Some(Err(e)) => {
                ctx.report_error("Failed to abort trace", &e);
                false
            }
            _ => true,
        }
    }

    fn set_width(&mut self, ctx: &mut BoardEditorContext, width: PositiveLength) {
        self.width = width;
        if let Some(placement) = self.current.as_mut() {
            let result = placement
                .edit_mut()
                .and_then(|edit| edit.set_width(width, true, ctx.project_mut()));
            if let Err(err) = result {
                ctx.report_error("Failed to change trace width", &err);
            }
        }
    }

    fn handle_update(&mut self, ctx: &mut BoardEditorContext, result: Result<bool>) -> bool {
        match result {
            Ok(handled) => handled,
            Err(err) => {
                ctx.report_error("Failed to draw trace", &err);
                self.abort_positioning(ctx);
                false
            }
        }
    }
}

impl BoardEditorState for DrawTraceState {
    fn kind(&self) -> StateKind {
        StateKind::DrawTrace
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::DrawTrace {
            layer: self.layer,
            width: self.width,
        }
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        Features::ABORT | Features::LINE_WIDTH
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        debug_assert!(self.current.is_none());
        self.snap_active = true;
        ctx.make_layer_visible(self.layer);
        ctx.set_cursor(Some(CursorShape::Cross));
        true
    }

    fn exit(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if !self.abort_positioning(ctx) {
            return false;
        }
        ctx.set_cursor(None);
        true
    }

    fn process_abort_command(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.abort_positioning(ctx);
        true
    }

    fn process_key_pressed(&mut self, ctx: &mut BoardEditorContext, e: &KeyEvent) -> bool {
        if e.key != Key::Shift || self.current.is_none() {
            return false;
        }
        self.snap_active = false;
        let result = self.update_end(ctx);
        self.handle_update(ctx, result);
        true
    }

    fn process_key_released(&mut self, ctx: &mut BoardEditorContext, e: &KeyEvent) -> bool {
        if e.key != Key::Shift || self.current.is_none() {
            return false;
        }
        self.snap_active = true;
        let result = self.update_end(ctx);
        self.handle_update(ctx, result);
        true
    }

    fn process_mouse_moved(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        self.cursor_pos = e.scene_pos;
        let result = self.update_end(ctx);
        self.handle_update(ctx, result)
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let result = if self.current.is_some() {
            self.cursor_pos = e.scene_pos;
            self.update_end(ctx).and_then(|_| self.add_next_point(ctx))
        } else {
            self.cursor_pos = e.scene_pos;
            let pos = self.target_pos(ctx);
            let net_signal = Self::net_signal_at(ctx, pos, None);
            self.start_positioning(ctx, pos, net_signal)
        };
        if let Err(err) = result {
            ctx.report_error("Failed to draw trace", &err);
            self.abort_positioning(ctx);
        }
        true
    }

    fn process_left_double_clicked(
        &mut self,
        ctx: &mut BoardEditorContext,
        e: &SceneMouseEvent,
    ) -> bool {
        self.process_left_pressed(ctx, e)
    }

    fn process_right_released(&mut self, _ctx: &mut BoardEditorContext, _e: &SceneMouseEvent) -> bool {
        // While drawing, a right click must not fall through to the FSM,
        // which would leave the tool.
        self.current.is_some()
    }

    fn process_change_line_width(&mut self, ctx: &mut BoardEditorContext, step: i32) -> bool {
        if step == 0 {
            return false;
        }
        let nm = (self.width.to_nm() + i64::from(step) * LINE_WIDTH_STEP_NM).max(LINE_WIDTH_STEP_NM);
        match PositiveLength::new(nm) {
            Ok(width) => self.set_width(ctx, width),
            Err(e) => ctx.report_error("Failed to change trace width", &e),
        }
        true
    }

    fn process_tool_setting(&mut self, ctx: &mut BoardEditorContext, setting: &ToolSetting) -> bool {
        match setting {
            ToolSetting::Layer(layer) => {
                if !layer.is_copper() {
                    let err = Error::invalid_value(
                        "layer",
                        format!("traces must be on a copper layer, not {}", layer),
                    );
                    ctx.report_error("Failed to change trace layer", &err);
                    return true;
                }
                self.layer = *layer;
                let layer = *layer;
                ctx.make_layer_visible(layer);
                if let Some(placement) = self.current.as_mut() {
                    let result = placement
                        .edit_mut()
                        .and_then(|edit| edit.set_layer(layer, true, ctx.project_mut()));
                    if let Err(err) = result {
                        ctx.report_error("Failed to change trace layer", &err);
                    }
                }
            }
            ToolSetting::TraceWidth(width) => self.set_width(ctx, *width),
            _ => return false,
        }
        true
    }
}

//! Polygon drawing tool
//!
//! The first click adds a polygon with two vertices at the click position.
//! Each further click commits the path as previewed by the last mouse move
//! as its own undo step, then appends a vertex at the click position. A
//! click on the previous vertex aborts the dangling segment, and a polygon
//! whose last vertex meets its first one is finished automatically.

use super::placement::Placement;
use super::{BoardEditorState, StateKind, LINE_WIDTH_STEP_NM};
use crate::adapter::{CursorShape, Features, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use pcbkit_core::{allowed_geometry_layers, Angle, Error, Layer, Path, Point, Result, UnsignedLength};
use pcbkit_model::cmd::CmdBoardPolygonEdit;
use pcbkit_model::{BoardPolygon, Project};
use pcbkit_settings::PolygonDefaults;
use tracing::debug;

const GROUP_TEXT: &str = "Draw board polygon";

pub struct DrawPolygonState {
    layer: Layer,
    line_width: UnsignedLength,
    filled: bool,
    last_vertex_pos: Point,
    current: Option<Placement<BoardPolygon>>,
}

impl DrawPolygonState {
    pub fn new(defaults: &PolygonDefaults) -> Self {
        Self {
            layer: defaults.layer,
            line_width: defaults.line_width,
            filled: defaults.filled,
            last_vertex_pos: Point::default(),
            current: None,
        }
    }

    fn start(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<()> {
        let polygon = BoardPolygon::new(
            self.layer,
            self.line_width,
            self.filled,
            Path::from_points(&[pos, pos]),
        );
        self.current = Some(Placement::start(ctx, GROUP_TEXT, polygon)?);
        self.last_vertex_pos = pos;
        debug!("Started polygon at {}", pos);
        Ok(())
    }

    /// Fixes the current segment. Returns `false` once the polygon is done.
    fn add_segment(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<bool> {
        if pos == self.last_vertex_pos {
            self.abort(ctx)?;
            return Ok(false);
        }
        let Some(placement) = self.current.as_mut() else {
            return Ok(false);
        };
        placement.checkpoint(ctx)?;
        let mut path = placement.item(ctx)?.path.clone();
        if path.is_closed() {
            self.abort(ctx)?;
            return Ok(false);
        }
        path.add_vertex(pos, Angle::deg0());
        let closed = path.is_closed();
        placement.edit_mut()?.set_path(path, true, ctx.project_mut())?;
        self.last_vertex_pos = pos;
        if closed {
            if let Some(placement) = self.current.take() {
                placement.finish(ctx)?;
            }
            debug!("Polygon closed");
            return Ok(false);
        }
        Ok(true)
    }

    fn update_last_vertex(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<bool> {
        let Some(placement) = self.current.as_mut() else {
            return Ok(false);
        };
        let mut path = placement.item(ctx)?.path.clone();
        if let Some(last) = path.last_mut() {
            last.pos = pos;
        }
        placement.edit_mut()?.set_path(path, true, ctx.project_mut())?;
        Ok(true)
    }

    fn abort(&mut self, ctx: &mut BoardEditorContext) -> Result<()> {
        match self.current.take() {
            Some(placement) => placement.abort(ctx),
            None => Ok(()),
        }
    }

    fn abort_reporting(&mut self, ctx: &mut BoardEditorContext) -> bool {
        match self.abort(ctx) {
            Ok(()) => true,
            Err(e) => {
                ctx.report_error("Failed to abort polygon", &e);
                false
            }
        }
    }

    fn click(&mut self, ctx: &mut BoardEditorContext, pos: Point) {
        let result = if self.current.is_some() {
            self.add_segment(ctx, pos).map(|_| ())
        } else {
            self.start(ctx, pos)
        };
        if let Err(e) = result {
            ctx.report_error("Failed to draw polygon", &e);
            self.abort_reporting(ctx);
        }
    }

    fn apply_to_current(
        &mut self,
        ctx: &mut BoardEditorContext,
        f: impl FnOnce(&mut CmdBoardPolygonEdit, &mut Project) -> Result<()>,
    ) {
        if let Some(placement) = self.current.as_mut() {
            let result = placement.edit_mut().and_then(|edit| f(edit, ctx.project_mut()));
            if let Err(err) = result {
                ctx.report_error("Failed to change polygon", &err);
            }
        }
    }

    fn set_line_width(&mut self, ctx: &mut BoardEditorContext, width: UnsignedLength) {
        self.line_width = width;
        self.apply_to_current(ctx, |edit, doc| edit.set_line_width(width, true, doc));
    }
}

impl BoardEditorState for DrawPolygonState {
    fn kind(&self) -> StateKind {
        StateKind::DrawPolygon
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::DrawPolygon {
            layer: self.layer,
            line_width: self.line_width,
            filled: self.filled,
        }
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        Features::ABORT | Features::LINE_WIDTH
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        debug_assert!(self.current.is_none());
        ctx.make_layer_visible(self.layer);
        ctx.set_cursor(Some(CursorShape::Cross));
        true
    }

    fn exit(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if !self.abort_reporting(ctx) {
            return false;
        }
        ctx.set_cursor(None);
        true
    }

    fn process_abort_command(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.abort_reporting(ctx);
        true
    }

    fn process_mouse_moved(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let pos = ctx.map_to_grid(e.scene_pos);
        match self.update_last_vertex(ctx, pos) {
            Ok(handled) => handled,
            Err(err) => {
                ctx.report_error("Failed to draw polygon", &err);
                self.abort_reporting(ctx);
                false
            }
        }
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let pos = ctx.map_to_grid(e.scene_pos);
        self.click(ctx, pos);
        true
    }

    fn process_left_double_clicked(
        &mut self,
        ctx: &mut BoardEditorContext,
        e: &SceneMouseEvent,
    ) -> bool {
        self.process_left_pressed(ctx, e)
    }

    fn process_change_line_width(&mut self, ctx: &mut BoardEditorContext, step: i32) -> bool {
        if step == 0 {
            return false;
        }
        let nm = (self.line_width.to_nm() + i64::from(step) * LINE_WIDTH_STEP_NM).max(0);
        match UnsignedLength::new(nm) {
            Ok(width) => self.set_line_width(ctx, width),
            Err(e) => ctx.report_error("Failed to change line width", &e),
        }
        true
    }

    fn process_tool_setting(&mut self, ctx: &mut BoardEditorContext, setting: &ToolSetting) -> bool {
        match setting {
            ToolSetting::Layer(layer) => {
                if !allowed_geometry_layers().contains(layer) {
                    let err = Error::invalid_value(
                        "layer",
                        format!("polygons cannot be drawn on {}", layer),
                    );
                    ctx.report_error("Failed to change polygon layer", &err);
                    return true;
                }
                self.layer = *layer;
                let layer = *layer;
                ctx.make_layer_visible(layer);
                self.apply_to_current(ctx, |edit, doc| edit.set_layer(layer, true, doc));
            }
            ToolSetting::LineWidth(width) => self.set_line_width(ctx, *width),
            ToolSetting::Filled(filled) => {
                self.filled = *filled;
                let filled = *filled;
                self.apply_to_current(ctx, |edit, doc| edit.set_filled(filled, true, doc));
            }
            _ => return false,
        }
        true
    }
}

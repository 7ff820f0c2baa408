use super::placement::Placement;
use super::{BoardEditorState, StateKind};
use crate::adapter::{CursorShape, Features, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use pcbkit_core::{
    allowed_geometry_layers, Angle, Error, Layer, Orientation, Point, PositiveLength, Result,
    UnsignedLength,
};
use pcbkit_model::cmd::CmdBoardStrokeTextEdit;
use pcbkit_model::{BoardStrokeText, Project, TextAlign};
use pcbkit_settings::StrokeTextDefaults;

const GROUP_TEXT: &str = "Add text to board";

/// Places stroke texts. Rotation, alignment and mirroring of the last text
/// carry over to the next one.
pub struct AddStrokeTextState {
    layer: Layer,
    text: String,
    height: PositiveLength,
    stroke_width: UnsignedLength,
    rotation: Angle,
    align: TextAlign,
    mirrored: bool,
    current: Option<Placement<BoardStrokeText>>,
}

impl AddStrokeTextState {
    pub fn new(defaults: &StrokeTextDefaults) -> Self {
        Self {
            layer: defaults.layer,
            text: defaults.text.clone(),
            height: defaults.height,
            stroke_width: defaults.stroke_width,
            rotation: Angle::deg0(),
            align: TextAlign::default(),
            mirrored: defaults.layer.is_bottom(),
            current: None,
        }
    }

    fn add_text(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> bool {
        let mut text = BoardStrokeText::new(
            self.layer,
            self.text.clone(),
            pos,
            self.height,
            self.stroke_width,
        );
        text.rotation = self.rotation;
        text.align = self.align;
        text.mirrored = self.mirrored;
        match Placement::start(ctx, GROUP_TEXT, text) {
            Ok(placement) => {
                self.current = Some(placement);
                true
            }
            Err(e) => {
                ctx.report_error("Failed to add text", &e);
                false
            }
        }
    }

    fn rotate_text(&mut self, ctx: &mut BoardEditorContext, angle: Angle) -> Result<bool> {
        let Some(placement) = self.current.as_mut() else {
            return Ok(false);
        };
        let center = placement.item(ctx)?.position;
        placement.edit_mut()?.rotate(angle, center, true, ctx.project_mut())?;
        self.rotation = placement.item(ctx)?.rotation;
        Ok(true)
    }

    fn flip_text(&mut self, ctx: &mut BoardEditorContext, orientation: Orientation) -> Result<bool> {
        let Some(placement) = self.current.as_mut() else {
            return Ok(false);
        };
        let center = placement.item(ctx)?.position;
        placement.edit_mut()?.mirror(orientation, center, true, ctx.project_mut())?;
        let text = placement.item(ctx)?;
        self.rotation = text.rotation;
        self.align = text.align;
        self.layer = text.layer;
        self.mirrored = text.mirrored;
        Ok(true)
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
                ctx.report_error("Failed to abort text placement", &e);
                false
            }
            _ => true,
        }
    }

    fn apply_to_current(
        &mut self,
        ctx: &mut BoardEditorContext,
        f: impl FnOnce(&mut CmdBoardStrokeTextEdit, &mut Project) -> Result<()>,
    ) {
        if let Some(placement) = self.current.as_mut() {
            let result = placement.edit_mut().and_then(|edit| f(edit, ctx.project_mut()));
            if let Err(err) = result {
                ctx.report_error("Failed to change text", &err);
            }
        }
    }

    fn handled(ctx: &mut BoardEditorContext, title: &str, result: Result<bool>) -> bool {
        result.unwrap_or_else(|e| {
            ctx.report_error(title, &e);
            false
        })
    }
}

impl BoardEditorState for AddStrokeTextState {
    fn kind(&self) -> StateKind {
        StateKind::AddStrokeText
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::AddStrokeText {
            layer: self.layer,
            text: self.text.clone(),
            height: self.height,
            mirrored: self.mirrored,
        }
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        Features::ABORT | Features::ROTATE | Features::MIRROR
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        debug_assert!(self.current.is_none());
        ctx.make_layer_visible(self.layer);
        let pos = ctx.cursor_grid_pos();
        if !self.add_text(ctx, pos) {
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

    fn process_rotate(&mut self, ctx: &mut BoardEditorContext, angle: Angle) -> bool {
        let result = self.rotate_text(ctx, angle);
        Self::handled(ctx, "Failed to rotate text", result)
    }

    fn process_flip(&mut self, ctx: &mut BoardEditorContext, orientation: Orientation) -> bool {
        let result = self.flip_text(ctx, orientation);
        Self::handled(ctx, "Failed to mirror text", result)
    }

    fn process_mouse_moved(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let pos = ctx.map_to_grid(e.scene_pos);
        let Some(placement) = self.current.as_mut() else {
            return false;
        };
        let result = placement
            .edit_mut()
            .and_then(|edit| edit.set_position(pos, true, ctx.project_mut()));
        if let Err(err) = result {
            ctx.report_error("Failed to move text", &err);
            self.abort(ctx);
            return false;
        }
        true
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let pos = ctx.map_to_grid(e.scene_pos);
        if let Err(err) = self.fix_position(ctx, pos) {
            ctx.report_error("Failed to add text", &err);
        }
        self.add_text(ctx, pos);
        true
    }

    fn process_left_double_clicked(
        &mut self,
        ctx: &mut BoardEditorContext,
        e: &SceneMouseEvent,
    ) -> bool {
        self.process_left_pressed(ctx, e)
    }

    fn process_right_released(&mut self, ctx: &mut BoardEditorContext, _e: &SceneMouseEvent) -> bool {
        let result = self.rotate_text(ctx, Angle::deg90());
        Self::handled(ctx, "Failed to rotate text", result)
    }

    fn process_tool_setting(&mut self, ctx: &mut BoardEditorContext, setting: &ToolSetting) -> bool {
        match setting {
            ToolSetting::Layer(layer) => {
                if !allowed_geometry_layers().contains(layer) {
                    let err = Error::invalid_value(
                        "layer",
                        format!("texts cannot be placed on {}", layer),
                    );
                    ctx.report_error("Failed to change text layer", &err);
                    return true;
                }
                self.layer = *layer;
                let layer = *layer;
                ctx.make_layer_visible(layer);
                self.apply_to_current(ctx, |edit, doc| edit.set_layer(layer, true, doc));
            }
            ToolSetting::Text(text) => {
                self.text = text.trim().to_string();
                let text = self.text.clone();
                self.apply_to_current(ctx, |edit, doc| edit.set_text(text, true, doc));
            }
            ToolSetting::Height(height) => {
                self.height = *height;
                let height = *height;
                self.apply_to_current(ctx, |edit, doc| edit.set_height(height, true, doc));
            }
            ToolSetting::Mirrored(mirrored) => {
                self.mirrored = *mirrored;
                let mirrored = *mirrored;
                self.apply_to_current(ctx, |edit, doc| edit.set_mirrored(mirrored, true, doc));
            }
            _ => return false,
        }
        true
    }
}

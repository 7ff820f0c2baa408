use super::placement::Placement;
use super::{BoardEditorState, StateKind};
use crate::adapter::{CursorShape, Features, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use pcbkit_core::{Angle, Error, Layer, Path, Point, Result};
use pcbkit_model::{BoardZone, ZoneRules};
use pcbkit_settings::ZoneDefaults;
use std::collections::BTreeSet;
use tracing::debug;

const GROUP_TEXT: &str = "Draw board zone";

/// Draws keepout zones; undo granularity matches the plane tool.
pub struct DrawZoneState {
    layers: BTreeSet<Layer>,
    rules: ZoneRules,
    last_vertex_pos: Point,
    current: Option<Placement<BoardZone>>,
}

impl DrawZoneState {
    pub fn new(defaults: &ZoneDefaults) -> Self {
        Self {
            layers: defaults.layers.clone(),
            rules: ZoneRules::default(),
            last_vertex_pos: Point::default(),
            current: None,
        }
    }

    fn start(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<()> {
        let zone = BoardZone::new(self.layers.clone(), self.rules, Path::from_points(&[pos, pos]));
        self.current = Some(Placement::start(ctx, GROUP_TEXT, zone)?);
        self.last_vertex_pos = pos;
        debug!("Started zone at {}", pos);
        Ok(())
    }

    fn add_segment(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<()> {
        if pos == self.last_vertex_pos {
            return self.abort(ctx);
        }
        let Some(placement) = self.current.as_mut() else {
            return Ok(());
        };
        if placement.item(ctx)?.outline.len() > 2 {
            placement.checkpoint(ctx)?;
        }
        let mut outline = placement.item(ctx)?.outline.clone();
        outline.add_vertex(pos, Angle::deg0());
        placement.edit_mut()?.set_outline(outline, true, ctx.project_mut())?;
        self.last_vertex_pos = pos;
        Ok(())
    }

    fn update_last_vertex(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<bool> {
        let Some(placement) = self.current.as_mut() else {
            return Ok(false);
        };
        let mut outline = placement.item(ctx)?.outline.clone();
        if let Some(last) = outline.last_mut() {
            last.pos = pos;
        }
        placement.edit_mut()?.set_outline(outline, true, ctx.project_mut())?;
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
                ctx.report_error("Failed to abort zone", &e);
                false
            }
        }
    }
}

impl BoardEditorState for DrawZoneState {
    fn kind(&self) -> StateKind {
        StateKind::DrawZone
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::DrawZone {
            layers: self.layers.clone(),
            rules: self.rules,
        }
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        Features::ABORT
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        debug_assert!(self.current.is_none());
        for layer in self.layers.clone() {
            ctx.make_layer_visible(layer);
        }
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
                ctx.report_error("Failed to draw zone", &err);
                self.abort_reporting(ctx);
                false
            }
        }
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let pos = ctx.map_to_grid(e.scene_pos);
        let result = if self.current.is_some() {
            self.add_segment(ctx, pos)
        } else {
            self.start(ctx, pos)
        };
        if let Err(err) = result {
            ctx.report_error("Failed to draw zone", &err);
            self.abort_reporting(ctx);
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

    fn process_tool_setting(&mut self, ctx: &mut BoardEditorContext, setting: &ToolSetting) -> bool {
        let result = match setting {
            ToolSetting::ZoneLayers(layers) => {
                if layers.is_empty() || !layers.iter().all(Layer::is_copper) {
                    let err = Error::invalid_value(
                        "layers",
                        "zones need at least one layer and only copper layers",
                    );
                    ctx.report_error("Failed to change zone layers", &err);
                    return true;
                }
                self.layers = layers.clone();
                let layers = layers.clone();
                self.current.as_mut().map(|placement| {
                    placement
                        .edit_mut()
                        .and_then(|edit| edit.set_layers(layers, true, ctx.project_mut()))
                })
            }
            ToolSetting::ZoneRules(rules) => {
                self.rules = *rules;
                let rules = *rules;
                self.current.as_mut().map(|placement| {
                    placement
                        .edit_mut()
                        .and_then(|edit| edit.set_rules(rules, true, ctx.project_mut()))
                })
            }
            _ => return false,
        };
        if let Some(Err(err)) = result {
            ctx.report_error("Failed to change zone", &err);
        }
        true
    }
}

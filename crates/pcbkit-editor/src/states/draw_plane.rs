use super::placement::Placement;
use super::{BoardEditorState, StateKind};
use crate::adapter::{CursorShape, Features, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use pcbkit_core::{Angle, Error, Layer, Path, Point, Result};
use pcbkit_model::BoardPlane;
use pcbkit_settings::PlaneDefaults;
use tracing::{debug, warn};
use uuid::Uuid;

const GROUP_TEXT: &str = "Draw board plane";

/// Draws copper planes.
///
/// The first two edges share one undo step; from the third vertex on every
/// click commits its own step.
pub struct DrawPlaneState {
    layer: Layer,
    net_signal: Option<Uuid>,
    last_vertex_pos: Point,
    current: Option<Placement<BoardPlane>>,
}

impl DrawPlaneState {
    pub fn new(defaults: &PlaneDefaults) -> Self {
        Self {
            layer: defaults.layer,
            net_signal: None,
            last_vertex_pos: Point::default(),
            current: None,
        }
    }

    fn start(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<()> {
        let plane = BoardPlane::new(self.layer, self.net_signal, Path::from_points(&[pos, pos]));
        self.current = Some(Placement::start(ctx, GROUP_TEXT, plane)?);
        self.last_vertex_pos = pos;
        debug!("Started plane at {}", pos);
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
                ctx.report_error("Failed to abort plane", &e);
                false
            }
        }
    }
}

impl BoardEditorState for DrawPlaneState {
    fn kind(&self) -> StateKind {
        StateKind::DrawPlane
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::DrawPlane {
            layer: self.layer,
            net_signal: self.net_signal,
        }
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        Features::ABORT
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        debug_assert!(self.current.is_none());
        let project = ctx.project();
        let known = self
            .net_signal
            .is_some_and(|uuid| project.circuit().net_signal(uuid).is_some());
        if !known {
            self.net_signal = project.circuit().net_signal_with_most_elements(project.board());
        }
        if self.net_signal.is_none() {
            warn!("Cannot draw a plane: the circuit has no net signals");
            let err = Error::other("Planes need a net signal, but the circuit has none");
            ctx.report_error("Draw plane", &err);
            return false;
        }
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
                ctx.report_error("Failed to draw plane", &err);
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
            ctx.report_error("Failed to draw plane", &err);
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
            ToolSetting::Layer(layer) => {
                if !layer.is_copper() {
                    let err = Error::invalid_value(
                        "layer",
                        format!("planes must be on a copper layer, not {}", layer),
                    );
                    ctx.report_error("Failed to change plane layer", &err);
                    return true;
                }
                self.layer = *layer;
                ctx.make_layer_visible(*layer);
                let layer = *layer;
                self.current.as_mut().map(|placement| {
                    placement
                        .edit_mut()
                        .and_then(|edit| edit.set_layer(layer, true, ctx.project_mut()))
                })
            }
            ToolSetting::NetSignal(net) => {
                self.net_signal = match net {
                    Some(net) => Some(*net),
                    None => {
                        let project = ctx.project();
                        project.circuit().net_signal_with_most_elements(project.board())
                    }
                };
                let net = self.net_signal;
                self.current.as_mut().map(|placement| {
                    placement
                        .edit_mut()
                        .and_then(|edit| edit.set_net_signal(net, true, ctx.project_mut()))
                })
            }
            _ => return false,
        };
        if let Some(Err(err)) = result {
            ctx.report_error("Failed to change plane", &err);
        }
        true
    }
}

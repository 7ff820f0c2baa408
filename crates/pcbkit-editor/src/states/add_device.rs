use super::placement::Placement;
use super::{BoardEditorState, StateKind};
use crate::adapter::{CursorShape, Features, SceneMouseEvent, ToolInfo};
use crate::context::BoardEditorContext;
use pcbkit_core::{Angle, Orientation, Point, Result};
use pcbkit_model::cmd::CmdBoardDeviceEdit;
use pcbkit_model::BoardDevice;
use tracing::{debug, info};
use uuid::Uuid;

const GROUP_TEXT: &str = "Add device to board";

/// Places exactly one device of a component, then asks to leave.
///
/// Entering the state does nothing by itself; the FSM follows up with
/// [`BoardEditorState::process_add_device`].
#[derive(Default)]
pub struct AddDeviceState {
    component: Option<Uuid>,
    current: Option<Placement<BoardDevice>>,
}

impl AddDeviceState {
    pub fn new() -> Self {
        Self::default()
    }

    fn start(
        &mut self,
        ctx: &mut BoardEditorContext,
        component: Uuid,
        device: Uuid,
        footprint: Uuid,
    ) -> Result<()> {
        if let Some(previous) = self.current.take() {
            previous.abort(ctx)?;
        }
        let pos = ctx.cursor_grid_pos();
        let placement = Placement::start(
            ctx,
            GROUP_TEXT,
            BoardDevice::new(component, device, footprint, pos),
        )?;
        debug!("Placing device of component {} at {}", component, pos);
        self.component = Some(component);
        self.current = Some(placement);
        Ok(())
    }

    fn transform(
        &mut self,
        ctx: &mut BoardEditorContext,
        f: impl FnOnce(&mut CmdBoardDeviceEdit, Point, &mut BoardEditorContext) -> Result<()>,
    ) -> bool {
        let Some(placement) = self.current.as_mut() else {
            return false;
        };
        let result = match placement.item(ctx) {
            Ok(device) => {
                let center = device.position;
                placement.edit_mut().and_then(|edit| f(edit, center, ctx))
            }
            Err(e) => Err(e),
        };
        if let Err(err) = result {
            ctx.report_error("Failed to transform device", &err);
        }
        true
    }

    fn abort(&mut self, ctx: &mut BoardEditorContext) -> bool {
        match self.current.take().map(|p| p.abort(ctx)) {
            Some(Err(e)) => {
                ctx.report_error("Failed to abort device placement", &e);
                false
            }
            _ => true,
        }
    }
}

impl BoardEditorState for AddDeviceState {
    fn kind(&self) -> StateKind {
        StateKind::AddDevice
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::AddDevice {
            component: self.component,
        }
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        Features::ABORT | Features::ROTATE | Features::MIRROR
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        ctx.set_cursor(Some(CursorShape::Cross));
        true
    }

    fn exit(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if !self.abort(ctx) {
            return false;
        }
        self.component = None;
        ctx.set_cursor(None);
        true
    }

    fn process_add_device(
        &mut self,
        ctx: &mut BoardEditorContext,
        component: Uuid,
        device: Uuid,
        footprint: Uuid,
    ) -> bool {
        match self.start(ctx, component, device, footprint) {
            Ok(()) => true,
            Err(e) => {
                ctx.report_error("Failed to add device", &e);
                false
            }
        }
    }

    fn process_rotate(&mut self, ctx: &mut BoardEditorContext, angle: Angle) -> bool {
        self.transform(ctx, |edit, center, ctx| {
            edit.rotate(angle, center, true, ctx.project_mut())
        })
    }

    fn process_flip(&mut self, ctx: &mut BoardEditorContext, orientation: Orientation) -> bool {
        self.transform(ctx, |edit, center, ctx| {
            edit.mirror(orientation, center, true, ctx.project_mut())
        })
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
            ctx.report_error("Failed to move device", &err);
            self.abort(ctx);
            return false;
        }
        true
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let Some(mut placement) = self.current.take() else {
            return false;
        };
        let pos = ctx.map_to_grid(e.scene_pos);
        let result = placement
            .edit_mut()
            .and_then(|edit| edit.set_position(pos, false, ctx.project_mut()));
        let result = match result {
            Ok(()) => placement.finish(ctx),
            Err(e) => placement.abort(ctx).and(Err(e)),
        };
        match result {
            Ok(()) => {
                info!("Device placed at {}", pos);
                ctx.request_leaving_state();
            }
            Err(err) => ctx.report_error("Failed to add device", &err),
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

    fn process_right_released(&mut self, ctx: &mut BoardEditorContext, _e: &SceneMouseEvent) -> bool {
        self.process_rotate(ctx, Angle::deg90())
    }
}

use super::placement::Placement;
use super::{BoardEditorState, StateKind};
use crate::adapter::{CursorShape, Features, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use pcbkit_core::{Point, PositiveLength, Result};
use pcbkit_model::cmd::CmdBoardViaEdit;
use pcbkit_model::{BoardNetLine, BoardPlane, BoardVia, ItemKind, Project};
use tracing::debug;
use uuid::Uuid;

const GROUP_TEXT: &str = "Add via to board";

/// Places vias. In automatic mode the via takes the net of whatever it is
/// dropped on, falling back to the net with the most elements.
pub struct AddViaState {
    size: PositiveLength,
    drill: PositiveLength,
    auto_net_signal: bool,
    net_signal: Option<Uuid>,
    current: Option<Placement<BoardVia>>,
}

impl AddViaState {
    pub fn new(size: PositiveLength, drill: PositiveLength) -> Self {
        Self {
            size,
            drill,
            auto_net_signal: true,
            net_signal: None,
            current: None,
        }
    }

    fn add_via(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> bool {
        if self.auto_net_signal {
            self.update_closest_net_signal(ctx, pos);
        }
        let via = BoardVia::new(pos, self.size, self.drill, self.net_signal);
        match Placement::start(ctx, GROUP_TEXT, via) {
            Ok(placement) => {
                debug!("Placing via at {}", pos);
                self.current = Some(placement);
                true
            }
            Err(e) => {
                ctx.report_error("Failed to add via", &e);
                false
            }
        }
    }

    /// Picks the net of the via, trace or plane under `pos`.
    fn update_closest_net_signal(&mut self, ctx: &BoardEditorContext, pos: Point) {
        let placing = self.current.as_ref().map(|p| p.uuid());
        let board = ctx.project().board();
        let under_cursor = board
            .items_at(&pos, ctx.hit_tolerance())
            .into_iter()
            .filter(|item| Some(item.uuid) != placing)
            .find_map(|item| match item.kind {
                ItemKind::Via => board.item::<BoardVia>(item.uuid).map(|v| v.net_signal),
                ItemKind::NetLine => board.item::<BoardNetLine>(item.uuid).map(|l| l.net_signal),
                ItemKind::Plane => board.item::<BoardPlane>(item.uuid).map(|p| p.net_signal),
                _ => None,
            })
            .flatten();
        if under_cursor.is_some() {
            self.net_signal = under_cursor;
        } else if self.net_signal.is_none() {
            self.net_signal = ctx.project().circuit().net_signal_with_most_elements(board);
        }
    }

    fn update_position(&mut self, ctx: &mut BoardEditorContext, pos: Point) -> Result<bool> {
        if self.current.is_none() {
            return Ok(false);
        }
        if self.auto_net_signal {
            self.update_closest_net_signal(ctx, pos);
        }
        let net_signal = self.net_signal;
        if let Some(placement) = self.current.as_mut() {
            let edit = placement.edit_mut()?;
            edit.set_position(pos, true, ctx.project_mut())?;
            edit.set_net_signal(net_signal, true, ctx.project_mut())?;
        }
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
                ctx.report_error("Failed to abort via placement", &e);
                false
            }
            _ => true,
        }
    }

    fn apply_to_current(
        &mut self,
        ctx: &mut BoardEditorContext,
        f: impl FnOnce(&mut CmdBoardViaEdit, &mut Project) -> Result<()>,
    ) {
        if let Some(placement) = self.current.as_mut() {
            let result = placement.edit_mut().and_then(|edit| f(edit, ctx.project_mut()));
            if let Err(err) = result {
                ctx.report_error("Failed to change via", &err);
            }
        }
    }
}

impl BoardEditorState for AddViaState {
    fn kind(&self) -> StateKind {
        StateKind::AddVia
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::AddVia {
            size: self.size,
            drill: self.drill,
            net_signal: if self.auto_net_signal {
                None
            } else {
                self.net_signal
            },
        }
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        Features::ABORT
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        debug_assert!(self.current.is_none());
        let pos = ctx.cursor_grid_pos();
        if !self.add_via(ctx, pos) {
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
                ctx.report_error("Failed to move via", &err);
                self.abort(ctx);
                false
            }
        }
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        let pos = ctx.map_to_grid(e.scene_pos);
        if let Err(err) = self.fix_position(ctx, pos) {
            ctx.report_error("Failed to add via", &err);
        }
        self.add_via(ctx, pos);
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
        match setting {
            ToolSetting::ViaSize(size) => {
                self.size = *size;
                let size = *size;
                self.apply_to_current(ctx, |edit, doc| edit.set_size(size, true, doc));
            }
            ToolSetting::ViaDrill(drill) => {
                self.drill = *drill;
                let drill = *drill;
                self.apply_to_current(ctx, |edit, doc| edit.set_drill(drill, true, doc));
            }
            ToolSetting::NetSignal(net) => {
                self.auto_net_signal = net.is_none();
                self.net_signal = *net;
                if self.auto_net_signal {
                    let pos = self
                        .current
                        .as_ref()
                        .and_then(|p| p.item(ctx).ok())
                        .map(|via| via.position);
                    if let Some(pos) = pos {
                        self.update_closest_net_signal(ctx, pos);
                    }
                }
                let net = self.net_signal;
                self.apply_to_current(ctx, |edit, doc| edit.set_net_signal(net, true, doc));
            }
            _ => return false,
        }
        true
    }
}

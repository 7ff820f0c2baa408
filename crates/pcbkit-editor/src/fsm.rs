//! Board editor state machine
//!
//! The FSM owns one instance of every tool and forwards host events to the
//! active one. At most one tool is active at any time; between leaving one
//! tool and entering the next the FSM is `Idle`.

use crate::adapter::{BoardEditorAdapter, Features, KeyEvent, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use crate::states::{
    AddDeviceState, AddHoleState, AddStrokeTextState, AddViaState, BoardEditorState,
    DrawPlaneState, DrawPolygonState, DrawTraceState, DrawZoneState, MeasureState, SelectState,
    StateKind,
};
use pcbkit_core::{Angle, Orientation, Point, Result};
use pcbkit_model::Project;
use pcbkit_settings::EditorConfig;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct BoardEditorFsm {
    ctx: BoardEditorContext,
    states: BTreeMap<StateKind, Box<dyn BoardEditorState>>,
    current: StateKind,
    previous: StateKind,
}

impl BoardEditorFsm {
    /// Builds all tools from `config` and enters the select tool.
    pub fn new(project: Project, adapter: Box<dyn BoardEditorAdapter>, config: EditorConfig) -> Self {
        let tools = &config.tools;
        let all: Vec<Box<dyn BoardEditorState>> = vec![
            Box::new(SelectState::new()),
            Box::new(AddHoleState::new(tools.hole.diameter)),
            Box::new(AddViaState::new(tools.via.size, tools.via.drill)),
            Box::new(AddStrokeTextState::new(&tools.stroke_text)),
            Box::new(AddDeviceState::new()),
            Box::new(DrawPolygonState::new(&tools.polygon)),
            Box::new(DrawPlaneState::new(&tools.plane)),
            Box::new(DrawZoneState::new(&tools.zone)),
            Box::new(DrawTraceState::new(&tools.trace)),
            Box::new(MeasureState::new()),
        ];
        let states = all.into_iter().map(|s| (s.kind(), s)).collect();
        let mut fsm = Self {
            ctx: BoardEditorContext::new(project, adapter, config),
            states,
            current: StateKind::Idle,
            previous: StateKind::Idle,
        };
        if !fsm.set_next_state(StateKind::Select) {
            warn!("Board editor could not enter the select tool");
        }
        fsm
    }

    pub fn current_state(&self) -> StateKind {
        self.current
    }

    /// The tool a right click in the select tool returns to.
    pub fn previous_state(&self) -> StateKind {
        self.previous
    }

    pub fn context(&self) -> &BoardEditorContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut BoardEditorContext {
        &mut self.ctx
    }

    pub fn project(&self) -> &Project {
        self.ctx.project()
    }

    pub fn current_tool_info(&self) -> Option<ToolInfo> {
        self.states.get(&self.current).map(|s| s.tool_info())
    }

    pub fn current_features(&self) -> Features {
        self.states
            .get(&self.current)
            .map(|s| s.features(&self.ctx))
            .unwrap_or_default()
    }

    pub fn process_select(&mut self) -> bool {
        self.set_next_state(StateKind::Select)
    }

    pub fn process_add_hole(&mut self) -> bool {
        self.set_next_state(StateKind::AddHole)
    }

    pub fn process_add_via(&mut self) -> bool {
        self.set_next_state(StateKind::AddVia)
    }

    pub fn process_add_stroke_text(&mut self) -> bool {
        self.set_next_state(StateKind::AddStrokeText)
    }

    /// Enters the device tool and starts placing one device. If the device
    /// cannot be placed, the tool that was active before is restored.
    pub fn process_add_device(&mut self, component: Uuid, device: Uuid, footprint: Uuid) -> bool {
        let old_state = self.current;
        if !self.set_next_state(StateKind::AddDevice) {
            return false;
        }
        let placed = self
            .states
            .get_mut(&self.current)
            .is_some_and(|state| state.process_add_device(&mut self.ctx, component, device, footprint));
        if placed {
            self.after_event();
            return true;
        }
        warn!("Placing device {} failed, returning to {}", device, old_state);
        self.set_next_state(old_state);
        false
    }

    pub fn process_draw_polygon(&mut self) -> bool {
        self.set_next_state(StateKind::DrawPolygon)
    }

    pub fn process_draw_plane(&mut self) -> bool {
        self.set_next_state(StateKind::DrawPlane)
    }

    pub fn process_draw_zone(&mut self) -> bool {
        self.set_next_state(StateKind::DrawZone)
    }

    pub fn process_draw_trace(&mut self) -> bool {
        self.set_next_state(StateKind::DrawTrace)
    }

    pub fn process_measure(&mut self) -> bool {
        self.set_next_state(StateKind::Measure)
    }

    /// Escape: lets the tool cancel its operation, otherwise falls back to
    /// the select tool.
    pub fn process_abort_command(&mut self) -> bool {
        if self.dispatch(|state, ctx| state.process_abort_command(ctx)) {
            return true;
        }
        self.set_next_state(StateKind::Select)
    }

    pub fn process_select_all(&mut self) -> bool {
        self.dispatch(|state, ctx| state.process_select_all(ctx))
    }

    pub fn process_remove(&mut self) -> bool {
        self.dispatch(|state, ctx| state.process_remove(ctx))
    }

    pub fn process_rotate(&mut self, angle: Angle) -> bool {
        self.dispatch(|state, ctx| state.process_rotate(ctx, angle))
    }

    pub fn process_flip(&mut self, orientation: Orientation) -> bool {
        self.dispatch(|state, ctx| state.process_flip(ctx, orientation))
    }

    pub fn process_move(&mut self, delta: Point) -> bool {
        self.dispatch(|state, ctx| state.process_move(ctx, delta))
    }

    pub fn process_snap_to_grid(&mut self) -> bool {
        self.dispatch(|state, ctx| state.process_snap_to_grid(ctx))
    }

    pub fn process_set_locked(&mut self, locked: bool) -> bool {
        self.dispatch(|state, ctx| state.process_set_locked(ctx, locked))
    }

    pub fn process_change_line_width(&mut self, step: i32) -> bool {
        self.dispatch(|state, ctx| state.process_change_line_width(ctx, step))
    }

    pub fn process_tool_setting(&mut self, setting: &ToolSetting) -> bool {
        let handled = self.dispatch(|state, ctx| state.process_tool_setting(ctx, setting));
        if handled {
            if let Some(info) = self.current_tool_info() {
                self.ctx.adapter().tool_enter(&info);
            }
        }
        handled
    }

    pub fn process_key_pressed(&mut self, e: &KeyEvent) -> bool {
        self.dispatch(|state, ctx| state.process_key_pressed(ctx, e))
    }

    pub fn process_key_released(&mut self, e: &KeyEvent) -> bool {
        self.dispatch(|state, ctx| state.process_key_released(ctx, e))
    }

    pub fn process_mouse_moved(&mut self, e: &SceneMouseEvent) -> bool {
        self.dispatch(|state, ctx| state.process_mouse_moved(ctx, e))
    }

    pub fn process_left_pressed(&mut self, e: &SceneMouseEvent) -> bool {
        self.dispatch(|state, ctx| state.process_left_pressed(ctx, e))
    }

    pub fn process_left_released(&mut self, e: &SceneMouseEvent) -> bool {
        self.dispatch(|state, ctx| state.process_left_released(ctx, e))
    }

    pub fn process_left_double_clicked(&mut self, e: &SceneMouseEvent) -> bool {
        self.dispatch(|state, ctx| state.process_left_double_clicked(ctx, e))
    }

    /// An unhandled right click aborts the current tool, or in the select
    /// tool returns to the tool used before.
    pub fn process_right_released(&mut self, e: &SceneMouseEvent) -> bool {
        if self.current == StateKind::Idle {
            return false;
        }
        if self.dispatch(|state, ctx| state.process_right_released(ctx, e)) {
            return true;
        }
        if self.current != StateKind::Select {
            self.process_abort_command()
        } else {
            self.switch_to_previous_state()
        }
    }

    /// Undoes the last committed step. Refused while a tool has a
    /// transaction open.
    pub fn process_undo(&mut self) -> Result<bool> {
        if self.ctx.is_command_group_active() {
            warn!("Undo refused: {} has an operation in progress", self.current);
            return Ok(false);
        }
        if !self.ctx.undo_stack().can_undo() {
            return Ok(false);
        }
        self.ctx.undo()?;
        self.prune_selection();
        self.update_features();
        Ok(true)
    }

    pub fn process_redo(&mut self) -> Result<bool> {
        if self.ctx.is_command_group_active() {
            warn!("Redo refused: {} has an operation in progress", self.current);
            return Ok(false);
        }
        if !self.ctx.undo_stack().can_redo() {
            return Ok(false);
        }
        self.ctx.redo()?;
        self.prune_selection();
        self.update_features();
        Ok(true)
    }

    pub fn switch_to_previous_state(&mut self) -> bool {
        let mut next = self.previous;
        if next == self.current || next == StateKind::Idle {
            next = StateKind::Select;
        }
        self.set_next_state(next)
    }

    pub fn set_next_state(&mut self, state: StateKind) -> bool {
        if state == self.current {
            return true;
        }
        if !self.leave_current_state() {
            return false;
        }
        self.enter_next_state(state)
    }

    /// Exits the active tool. Returns `false` if the tool refused.
    pub fn leave_current_state(&mut self) -> bool {
        if let Some(state) = self.states.get_mut(&self.current) {
            if !state.exit(&mut self.ctx) {
                warn!("{} refused to exit", self.current);
                return false;
            }
            self.ctx.adapter().tool_leave();
        }
        match self.current {
            // Neither is worth returning to with a right click.
            StateKind::Select | StateKind::AddDevice => {}
            other => self.previous = other,
        }
        debug!("Left {}", self.current);
        self.current = StateKind::Idle;
        true
    }

    /// Enters `state` from `Idle`. On refusal the FSM stays idle.
    pub fn enter_next_state(&mut self, state: StateKind) -> bool {
        debug_assert_eq!(self.current, StateKind::Idle);
        if let Some(next) = self.states.get_mut(&state) {
            if !next.entry(&mut self.ctx) {
                warn!("{} refused to enter", state);
                return false;
            }
            let info = next.tool_info();
            self.ctx.adapter().tool_enter(&info);
        }
        self.current = state;
        info!("Board editor tool: {}", state);
        self.update_features();
        true
    }

    /// Forwards an event to the active tool, then handles a queued leave
    /// request and refreshes the host's features.
    fn dispatch(
        &mut self,
        f: impl FnOnce(&mut dyn BoardEditorState, &mut BoardEditorContext) -> bool,
    ) -> bool {
        let Some(state) = self.states.get_mut(&self.current) else {
            return false;
        };
        let handled = f(state.as_mut(), &mut self.ctx);
        self.after_event();
        handled
    }

    fn after_event(&mut self) {
        if self.ctx.take_leave_request() {
            debug!("{} asked to be left", self.current);
            self.process_select();
        }
        self.update_features();
    }

    fn update_features(&mut self) {
        let features = self.current_features();
        self.ctx.adapter().set_features(features);
    }

    /// Drops selected items that no longer exist after undo or redo.
    fn prune_selection(&mut self) {
        let selection = self.ctx.selection();
        let (kept, dropped): (Vec<_>, Vec<_>) = selection
            .into_iter()
            .partition(|item| self.ctx.project().board().contains(*item));
        if dropped.is_empty() {
            return;
        }
        if let Some(scene) = self.ctx.scene_mut() {
            scene.set_selection(kept);
        }
    }
}

impl Drop for BoardEditorFsm {
    fn drop(&mut self) {
        if !self.leave_current_state() {
            warn!("Board editor closed while {} was busy", self.current);
        }
    }
}

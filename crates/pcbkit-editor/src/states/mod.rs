//! Editor states
//!
//! Each tool of the board editor is one [`BoardEditorState`]. Handlers return
//! `true` when they consumed the event. Every handler has a default that
//! ignores the event, so a tool only implements what it reacts to.
//!
//! Failures inside a handler never escape: the state reports them through
//! the adapter, aborts its own transaction and stays active.

mod add_device;
mod add_hole;
mod add_stroke_text;
mod add_via;
mod draw_plane;
mod draw_polygon;
mod draw_trace;
mod draw_zone;
mod measure;
mod placement;
mod select;

pub use add_device::AddDeviceState;
pub use add_hole::AddHoleState;
pub use add_stroke_text::AddStrokeTextState;
pub use add_via::AddViaState;
pub use draw_plane::DrawPlaneState;
pub use draw_polygon::DrawPolygonState;
pub use draw_trace::DrawTraceState;
pub use draw_zone::DrawZoneState;
pub use measure::MeasureState;
pub use select::SelectState;

use crate::adapter::{Features, KeyEvent, SceneMouseEvent, ToolInfo, ToolSetting};
use crate::context::BoardEditorContext;
use pcbkit_core::{Angle, Orientation, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies one state of the board editor FSM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateKind {
    /// No tool is active
    Idle,
    Select,
    AddHole,
    AddVia,
    AddStrokeText,
    AddDevice,
    DrawPolygon,
    DrawPlane,
    DrawZone,
    DrawTrace,
    Measure,
}

impl StateKind {
    /// All tool states; `Idle` is not a tool.
    pub const TOOLS: [StateKind; 10] = [
        StateKind::Select,
        StateKind::AddHole,
        StateKind::AddVia,
        StateKind::AddStrokeText,
        StateKind::AddDevice,
        StateKind::DrawPolygon,
        StateKind::DrawPlane,
        StateKind::DrawZone,
        StateKind::DrawTrace,
        StateKind::Measure,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StateKind::Idle => "Idle",
            StateKind::Select => "Select",
            StateKind::AddHole => "Add hole",
            StateKind::AddVia => "Add via",
            StateKind::AddStrokeText => "Add stroke text",
            StateKind::AddDevice => "Add device",
            StateKind::DrawPolygon => "Draw polygon",
            StateKind::DrawPlane => "Draw plane",
            StateKind::DrawZone => "Draw zone",
            StateKind::DrawTrace => "Draw trace",
            StateKind::Measure => "Measure",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One interactive tool of the board editor.
#[allow(unused_variables)]
pub trait BoardEditorState {
    fn kind(&self) -> StateKind;

    /// Current settings of the tool, passed to the host on activation.
    fn tool_info(&self) -> ToolInfo;

    /// Host actions the tool currently supports.
    fn features(&self, ctx: &BoardEditorContext) -> Features {
        Features::empty()
    }

    /// Called on activation; `false` refuses it.
    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        true
    }

    /// Called on deactivation; must abort any open transaction. `false`
    /// vetoes leaving the state.
    fn exit(&mut self, ctx: &mut BoardEditorContext) -> bool {
        true
    }

    /// Escape: cancels the placement in progress. Returns `false` if there
    /// was nothing to cancel, which lets the FSM leave the tool.
    fn process_abort_command(&mut self, ctx: &mut BoardEditorContext) -> bool {
        false
    }

    fn process_select_all(&mut self, ctx: &mut BoardEditorContext) -> bool {
        false
    }

    fn process_remove(&mut self, ctx: &mut BoardEditorContext) -> bool {
        false
    }

    fn process_rotate(&mut self, ctx: &mut BoardEditorContext, angle: Angle) -> bool {
        false
    }

    fn process_flip(&mut self, ctx: &mut BoardEditorContext, orientation: Orientation) -> bool {
        false
    }

    fn process_move(&mut self, ctx: &mut BoardEditorContext, delta: Point) -> bool {
        false
    }

    fn process_snap_to_grid(&mut self, ctx: &mut BoardEditorContext) -> bool {
        false
    }

    fn process_set_locked(&mut self, ctx: &mut BoardEditorContext, locked: bool) -> bool {
        false
    }

    /// `step` is +1/-1 to widen/narrow.
    fn process_change_line_width(&mut self, ctx: &mut BoardEditorContext, step: i32) -> bool {
        false
    }

    fn process_tool_setting(&mut self, ctx: &mut BoardEditorContext, setting: &ToolSetting) -> bool {
        false
    }

    fn process_add_device(
        &mut self,
        ctx: &mut BoardEditorContext,
        component: Uuid,
        device: Uuid,
        footprint: Uuid,
    ) -> bool {
        false
    }

    fn process_key_pressed(&mut self, ctx: &mut BoardEditorContext, e: &KeyEvent) -> bool {
        false
    }

    fn process_key_released(&mut self, ctx: &mut BoardEditorContext, e: &KeyEvent) -> bool {
        false
    }

    fn process_mouse_moved(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        false
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        false
    }

    fn process_left_released(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        false
    }

    fn process_left_double_clicked(
        &mut self,
        ctx: &mut BoardEditorContext,
        e: &SceneMouseEvent,
    ) -> bool {
        false
    }

    fn process_right_released(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        false
    }
}

/// Step applied by line width shortcuts, in nanometres
pub(crate) const LINE_WIDTH_STEP_NM: i64 = 100_000;

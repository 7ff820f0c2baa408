//! Headless script replay
//!
//! A script is a JSON array of [`ScriptStep`]s. Each step is turned into the
//! host event it stands for and fed to a [`BoardEditorFsm`] running on a
//! [`HeadlessAdapter`]. Coordinates are given in millimetres.
//!
//! ```json
//! [
//!   { "step": "tool", "tool": "DrawPolygon" },
//!   { "step": "click", "x": 0.0, "y": 0.0 },
//!   { "step": "move", "x": 10.0, "y": 0.0 },
//!   { "step": "click", "x": 10.0, "y": 0.0 },
//!   { "step": "abort" }
//! ]
//! ```

use anyhow::{bail, Context};
use pcbkit_core::{Angle, Orientation, Point};
use pcbkit_editor::{
    BoardEditorFsm, HeadlessAdapter, Key, KeyEvent, Modifiers, SceneMouseEvent,
    SharedHeadlessLog, StateKind, ToolSetting,
};
use pcbkit_model::cmd::{CmdComponentInstanceAdd, CmdNetSignalAdd};
use pcbkit_model::{ComponentInstance, NetSignal, Project};
use pcbkit_settings::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Press,
    Release,
    /// Press immediately followed by release
    #[default]
    Tap,
}

/// One host event of a replay script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Adds a net signal to the circuit as an undoable step.
    AddNet { name: String },
    /// Adds a component instance to the circuit as an undoable step.
    AddComponent {
        name: String,
        #[serde(default)]
        value: String,
    },
    /// Switches to a tool. Devices are placed with `add_device` instead.
    Tool { tool: StateKind },
    /// Starts placing the device of the component called `component`.
    AddDevice { component: String },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        ctrl: bool,
    },
    DoubleClick { x: f64, y: f64 },
    RightClick { x: f64, y: f64 },
    Key {
        key: Key,
        #[serde(default)]
        action: KeyAction,
    },
    Abort,
    SelectAll,
    Remove,
    Rotate { degrees: f64 },
    Flip { orientation: Orientation },
    Undo,
    Redo,
    SetTool { setting: ToolSetting },
}

/// Parses a script from JSON text.
pub fn parse_script(json: &str) -> anyhow::Result<Vec<ScriptStep>> {
    serde_json::from_str(json).context("Invalid replay script")
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&json)
}

/// What the board looks like after a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub tool: StateKind,
    pub undo_steps: usize,
    pub holes: usize,
    pub vias: usize,
    pub net_lines: usize,
    pub polygons: usize,
    pub planes: usize,
    pub zones: usize,
    pub stroke_texts: usize,
    pub devices: usize,
    pub errors: Vec<String>,
}

/// Drives a board editor from script steps.
pub struct Replayer {
    fsm: BoardEditorFsm,
    log: SharedHeadlessLog,
}

impl Replayer {
    pub fn new(project: Project, config: EditorConfig) -> Self {
        let adapter = HeadlessAdapter::new(config.grid.interval);
        let log = adapter.log();
        let fsm = BoardEditorFsm::new(project, Box::new(adapter), config);
        Self { fsm, log }
    }

    pub fn fsm(&self) -> &BoardEditorFsm {
        &self.fsm
    }

    pub fn log(&self) -> &SharedHeadlessLog {
        &self.log
    }

    /// Runs all steps. Unhandled events are logged and skipped; failures of
    /// the undo engine stop the replay.
    pub fn run(&mut self, steps: &[ScriptStep]) -> anyhow::Result<()> {
        for (index, step) in steps.iter().enumerate() {
            let handled = self
                .apply(step)
                .with_context(|| format!("Step {} ({:?}) failed", index + 1, step))?;
            if !handled {
                debug!("Step {} not handled: {:?}", index + 1, step);
            }
        }
        info!(
            "Replayed {} steps, {} undo steps recorded",
            steps.len(),
            self.fsm.context().undo_stack().current_index()
        );
        Ok(())
    }

    /// Applies one step and returns whether the editor handled it.
    pub fn apply(&mut self, step: &ScriptStep) -> anyhow::Result<bool> {
        let handled = match step {
            ScriptStep::AddNet { name } => {
                let cmd = CmdNetSignalAdd::new(NetSignal::new(name));
                self.fsm.context_mut().exec_cmd(cmd)?
            }
            ScriptStep::AddComponent { name, value } => {
                let cmd = CmdComponentInstanceAdd::new(ComponentInstance::new(name, value));
                self.fsm.context_mut().exec_cmd(cmd)?
            }
            ScriptStep::Tool { tool } => Self::switch_tool(&mut self.fsm, *tool)?,
            ScriptStep::AddDevice { component } => {
                let uuid = self
                    .fsm
                    .project()
                    .circuit()
                    .component_instance_by_name(component)
                    .map(|c| c.uuid)
                    .with_context(|| format!("No component called '{}'", component))?;
                self.fsm.process_add_device(uuid, Uuid::new_v4(), Uuid::new_v4())
            }
            ScriptStep::Move { x, y, shift } => {
                let pos = Self::place_cursor(&self.log, *x, *y);
                let modifiers = if *shift {
                    Modifiers::shift()
                } else {
                    Modifiers::none()
                };
                self.fsm
                    .process_mouse_moved(&SceneMouseEvent::new(pos).with_modifiers(modifiers))
            }
            ScriptStep::Click { x, y, ctrl } => {
                let pos = Self::place_cursor(&self.log, *x, *y);
                let modifiers = Modifiers {
                    control: *ctrl,
                    ..Modifiers::none()
                };
                let e = SceneMouseEvent::new(pos).with_modifiers(modifiers);
                let pressed = self.fsm.process_left_pressed(&e);
                let released = self.fsm.process_left_released(&e);
                pressed || released
            }
            ScriptStep::DoubleClick { x, y } => {
                let pos = Self::place_cursor(&self.log, *x, *y);
                self.fsm.process_left_double_clicked(&SceneMouseEvent::new(pos))
            }
            ScriptStep::RightClick { x, y } => {
                let pos = Self::place_cursor(&self.log, *x, *y);
                self.fsm.process_right_released(&SceneMouseEvent::new(pos))
            }
            ScriptStep::Key { key, action } => {
                let e = KeyEvent::new(*key);
                match action {
                    KeyAction::Press => self.fsm.process_key_pressed(&e),
                    KeyAction::Release => self.fsm.process_key_released(&e),
                    KeyAction::Tap => {
                        let pressed = self.fsm.process_key_pressed(&e);
                        self.fsm.process_key_released(&e) || pressed
                    }
                }
            }
            ScriptStep::Abort => self.fsm.process_abort_command(),
            ScriptStep::SelectAll => self.fsm.process_select_all(),
            ScriptStep::Remove => self.fsm.process_remove(),
            ScriptStep::Rotate { degrees } => self.fsm.process_rotate(Angle::from_deg(*degrees)),
            ScriptStep::Flip { orientation } => self.fsm.process_flip(*orientation),
            ScriptStep::Undo => self.fsm.process_undo()?,
            ScriptStep::Redo => self.fsm.process_redo()?,
            ScriptStep::SetTool { setting } => self.fsm.process_tool_setting(setting),
        };
        Ok(handled)
    }

    pub fn summary(&self) -> BoardSummary {
        let board = self.fsm.project().board();
        BoardSummary {
            tool: self.fsm.current_state(),
            undo_steps: self.fsm.context().undo_stack().current_index(),
            holes: board.holes().len(),
            vias: board.vias().len(),
            net_lines: board.net_lines().len(),
            polygons: board.polygons().len(),
            planes: board.planes().len(),
            zones: board.zones().len(),
            stroke_texts: board.stroke_texts().len(),
            devices: board.devices().len(),
            errors: self.log.borrow().errors.clone(),
        }
    }

    fn switch_tool(fsm: &mut BoardEditorFsm, tool: StateKind) -> anyhow::Result<bool> {
        let switched = match tool {
            StateKind::Idle => bail!("Idle is not a tool"),
            StateKind::AddDevice => bail!("Devices are placed with the add_device step"),
            StateKind::Select => fsm.process_select(),
            StateKind::AddHole => fsm.process_add_hole(),
            StateKind::AddVia => fsm.process_add_via(),
            StateKind::AddStrokeText => fsm.process_add_stroke_text(),
            StateKind::DrawPolygon => fsm.process_draw_polygon(),
            StateKind::DrawPlane => fsm.process_draw_plane(),
            StateKind::DrawZone => fsm.process_draw_zone(),
            StateKind::DrawTrace => fsm.process_draw_trace(),
            StateKind::Measure => fsm.process_measure(),
        };
        if !switched {
            warn!("Could not switch to {}", tool);
        }
        Ok(switched)
    }

    /// Moves the headless mouse cursor; tools read it when they are entered.
    fn place_cursor(log: &SharedHeadlessLog, x: f64, y: f64) -> Point {
        let pos = Point::from_mm(x, y);
        log.borrow_mut().cursor_pos = pos;
        pos
    }
}

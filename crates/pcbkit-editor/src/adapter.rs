//! Host adapter interface
//!
//! Editor states never talk to a UI toolkit directly. Everything visible
//! (cursor, ruler, status bar, enabled actions, per-tool toolbars) goes
//! through [`BoardEditorAdapter`], which the host implements.

use pcbkit_core::{Error, Layer, Point, PositiveLength, UnsignedLength};
use pcbkit_model::{ItemRef, ZoneRules};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::{BitOr, BitOrAssign};
use uuid::Uuid;

/// Mouse cursor requested for the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorShape {
    Arrow,
    Cross,
    PointingHand,
    ClosedHand,
    SizeAll,
}

/// Host actions the active tool supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Features(u32);

impl Features {
    pub const SELECT: Features = Features(1 << 0);
    pub const CUT: Features = Features(1 << 1);
    pub const COPY: Features = Features(1 << 2);
    pub const PASTE: Features = Features(1 << 3);
    pub const REMOVE: Features = Features(1 << 4);
    pub const ROTATE: Features = Features(1 << 5);
    pub const MIRROR: Features = Features(1 << 6);
    pub const SNAP_TO_GRID: Features = Features(1 << 7);
    pub const LOCK: Features = Features(1 << 8);
    pub const MOVE: Features = Features(1 << 9);
    pub const LINE_WIDTH: Features = Features(1 << 10);
    pub const ABORT: Features = Features(1 << 11);

    pub const fn empty() -> Self {
        Features(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Features) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Features) {
        self.0 |= other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Features {
    type Output = Features;
    fn bitor(self, rhs: Features) -> Features {
        Features(self.0 | rhs.0)
    }
}

impl BitOrAssign for Features {
    fn bitor_assign(&mut self, rhs: Features) {
        self.0 |= rhs.0;
    }
}

/// Per-tool information handed to the host when a tool becomes active.
///
/// The host matches on the variant to show the matching toolbar; the values
/// are the tool's current settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ToolInfo {
    Select,
    AddHole {
        diameter: PositiveLength,
    },
    AddVia {
        size: PositiveLength,
        drill: PositiveLength,
        /// `None` picks the net automatically
        net_signal: Option<Uuid>,
    },
    AddStrokeText {
        layer: Layer,
        text: String,
        height: PositiveLength,
        mirrored: bool,
    },
    AddDevice {
        /// Component being placed, if any
        component: Option<Uuid>,
    },
    DrawPolygon {
        layer: Layer,
        line_width: UnsignedLength,
        filled: bool,
    },
    DrawPlane {
        layer: Layer,
        net_signal: Option<Uuid>,
    },
    DrawZone {
        layers: BTreeSet<Layer>,
        rules: ZoneRules,
    },
    DrawTrace {
        layer: Layer,
        width: PositiveLength,
    },
    Measure,
}

/// Keyboard modifiers held during an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub control: bool,
    #[serde(default)]
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// Mouse event already mapped to scene coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneMouseEvent {
    pub scene_pos: Point,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl SceneMouseEvent {
    pub fn new(scene_pos: Point) -> Self {
        Self {
            scene_pos,
            modifiers: Modifiers::none(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Shift,
    Control,
    Alt,
    Escape,
    Space,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::none(),
        }
    }
}

/// A value changed in a tool's toolbar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolSetting {
    Layer(Layer),
    LineWidth(UnsignedLength),
    Filled(bool),
    Text(String),
    Height(PositiveLength),
    Mirrored(bool),
    Diameter(PositiveLength),
    ViaSize(PositiveLength),
    ViaDrill(PositiveLength),
    /// `None` selects the net automatically
    NetSignal(Option<Uuid>),
    ZoneLayers(BTreeSet<Layer>),
    ZoneRules(ZoneRules),
    TraceWidth(PositiveLength),
}

/// Selection state of the host's graphics scene
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphicsScene {
    selection: Vec<ItemRef>,
    selection_rect: Option<(Point, Point)>,
}

impl GraphicsScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &[ItemRef] {
        &self.selection
    }

    pub fn is_selected(&self, item: &ItemRef) -> bool {
        self.selection.contains(item)
    }

    pub fn select(&mut self, item: ItemRef) {
        if !self.is_selected(&item) {
            self.selection.push(item);
        }
    }

    pub fn deselect(&mut self, item: &ItemRef) {
        self.selection.retain(|i| i != item);
    }

    pub fn toggle(&mut self, item: ItemRef) {
        if self.is_selected(&item) {
            self.deselect(&item);
        } else {
            self.selection.push(item);
        }
    }

    pub fn set_selection(&mut self, items: Vec<ItemRef>) {
        self.selection = items;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection_rect(&self) -> Option<(Point, Point)> {
        self.selection_rect
    }

    pub fn set_selection_rect(&mut self, rect: Option<(Point, Point)>) {
        self.selection_rect = rect;
    }
}

/// Services the host provides to the board editor.
pub trait BoardEditorAdapter {
    /// The scene of the active board, if a board is shown.
    fn scene(&self) -> Option<&GraphicsScene>;

    fn scene_mut(&mut self) -> Option<&mut GraphicsScene>;

    fn grid_interval(&self) -> PositiveLength;

    fn set_view_cursor(&mut self, shape: Option<CursorShape>);

    fn set_view_gray_out(&mut self, gray_out: bool);

    fn set_view_info_box_text(&mut self, text: &str);

    /// Shows a measurement ruler between two points, or hides it.
    fn set_view_ruler(&mut self, ruler: Option<(Point, Point)>);

    fn set_scene_cursor(&mut self, pos: Point, crosshair: bool, circle: bool);

    fn map_global_pos_to_scene_pos(&self, global: Point) -> Point;

    /// Current cursor position in global (screen) coordinates.
    fn global_cursor_pos(&self) -> Point;

    /// A timeout of 0 keeps the message until it is replaced.
    fn set_status_bar_message(&mut self, message: &str, timeout_ms: u32);

    fn set_features(&mut self, features: Features);

    fn tool_enter(&mut self, tool: &ToolInfo);

    fn tool_leave(&mut self);

    /// Shows a non-fatal error to the user.
    fn report_error(&mut self, title: &str, error: &Error);
}
